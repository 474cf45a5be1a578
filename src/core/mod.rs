//! Toolkit-independent dialog logic.

pub mod evasion;
pub mod geometry;
pub mod layout;
pub mod random;

pub use evasion::{ButtonId, Effect, Evader, Response, Task};
pub use geometry::{Point, Rect, Size};
