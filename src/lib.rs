//! A confirmation dialog whose cancel button runs away from the pointer and
//! now and then trades places with the confirm button.
//!
//! The evasion rules live in [`core`] and have no GTK dependency; [`ui`]
//! binds them to GTK4 and libadwaita widgets.

pub mod config;
pub mod core;
pub mod ui;

pub use crate::core::Response;
pub use crate::ui::dialogs::escape::{show_escape_confirmation, EscapeDialog};
