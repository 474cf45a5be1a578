//! Dialog windows for user interaction.
//!
//! - `escape`: Confirmation dialog whose cancel button runs away

pub mod escape;
