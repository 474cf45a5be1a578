//! GTK front end.

pub mod app;
pub mod dialogs;
pub mod hover;
pub mod utils;
