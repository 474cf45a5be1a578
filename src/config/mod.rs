//! Application configuration: user settings and compiled-in resources.

pub mod resources;
pub mod user;

pub const APP_ID: &str = "io.github.escape_dialog";
