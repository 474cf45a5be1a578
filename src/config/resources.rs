//! GResource paths compiled in by `build.rs`.

pub const CSS: &str = "/io/github/escape_dialog/style.css";

pub mod dialogs {
    pub const ESCAPE: &str = "/io/github/escape_dialog/ui/escape_dialog.ui";
}
