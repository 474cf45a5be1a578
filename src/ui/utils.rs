//! UI utility functions for widget extraction and measuring.

use crate::core::Size;
use gtk4::glib;
use gtk4::prelude::*;
use gtk4::{Builder, Orientation};

/// Helper to extract widgets from builder with consistent error handling.
pub fn extract_widget<T: IsA<glib::Object>>(builder: &Builder, name: &str) -> T {
    builder
        .object(name)
        .unwrap_or_else(|| panic!("Failed to get widget with id '{}'", name))
}

/// Natural size of a widget, width first, height for that width.
pub fn natural_size(widget: &impl IsA<gtk4::Widget>) -> Size {
    let (_, width, _, _) = widget.measure(Orientation::Horizontal, -1);
    let (_, height, _, _) = widget.measure(Orientation::Vertical, width);
    Size::new(width, height)
}
