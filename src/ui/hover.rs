//! Pointer crossing notifications for plain GTK widgets.

use crate::core::Point;
use gtk4::prelude::*;
use gtk4::EventControllerMotion;

fn to_point(x: f64, y: f64) -> Point {
    Point::new(x.round() as i32, y.round() as i32)
}

/// Call `on_enter` with the entry point local to `widget`, and `on_leave`
/// when the pointer leaves it.
pub fn connect_hover<E, L>(widget: &impl IsA<gtk4::Widget>, on_enter: E, on_leave: L)
where
    E: Fn(Point) + 'static,
    L: Fn() + 'static,
{
    let motion = EventControllerMotion::new();
    motion.connect_enter(move |_, x, y| on_enter(to_point(x, y)));
    motion.connect_leave(move |_| on_leave());
    widget.add_controller(motion);
}

/// Report the pointer position over `widget`, or `None` once it has left.
pub fn track_pointer<F>(widget: &impl IsA<gtk4::Widget>, on_change: F)
where
    F: Fn(Option<Point>) + 'static,
{
    let on_change = std::rc::Rc::new(on_change);
    let motion = EventControllerMotion::new();

    let on_move = on_change.clone();
    motion.connect_enter(move |_, x, y| on_move(Some(to_point(x, y))));
    let on_move = on_change.clone();
    motion.connect_motion(move |_, x, y| on_move(Some(to_point(x, y))));
    motion.connect_leave(move |_| on_change(None));

    widget.add_controller(motion);
}
