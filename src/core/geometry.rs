//! Integer geometry used by the evasion model.
//!
//! Coordinates are dialog-local pixels with the origin at the top-left corner.
//! Rectangles are half-open: `right()` and `bottom()` are the first column and
//! row outside the rectangle.

use std::ops::{Add, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn manhattan_length(self) -> i32 {
        self.x.abs() + self.y.abs()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const fn new(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    pub fn left(&self) -> i32 {
        self.origin.x
    }

    pub fn top(&self) -> i32 {
        self.origin.y
    }

    pub fn right(&self) -> i32 {
        self.origin.x + self.size.width
    }

    pub fn bottom(&self) -> i32 {
        self.origin.y + self.size.height
    }

    pub fn spans_x(&self, x: i32) -> bool {
        x >= self.left() && x < self.right()
    }

    pub fn spans_y(&self, y: i32) -> bool {
        y >= self.top() && y < self.bottom()
    }

    pub fn contains(&self, point: Point) -> bool {
        self.spans_x(point.x) && self.spans_y(point.y)
    }

    /// Same size, moved to `origin`.
    pub fn moved_to(&self, origin: Point) -> Rect {
        Rect::new(origin, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_are_half_open() {
        let rect = Rect::new(Point::new(10, 20), Size::new(30, 40));
        assert_eq!(rect.right(), 40);
        assert_eq!(rect.bottom(), 60);
        assert!(rect.contains(Point::new(10, 20)));
        assert!(rect.contains(Point::new(39, 59)));
        assert!(!rect.contains(Point::new(40, 30)));
        assert!(!rect.contains(Point::new(20, 60)));
    }

    #[test]
    fn manhattan_length_ignores_direction() {
        let delta = Point::new(3, 4) - Point::new(10, -2);
        assert_eq!(delta, Point::new(-7, 6));
        assert_eq!(delta.manhattan_length(), 13);
    }
}
