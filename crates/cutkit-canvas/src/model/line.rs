//! Straight line segment between two endpoints.

use cutkit_core::Point;

/// A line defined by two endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub start: Point,
    pub end: Point,
}

impl Line {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            start: Point::new(x1, y1),
            end: Point::new(x2, y2),
        }
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    pub fn midpoint(&self) -> Point {
        self.start.midpoint(&self.end)
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.start = self.start.translated(dx, dy);
        self.end = self.end.translated(dx, dy);
    }

    /// Repositions an endpoint: 0 is the start, 1 the end.
    pub fn set_point(&mut self, index: usize, p: Point) {
        match index {
            0 => self.start = p,
            1 => self.end = p,
            _ => {}
        }
    }

    pub fn contains_point(&self, point: &Point, tolerance: f64) -> bool {
        let to_start = self.start.distance_to(point);
        let to_end = self.end.distance_to(point);
        (to_start + to_end - self.length()).abs() <= tolerance
    }
}
