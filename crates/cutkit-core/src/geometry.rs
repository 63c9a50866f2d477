//! Geometry primitives shared across the workspace.

use serde::{Deserialize, Serialize};

/// A 2D point in image data coordinates (pixels, y down).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Midpoint between this point and another.
    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Returns this point shifted by (dx, dy).
    pub fn translated(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

/// Walks the digital line from (x1, y1) to (x2, y2) using Bresenham's
/// algorithm and returns every visited pixel coordinate, inclusive of both
/// endpoints, ordered from the first endpoint to the second.
///
/// The traversal is deterministic: the same endpoints always produce the
/// same sequence, and reversing the endpoints produces the reversed walk of
/// the same length.
pub fn digital_line(x1: i32, y1: i32, x2: i32, y2: i32) -> Vec<(i32, i32)> {
    let dx = (x2 - x1).abs();
    let dy = -(y2 - y1).abs();
    let sx = if x1 < x2 { 1 } else { -1 };
    let sy = if y1 < y2 { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (x1, y1);

    let mut points = Vec::with_capacity((dx.max(-dy) + 1) as usize);
    loop {
        points.push((x, y));
        if x == x2 && y == y2 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance_to(&b), 5.0);
    }

    #[test]
    fn test_midpoint() {
        let a = Point::new(0.0, 20.0);
        let b = Point::new(99.0, 20.0);
        let m = a.midpoint(&b);
        assert_eq!(m, Point::new(49.5, 20.0));
    }

    #[test]
    fn test_digital_line_horizontal_inclusive() {
        let pts = digital_line(0, 0, 4, 0);
        assert_eq!(pts, vec![(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)]);
    }

    #[test]
    fn test_digital_line_single_pixel() {
        assert_eq!(digital_line(7, 3, 7, 3), vec![(7, 3)]);
    }

    #[test]
    fn test_digital_line_diagonal() {
        let pts = digital_line(0, 0, 3, 3);
        assert_eq!(pts, vec![(0, 0), (1, 1), (2, 2), (3, 3)]);
    }

    #[test]
    fn test_digital_line_reversed_endpoints() {
        let fwd = digital_line(0, 0, 5, 2);
        let rev = digital_line(5, 2, 0, 0);
        assert_eq!(fwd.len(), rev.len());
        assert_eq!(fwd.first(), Some(&(0, 0)));
        assert_eq!(rev.first(), Some(&(5, 2)));
        assert_eq!(fwd.last(), Some(&(5, 2)));
        assert_eq!(rev.last(), Some(&(0, 0)));
    }
}
