//! Grouping of child shapes treated as one unit.

use cutkit_core::Point;

use super::Shape;

/// An ordered group of child shapes.
#[derive(Debug, Clone, Default)]
pub struct Compound {
    children: Vec<Shape>,
}

impl Compound {
    pub fn new(children: Vec<Shape>) -> Self {
        Self { children }
    }

    pub fn children(&self) -> &[Shape] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [Shape] {
        &mut self.children
    }

    pub fn push(&mut self, shape: Shape) {
        self.children.push(shape);
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Centroid of the children's reference points.
    pub fn reference_point(&self) -> Point {
        if self.children.is_empty() {
            return Point::new(0.0, 0.0);
        }
        let n = self.children.len() as f64;
        let (sx, sy) = self
            .children
            .iter()
            .map(|c| c.reference_point())
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        Point::new(sx / n, sy / n)
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        for child in &mut self.children {
            child.translate(dx, dy);
        }
    }

    pub fn contains_point(&self, p: &Point, tolerance: f64) -> bool {
        self.children
            .iter()
            .any(|c| c.contains_point(p.x, p.y, tolerance))
    }
}
