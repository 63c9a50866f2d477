//! Text labels, optionally anchored to another shape.

use std::collections::HashMap;

use cutkit_core::constants::{DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE};
use cutkit_core::Point;

use super::ShapeId;

/// A text label at a data-space position.
///
/// When `anchor` is set the label tracks the referenced shape: its drawn
/// position becomes the anchor's reference point plus `anchor_offset`,
/// and the stored `x`/`y` only serve as a fallback if the anchor cannot
/// be resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub font_family: String,
    pub font_size: f64,
    pub anchor: Option<ShapeId>,
    pub anchor_offset: (f64, f64),
}

impl Text {
    pub fn new(x: f64, y: f64, text: impl Into<String>) -> Self {
        Self {
            x,
            y,
            text: text.into(),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            anchor: None,
            anchor_offset: (0.0, 0.0),
        }
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }

    /// Drawn position given the resolved anchor reference points.
    pub fn resolve_position(&self, anchors: &HashMap<ShapeId, Point>) -> Point {
        match self.anchor.and_then(|id| anchors.get(&id)) {
            Some(rp) => Point::new(rp.x + self.anchor_offset.0, rp.y + self.anchor_offset.1),
            None => Point::new(self.x, self.y),
        }
    }

    /// Coarse hit test against a box sized from average glyph advance.
    /// Exact extents would need a resolved font.
    pub fn contains_point(&self, p: &Point, tolerance: f64) -> bool {
        let width = self.text.chars().count() as f64 * self.font_size * 0.6;
        p.x >= self.x - tolerance
            && p.x <= self.x + width + tolerance
            && p.y >= self.y - self.font_size - tolerance
            && p.y <= self.y + tolerance
    }
}
