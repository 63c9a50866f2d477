//! Backend that records draw calls instead of rasterizing.
//!
//! Used by tests to assert on the exact primitives a scene produces.

use cutkit_core::Point;

use super::{Backend, Brush, CubicSegment, Pen, TextFont};

/// One recorded primitive call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Line {
        from: Point,
        to: Point,
        pen: Pen,
    },
    Path {
        points: Vec<Point>,
        pen: Pen,
    },
    Polygon {
        points: Vec<Point>,
        pen: Pen,
        filled: bool,
    },
    Circle {
        center: Point,
        radius: f64,
        pen: Pen,
        filled: bool,
    },
    CurvePath {
        start: Point,
        segments: Vec<CubicSegment>,
        pen: Pen,
        filled: bool,
    },
    Text {
        position: Point,
        text: String,
        font: TextFont,
    },
}

/// Recording backend with configurable curve support.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    ops: Vec<DrawOp>,
    curves: bool,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A recording backend that advertises native curve support.
    pub fn with_curves() -> Self {
        Self {
            ops: Vec::new(),
            curves: true,
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }
}

impl Backend for RecordingBackend {
    fn supports_curves(&self) -> bool {
        self.curves
    }

    fn draw_line(&mut self, from: Point, to: Point, pen: &Pen) {
        self.ops.push(DrawOp::Line {
            from,
            to,
            pen: pen.clone(),
        });
    }

    fn draw_path(&mut self, points: &[Point], pen: &Pen) {
        self.ops.push(DrawOp::Path {
            points: points.to_vec(),
            pen: pen.clone(),
        });
    }

    fn draw_polygon(&mut self, points: &[Point], pen: &Pen, brush: Option<&Brush>) {
        self.ops.push(DrawOp::Polygon {
            points: points.to_vec(),
            pen: pen.clone(),
            filled: brush.is_some(),
        });
    }

    fn draw_circle(&mut self, center: Point, radius: f64, pen: &Pen, brush: Option<&Brush>) {
        self.ops.push(DrawOp::Circle {
            center,
            radius,
            pen: pen.clone(),
            filled: brush.is_some(),
        });
    }

    fn draw_curve_path(
        &mut self,
        start: Point,
        segments: &[CubicSegment],
        pen: &Pen,
        brush: Option<&Brush>,
    ) {
        self.ops.push(DrawOp::CurvePath {
            start,
            segments: segments.to_vec(),
            pen: pen.clone(),
            filled: brush.is_some(),
        });
    }

    fn draw_text(&mut self, position: Point, text: &str, font: &TextFont) {
        self.ops.push(DrawOp::Text {
            position,
            text: text.to_string(),
            font: font.clone(),
        });
    }

    fn text_extents(&mut self, text: &str, font: &TextFont) -> (f64, f64) {
        (text.chars().count() as f64 * font.size * 0.6, font.size)
    }
}
