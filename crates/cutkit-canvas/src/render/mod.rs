//! Render context and pluggable drawing backends.
//!
//! A [`RenderContext`] derives pen, brush, and font state from shape
//! styles and issues primitive calls against a [`Backend`]. Backends that
//! cannot stroke curves natively report so through
//! [`Backend::supports_curves`] and receive flattened polylines instead.

mod pixel;
mod record;
mod skia;

pub use pixel::PixelBackend;
pub use record::{DrawOp, RecordingBackend};
pub use skia::SkiaBackend;

use cutkit_core::constants::{BEZIER_FLATTEN_STEPS, DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE};
use cutkit_core::{Color, Point};

use crate::model::{LineStyle, Shape, ShapeKind};

/// Stroke parameters derived from a shape's style.
#[derive(Debug, Clone, PartialEq)]
pub struct Pen {
    pub color: Color,
    pub alpha: f32,
    pub width: f32,
    pub style: LineStyle,
}

impl Default for Pen {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            alpha: 1.0,
            width: 1.0,
            style: LineStyle::Solid,
        }
    }
}

/// Fill parameters derived from a shape's style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brush {
    pub color: Color,
    pub alpha: f32,
}

/// Font parameters for text drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct TextFont {
    pub family: String,
    pub size: f64,
    pub color: Color,
    pub alpha: f32,
}

/// One cubic bezier span continuing from the current point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicSegment {
    pub c1: Point,
    pub c2: Point,
    pub to: Point,
}

/// Drawing surface abstraction.
///
/// Coordinates arrive in data space; backends apply the view transform
/// set through [`Backend::set_view_transform`] themselves.
pub trait Backend {
    /// Whether the backend strokes cubic beziers natively. Backends that
    /// return `false` receive pre-flattened polylines.
    fn supports_curves(&self) -> bool {
        false
    }

    /// Sets the data-to-surface transform. The default keeps the identity
    /// mapping, which suits backends recording data-space geometry.
    fn set_view_transform(&mut self, _zoom: f64, _dx: f64, _dy: f64) {}

    fn draw_line(&mut self, from: Point, to: Point, pen: &Pen);

    /// Strokes an open polyline.
    fn draw_path(&mut self, points: &[Point], pen: &Pen);

    /// Strokes a closed polygon, filling it when a brush is given.
    fn draw_polygon(&mut self, points: &[Point], pen: &Pen, brush: Option<&Brush>);

    fn draw_circle(&mut self, center: Point, radius: f64, pen: &Pen, brush: Option<&Brush>);

    /// Strokes a chain of cubic bezier spans, filling the enclosed region
    /// when a brush is given. The default flattens to line segments.
    fn draw_curve_path(
        &mut self,
        start: Point,
        segments: &[CubicSegment],
        pen: &Pen,
        brush: Option<&Brush>,
    ) {
        let flat = flatten_curve_path(start, segments, BEZIER_FLATTEN_STEPS);
        if brush.is_some() {
            self.draw_polygon(&flat, pen, brush);
        } else {
            self.draw_path(&flat, pen);
        }
    }

    /// Draws text with its baseline origin at `position`.
    fn draw_text(&mut self, position: Point, text: &str, font: &TextFont);

    /// Width and height the text would occupy, in pixels.
    fn text_extents(&mut self, text: &str, font: &TextFont) -> (f64, f64);
}

/// Evaluates a cubic bezier with the given control points at `t`.
pub fn cubic_point(p0: Point, p1: Point, p2: Point, p3: Point, t: f64) -> Point {
    let u = 1.0 - t;
    let b0 = u * u * u;
    let b1 = 3.0 * u * u * t;
    let b2 = 3.0 * u * t * t;
    let b3 = t * t * t;
    Point::new(
        b0 * p0.x + b1 * p1.x + b2 * p2.x + b3 * p3.x,
        b0 * p0.y + b1 * p1.y + b2 * p2.y + b3 * p3.y,
    )
}

/// Flattens a chain of cubic spans into a polyline that starts at `start`
/// and ends exactly on the final span's endpoint.
pub fn flatten_curve_path(start: Point, segments: &[CubicSegment], steps: usize) -> Vec<Point> {
    let steps = steps.max(1);
    let mut out = Vec::with_capacity(segments.len() * steps + 1);
    out.push(start);
    let mut current = start;
    for seg in segments {
        for i in 1..=steps {
            let t = i as f64 / steps as f64;
            out.push(cubic_point(current, seg.c1, seg.c2, seg.to, t));
        }
        current = seg.to;
    }
    out
}

/// Quarter-arc control point offset for approximating circles with cubics.
const KAPPA: f64 = 0.552_284_749_830_793_6;

/// Control points for an ellipse as four cubic bezier spans.
///
/// The layout is a start point on the positive x axis followed by four
/// `(c1, c2, end)` triples; the last point closes back onto the first.
pub fn ellipse_bezier_points(center: Point, rx: f64, ry: f64) -> [Point; 13] {
    let (cx, cy) = (center.x, center.y);
    let ox = rx * KAPPA;
    let oy = ry * KAPPA;
    [
        Point::new(cx + rx, cy),
        Point::new(cx + rx, cy + oy),
        Point::new(cx + ox, cy + ry),
        Point::new(cx, cy + ry),
        Point::new(cx - ox, cy + ry),
        Point::new(cx - rx, cy + oy),
        Point::new(cx - rx, cy),
        Point::new(cx - rx, cy - oy),
        Point::new(cx - ox, cy - ry),
        Point::new(cx, cy - ry),
        Point::new(cx + ox, cy - ry),
        Point::new(cx + rx, cy - oy),
        Point::new(cx + rx, cy),
    ]
}

/// Per-shape drawing state layered over a backend.
pub struct RenderContext<'a, B: Backend> {
    backend: &'a mut B,
    pen: Pen,
    brush: Option<Brush>,
    font: Option<TextFont>,
}

impl<'a, B: Backend> RenderContext<'a, B> {
    pub fn new(backend: &'a mut B) -> Self {
        Self {
            backend,
            pen: Pen::default(),
            brush: None,
            font: None,
        }
    }

    pub fn set_line(&mut self, color: Color, alpha: f32, width: f32, style: LineStyle) {
        self.pen = Pen {
            color,
            alpha,
            width,
            style,
        };
    }

    pub fn set_fill(&mut self, fill: Option<(Color, f32)>) {
        self.brush = fill.map(|(color, alpha)| Brush { color, alpha });
    }

    pub fn set_font(&mut self, family: &str, size: f64, color: Color, alpha: f32) {
        self.font = Some(TextFont {
            family: family.to_string(),
            size,
            color,
            alpha,
        });
    }

    /// Derives the pen from a shape's stroke attributes.
    pub fn set_line_from_shape(&mut self, shape: &Shape) {
        let s = &shape.style;
        self.set_line(s.color, s.alpha, s.line_width, s.line_style);
    }

    /// Derives the brush from a shape's fill attributes. The fill color
    /// falls back to the stroke color and the fill alpha to the stroke
    /// alpha when not set explicitly.
    pub fn set_fill_from_shape(&mut self, shape: &Shape) {
        let s = &shape.style;
        self.brush = s.fill.then(|| Brush {
            color: s.fill_color.unwrap_or(s.color),
            alpha: s.fill_alpha.unwrap_or(s.alpha),
        });
    }

    /// Derives the font from a text shape; other kinds leave it untouched.
    pub fn set_font_from_shape(&mut self, shape: &Shape) {
        if let ShapeKind::Text(t) = &shape.kind {
            self.set_font(&t.font_family, t.font_size, shape.style.color, shape.style.alpha);
        }
    }

    /// Derives pen, brush, and font state from a shape in one call.
    /// Disabled aspects are reset rather than left stale.
    pub fn initialize_from_shape(&mut self, shape: &Shape, line: bool, fill: bool, font: bool) {
        if line {
            self.set_line_from_shape(shape);
        }
        if fill {
            self.set_fill_from_shape(shape);
        } else {
            self.brush = None;
        }
        if font {
            self.set_font_from_shape(shape);
        }
    }

    pub fn pen(&self) -> &Pen {
        &self.pen
    }

    pub fn brush(&self) -> Option<&Brush> {
        self.brush.as_ref()
    }

    pub fn draw_line(&mut self, from: Point, to: Point) {
        self.backend.draw_line(from, to, &self.pen);
    }

    pub fn draw_path(&mut self, points: &[Point]) {
        self.backend.draw_path(points, &self.pen);
    }

    pub fn draw_polygon(&mut self, points: &[Point]) {
        self.backend.draw_polygon(points, &self.pen, self.brush.as_ref());
    }

    pub fn draw_circle(&mut self, center: Point, radius: f64) {
        self.backend
            .draw_circle(center, radius, &self.pen, self.brush.as_ref());
    }

    /// Strokes a single cubic bezier given as start, two control points,
    /// and end.
    pub fn draw_bezier_curve(&mut self, points: &[Point; 4]) {
        let segment = [CubicSegment {
            c1: points[1],
            c2: points[2],
            to: points[3],
        }];
        if self.backend.supports_curves() {
            self.backend.draw_curve_path(points[0], &segment, &self.pen, None);
        } else {
            let flat = flatten_curve_path(points[0], &segment, BEZIER_FLATTEN_STEPS);
            self.backend.draw_path(&flat, &self.pen);
        }
    }

    /// Strokes and optionally fills an ellipse described by the thirteen
    /// control points of [`ellipse_bezier_points`].
    pub fn draw_ellipse_bezier(&mut self, points: &[Point; 13]) {
        let segments = [
            CubicSegment {
                c1: points[1],
                c2: points[2],
                to: points[3],
            },
            CubicSegment {
                c1: points[4],
                c2: points[5],
                to: points[6],
            },
            CubicSegment {
                c1: points[7],
                c2: points[8],
                to: points[9],
            },
            CubicSegment {
                c1: points[10],
                c2: points[11],
                to: points[12],
            },
        ];
        if self.backend.supports_curves() {
            self.backend
                .draw_curve_path(points[0], &segments, &self.pen, self.brush.as_ref());
        } else {
            let flat = flatten_curve_path(points[0], &segments, BEZIER_FLATTEN_STEPS);
            self.backend
                .draw_polygon(&flat, &self.pen, self.brush.as_ref());
        }
    }

    pub fn draw_text(&mut self, position: Point, text: &str) {
        match &self.font {
            Some(font) => self.backend.draw_text(position, text, font),
            None => {
                let font = self.fallback_font();
                self.backend.draw_text(position, text, &font);
            }
        }
    }

    pub fn text_extents(&mut self, text: &str) -> (f64, f64) {
        match &self.font {
            Some(font) => self.backend.text_extents(text, font),
            None => {
                let font = self.fallback_font();
                self.backend.text_extents(text, &font)
            }
        }
    }

    fn fallback_font(&self) -> TextFont {
        TextFont {
            family: DEFAULT_FONT_FAMILY.to_string(),
            size: DEFAULT_FONT_SIZE,
            color: self.pen.color,
            alpha: self.pen.alpha,
        }
    }
}
