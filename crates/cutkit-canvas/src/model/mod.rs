//! Shape model for the annotation canvas.
//!
//! Shapes are plain data. Rendering lives in [`crate::render`] and
//! interaction in [`crate::canvas`]; everything here can be built,
//! inspected, and mutated without a display surface.

mod compound;
mod line;
mod path;
mod text;

pub use compound::Compound;
pub use line::Line;
pub use path::PathShape;
pub use text::Text;

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use cutkit_core::{Color, Point};
use smallvec::SmallVec;

use crate::canvas::Canvas;

/// Identity of a shape, stable for the shape's whole lifetime.
///
/// Used by anchored text labels to track the shape they follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeId(u64);

static NEXT_SHAPE_ID: AtomicU64 = AtomicU64::new(1);

impl ShapeId {
    fn next() -> Self {
        ShapeId(NEXT_SHAPE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Typed metadata value attached to a shape.
#[derive(Debug, Clone, PartialEq)]
pub enum MetaValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
}

/// Stroke pattern for outlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineStyle {
    #[default]
    Solid,
    Dash,
}

/// Visual attributes shared by every shape kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub color: Color,
    pub alpha: f32,
    pub line_width: f32,
    pub line_style: LineStyle,
    pub fill: bool,
    /// Fill color; falls back to `color` when unset.
    pub fill_color: Option<Color>,
    /// Fill opacity; falls back to `alpha` when unset.
    pub fill_alpha: Option<f32>,
    /// Whether vertex caps are drawn on line-bearing shapes.
    pub show_cap: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            alpha: 1.0,
            line_width: 1.0,
            line_style: LineStyle::Solid,
            fill: false,
            fill_color: None,
            fill_alpha: None,
            show_cap: true,
        }
    }
}

/// Geometry payload of a shape.
#[derive(Debug, Clone)]
pub enum ShapeKind {
    Line(Line),
    Path(PathShape),
    FreePath(PathShape),
    Text(Text),
    Compound(Compound),
    /// An embedded canvas acting as an independent layer.
    Canvas(Box<Canvas>),
}

impl ShapeKind {
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Line(_) => "line",
            ShapeKind::Path(_) => "path",
            ShapeKind::FreePath(_) => "freepath",
            ShapeKind::Text(_) => "text",
            ShapeKind::Compound(_) => "compound",
            ShapeKind::Canvas(_) => "canvas",
        }
    }
}

/// A drawable annotation: geometry plus style plus metadata.
#[derive(Debug, Clone)]
pub struct Shape {
    id: ShapeId,
    pub style: Style,
    data: HashMap<String, MetaValue>,
    pub kind: ShapeKind,
}

impl Shape {
    fn from_kind(kind: ShapeKind) -> Self {
        Self {
            id: ShapeId::next(),
            style: Style::default(),
            data: HashMap::new(),
            kind,
        }
    }

    /// Creates a line between two endpoints.
    pub fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::from_kind(ShapeKind::Line(Line::new(x1, y1, x2, y2)))
    }

    /// Creates an open polyline through the given vertices.
    pub fn path(points: Vec<Point>) -> Self {
        Self::from_kind(ShapeKind::Path(PathShape::new(points)))
    }

    /// Creates a freehand polyline through the given vertices.
    pub fn free_path(points: Vec<Point>) -> Self {
        Self::from_kind(ShapeKind::FreePath(PathShape::new(points)))
    }

    /// Creates a text label at the given position.
    pub fn text(x: f64, y: f64, text: impl Into<String>) -> Self {
        Self::from_kind(ShapeKind::Text(Text::new(x, y, text)))
    }

    /// Groups child shapes into one unit.
    pub fn compound(children: Vec<Shape>) -> Self {
        Self::from_kind(ShapeKind::Compound(Compound::new(children)))
    }

    /// Creates an empty embedded canvas layer.
    pub fn layer() -> Self {
        Self::from_kind(ShapeKind::Canvas(Box::new(Canvas::new())))
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.style.color = color;
        self
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.style.alpha = alpha;
        self
    }

    pub fn with_line_width(mut self, width: f32) -> Self {
        self.style.line_width = width;
        self
    }

    pub fn with_line_style(mut self, line_style: LineStyle) -> Self {
        self.style.line_style = line_style;
        self
    }

    pub fn with_fill(mut self, color: Color) -> Self {
        self.style.fill = true;
        self.style.fill_color = Some(color);
        self
    }

    pub fn with_show_cap(mut self, show: bool) -> Self {
        self.style.show_cap = show;
        self
    }

    /// Sets the font of a text shape; no effect on other kinds.
    pub fn with_font(mut self, family: &str, size: f64) -> Self {
        if let ShapeKind::Text(t) = &mut self.kind {
            t.font_family = family.to_string();
            t.font_size = size;
        }
        self
    }

    /// Anchors a text shape to another shape at the given offset from the
    /// anchor's reference point; no effect on other kinds.
    pub fn anchored_to(mut self, anchor: ShapeId, dx: f64, dy: f64) -> Self {
        if let ShapeKind::Text(t) = &mut self.kind {
            t.anchor = Some(anchor);
            t.anchor_offset = (dx, dy);
        }
        self
    }

    pub fn set_data(&mut self, key: &str, value: MetaValue) {
        self.data.insert(key.to_string(), value);
    }

    pub fn get_data(&self, key: &str) -> Option<&MetaValue> {
        self.data.get(key)
    }

    /// Integer metadata lookup with a fallback for missing or mistyped keys.
    pub fn get_data_int(&self, key: &str, default: i64) -> i64 {
        match self.data.get(key) {
            Some(MetaValue::Int(v)) => *v,
            _ => default,
        }
    }

    /// Boolean metadata lookup with a fallback for missing or mistyped keys.
    pub fn get_data_bool(&self, key: &str, default: bool) -> bool {
        match self.data.get(key) {
            Some(MetaValue::Bool(v)) => *v,
            _ => default,
        }
    }

    /// Point used for anchoring and whole-shape moves.
    ///
    /// Midpoint for lines, vertex centroid for paths, the position for
    /// text, and the centroid of child reference points for groups.
    pub fn reference_point(&self) -> Point {
        match &self.kind {
            ShapeKind::Line(l) => l.midpoint(),
            ShapeKind::Path(p) | ShapeKind::FreePath(p) => p.centroid(),
            ShapeKind::Text(t) => Point::new(t.x, t.y),
            ShapeKind::Compound(c) => c.reference_point(),
            ShapeKind::Canvas(c) => {
                let mut count = 0usize;
                let (sx, sy) = c.iter().fold((0.0, 0.0), |(sx, sy), s| {
                    count += 1;
                    let p = s.reference_point();
                    (sx + p.x, sy + p.y)
                });
                if count == 0 {
                    Point::new(0.0, 0.0)
                } else {
                    Point::new(sx / count as f64, sy / count as f64)
                }
            }
        }
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        match &mut self.kind {
            ShapeKind::Line(l) => l.translate(dx, dy),
            ShapeKind::Path(p) | ShapeKind::FreePath(p) => p.translate(dx, dy),
            ShapeKind::Text(t) => t.translate(dx, dy),
            ShapeKind::Compound(c) => c.translate(dx, dy),
            ShapeKind::Canvas(c) => {
                for shape in c.shapes_mut() {
                    shape.translate(dx, dy);
                }
            }
        }
    }

    /// Moves the shape so its reference point lands on the given position.
    pub fn move_to(&mut self, x: f64, y: f64) {
        let rp = self.reference_point();
        self.translate(x - rp.x, y - rp.y);
    }

    /// Edit handles: geometry vertices followed by one move handle at the
    /// reference point. Every shape has at least the move handle.
    pub fn control_points(&self) -> SmallVec<[Point; 8]> {
        let mut points: SmallVec<[Point; 8]> = match &self.kind {
            ShapeKind::Line(l) => SmallVec::from_slice(&[l.start, l.end]),
            ShapeKind::Path(p) | ShapeKind::FreePath(p) => p.points().iter().copied().collect(),
            _ => SmallVec::new(),
        };
        points.push(self.reference_point());
        points
    }

    /// Drags one edit handle to a new position.
    ///
    /// The final handle moves the whole shape; the others reposition the
    /// corresponding vertex. Out-of-range indices are ignored.
    pub fn set_control_point(&mut self, index: usize, x: f64, y: f64) {
        let count = self.control_points().len();
        if index + 1 == count {
            self.move_to(x, y);
            return;
        }
        match &mut self.kind {
            ShapeKind::Line(l) => l.set_point(index, Point::new(x, y)),
            ShapeKind::Path(p) | ShapeKind::FreePath(p) => p.set_point(index, Point::new(x, y)),
            _ => {}
        }
    }

    /// Inserts a vertex on the segment nearest to the given position.
    ///
    /// Only path shapes support vertex insertion.
    pub fn insert_vertex(&mut self, x: f64, y: f64) -> bool {
        match &mut self.kind {
            ShapeKind::Path(p) | ShapeKind::FreePath(p) => p.insert_near(Point::new(x, y)),
            _ => false,
        }
    }

    /// Deletes the vertex nearest to the given position, always keeping at
    /// least two vertices.
    pub fn delete_vertex(&mut self, x: f64, y: f64) -> bool {
        match &mut self.kind {
            ShapeKind::Path(p) | ShapeKind::FreePath(p) => p.delete_near(Point::new(x, y)),
            _ => false,
        }
    }

    /// Hit test with a pick tolerance in data units.
    pub fn contains_point(&self, x: f64, y: f64, tolerance: f64) -> bool {
        let p = Point::new(x, y);
        match &self.kind {
            ShapeKind::Line(l) => l.contains_point(&p, tolerance),
            ShapeKind::Path(path) | ShapeKind::FreePath(path) => {
                path.contains_point(&p, tolerance)
            }
            ShapeKind::Text(t) => t.contains_point(&p, tolerance),
            ShapeKind::Compound(c) => c.contains_point(&p, tolerance),
            ShapeKind::Canvas(c) => c.iter().any(|s| s.contains_point(x, y, tolerance)),
        }
    }

    /// Depth-first index paths to the leaf shapes satisfying `keep`.
    ///
    /// Groups and embedded canvases are descended into, never reported
    /// themselves. An empty path means the shape itself is a matching leaf.
    pub fn leaf_paths(&self, keep: &dyn Fn(&Shape) -> bool) -> Vec<Vec<usize>> {
        let mut out = Vec::new();
        let mut prefix = Vec::new();
        self.collect_leaf_paths(keep, &mut prefix, &mut out);
        out
    }

    fn collect_leaf_paths(
        &self,
        keep: &dyn Fn(&Shape) -> bool,
        prefix: &mut Vec<usize>,
        out: &mut Vec<Vec<usize>>,
    ) {
        match &self.kind {
            ShapeKind::Compound(c) => {
                for (i, child) in c.children().iter().enumerate() {
                    prefix.push(i);
                    child.collect_leaf_paths(keep, prefix, out);
                    prefix.pop();
                }
            }
            ShapeKind::Canvas(c) => {
                for (i, child) in c.iter().enumerate() {
                    prefix.push(i);
                    child.collect_leaf_paths(keep, prefix, out);
                    prefix.pop();
                }
            }
            _ => {
                if keep(self) {
                    out.push(prefix.clone());
                }
            }
        }
    }

    /// Child shape at `index` for group-like kinds.
    pub fn child_at(&self, index: usize) -> Option<&Shape> {
        match &self.kind {
            ShapeKind::Compound(c) => c.children().get(index),
            ShapeKind::Canvas(c) => c.get_index(index),
            _ => None,
        }
    }

    pub fn child_at_mut(&mut self, index: usize) -> Option<&mut Shape> {
        match &mut self.kind {
            ShapeKind::Compound(c) => c.children_mut().get_mut(index),
            ShapeKind::Canvas(c) => c.get_index_mut(index),
            _ => None,
        }
    }

    /// Resolves an index path produced by [`Shape::leaf_paths`].
    pub fn descendant(&self, path: &[usize]) -> Option<&Shape> {
        match path.split_first() {
            None => Some(self),
            Some((&index, rest)) => self.child_at(index)?.descendant(rest),
        }
    }

    pub fn descendant_mut(&mut self, path: &[usize]) -> Option<&mut Shape> {
        match path.split_first() {
            None => Some(self),
            Some((&index, rest)) => self.child_at_mut(index)?.descendant_mut(rest),
        }
    }
}
