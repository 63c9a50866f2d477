//! Tag-indexed shape canvas with deferred redraw tracking.
//!
//! Shapes are stored under string tags and drawn back to front. Mutating
//! operations queue a redraw request instead of repainting eagerly; the
//! owning view drains requests with [`Canvas::take_redraw`] and repaints
//! once per frame.

mod draw;
mod edit;

pub use draw::{DrawKind, DrawTool};
pub use edit::{EditState, InteractMode};

use std::collections::HashMap;

use cutkit_core::constants::HANDLE_RADIUS;
use cutkit_core::{CanvasError, Color, Point};
use tracing::trace;

use crate::model::{Shape, ShapeId, ShapeKind};
use crate::render::{Backend, RenderContext};

/// How much of the display pipeline a redraw must rerun.
///
/// Lower values invalidate more: `Data` refetches the base image,
/// `Transform` reprojects it, and `Overlay` only recomposites the
/// annotations. Merging two requests keeps the more invasive one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Whence {
    Data = 0,
    Transform = 2,
    Overlay = 3,
}

/// Notification produced by interactive canvas operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanvasEvent {
    /// A drawing gesture completed and the finished shape was added
    /// under the carried tag.
    DrawCompleted { tag: String },
    /// An edit drag was released on the shape with the carried tag.
    EditApplied { tag: String },
}

/// A collection of tagged shapes drawn back to front.
#[derive(Debug, Clone)]
pub struct Canvas {
    shapes: HashMap<String, Shape>,
    order: Vec<String>,
    tag_serial: u64,
    pending: Option<Whence>,
    active: bool,
    pub(crate) edit: EditState,
    pub(crate) draw: DrawTool,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            shapes: HashMap::new(),
            order: Vec::new(),
            tag_serial: 0,
            pending: None,
            active: true,
            edit: EditState::default(),
            draw: DrawTool::default(),
        }
    }
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the canvas responds to drawing, editing, and key input.
    /// Painting is unaffected.
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    fn next_auto_tag(&mut self) -> String {
        self.tag_serial += 1;
        format!("@{}", self.tag_serial)
    }

    /// Adds a shape under a fresh auto-generated tag and returns the tag.
    pub fn add(&mut self, shape: Shape) -> String {
        let tag = self.next_auto_tag();
        self.insert(tag.clone(), shape);
        tag
    }

    /// Adds a shape under the given tag, replacing any existing holder.
    /// A replaced tag moves to the top of the draw order.
    pub fn add_tagged(&mut self, tag: &str, shape: Shape) {
        self.insert(tag.to_string(), shape);
    }

    /// Adds a shape under the given tag, failing when the tag is taken.
    pub fn add_unique(&mut self, tag: &str, shape: Shape) -> Result<(), CanvasError> {
        if self.shapes.contains_key(tag) {
            return Err(CanvasError::DuplicateTag {
                tag: tag.to_string(),
            });
        }
        self.insert(tag.to_string(), shape);
        Ok(())
    }

    fn insert(&mut self, tag: String, shape: Shape) {
        trace!(tag, kind = shape.kind.name(), "canvas add");
        if self.shapes.insert(tag.clone(), shape).is_some() {
            self.order.retain(|t| t != &tag);
        }
        self.order.push(tag);
        self.redraw(Whence::Overlay);
    }

    pub fn get_by_tag(&self, tag: &str) -> Result<&Shape, CanvasError> {
        self.shapes.get(tag).ok_or_else(|| CanvasError::NotFound {
            tag: tag.to_string(),
        })
    }

    pub fn get_mut_by_tag(&mut self, tag: &str) -> Result<&mut Shape, CanvasError> {
        self.shapes
            .get_mut(tag)
            .ok_or_else(|| CanvasError::NotFound {
                tag: tag.to_string(),
            })
    }

    /// Removes and returns the shape under `tag`.
    pub fn delete_by_tag(&mut self, tag: &str, redraw: bool) -> Result<Shape, CanvasError> {
        let shape = self.shapes.remove(tag).ok_or_else(|| CanvasError::NotFound {
            tag: tag.to_string(),
        })?;
        self.order.retain(|t| t != tag);
        if self.edit.selected.as_deref() == Some(tag) {
            self.edit.selected = None;
            self.edit.active_handle = None;
        }
        if redraw {
            self.redraw(Whence::Overlay);
        }
        Ok(shape)
    }

    /// Removes every shape, clearing any edit selection with them.
    pub fn delete_all(&mut self, redraw: bool) {
        self.shapes.clear();
        self.order.clear();
        self.edit.selected = None;
        self.edit.active_handle = None;
        if redraw {
            self.redraw(Whence::Overlay);
        }
    }

    /// Tags in draw order, back to front.
    pub fn tags(&self) -> &[String] {
        &self.order
    }

    pub fn contains_tag(&self, tag: &str) -> bool {
        self.shapes.contains_key(tag)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Shapes in draw order, back to front.
    pub fn iter(&self) -> impl Iterator<Item = &Shape> + '_ {
        self.order.iter().filter_map(|tag| self.shapes.get(tag))
    }

    /// Shapes in no particular order.
    pub fn shapes_mut(&mut self) -> impl Iterator<Item = &mut Shape> + '_ {
        self.shapes.values_mut()
    }

    /// Shape at the given position in the draw order.
    pub fn get_index(&self, index: usize) -> Option<&Shape> {
        self.order.get(index).and_then(|tag| self.shapes.get(tag))
    }

    pub fn get_index_mut(&mut self, index: usize) -> Option<&mut Shape> {
        let tag = self.order.get(index)?;
        self.shapes.get_mut(tag)
    }

    /// Tag of the topmost shape containing the point, if any.
    pub fn shape_at(&self, x: f64, y: f64, tolerance: f64) -> Option<&str> {
        self.order
            .iter()
            .rev()
            .find(|tag| {
                self.shapes
                    .get(*tag)
                    .is_some_and(|s| s.contains_point(x, y, tolerance))
            })
            .map(|tag| tag.as_str())
    }

    /// Requests a redraw at least as invasive as `whence`.
    pub fn redraw(&mut self, whence: Whence) {
        self.pending = Some(match self.pending {
            Some(prev) => prev.min(whence),
            None => whence,
        });
    }

    /// Drains the pending redraw request, merged with requests queued on
    /// embedded canvas layers.
    pub fn take_redraw(&mut self) -> Option<Whence> {
        let mut pending = self.pending.take();
        for shape in self.shapes.values_mut() {
            merge_nested_redraw(shape, &mut pending);
        }
        pending
    }

    /// Routes a key press to the drawing or editing machinery, with the
    /// cursor at the given data position.
    pub fn key_down(&mut self, key: char, x: f64, y: f64) -> bool {
        if !self.active {
            return false;
        }
        match self.edit.mode {
            InteractMode::Browse if self.draw.is_active() && key == 'v' => self.draw_vertex(x, y),
            InteractMode::Edit => self.edit_key(key, x, y),
            _ => false,
        }
    }

    /// Paints all shapes back to front, then edit decorations on top.
    pub fn paint<B: Backend>(&self, ctx: &mut RenderContext<'_, B>) {
        let mut anchors = HashMap::new();
        self.collect_anchors(&mut anchors);
        self.paint_with(ctx, &anchors);
    }

    fn collect_anchors(&self, out: &mut HashMap<ShapeId, Point>) {
        for shape in self.iter() {
            collect_shape_anchors(shape, out);
        }
    }

    pub(crate) fn paint_with<B: Backend>(
        &self,
        ctx: &mut RenderContext<'_, B>,
        anchors: &HashMap<ShapeId, Point>,
    ) {
        for shape in self.iter() {
            paint_shape(ctx, shape, anchors);
        }
        self.paint_edit_overlay(ctx);
    }

    fn paint_edit_overlay<B: Backend>(&self, ctx: &mut RenderContext<'_, B>) {
        if self.edit.mode != InteractMode::Edit {
            return;
        }
        let Some(tag) = &self.edit.selected else {
            return;
        };
        let Some(shape) = self.shapes.get(tag) else {
            return;
        };
        let points = shape.control_points();
        let count = points.len();
        ctx.set_line(Color::YELLOW, 1.0, 1.0, crate::model::LineStyle::Solid);
        ctx.set_fill(None);
        for (i, p) in points.iter().enumerate() {
            // the move handle comes last and is drawn a quarter bigger
            let radius = if i + 1 == count {
                HANDLE_RADIUS * 1.25
            } else {
                HANDLE_RADIUS
            };
            ctx.draw_circle(*p, radius);
        }
    }
}

fn merge_nested_redraw(shape: &mut Shape, pending: &mut Option<Whence>) {
    match &mut shape.kind {
        ShapeKind::Canvas(inner) => {
            if let Some(w) = inner.take_redraw() {
                *pending = Some(match *pending {
                    Some(prev) => prev.min(w),
                    None => w,
                });
            }
        }
        ShapeKind::Compound(c) => {
            for child in c.children_mut() {
                merge_nested_redraw(child, pending);
            }
        }
        _ => {}
    }
}

fn collect_shape_anchors(shape: &Shape, out: &mut HashMap<ShapeId, Point>) {
    out.insert(shape.id(), shape.reference_point());
    match &shape.kind {
        ShapeKind::Compound(c) => {
            for child in c.children() {
                collect_shape_anchors(child, out);
            }
        }
        ShapeKind::Canvas(inner) => {
            for child in inner.iter() {
                collect_shape_anchors(child, out);
            }
        }
        _ => {}
    }
}

fn paint_shape<B: Backend>(
    ctx: &mut RenderContext<'_, B>,
    shape: &Shape,
    anchors: &HashMap<ShapeId, Point>,
) {
    match &shape.kind {
        ShapeKind::Line(line) => {
            ctx.initialize_from_shape(shape, true, false, false);
            ctx.draw_line(line.start, line.end);
            if shape.style.show_cap {
                paint_caps(ctx, &[line.start, line.end]);
            }
        }
        ShapeKind::Path(path) | ShapeKind::FreePath(path) => {
            ctx.initialize_from_shape(shape, true, shape.style.fill, false);
            if shape.style.fill {
                ctx.draw_polygon(path.points());
            } else {
                ctx.draw_path(path.points());
            }
            if shape.style.show_cap {
                paint_caps(ctx, path.points());
            }
        }
        ShapeKind::Text(text) => {
            ctx.initialize_from_shape(shape, false, false, true);
            let position = text.resolve_position(anchors);
            ctx.draw_text(position, &text.text);
        }
        ShapeKind::Compound(compound) => {
            for child in compound.children() {
                paint_shape(ctx, child, anchors);
            }
        }
        ShapeKind::Canvas(inner) => {
            inner.paint_with(ctx, anchors);
        }
    }
}

fn paint_caps<B: Backend>(ctx: &mut RenderContext<'_, B>, points: &[Point]) {
    for p in points {
        ctx.draw_circle(*p, HANDLE_RADIUS);
    }
}
