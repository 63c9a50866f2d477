//! The cut engine: lifecycle of pixel-profile cuts over an image view.
//!
//! A cut is a compound shape on a dedicated canvas layer: its first child is
//! the sampled geometry (line, path, or freehand path) and its second child
//! is a text label anchored to that geometry. The engine owns the ordered
//! list of cut tags, allocates palette counts, and replots every profile
//! whenever cuts change.

use std::collections::HashSet;

use tracing::{debug, warn};

use cutkit_canvas::{
    Canvas, CanvasEvent, DrawKind, ImageView, LineStyle, MetaValue, Shape, ShapeKind, Whence,
};
use cutkit_core::constants::LABEL_OFFSET;
use cutkit_core::{palette_from_names, Color, Result};
use cutkit_settings::CutsConfig;

use crate::plot::PlotSink;
use crate::sampling::{sample_shape, PixelSource};

/// Sentinel entry meaning "the next drawn cut is a new one".
pub const NEW_CUT: &str = "New Cut";

/// Tag of the canvas layer that holds all cuts.
pub const CUTS_LAYER: &str = "cuts-layer";

/// Orientation of a full-extent cut made at the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CutKind {
    Horizontal,
    Vertical,
}

/// Manages cuts on an image view and their plotted profiles.
pub struct CutsEngine {
    colors: Vec<Color>,
    select_new_cut: bool,
    label_cuts: bool,
    tags: Vec<String>,
    selected: String,
    overflow: usize,
    paused: bool,
}

impl CutsEngine {
    pub fn new(config: &CutsConfig) -> Self {
        let colors = palette_from_names(&config.colors);
        let overflow = colors.len();
        Self {
            colors,
            select_new_cut: config.select_new_cut,
            label_cuts: config.label_cuts,
            tags: vec![NEW_CUT.to_string()],
            selected: NEW_CUT.to_string(),
            overflow,
            paused: false,
        }
    }

    /// Cut tags in creation order, starting with the sentinel entry.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// The currently selected entry, a cut tag or the sentinel.
    pub fn selected(&self) -> &str {
        &self.selected
    }

    pub fn select_cut(&mut self, tag: &str) -> Result<()> {
        if tag != NEW_CUT && !self.tags.iter().any(|t| t == tag) {
            return Err(cutkit_core::CanvasError::NotFound {
                tag: tag.to_string(),
            }
            .into());
        }
        self.selected = tag.to_string();
        Ok(())
    }

    /// Stops reacting to input events and deactivates the cuts layer until
    /// [`CutsEngine::resume`].
    pub fn pause(&mut self, view: &mut ImageView) {
        self.paused = true;
        if let Ok(layer) = view.layer_mut(CUTS_LAYER) {
            layer.set_active(false);
        }
    }

    /// Reactivates the cuts layer and replots every profile.
    pub fn resume(
        &mut self,
        view: &mut ImageView,
        source: &impl PixelSource,
        plot: &mut impl PlotSink,
    ) -> Result<()> {
        self.paused = false;
        if let Ok(layer) = view.layer_mut(CUTS_LAYER) {
            layer.set_active(true);
        }
        self.plot_all(view, source, plot)
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Installs the cuts layer on the view, if absent, and prepares the plot.
    pub fn attach(&mut self, view: &mut ImageView, plot: &mut impl PlotSink) -> Result<()> {
        if !view.canvas().contains_tag(CUTS_LAYER) {
            view.add_layer(CUTS_LAYER)?;
        }
        let layer = view.layer_mut(CUTS_LAYER)?;
        layer.set_draw_type(DrawKind::Line, Color::CYAN, LineStyle::Dash);
        plot.set_titles(None, Some("Cuts"));
        Ok(())
    }

    /// Configures what kind of geometry subsequent drawing gestures produce.
    pub fn set_cut_type(&mut self, view: &mut ImageView, kind: DrawKind) -> Result<()> {
        view.layer_mut(CUTS_LAYER)?
            .set_draw_type(kind, Color::CYAN, LineStyle::Dash);
        Ok(())
    }

    /// Removes the cuts layer and forgets every cut.
    pub fn detach(&mut self, view: &mut ImageView, plot: &mut impl PlotSink) {
        view.canvas_mut().delete_by_tag(CUTS_LAYER, true).ok();
        plot.clear();
        self.tags = vec![NEW_CUT.to_string()];
        self.selected = NEW_CUT.to_string();
        self.overflow = self.colors.len();
    }

    /// Creates a full-width or full-height cut through the last cursor
    /// position and replots. Returns the new cut's tag.
    pub fn cut_at(
        &mut self,
        kind: CutKind,
        view: &mut ImageView,
        source: &impl PixelSource,
        plot: &mut impl PlotSink,
    ) -> Result<String> {
        let (width, height) = source.size();
        let (x, y) = source.last_cursor_pos();
        let geometry = match kind {
            CutKind::Horizontal => Shape::line(0.0, y, width.saturating_sub(1) as f64, y),
            CutKind::Vertical => Shape::line(x, 0.0, x, height.saturating_sub(1) as f64),
        }
        .with_color(Color::CYAN)
        .with_show_cap(false);

        let tag;
        {
            let layer = view.layer_mut(CUTS_LAYER)?;
            let count = self.next_count(layer);
            tag = format!("cuts{count}");
            debug!(tag, ?kind, x, y, "cut at cursor");
            let cut = self.make_cut(geometry, count);
            // a stale shape may still hold the tag
            layer.delete_by_tag(&tag, false).ok();
            layer.add_tagged(&tag, cut);
        }
        self.register_tag(&tag, self.select_new_cut);
        self.plot_all(view, source, plot)?;
        Ok(tag)
    }

    /// Handles a canvas event from the cuts layer.
    ///
    /// A completed drawing becomes a cut: the raw shape is removed, and its
    /// geometry is wrapped into a labelled compound. While a real cut is
    /// selected the drawing replaces it, reusing its count; otherwise a new
    /// count is allocated. Returns the tag of the affected cut.
    pub fn draw_event(
        &mut self,
        view: &mut ImageView,
        event: &CanvasEvent,
        source: &impl PixelSource,
        plot: &mut impl PlotSink,
    ) -> Result<Option<String>> {
        if self.paused {
            return Ok(None);
        }
        match event {
            CanvasEvent::EditApplied { tag } => {
                if self.tags.iter().any(|t| t == tag) {
                    self.plot_all(view, source, plot)?;
                }
                Ok(None)
            }
            CanvasEvent::DrawCompleted { tag } => {
                let cut_tag;
                {
                    let layer = view.layer_mut(CUTS_LAYER)?;
                    let mut drawn = layer.delete_by_tag(tag, false)?;
                    if !is_cut_geometry(&drawn) {
                        debug!(kind = drawn.kind.name(), "ignoring non-cut drawing");
                        layer.redraw(Whence::Overlay);
                        return Ok(None);
                    }
                    drawn.style.line_style = LineStyle::Solid;
                    drawn.style.show_cap = false;

                    let count = match self.take_replacement(layer) {
                        Some(count) => count,
                        None => self.next_count(layer),
                    };
                    cut_tag = format!("cuts{count}");
                    debug!(tag = cut_tag, count, "cut drawn");
                    let cut = self.make_cut(drawn, count);
                    layer.delete_by_tag(&cut_tag, false).ok();
                    layer.add_tagged(&cut_tag, cut);
                }
                self.register_tag(&cut_tag, self.select_new_cut);
                self.plot_all(view, source, plot)?;
                Ok(Some(cut_tag))
            }
        }
    }

    /// Replots the profile of every cut, recoloring each from the palette.
    pub fn plot_all(
        &mut self,
        view: &mut ImageView,
        source: &impl PixelSource,
        plot: &mut impl PlotSink,
    ) -> Result<()> {
        plot.clear();

        let palette_len = self.colors.len();
        let cut_tags: Vec<String> = self.tags.iter().skip(1).cloned().collect();
        let layer = view.layer_mut(CUTS_LAYER)?;
        for tag in cut_tags {
            let Ok(shape) = layer.get_mut_by_tag(&tag) else {
                warn!(tag, "cut tag missing from canvas, skipping");
                continue;
            };
            if !matches!(shape.kind, ShapeKind::Compound(_)) {
                continue;
            }
            let count = shape.get_data_int("count", 0).max(0) as usize;
            let lines = shape.leaf_paths(&|s| is_cut_geometry(s));
            for (i, path) in lines.iter().enumerate() {
                let color = self.colors[(count + i) % palette_len];
                let Some(leaf) = shape.descendant_mut(path) else {
                    continue;
                };
                leaf.style.color = color;
                match sample_shape(leaf, source) {
                    Ok(values) => plot.plot_series(&values, "Line Index", "Pixel Value", color),
                    Err(e) => warn!(tag, "skipping cut line: {}", e),
                }
            }
            // the label takes the first line's color
            if let Some(label) = shape.child_at_mut(1) {
                label.style.color = self.colors[count % palette_len];
            }
        }
        layer.redraw(Whence::Overlay);
        Ok(())
    }

    /// Begins dragging the selected cut. Equivalent to a first motion.
    pub fn button_down(&mut self, view: &mut ImageView, x: f64, y: f64) -> Result<bool> {
        self.motion(view, x, y)
    }

    /// Moves the selected cut's geometry so its reference point tracks the
    /// cursor. The label follows through its anchor.
    pub fn motion(&mut self, view: &mut ImageView, x: f64, y: f64) -> Result<bool> {
        if self.paused || self.selected == NEW_CUT {
            return Ok(false);
        }
        let selected = self.selected.clone();
        let layer = view.layer_mut(CUTS_LAYER)?;
        let Ok(shape) = layer.get_mut_by_tag(&selected) else {
            return Ok(false);
        };
        let ShapeKind::Compound(compound) = &mut shape.kind else {
            return Ok(false);
        };
        if let Some(geometry) = compound.children_mut().first_mut() {
            geometry.move_to(x, y);
        }
        layer.redraw(Whence::Overlay);
        Ok(true)
    }

    /// Completes a drag and commits it by replotting all profiles.
    pub fn button_up(
        &mut self,
        view: &mut ImageView,
        x: f64,
        y: f64,
        source: &impl PixelSource,
        plot: &mut impl PlotSink,
    ) -> Result<bool> {
        if !self.motion(view, x, y)? {
            return Ok(false);
        }
        self.plot_all(view, source, plot)?;
        Ok(true)
    }

    /// Keyboard shortcuts: 'n' selects the sentinel so the next drawing
    /// creates a new cut, 'h' and 'j' cut through the cursor position.
    pub fn key_down(
        &mut self,
        key: char,
        view: &mut ImageView,
        source: &impl PixelSource,
        plot: &mut impl PlotSink,
    ) -> Result<bool> {
        if self.paused {
            return Ok(false);
        }
        match key {
            'n' => {
                self.selected = NEW_CUT.to_string();
                Ok(true)
            }
            'h' => {
                self.cut_at(CutKind::Horizontal, view, source, plot)?;
                Ok(true)
            }
            'j' => {
                self.cut_at(CutKind::Vertical, view, source, plot)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Deletes the selected cut and selects the last remaining entry.
    pub fn delete_cut(
        &mut self,
        view: &mut ImageView,
        source: &impl PixelSource,
        plot: &mut impl PlotSink,
    ) -> Result<()> {
        if self.selected == NEW_CUT {
            return Ok(());
        }
        let selected = self.selected.clone();
        view.layer_mut(CUTS_LAYER)?
            .delete_by_tag(&selected, true)
            .ok();
        self.tags.retain(|t| t != &selected);
        self.selected = self
            .tags
            .last()
            .cloned()
            .unwrap_or_else(|| NEW_CUT.to_string());
        self.plot_all(view, source, plot)
    }

    /// Deletes every cut and clears the plot.
    pub fn delete_all(
        &mut self,
        view: &mut ImageView,
        source: &impl PixelSource,
        plot: &mut impl PlotSink,
    ) -> Result<()> {
        view.layer_mut(CUTS_LAYER)?.delete_all(true);
        self.tags = vec![NEW_CUT.to_string()];
        self.selected = NEW_CUT.to_string();
        self.plot_all(view, source, plot)
    }

    fn make_cut(&self, geometry: Shape, count: usize) -> Shape {
        let color = geometry.style.color;
        let text = if self.label_cuts {
            format!("cuts{count}")
        } else {
            String::new()
        };
        let reference = geometry.reference_point();
        let (ox, oy) = LABEL_OFFSET;
        let label = Shape::text(reference.x + ox, reference.y + oy, text)
            .with_color(color)
            .anchored_to(geometry.id(), ox, oy);
        let mut cut = Shape::compound(vec![geometry, label]);
        cut.set_data("count", MetaValue::Int(count as i64));
        cut.set_data("cuts", MetaValue::Bool(true));
        cut
    }

    // Smallest count not held by a live cut, or a fresh overflow count when
    // the whole palette range is taken. Overflow counts are never reused.
    fn next_count(&mut self, layer: &Canvas) -> usize {
        let used: HashSet<usize> = self
            .tags
            .iter()
            .skip(1)
            .filter_map(|tag| layer.get_by_tag(tag).ok())
            .map(|shape| shape.get_data_int("count", 0).max(0) as usize)
            .collect();
        for i in 0..self.colors.len() {
            if !used.contains(&i) {
                return i;
            }
        }
        let count = self.overflow;
        self.overflow += 1;
        count
    }

    fn take_replacement(&mut self, layer: &mut Canvas) -> Option<usize> {
        if self.selected == NEW_CUT {
            return None;
        }
        match layer.delete_by_tag(&self.selected, false) {
            Ok(old) => Some(old.get_data_int("count", 0).max(0) as usize),
            Err(_) => None,
        }
    }

    fn register_tag(&mut self, tag: &str, select: bool) {
        if !self.tags.iter().any(|t| t == tag) {
            self.tags.push(tag.to_string());
        }
        if select {
            self.selected = tag.to_string();
        }
    }
}

fn is_cut_geometry(shape: &Shape) -> bool {
    matches!(
        shape.kind,
        ShapeKind::Line(_) | ShapeKind::Path(_) | ShapeKind::FreePath(_)
    )
}
