//! Edit-mode selection and control-point dragging.

use cutkit_core::constants::HANDLE_RADIUS;
use cutkit_core::{CanvasError, Point};
use tracing::debug;

use super::{Canvas, CanvasEvent, Whence};

/// What mouse gestures on the canvas mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractMode {
    /// Clicks pick positions and drawing gestures create shapes.
    #[default]
    Browse,
    /// Clicks select shapes and drag their control points.
    Edit,
}

/// Selection state for edit mode.
#[derive(Debug, Clone, Default)]
pub struct EditState {
    pub(crate) mode: InteractMode,
    pub(crate) selected: Option<String>,
    pub(crate) active_handle: Option<usize>,
}

impl Canvas {
    pub fn interact_mode(&self) -> InteractMode {
        self.edit.mode
    }

    /// Switches interaction mode, dropping any drag in progress.
    pub fn set_interact_mode(&mut self, mode: InteractMode) {
        if self.edit.mode != mode {
            debug!(?mode, "interact mode");
            self.edit.mode = mode;
            self.edit.active_handle = None;
            self.redraw(Whence::Overlay);
        }
    }

    pub fn toggle_interact_mode(&mut self) {
        let next = match self.edit.mode {
            InteractMode::Browse => InteractMode::Edit,
            InteractMode::Edit => InteractMode::Browse,
        };
        self.set_interact_mode(next);
    }

    /// Tag of the shape currently selected for editing.
    pub fn selected_tag(&self) -> Option<&str> {
        self.edit.selected.as_deref()
    }

    /// Selects the shape under `tag` for editing.
    pub fn edit_select(&mut self, tag: &str) -> Result<(), CanvasError> {
        if !self.contains_tag(tag) {
            return Err(CanvasError::NotFound {
                tag: tag.to_string(),
            });
        }
        self.edit.selected = Some(tag.to_string());
        self.edit.active_handle = None;
        self.redraw(Whence::Overlay);
        Ok(())
    }

    pub fn edit_deselect(&mut self) {
        if self.edit.selected.take().is_some() {
            self.edit.active_handle = None;
            self.redraw(Whence::Overlay);
        }
    }

    /// Handles a button press in edit mode. Grabs a handle of the selected
    /// shape when one is under the cursor, otherwise moves the selection to
    /// the topmost shape there. Returns true when the press was consumed.
    pub fn edit_press(&mut self, x: f64, y: f64) -> bool {
        if !self.active || self.edit.mode != InteractMode::Edit {
            return false;
        }
        if let Some(tag) = &self.edit.selected {
            if let Some(handle) = self.pick_handle(tag, x, y) {
                self.edit.active_handle = Some(handle);
                return true;
            }
        }
        match self.shape_at(x, y, HANDLE_RADIUS) {
            Some(tag) => {
                let tag = tag.to_string();
                self.edit.selected = Some(tag);
                self.edit.active_handle = None;
                self.redraw(Whence::Overlay);
                true
            }
            None => {
                self.edit_deselect();
                false
            }
        }
    }

    fn pick_handle(&self, tag: &str, x: f64, y: f64) -> Option<usize> {
        let shape = self.shapes.get(tag)?;
        let cursor = Point::new(x, y);
        let (index, distance) = shape
            .control_points()
            .iter()
            .map(|p| p.distance_to(&cursor))
            .enumerate()
            .min_by(|a, b| a.1.total_cmp(&b.1))?;
        // a little slop beyond the drawn radius keeps handles grabbable
        (distance <= HANDLE_RADIUS * 2.0).then_some(index)
    }

    /// Drags the grabbed control point to the cursor.
    pub fn edit_drag(&mut self, x: f64, y: f64) -> bool {
        let Some(handle) = self.edit.active_handle else {
            return false;
        };
        let Some(tag) = self.edit.selected.clone() else {
            return false;
        };
        if let Some(shape) = self.shapes.get_mut(&tag) {
            shape.set_control_point(handle, x, y);
            self.redraw(Whence::Overlay);
            true
        } else {
            false
        }
    }

    /// Releases an edit drag, reporting which shape changed.
    pub fn edit_release(&mut self) -> Option<CanvasEvent> {
        self.edit.active_handle.take()?;
        let tag = self.edit.selected.clone()?;
        self.redraw(Whence::Overlay);
        Some(CanvasEvent::EditApplied { tag })
    }

    /// Edit-mode key handling: 'v' inserts a path vertex near the cursor,
    /// 'z' deletes the nearest one.
    pub(crate) fn edit_key(&mut self, key: char, x: f64, y: f64) -> bool {
        let Some(tag) = self.edit.selected.clone() else {
            return false;
        };
        let Some(shape) = self.shapes.get_mut(&tag) else {
            return false;
        };
        let changed = match key {
            'v' => shape.insert_vertex(x, y),
            'z' => shape.delete_vertex(x, y),
            _ => false,
        };
        if changed {
            self.redraw(Whence::Overlay);
        }
        changed
    }
}
