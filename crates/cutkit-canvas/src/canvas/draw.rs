//! Interactive drawing: rubber-band transients and gesture completion.

use cutkit_core::{Color, Point};
use tracing::debug;

use super::{Canvas, CanvasEvent, InteractMode, Whence};
use crate::model::{LineStyle, Shape};

/// Tag lent to the in-progress rubber-band shape. The transient is removed
/// before the finished shape is added under a real tag.
pub(crate) const DRAWING_TAG: &str = "_drawing";

/// Which kind of shape a drawing gesture produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawKind {
    #[default]
    Line,
    Path,
    FreePath,
}

/// State of the interactive drawing tool.
#[derive(Debug, Clone)]
pub struct DrawTool {
    kind: DrawKind,
    color: Color,
    line_style: LineStyle,
    start: Option<Point>,
    points: Vec<Point>,
    active: bool,
}

impl Default for DrawTool {
    fn default() -> Self {
        Self {
            kind: DrawKind::Line,
            color: Color::CYAN,
            line_style: LineStyle::Dash,
            start: None,
            points: Vec::new(),
            active: false,
        }
    }
}

impl DrawTool {
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn kind(&self) -> DrawKind {
        self.kind
    }
}

impl Canvas {
    /// Configures what subsequent drawing gestures produce.
    pub fn set_draw_type(&mut self, kind: DrawKind, color: Color, line_style: LineStyle) {
        self.draw.kind = kind;
        self.draw.color = color;
        self.draw.line_style = line_style;
    }

    pub fn is_drawing(&self) -> bool {
        self.draw.active
    }

    /// Begins a drawing gesture at the cursor. Only an active canvas in
    /// browse mode draws.
    pub fn draw_start(&mut self, x: f64, y: f64) -> bool {
        if !self.active || self.edit.mode != InteractMode::Browse || self.draw.active {
            return false;
        }
        let p = Point::new(x, y);
        debug!(kind = ?self.draw.kind, x, y, "draw start");
        self.draw.active = true;
        self.draw.start = Some(p);
        self.draw.points = vec![p];
        self.update_transient(p);
        true
    }

    /// Updates the rubber band as the cursor moves. Freehand paths collect
    /// every motion sample as a vertex.
    pub fn draw_motion(&mut self, x: f64, y: f64) -> bool {
        if !self.draw.active {
            return false;
        }
        let cursor = Point::new(x, y);
        if self.draw.kind == DrawKind::FreePath {
            self.draw.points.push(cursor);
        }
        self.update_transient(cursor);
        true
    }

    /// Pins a vertex at the cursor while drawing a segmented path.
    pub fn draw_vertex(&mut self, x: f64, y: f64) -> bool {
        if !self.draw.active || self.draw.kind != DrawKind::Path {
            return false;
        }
        self.draw.points.push(Point::new(x, y));
        self.update_transient(Point::new(x, y));
        true
    }

    /// Finishes the gesture at the cursor. The transient is removed and the
    /// completed shape is added under a fresh tag.
    pub fn draw_finish(&mut self, x: f64, y: f64) -> Option<CanvasEvent> {
        if !self.draw.active {
            return None;
        }
        self.delete_by_tag(DRAWING_TAG, false).ok();
        let cursor = Point::new(x, y);
        let shape = self.build_gesture_shape(cursor);
        self.draw.active = false;
        self.draw.start = None;
        self.draw.points = Vec::new();
        match shape {
            Some(shape) => {
                let tag = self.add(shape);
                debug!(tag, "draw finish");
                Some(CanvasEvent::DrawCompleted { tag })
            }
            None => {
                self.redraw(Whence::Overlay);
                None
            }
        }
    }

    /// Abandons the gesture in progress.
    pub fn draw_cancel(&mut self) {
        if !self.draw.active {
            return;
        }
        self.delete_by_tag(DRAWING_TAG, false).ok();
        self.draw.active = false;
        self.draw.start = None;
        self.draw.points = Vec::new();
        self.redraw(Whence::Overlay);
    }

    fn update_transient(&mut self, cursor: Point) {
        if let Some(shape) = self.build_gesture_shape(cursor) {
            self.add_tagged(DRAWING_TAG, shape);
        }
    }

    fn build_gesture_shape(&self, cursor: Point) -> Option<Shape> {
        let shape = match self.draw.kind {
            DrawKind::Line => {
                let start = self.draw.start?;
                Shape::line(start.x, start.y, cursor.x, cursor.y)
            }
            DrawKind::Path => {
                let mut points = self.draw.points.clone();
                points.push(cursor);
                Shape::path(points)
            }
            DrawKind::FreePath => {
                // a single press with no motion leaves nothing to keep
                if self.draw.points.len() < 2 {
                    return None;
                }
                Shape::free_path(self.draw.points.clone())
            }
        };
        Some(
            shape
                .with_color(self.draw.color)
                .with_line_style(self.draw.line_style),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ShapeKind;

    #[test]
    fn line_gesture_produces_tagged_line() {
        let mut canvas = Canvas::new();
        canvas.set_draw_type(DrawKind::Line, Color::CYAN, LineStyle::Dash);

        assert!(canvas.draw_start(5.0, 5.0));
        assert!(canvas.draw_motion(50.0, 50.0));
        assert!(canvas.contains_tag(DRAWING_TAG));

        let event = canvas.draw_finish(80.0, 40.0).expect("completed");
        let CanvasEvent::DrawCompleted { tag } = &event else {
            panic!("unexpected event {event:?}");
        };
        assert!(!canvas.contains_tag(DRAWING_TAG));

        let shape = canvas.get_by_tag(tag).unwrap();
        assert_eq!(shape.style.color, Color::CYAN);
        assert_eq!(shape.style.line_style, LineStyle::Dash);
        let ShapeKind::Line(line) = &shape.kind else {
            panic!("expected a line, got {}", shape.kind.name());
        };
        assert_eq!((line.start.x, line.start.y), (5.0, 5.0));
        assert_eq!((line.end.x, line.end.y), (80.0, 40.0));
    }

    #[test]
    fn path_gesture_collects_pinned_vertices() {
        let mut canvas = Canvas::new();
        canvas.set_draw_type(DrawKind::Path, Color::GREEN, LineStyle::Solid);

        canvas.draw_start(0.0, 0.0);
        // 'v' pins vertices while in browse mode
        assert!(canvas.key_down('v', 10.0, 0.0));
        assert!(canvas.key_down('v', 10.0, 10.0));
        let event = canvas.draw_finish(20.0, 10.0).expect("completed");

        let CanvasEvent::DrawCompleted { tag } = event else {
            panic!("expected completion");
        };
        let shape = canvas.get_by_tag(&tag).unwrap();
        let ShapeKind::Path(path) = &shape.kind else {
            panic!("expected a path");
        };
        assert_eq!(path.len(), 4);
    }

    #[test]
    fn free_path_records_motion_samples() {
        let mut canvas = Canvas::new();
        canvas.set_draw_type(DrawKind::FreePath, Color::RED, LineStyle::Solid);

        canvas.draw_start(0.0, 0.0);
        canvas.draw_motion(1.0, 1.0);
        canvas.draw_motion(2.0, 3.0);
        let event = canvas.draw_finish(2.0, 3.0).expect("completed");

        let CanvasEvent::DrawCompleted { tag } = event else {
            panic!("expected completion");
        };
        let ShapeKind::FreePath(path) = &canvas.get_by_tag(&tag).unwrap().kind else {
            panic!("expected a freehand path");
        };
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn click_without_motion_discards_free_path() {
        let mut canvas = Canvas::new();
        canvas.set_draw_type(DrawKind::FreePath, Color::RED, LineStyle::Solid);

        canvas.draw_start(4.0, 4.0);
        assert!(canvas.draw_finish(4.0, 4.0).is_none());
        assert!(canvas.is_empty());
    }

    #[test]
    fn edit_mode_does_not_draw() {
        let mut canvas = Canvas::new();
        canvas.set_interact_mode(InteractMode::Edit);
        assert!(!canvas.draw_start(0.0, 0.0));
        assert!(!canvas.is_drawing());
    }

    #[test]
    fn inactive_canvas_ignores_gestures() {
        let mut canvas = Canvas::new();
        canvas.set_active(false);
        assert!(!canvas.draw_start(0.0, 0.0));
        assert!(!canvas.key_down('v', 1.0, 1.0));

        canvas.set_active(true);
        assert!(canvas.draw_start(0.0, 0.0));
    }

    #[test]
    fn cancel_removes_transient() {
        let mut canvas = Canvas::new();
        canvas.draw_start(0.0, 0.0);
        canvas.draw_motion(9.0, 9.0);
        assert!(canvas.contains_tag(DRAWING_TAG));

        canvas.draw_cancel();
        assert!(!canvas.contains_tag(DRAWING_TAG));
        assert!(canvas.is_empty());
        assert!(!canvas.is_drawing());
    }
}
