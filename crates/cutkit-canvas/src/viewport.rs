//! Zoom and pan state mapping data coordinates to canvas pixels.

use std::fmt;

use cutkit_core::Point;

const MIN_ZOOM: f64 = 0.1;
const MAX_ZOOM: f64 = 50.0;
const ZOOM_STEP: f64 = 1.2;

/// View transform applied when compositing the display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    zoom: f64,
    pan_x: f64,
    pan_y: f64,
    canvas_width: f64,
    canvas_height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
            canvas_width: 0.0,
            canvas_height: 0.0,
        }
    }
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn pan(&self) -> (f64, f64) {
        (self.pan_x, self.pan_y)
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom * ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom / ZOOM_STEP);
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Records the size of the canvas surface being composited into.
    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.canvas_width = width;
        self.canvas_height = height;
    }

    /// Pans so the given data point lands at the canvas center.
    pub fn center_on(&mut self, x: f64, y: f64) {
        self.pan_x = self.canvas_width / 2.0 - x * self.zoom;
        self.pan_y = self.canvas_height / 2.0 - y * self.zoom;
    }

    pub fn data_to_canvas(&self, p: Point) -> Point {
        Point::new(p.x * self.zoom + self.pan_x, p.y * self.zoom + self.pan_y)
    }

    pub fn canvas_to_data(&self, p: Point) -> Point {
        Point::new((p.x - self.pan_x) / self.zoom, (p.y - self.pan_y) / self.zoom)
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.0}% ({:+.0}, {:+.0})",
            self.zoom * 100.0,
            self.pan_x,
            self.pan_y
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_clamps_to_range() {
        let mut vp = Viewport::new();
        vp.set_zoom(1000.0);
        assert_eq!(vp.zoom(), 50.0);
        vp.set_zoom(0.0);
        assert_eq!(vp.zoom(), 0.1);
    }

    #[test]
    fn round_trips_between_spaces() {
        let mut vp = Viewport::new();
        vp.set_zoom(2.5);
        vp.pan_by(-7.0, 12.0);
        let data = Point::new(40.0, 16.0);
        let back = vp.canvas_to_data(vp.data_to_canvas(data));
        assert!((back.x - data.x).abs() < 1e-9);
        assert!((back.y - data.y).abs() < 1e-9);
    }

    #[test]
    fn formats_status_line() {
        let mut vp = Viewport::new();
        vp.set_zoom(1.5);
        vp.pan_by(10.0, -4.0);
        assert_eq!(vp.to_string(), "150% (+10, -4)");
    }

    #[test]
    fn centers_on_data_point() {
        let mut vp = Viewport::new();
        vp.set_canvas_size(200.0, 100.0);
        vp.set_zoom(2.0);
        vp.center_on(30.0, 10.0);
        let center = vp.data_to_canvas(Point::new(30.0, 10.0));
        assert_eq!((center.x, center.y), (100.0, 50.0));
    }
}
