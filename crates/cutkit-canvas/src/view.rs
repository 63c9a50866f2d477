//! Image view compositing a raster base with the annotation canvas.
//!
//! The view renders in three stages matching [`Whence`]: the base image is
//! reprojected when data or the view transform changes, then the canvas
//! overlay is painted on top. Callers mutate the canvas freely and call
//! [`ImageView::flush`] once per frame to repaint whatever is pending.

use image::RgbImage;
use tracing::debug;

use cutkit_core::{Error, Point};

use crate::canvas::{Canvas, Whence};
use crate::model::{Shape, ShapeKind};
use crate::render::{Backend, RenderContext, SkiaBackend};
use crate::viewport::Viewport;

pub struct ImageView {
    base: RgbImage,
    projected: RgbImage,
    backend: SkiaBackend,
    canvas: Canvas,
    viewport: Viewport,
}

impl ImageView {
    /// Creates a view sized to the base image.
    pub fn new(base: RgbImage) -> cutkit_core::Result<Self> {
        let (width, height) = base.dimensions();
        let backend = SkiaBackend::new(width, height)
            .ok_or_else(|| Error::other("image dimensions must be non-zero"))?;
        let mut canvas = Canvas::new();
        canvas.redraw(Whence::Data);
        let mut viewport = Viewport::new();
        viewport.set_canvas_size(width as f64, height as f64);
        Ok(Self {
            base,
            projected: RgbImage::new(width, height),
            backend,
            canvas,
            viewport,
        })
    }

    pub fn width(&self) -> u32 {
        self.base.width()
    }

    pub fn height(&self) -> u32 {
        self.base.height()
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Adds an empty sub-canvas layer under the given tag.
    pub fn add_layer(&mut self, tag: &str) -> cutkit_core::Result<()> {
        self.canvas.add_unique(tag, Shape::layer())?;
        Ok(())
    }

    /// Borrows the sub-canvas layer under the given tag.
    pub fn layer_mut(&mut self, tag: &str) -> cutkit_core::Result<&mut Canvas> {
        let shape = self.canvas.get_mut_by_tag(tag)?;
        match &mut shape.kind {
            ShapeKind::Canvas(inner) => Ok(inner),
            other => Err(Error::other(format!(
                "tag '{tag}' holds a {} shape, not a layer",
                other.name()
            ))),
        }
    }

    /// Replaces the base image, resizing the surface when dimensions change.
    pub fn set_base(&mut self, image: RgbImage) -> cutkit_core::Result<()> {
        if image.dimensions() != self.base.dimensions() {
            let (width, height) = image.dimensions();
            debug!(width, height, "resizing view surface");
            self.backend = SkiaBackend::new(width, height)
                .ok_or_else(|| Error::other("image dimensions must be non-zero"))?;
            self.projected = RgbImage::new(width, height);
            self.viewport.set_canvas_size(width as f64, height as f64);
        }
        self.base = image;
        self.canvas.redraw(Whence::Data);
        Ok(())
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.viewport.set_zoom(zoom);
        self.canvas.redraw(Whence::Transform);
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
        self.canvas.redraw(Whence::Transform);
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
        self.canvas.redraw(Whence::Transform);
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.viewport.pan_by(dx, dy);
        self.canvas.redraw(Whence::Transform);
    }

    /// Centers the viewport on a data position.
    pub fn center_on(&mut self, x: f64, y: f64) {
        self.viewport.center_on(x, y);
        self.canvas.redraw(Whence::Transform);
    }

    /// Maps a surface pixel position back to data coordinates.
    pub fn screen_to_data(&self, x: f64, y: f64) -> Point {
        self.viewport.canvas_to_data(Point::new(x, y))
    }

    /// Repaints pending changes, returning the stage that ran.
    pub fn flush(&mut self) -> Option<Whence> {
        let whence = self.canvas.take_redraw()?;
        self.refresh(whence);
        Some(whence)
    }

    /// Recomposites the display from the given stage onward.
    pub fn refresh(&mut self, whence: Whence) {
        if whence <= Whence::Transform {
            self.project_base();
        }
        let (pan_x, pan_y) = self.viewport.pan();
        self.backend
            .set_view_transform(self.viewport.zoom(), pan_x, pan_y);
        self.backend.blit_rgb(&self.projected);
        let mut ctx = RenderContext::new(&mut self.backend);
        self.canvas.paint(&mut ctx);
    }

    // Nearest-neighbor projection of the base through the viewport.
    fn project_base(&mut self) {
        let base = &self.base;
        let viewport = &self.viewport;
        let zoom = viewport.zoom();
        let (pan_x, pan_y) = viewport.pan();
        let (bw, bh) = base.dimensions();
        for (px, py, out) in self.projected.enumerate_pixels_mut() {
            let dx = ((px as f64 - pan_x) / zoom).floor();
            let dy = ((py as f64 - pan_y) / zoom).floor();
            *out = if dx >= 0.0 && dy >= 0.0 && (dx as u32) < bw && (dy as u32) < bh {
                *base.get_pixel(dx as u32, dy as u32)
            } else {
                image::Rgb([0, 0, 0])
            };
        }
    }

    /// Composited output, base plus annotations.
    pub fn to_rgb_image(&self) -> RgbImage {
        self.backend.to_rgb_image()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cutkit_core::Color;

    fn view(width: u32, height: u32) -> ImageView {
        ImageView::new(RgbImage::new(width, height)).unwrap()
    }

    #[test]
    fn zero_sized_image_is_rejected() {
        assert!(ImageView::new(RgbImage::new(0, 10)).is_err());
    }

    #[test]
    fn flush_reports_deepest_pending_stage() {
        let mut v = view(16, 16);
        assert_eq!(v.flush(), Some(Whence::Data));
        assert_eq!(v.flush(), None);

        v.canvas_mut().add(Shape::line(0.0, 0.0, 5.0, 5.0));
        assert_eq!(v.flush(), Some(Whence::Overlay));

        v.zoom_in();
        v.canvas_mut().add(Shape::line(1.0, 1.0, 4.0, 4.0));
        assert_eq!(v.flush(), Some(Whence::Transform));
    }

    #[test]
    fn layers_are_reachable_by_tag() {
        let mut v = view(8, 8);
        v.add_layer("notes").unwrap();
        assert!(v.add_layer("notes").is_err());

        v.layer_mut("notes")
            .unwrap()
            .add_tagged("a", Shape::line(0.0, 0.0, 3.0, 3.0));
        assert_eq!(v.layer_mut("notes").unwrap().len(), 1);

        v.canvas_mut().add_tagged("t", Shape::text(1.0, 1.0, "x"));
        assert!(v.layer_mut("t").is_err());
    }

    #[test]
    fn nested_layer_redraw_reaches_flush() {
        let mut v = view(8, 8);
        v.flush();
        v.add_layer("notes").unwrap();
        v.flush();

        v.layer_mut("notes")
            .unwrap()
            .add_tagged("a", Shape::line(0.0, 0.0, 3.0, 3.0));
        assert_eq!(v.flush(), Some(Whence::Overlay));
        assert_eq!(v.flush(), None);
    }

    #[test]
    fn painted_line_lands_on_surface() {
        let mut v = view(16, 16);
        v.canvas_mut().add(
            Shape::line(2.0, 2.0, 13.0, 2.0)
                .with_color(Color::GREEN)
                .with_line_width(3.0)
                .with_show_cap(false),
        );
        v.flush();

        let img = v.to_rgb_image();
        let p = img.get_pixel(8, 2);
        assert!(p[1] > 200, "expected green stroke, got {p:?}");
        assert!(p[0] < 50 && p[2] < 50);
    }

    #[test]
    fn screen_to_data_inverts_viewport() {
        let mut v = view(16, 16);
        v.set_zoom(2.0);
        v.pan_by(4.0, 0.0);
        let p = v.screen_to_data(12.0, 8.0);
        assert!((p.x - 4.0).abs() < 1e-9);
        assert!((p.y - 4.0).abs() < 1e-9);
    }
}
