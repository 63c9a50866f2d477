//! Anti-aliased raster backend built on tiny-skia.

use cutkit_core::constants::DASH_PATTERN;
use cutkit_core::{Color, Point};
use image::{Rgb, RgbImage};
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Stroke, StrokeDash, Transform};

use crate::fonts;
use crate::model::LineStyle;

use super::{Backend, Brush, CubicSegment, Pen, TextFont};

/// Backend rendering into a premultiplied RGBA pixmap.
///
/// Stroke widths and dash lengths are specified in surface pixels and
/// held constant under zoom.
pub struct SkiaBackend {
    pixmap: Pixmap,
    zoom: f32,
    dx: f32,
    dy: f32,
}

impl SkiaBackend {
    /// Creates a surface filled with opaque black; `None` when either
    /// dimension is zero.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        let mut pixmap = Pixmap::new(width, height)?;
        pixmap.fill(tiny_skia::Color::from_rgba8(0, 0, 0, 255));
        Some(Self {
            pixmap,
            zoom: 1.0,
            dx: 0.0,
            dy: 0.0,
        })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn clear(&mut self, color: Color) {
        self.pixmap
            .fill(tiny_skia::Color::from_rgba8(color.r, color.g, color.b, 255));
    }

    /// Copies an RGB image onto the surface pixel for pixel, without the
    /// view transform. Areas outside the source stay untouched.
    pub fn blit_rgb(&mut self, image: &RgbImage) {
        let width = self.pixmap.width().min(image.width());
        let height = self.pixmap.height().min(image.height());
        let stride = self.pixmap.width() as usize;
        let data = self.pixmap.data_mut();
        for y in 0..height {
            for x in 0..width {
                let px = image.get_pixel(x, y);
                let idx = (y as usize * stride + x as usize) * 4;
                data[idx] = px[0];
                data[idx + 1] = px[1];
                data[idx + 2] = px[2];
                data[idx + 3] = 255;
            }
        }
    }

    /// Copies the surface out as an RGB image, dropping alpha.
    pub fn to_rgb_image(&self) -> RgbImage {
        let width = self.pixmap.width();
        let data = self.pixmap.data();
        RgbImage::from_fn(width, self.pixmap.height(), |x, y| {
            let idx = ((y * width + x) * 4) as usize;
            Rgb([data[idx], data[idx + 1], data[idx + 2]])
        })
    }

    fn transform(&self) -> Transform {
        Transform::from_scale(self.zoom, self.zoom).post_translate(self.dx, self.dy)
    }

    fn paint_for(color: Color, alpha: f32) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color(tiny_skia::Color::from_rgba8(
            color.r,
            color.g,
            color.b,
            (alpha.clamp(0.0, 1.0) * 255.0) as u8,
        ));
        paint.anti_alias = true;
        paint
    }

    fn stroke_for(&self, pen: &Pen) -> Stroke {
        let scale = self.zoom.max(f32::EPSILON);
        let mut stroke = Stroke {
            width: (pen.width / scale).max(0.1),
            ..Stroke::default()
        };
        if pen.style == LineStyle::Dash {
            let pattern = DASH_PATTERN.iter().map(|v| v / scale).collect();
            stroke.dash = StrokeDash::new(pattern, 0.0);
        }
        stroke
    }

    fn polyline(points: &[Point], close: bool) -> Option<tiny_skia::Path> {
        let (first, rest) = points.split_first()?;
        let mut pb = PathBuilder::new();
        pb.move_to(first.x as f32, first.y as f32);
        for p in rest {
            pb.line_to(p.x as f32, p.y as f32);
        }
        if close {
            pb.close();
        }
        pb.finish()
    }

    fn stroke(&mut self, path: &tiny_skia::Path, pen: &Pen) {
        let paint = Self::paint_for(pen.color, pen.alpha);
        let stroke = self.stroke_for(pen);
        let transform = self.transform();
        self.pixmap.stroke_path(path, &paint, &stroke, transform, None);
    }

    fn fill(&mut self, path: &tiny_skia::Path, brush: &Brush) {
        let paint = Self::paint_for(brush.color, brush.alpha);
        let transform = self.transform();
        self.pixmap
            .fill_path(path, &paint, FillRule::Winding, transform, None);
    }
}

impl Backend for SkiaBackend {
    fn supports_curves(&self) -> bool {
        true
    }

    fn set_view_transform(&mut self, zoom: f64, dx: f64, dy: f64) {
        self.zoom = zoom as f32;
        self.dx = dx as f32;
        self.dy = dy as f32;
    }

    fn draw_line(&mut self, from: Point, to: Point, pen: &Pen) {
        if let Some(path) = Self::polyline(&[from, to], false) {
            self.stroke(&path, pen);
        }
    }

    fn draw_path(&mut self, points: &[Point], pen: &Pen) {
        if let Some(path) = Self::polyline(points, false) {
            self.stroke(&path, pen);
        }
    }

    fn draw_polygon(&mut self, points: &[Point], pen: &Pen, brush: Option<&Brush>) {
        if let Some(path) = Self::polyline(points, true) {
            if let Some(brush) = brush {
                self.fill(&path, brush);
            }
            self.stroke(&path, pen);
        }
    }

    fn draw_circle(&mut self, center: Point, radius: f64, pen: &Pen, brush: Option<&Brush>) {
        let Some(path) = PathBuilder::from_circle(center.x as f32, center.y as f32, radius as f32)
        else {
            return;
        };
        if let Some(brush) = brush {
            self.fill(&path, brush);
        }
        self.stroke(&path, pen);
    }

    fn draw_curve_path(
        &mut self,
        start: Point,
        segments: &[CubicSegment],
        pen: &Pen,
        brush: Option<&Brush>,
    ) {
        let mut pb = PathBuilder::new();
        pb.move_to(start.x as f32, start.y as f32);
        for seg in segments {
            pb.cubic_to(
                seg.c1.x as f32,
                seg.c1.y as f32,
                seg.c2.x as f32,
                seg.c2.y as f32,
                seg.to.x as f32,
                seg.to.y as f32,
            );
        }
        if brush.is_some() {
            pb.close();
        }
        let Some(path) = pb.finish() else {
            return;
        };
        if let Some(brush) = brush {
            self.fill(&path, brush);
        }
        self.stroke(&path, pen);
    }

    fn draw_text(&mut self, position: Point, text: &str, font: &TextFont) {
        let sx = f64::from(position.x as f32 * self.zoom + self.dx);
        let sy = f64::from(position.y as f32 * self.zoom + self.dy);
        let size = font.size * f64::from(self.zoom);
        let width = self.pixmap.width() as i32;
        let height = self.pixmap.height() as i32;
        let stride = self.pixmap.width() as usize;
        let (r, g, b) = (font.color.r, font.color.g, font.color.b);
        let alpha = font.alpha.clamp(0.0, 1.0);
        let data = self.pixmap.data_mut();
        fonts::draw_glyphs(&font.family, size, sx, sy, text, |px, py, coverage| {
            if px < 0 || px >= width || py < 0 || py >= height {
                return;
            }
            let a = coverage * alpha;
            if a <= 0.0 {
                return;
            }
            let idx = (py as usize * stride + px as usize) * 4;
            let inv = 1.0 - a;
            // surface is premultiplied, so source channels scale by alpha
            data[idx] = (f32::from(r) * a + f32::from(data[idx]) * inv) as u8;
            data[idx + 1] = (f32::from(g) * a + f32::from(data[idx + 1]) * inv) as u8;
            data[idx + 2] = (f32::from(b) * a + f32::from(data[idx + 2]) * inv) as u8;
            data[idx + 3] = (255.0 * a + f32::from(data[idx + 3]) * inv) as u8;
        });
    }

    fn text_extents(&mut self, text: &str, font: &TextFont) -> (f64, f64) {
        fonts::measure(&font.family, font.size, text)
    }
}
