//! Segment-only backend rasterizing into an owned RGB buffer.
//!
//! Reports no curve support, so the render context hands it flattened
//! polylines instead of bezier spans. Strokes are one pixel wide
//! regardless of pen width.

use cutkit_core::constants::DASH_PATTERN;
use cutkit_core::{digital_line, Color, Point};
use image::RgbImage;

use crate::fonts;
use crate::model::LineStyle;

use super::{Backend, Brush, Pen, TextFont};

pub struct PixelBackend {
    image: RgbImage,
    zoom: f64,
    dx: f64,
    dy: f64,
}

impl PixelBackend {
    pub fn new(width: u32, height: u32) -> Self {
        Self::from_image(RgbImage::new(width, height))
    }

    pub fn from_image(image: RgbImage) -> Self {
        Self {
            image,
            zoom: 1.0,
            dx: 0.0,
            dy: 0.0,
        }
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }

    fn map(&self, p: Point) -> (i32, i32) {
        (
            (p.x * self.zoom + self.dx).round() as i32,
            (p.y * self.zoom + self.dy).round() as i32,
        )
    }

    fn blend(&mut self, x: i32, y: i32, color: Color, alpha: f32) {
        if x < 0 || y < 0 || x >= self.image.width() as i32 || y >= self.image.height() as i32 {
            return;
        }
        let alpha = alpha.clamp(0.0, 1.0);
        let inv = 1.0 - alpha;
        let px = self.image.get_pixel_mut(x as u32, y as u32);
        px[0] = (f32::from(color.r) * alpha + f32::from(px[0]) * inv) as u8;
        px[1] = (f32::from(color.g) * alpha + f32::from(px[1]) * inv) as u8;
        px[2] = (f32::from(color.b) * alpha + f32::from(px[2]) * inv) as u8;
    }

    fn raster_line(&mut self, from: Point, to: Point, pen: &Pen) {
        let (x1, y1) = self.map(from);
        let (x2, y2) = self.map(to);
        let dashed = pen.style == LineStyle::Dash;
        let on = DASH_PATTERN[0] as usize;
        let period = (DASH_PATTERN[0] + DASH_PATTERN[1]) as usize;
        for (i, (x, y)) in digital_line(x1, y1, x2, y2).into_iter().enumerate() {
            if dashed && i % period >= on {
                continue;
            }
            self.blend(x, y, pen.color, pen.alpha);
        }
    }

    fn fill_polygon(&mut self, points: &[Point], brush: &Brush) {
        if points.len() < 3 {
            return;
        }
        let mapped: Vec<(f64, f64)> = points
            .iter()
            .map(|p| (p.x * self.zoom + self.dx, p.y * self.zoom + self.dy))
            .collect();
        let min_y = mapped.iter().map(|p| p.1).fold(f64::INFINITY, f64::min).floor() as i32;
        let max_y = mapped
            .iter()
            .map(|p| p.1)
            .fold(f64::NEG_INFINITY, f64::max)
            .ceil() as i32;
        for y in min_y..=max_y {
            let scan = f64::from(y) + 0.5;
            let mut crossings = Vec::new();
            for i in 0..mapped.len() {
                let (x1, y1) = mapped[i];
                let (x2, y2) = mapped[(i + 1) % mapped.len()];
                if (y1 <= scan && y2 > scan) || (y2 <= scan && y1 > scan) {
                    let t = (scan - y1) / (y2 - y1);
                    crossings.push(x1 + t * (x2 - x1));
                }
            }
            crossings.sort_by(|a, b| a.total_cmp(b));
            for pair in crossings.chunks_exact(2) {
                let start = pair[0].round() as i32;
                let end = pair[1].round() as i32;
                for x in start..=end {
                    self.blend(x, y, brush.color, brush.alpha);
                }
            }
        }
    }

    fn circle_points(center: Point, radius: f64) -> Vec<Point> {
        const SEGMENTS: usize = 32;
        (0..SEGMENTS)
            .map(|i| {
                let theta = i as f64 / SEGMENTS as f64 * std::f64::consts::TAU;
                Point::new(
                    center.x + radius * theta.cos(),
                    center.y + radius * theta.sin(),
                )
            })
            .collect()
    }
}

impl Backend for PixelBackend {
    fn set_view_transform(&mut self, zoom: f64, dx: f64, dy: f64) {
        self.zoom = zoom;
        self.dx = dx;
        self.dy = dy;
    }

    fn draw_line(&mut self, from: Point, to: Point, pen: &Pen) {
        self.raster_line(from, to, pen);
    }

    fn draw_path(&mut self, points: &[Point], pen: &Pen) {
        for pair in points.windows(2) {
            self.raster_line(pair[0], pair[1], pen);
        }
    }

    fn draw_polygon(&mut self, points: &[Point], pen: &Pen, brush: Option<&Brush>) {
        if let Some(brush) = brush {
            self.fill_polygon(points, brush);
        }
        if points.len() >= 2 {
            for pair in points.windows(2) {
                self.raster_line(pair[0], pair[1], pen);
            }
            self.raster_line(points[points.len() - 1], points[0], pen);
        }
    }

    fn draw_circle(&mut self, center: Point, radius: f64, pen: &Pen, brush: Option<&Brush>) {
        let ring = Self::circle_points(center, radius);
        self.draw_polygon(&ring, pen, brush);
    }

    fn draw_text(&mut self, position: Point, text: &str, font: &TextFont) {
        let sx = position.x * self.zoom + self.dx;
        let sy = position.y * self.zoom + self.dy;
        let size = font.size * self.zoom;
        let color = font.color;
        let alpha = font.alpha.clamp(0.0, 1.0);
        fonts::draw_glyphs(&font.family, size, sx, sy, text, |px, py, coverage| {
            self.blend(px, py, color, coverage * alpha);
        });
    }

    fn text_extents(&mut self, text: &str, font: &TextFont) -> (f64, f64) {
        fonts::measure(&font.family, font.size, text)
    }
}
