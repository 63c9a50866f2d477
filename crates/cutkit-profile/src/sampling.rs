//! Pixel sampling along cut geometry.

use cutkit_core::{digital_line, Error, GeometryError, Result};
use cutkit_canvas::{Shape, ShapeKind};
use image::GrayImage;

/// Source of image pixel values for profile extraction.
pub trait PixelSource {
    /// Values at every integer pixel position on the segment, endpoints
    /// included.
    fn pixels_on_line(&self, x1: i32, y1: i32, x2: i32, y2: i32) -> Vec<f64>;

    /// Image dimensions as (width, height).
    fn size(&self) -> (u32, u32);

    /// Data position of the most recent cursor sample.
    fn last_cursor_pos(&self) -> (f64, f64);
}

/// In-memory raster backing a [`PixelSource`].
#[derive(Debug, Clone)]
pub struct RasterSource {
    width: u32,
    height: u32,
    data: Vec<f64>,
    cursor: (f64, f64),
}

impl RasterSource {
    /// Wraps row-major pixel values of the given dimensions.
    pub fn new(width: u32, height: u32, data: Vec<f64>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(Error::other(format!(
                "pixel buffer holds {} values, {}x{} image needs {}",
                data.len(),
                width,
                height,
                expected
            )));
        }
        Ok(Self {
            width,
            height,
            data,
            cursor: (0.0, 0.0),
        })
    }

    pub fn from_gray_image(image: &GrayImage) -> Self {
        let data = image.pixels().map(|p| p.0[0] as f64).collect();
        Self {
            width: image.width(),
            height: image.height(),
            data,
            cursor: (0.0, 0.0),
        }
    }

    /// Records the cursor data position reported by the viewer.
    pub fn set_cursor(&mut self, x: f64, y: f64) {
        self.cursor = (x, y);
    }

    /// Value at the pixel, zero outside the image.
    pub fn value_at(&self, x: i32, y: i32) -> f64 {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return 0.0;
        }
        self.data[y as usize * self.width as usize + x as usize]
    }
}

impl PixelSource for RasterSource {
    fn pixels_on_line(&self, x1: i32, y1: i32, x2: i32, y2: i32) -> Vec<f64> {
        digital_line(x1, y1, x2, y2)
            .into_iter()
            .map(|(x, y)| self.value_at(x, y))
            .collect()
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn last_cursor_pos(&self) -> (f64, f64) {
        self.cursor
    }
}

/// Samples pixel values along a geometric shape.
///
/// Paths sample each segment in turn; the shared vertex between adjacent
/// segments contributes a single sample.
pub fn sample_shape(
    shape: &Shape,
    source: &impl PixelSource,
) -> std::result::Result<Vec<f64>, GeometryError> {
    match &shape.kind {
        ShapeKind::Line(line) => Ok(source.pixels_on_line(
            line.start.x.trunc() as i32,
            line.start.y.trunc() as i32,
            line.end.x.trunc() as i32,
            line.end.y.trunc() as i32,
        )),
        ShapeKind::Path(path) | ShapeKind::FreePath(path) => {
            let points = path.points();
            if points.len() < 2 {
                return Err(GeometryError::Degenerate);
            }
            let mut values = Vec::new();
            for (i, pair) in points.windows(2).enumerate() {
                let segment = source.pixels_on_line(
                    pair[0].x.trunc() as i32,
                    pair[0].y.trunc() as i32,
                    pair[1].x.trunc() as i32,
                    pair[1].y.trunc() as i32,
                );
                if i == 0 {
                    values.extend(segment);
                } else {
                    values.extend(segment.into_iter().skip(1));
                }
            }
            Ok(values)
        }
        other => Err(GeometryError::InvalidKind {
            kind: other.name().to_string(),
        }),
    }
}
