//! # CutKit Canvas
//!
//! This crate provides the interactive annotation layer for CutKit: a
//! tag-indexed vector canvas composited over a raster image, with pluggable
//! drawing backends.
//!
//! ## Core Components
//!
//! ### Scene Model
//! - **Shapes**: Lines, paths, freehand paths, text labels, and compounds
//! - **Canvas**: Tag-indexed shape store with back-to-front draw order
//! - **Viewport**: Zoom and pan between data and canvas coordinates
//!
//! ### Rendering
//! - **RenderContext**: Pen, brush, and font state derived from shape styles
//! - **Backends**: Anti-aliased raster, plain pixel, and recording backends
//! - **ImageView**: Staged compositing of base image and overlay
//!
//! ### Interaction
//! - **Drawing**: Rubber-band gestures producing lines, paths, and freehand
//!   strokes
//! - **Editing**: Selection and control-point dragging with vertex keys
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cutkit_canvas::{ImageView, Shape};
//!
//! let mut view = ImageView::new(image)?;
//! view.canvas_mut().add_tagged("ruler", Shape::line(0.0, 0.0, 80.0, 60.0));
//! view.flush();
//! let composited = view.to_rgb_image();
//! ```

pub mod canvas;
pub mod fonts;
pub mod model;
pub mod render;
pub mod view;
pub mod viewport;

// Re-export the working set from submodules
pub use canvas::{Canvas, CanvasEvent, DrawKind, DrawTool, EditState, InteractMode, Whence};
pub use model::{
    Compound, Line, LineStyle, MetaValue, PathShape, Shape, ShapeId, ShapeKind, Style, Text,
};
pub use render::{
    Backend, Brush, CubicSegment, DrawOp, Pen, PixelBackend, RecordingBackend, RenderContext,
    SkiaBackend, TextFont, ellipse_bezier_points, flatten_curve_path,
};
pub use view::ImageView;
pub use viewport::Viewport;
