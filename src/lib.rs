//! # CutKit
//!
//! Interactive vector annotations over raster images with support for:
//! - Tagged shape canvases with compound grouping and incremental redraw
//! - Pluggable rendering backends (tiny-skia raster, recording, pixel probe)
//! - Interactive drawing gestures and control-point editing
//! - Pixel-profile "cuts" sampled along drawn geometry and replotted live
//!
//! ## Architecture
//!
//! CutKit is organized as a workspace with multiple crates:
//!
//! 1. **cutkit-core** - Geometry primitives, colors, error taxonomy
//! 2. **cutkit-canvas** - Shape model, render contexts, canvas, compositing view
//! 3. **cutkit-profile** - Pixel sampling, plot sinks, the cut engine
//! 4. **cutkit-settings** - Configuration structs and persistence
//!
//! Hosts embed an [`ImageView`], attach a [`CutsEngine`], and forward input
//! events; the engine keeps the plotted profiles in sync with the cuts.

// Re-export crates under short module names
pub use cutkit_canvas as canvas;
pub use cutkit_profile as profile;
pub use cutkit_settings as settings;

pub use cutkit_core::constants;

pub use cutkit_core::{
    digital_line, palette_from_names, CanvasError, Color, Error, GeometryError, Point, Result,
    DEFAULT_CUT_COLORS,
};

pub use cutkit_canvas::{
    ellipse_bezier_points, flatten_curve_path, Backend, Brush, Canvas, CanvasEvent, Compound,
    CubicSegment, DrawKind, DrawOp, DrawTool, EditState, ImageView, InteractMode, Line, LineStyle,
    MetaValue, PathShape, Pen, PixelBackend, RecordingBackend, RenderContext, Shape, ShapeId,
    ShapeKind, SkiaBackend, Style, Text, TextFont, Viewport, Whence,
};

pub use cutkit_profile::{
    sample_shape, CutKind, CutsEngine, PixelSource, PlotSeries, PlotSink, RasterSource,
    RecordingPlot, CUTS_LAYER, NEW_CUT,
};

pub use cutkit_settings::{
    Config, CutsConfig, SettingsError, SettingsManager, SettingsResult, ViewConfig,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Compact console output
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .compact();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
