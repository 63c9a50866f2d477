//! # CutKit Profile
//!
//! Interactive pixel-profile extraction: cuts drawn over a raster image are
//! sampled pixel by pixel and plotted as value-versus-index profiles.
//!
//! ## Core Components
//!
//! - **CutsEngine**: Creates, replaces, moves, and deletes cuts on a canvas
//!   layer, allocating palette counts and replotting profiles
//! - **PixelSource**: Image sampling along digital line segments
//! - **PlotSink**: Destination for extracted profiles
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cutkit_profile::{CutsEngine, CutKind, RasterSource, RecordingPlot};
//!
//! let mut engine = CutsEngine::new(&config.cuts);
//! engine.attach(&mut view, &mut plot)?;
//! source.set_cursor(10.0, 20.0);
//! let tag = engine.cut_at(CutKind::Horizontal, &mut view, &source, &mut plot)?;
//! ```

pub mod engine;
pub mod plot;
pub mod sampling;

pub use engine::{CutKind, CutsEngine, CUTS_LAYER, NEW_CUT};
pub use plot::{PlotSeries, PlotSink, RecordingPlot};
pub use sampling::{sample_shape, PixelSource, RasterSource};
