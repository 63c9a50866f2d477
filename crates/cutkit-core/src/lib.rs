//! # CutKit Core
//!
//! Core types shared by every CutKit crate: the geometry point, color
//! handling with the named cut palette, workspace-wide constants, and the
//! error taxonomy.

pub mod color;
pub mod constants;
pub mod error;
pub mod geometry;

pub use color::{palette_from_names, Color, DEFAULT_CUT_COLORS};
pub use error::{CanvasError, Error, GeometryError, Result};
pub use geometry::{digital_line, Point};
