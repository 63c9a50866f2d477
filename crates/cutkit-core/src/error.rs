//! Error handling for CutKit
//!
//! Provides the error types for the scene-graph and profile layers:
//! - Canvas errors (tag lookup and uniqueness)
//! - Geometry errors (shapes the profile sampler cannot walk)
//!
//! All error types use `thiserror`. Tag lookup misses are expected
//! control-flow signals, not faults; callers are expected to catch
//! `CanvasError::NotFound` and continue.

use thiserror::Error;

/// Canvas error type
///
/// Represents errors raised by tag-indexed canvas operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CanvasError {
    /// No shape is bound to the requested tag
    #[error("No object found with tag '{tag}'")]
    NotFound {
        /// The tag that was looked up.
        tag: String,
    },

    /// A shape is already bound to the tag and the caller required uniqueness
    #[error("Tag '{tag}' is already in use")]
    DuplicateTag {
        /// The tag that collided.
        tag: String,
    },
}

impl CanvasError {
    /// Check if this is a tag-lookup miss
    pub fn is_not_found(&self) -> bool {
        matches!(self, CanvasError::NotFound { .. })
    }

    /// Check if this is a tag collision
    pub fn is_duplicate_tag(&self) -> bool {
        matches!(self, CanvasError::DuplicateTag { .. })
    }
}

/// Geometry error type
///
/// Represents shapes the profile sampler cannot traverse. These are
/// skip-and-continue conditions, never fatal to a profile pass.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// The shape kind carries no line geometry to sample
    #[error("Cannot sample pixels along shape kind '{kind}'")]
    InvalidKind {
        /// The offending shape kind name.
        kind: String,
    },

    /// A path shape with no vertices reached an operation that needs geometry
    #[error("Shape has no vertices")]
    Degenerate,
}

/// Main error type for CutKit
///
/// A unified error type that can represent any error from the core layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Canvas error
    #[error(transparent)]
    Canvas(#[from] CanvasError),

    /// Geometry error
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a tag-lookup miss
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Canvas(CanvasError::NotFound { .. }))
    }

    /// Check if this is a tag collision
    pub fn is_duplicate_tag(&self) -> bool {
        matches!(self, Error::Canvas(CanvasError::DuplicateTag { .. }))
    }

    /// Check if this is a geometry error
    pub fn is_geometry_error(&self) -> bool {
        matches!(self, Error::Geometry(_))
    }
}

/// Result type alias using the unified CutKit error
pub type Result<T> = std::result::Result<T, Error>;
