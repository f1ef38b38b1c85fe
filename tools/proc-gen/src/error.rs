//! Generation errors
//!
//! Every variant is a local construction failure detected at the point of
//! invalid input. None of them are retried.

use std::path::PathBuf;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, GenError>;

/// Errors raised while building geometry, textures or scenes
#[derive(Debug, thiserror::Error)]
pub enum GenError {
    /// Profile has fewer than 3 usable points after deduplication
    #[error("degenerate profile: {0} usable points (need at least 3)")]
    DegenerateProfile(usize),

    /// Adjacent loft rings disagree on point count or closedness
    #[error("ring {ring} has {got} points, expected {expected}")]
    ShapeMismatch {
        ring: usize,
        expected: usize,
        got: usize,
    },

    /// Loft needs at least two rings
    #[error("loft needs at least 2 rings, got {0}")]
    TooFewRings(usize),

    /// Path curve segment counts too low to represent the stadium extremes
    #[error("{which} resolution {got} is below the minimum of 2")]
    InsufficientResolution { which: &'static str, got: u32 },

    /// Attachment section count below 1
    #[error("attachment needs at least 1 section, got {0}")]
    DegenerateAttachment(u32),

    /// Entity was already tagged
    #[error("{entity} is already tagged as '{existing}' (attempted '{attempted}')")]
    DuplicateTag {
        entity: String,
        existing: String,
        attempted: String,
    },

    /// Tag value is not a canonical lowercase identifier
    #[error("'{0}' is not a canonical tag (expected [a-z0-9_]+)")]
    InvalidTag(String),

    /// Output directory or file could not be created or written
    #[error("failed to write {path:?}: {source}")]
    IoFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Scene could not be serialized to glTF
    #[error("GLB export failed: {0}")]
    Export(String),
}

impl GenError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoFailure {
            path: path.into(),
            source,
        }
    }
}
