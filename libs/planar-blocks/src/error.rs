//! # Error Types
//!
//! Error types for block construction. All errors are explicit and provide
//! clear debugging information.
//!
//! ## Error Policy
//!
//! - NO fallback mechanisms when an intersection is missing
//! - Configuration problems surface before any geometry work begins
//! - Geometry failures name the face (and corner) that could not be built

use thiserror::Error;

use crate::mesh::halfedge::TopologyError;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur while building blocks.
///
/// ## Example
///
/// ```rust
/// use planar_blocks::{offset_planar_blocks, BlockConfig, BlockError, ReferenceMesh, Vec3};
///
/// let mesh = ReferenceMesh::from_polygons(
///     vec![Vec3::ZERO, Vec3::X, Vec3::new(1.0, 1.0, 0.0), Vec3::Y],
///     vec![vec![0, 1, 2, 3]],
/// )
/// .expect("valid mesh");
///
/// // No thickness on the vertices and no global offset
/// match offset_planar_blocks(&mesh, &BlockConfig::default()) {
///     Err(BlockError::Configuration(msg)) => assert!(msg.contains("thickness")),
///     other => panic!("unexpected: {other:?}"),
/// }
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BlockError {
    /// Missing or invalid input parameters.
    ///
    /// Raised before any geometry is computed.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A required plane-plane or line-plane intersection, or a frame, does
    /// not exist for the given face.
    #[error("Degenerate geometry at face {face}{}: {message}", corner_suffix(.corner))]
    DegenerateGeometry {
        /// Reference face whose block could not be built.
        face: usize,
        /// Corner position within the face loop, when known.
        corner: Option<usize>,
        /// What failed.
        message: String,
    },

    /// The reference mesh itself is malformed.
    #[error("Invalid mesh: {0}")]
    Topology(#[from] TopologyError),
}

fn corner_suffix(corner: &Option<usize>) -> String {
    corner.map(|c| format!(", corner {c}")).unwrap_or_default()
}

impl BlockError {
    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Creates a degenerate geometry error for a whole face.
    pub fn degenerate_face(face: usize, message: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            face,
            corner: None,
            message: message.into(),
        }
    }

    /// Creates a degenerate geometry error for one corner of a face.
    pub fn degenerate_corner(face: usize, corner: usize, message: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            face,
            corner: Some(corner),
            message: message.into(),
        }
    }

    /// Face the error refers to, if it is a per-face geometry failure.
    pub fn face(&self) -> Option<usize> {
        match self {
            Self::DegenerateGeometry { face, .. } => Some(*face),
            _ => None,
        }
    }
}

impl From<config::constants::ConfigError> for BlockError {
    fn from(err: config::constants::ConfigError) -> Self {
        Self::Configuration(err.to_string())
    }
}

// =============================================================================
// RESULT TYPE ALIAS
// =============================================================================

/// Result type alias for block operations.
pub type BlockResult<T> = Result<T, BlockError>;

// =============================================================================
// TESTS
// =============================================================================
