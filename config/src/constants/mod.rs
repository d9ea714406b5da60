//! # Configuration Constants
//!
//! Centralized constants for the planar block pipeline. All intersection
//! tolerances, merge distances and offset defaults are defined here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Offset Defaults**: Thickness scaling, chamfer and projection defaults
//! - **Polygon Limits**: Minimum sizes for emitted polygons

use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Numerical tolerance used when a vector is tested for zero length.
///
/// # Examples
/// ```
/// use config::constants::EPSILON_TOLERANCE;
/// assert!(EPSILON_TOLERANCE < 1.0e-6);
/// ```
pub const EPSILON_TOLERANCE: f64 = 1.0e-9;

/// Tolerance of the plane-plane and line-plane intersection predicates.
///
/// Two unit plane normals whose `|dot| - 1` is within this value are treated
/// as parallel, as is a unit line direction whose dot product with a plane
/// normal is within this value.
///
/// # Examples
/// ```
/// use config::constants::{INTERSECTION_TOLERANCE, EPSILON_TOLERANCE};
/// assert!(INTERSECTION_TOLERANCE > EPSILON_TOLERANCE);
/// ```
pub const INTERSECTION_TOLERANCE: f64 = 1.0e-6;

/// Distance below which two consecutive block polygon points are merged.
///
/// Chamfering at sharp corners routinely produces coincident or
/// near-coincident points; they are collapsed before a block is emitted.
///
/// # Example
///
/// ```rust
/// use config::constants::BLOCK_MERGE_EPSILON;
///
/// fn points_should_merge(a: [f64; 3], b: [f64; 3]) -> bool {
///     let dx = a[0] - b[0];
///     let dy = a[1] - b[1];
///     let dz = a[2] - b[2];
///     (dx * dx + dy * dy + dz * dz).sqrt() <= BLOCK_MERGE_EPSILON
/// }
///
/// assert!(points_should_merge([0.0; 3], [0.0005, 0.0, 0.0]));
/// ```
pub const BLOCK_MERGE_EPSILON: f64 = 1e-3;

/// Default angular tolerance (radians) of the parallel-vector test.
///
/// Two vectors are parallel when the angle between them, or its supplement,
/// is below this value. The default is deliberately generous: side planes
/// within roughly 28 degrees of each other are treated as a straight run.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_TOLERANCE_PARALLEL;
/// assert_eq!(DEFAULT_TOLERANCE_PARALLEL, 0.5);
/// ```
pub const DEFAULT_TOLERANCE_PARALLEL: f64 = 0.5;

// =============================================================================
// OFFSET DEFAULTS
// =============================================================================

/// Default global thickness offset. Zero means "use per-vertex thickness".
pub const DEFAULT_OFFSET: f64 = 0.0;

/// Default chamfer distance applied at interior non-parallel corners.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_CHAMFER;
/// assert!(DEFAULT_CHAMFER > 0.0);
/// ```
pub const DEFAULT_CHAMFER: f64 = 0.05;

/// Default scale of the thickness used to displace the working mesh.
///
/// Zero keeps the bottom cap on the reference surface.
pub const DEFAULT_THICKNESS_SCALE_BOTTOM: f64 = 0.0;

/// Default scale of the thickness used to place the top cap.
pub const DEFAULT_THICKNESS_SCALE_TOP: f64 = 1.0;

/// Whether the bottom cap is projected onto one plane per face by default.
pub const DEFAULT_PROJECT_BOTTOM: bool = true;

/// Whether the top cap is projected onto one plane per face by default.
pub const DEFAULT_PROJECT_TOP: bool = false;

// =============================================================================
// POLYGON LIMITS
// =============================================================================

/// Minimum number of vertices of a reference face or an emitted cap polygon.
///
/// # Examples
/// ```
/// use config::constants::MIN_POLYGON_VERTICES;
/// assert_eq!(MIN_POLYGON_VERTICES, 3);
/// ```
pub const MIN_POLYGON_VERTICES: usize = 3;

// =============================================================================
// GLOBAL CONFIG
// =============================================================================

/// Immutable snapshot of global configuration settings that can be shared
/// between crates.
///
/// # Examples
/// ```
/// use config::constants::GlobalConfig;
/// let config = GlobalConfig::default();
/// assert!(config.tolerance > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalConfig {
    /// Numeric tolerance propagated into intersection predicates.
    pub tolerance: f64,
    /// Distance under which consecutive polygon points are merged.
    pub merge_epsilon: f64,
    /// Angular tolerance (radians) of the parallel-vector test.
    pub tolerance_parallel: f64,
}

impl GlobalConfig {
    /// Builds a configuration enforcing strict validation of the supplied
    /// tolerances.
    ///
    /// # Examples
    /// ```
    /// use config::constants::GlobalConfig;
    /// let cfg = GlobalConfig::new(1.0e-6, 1.0e-3, 0.25).expect("valid config");
    /// assert_eq!(cfg.tolerance_parallel, 0.25);
    /// ```
    pub fn new(
        tolerance: f64,
        merge_epsilon: f64,
        tolerance_parallel: f64,
    ) -> Result<Self, ConfigError> {
        if !(tolerance > 0.0 && tolerance.is_finite()) {
            return Err(ConfigError::InvalidTolerance(tolerance));
        }
        if !(merge_epsilon > 0.0 && merge_epsilon.is_finite()) {
            return Err(ConfigError::InvalidMergeEpsilon(merge_epsilon));
        }
        if !(tolerance_parallel > 0.0 && tolerance_parallel <= std::f64::consts::FRAC_PI_2) {
            return Err(ConfigError::InvalidParallelTolerance(tolerance_parallel));
        }
        Ok(Self {
            tolerance,
            merge_epsilon,
            tolerance_parallel,
        })
    }
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            tolerance: INTERSECTION_TOLERANCE,
            merge_epsilon: BLOCK_MERGE_EPSILON,
            tolerance_parallel: DEFAULT_TOLERANCE_PARALLEL,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Raised when tolerance is zero, negative or not finite.
    InvalidTolerance(f64),
    /// Raised when the merge epsilon is zero, negative or not finite.
    InvalidMergeEpsilon(f64),
    /// Raised when the parallel tolerance is outside `(0, PI/2]`.
    InvalidParallelTolerance(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTolerance(value) => {
                write!(f, "tolerance must be positive: {value}")
            }
            ConfigError::InvalidMergeEpsilon(value) => {
                write!(f, "merge_epsilon must be positive: {value}")
            }
            ConfigError::InvalidParallelTolerance(value) => {
                write!(f, "tolerance_parallel must be in (0, pi/2]: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
