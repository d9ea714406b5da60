//! Block pipeline configuration building on the shared `config` crate.
//!
//! Defaults come from `config::constants` so the pipeline stays decoupled
//! from literal values.

use config::constants::{
    GlobalConfig, BLOCK_MERGE_EPSILON, DEFAULT_CHAMFER, DEFAULT_OFFSET, DEFAULT_PROJECT_BOTTOM,
    DEFAULT_PROJECT_TOP, DEFAULT_THICKNESS_SCALE_BOTTOM, DEFAULT_THICKNESS_SCALE_TOP,
    DEFAULT_TOLERANCE_PARALLEL, INTERSECTION_TOLERANCE,
};
use serde::{Deserialize, Serialize};

use crate::core::vec3::Vec3;
use crate::error::{BlockError, BlockResult};

/// Parameters of the planar block pipeline.
///
/// # Examples
/// ```
/// use planar_blocks::BlockConfig;
///
/// let cfg = BlockConfig::default().with_chamfer(0.0).with_projection(true, true);
/// assert!(cfg.validate().is_ok());
/// assert_eq!(cfg.thickness_scale_top, 1.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockConfig {
    /// Uniform thickness overriding every vertex thickness when non-zero.
    pub offset: f64,
    /// Chamfer distance at non-parallel interior corners.
    pub chamfer: f64,
    /// Fraction of the thickness by which the reference surface is moved
    /// before blocks are built.
    pub thickness_scale_bottom: f64,
    /// Fraction of the thickness placed between bottom and top caps.
    pub thickness_scale_top: f64,
    /// Flatten each bottom cap onto the face plane instead of per-vertex planes.
    pub project_bottom: bool,
    /// Flatten each top cap onto the offset face plane instead of per-vertex
    /// planes. Also flips the block frame onto the top cap.
    pub project_top: bool,
    /// Angular tolerance in radians of the parallel-vector test.
    pub tolerance_parallel: f64,
    /// Distance below which consecutive polygon points are merged.
    pub merge_epsilon: f64,
    /// Replacement vertex normals used for displacement and spoke orientation.
    pub vertex_normals: Option<Vec<Vec3>>,
}

impl Default for BlockConfig {
    fn default() -> Self {
        Self {
            offset: DEFAULT_OFFSET,
            chamfer: DEFAULT_CHAMFER,
            thickness_scale_bottom: DEFAULT_THICKNESS_SCALE_BOTTOM,
            thickness_scale_top: DEFAULT_THICKNESS_SCALE_TOP,
            project_bottom: DEFAULT_PROJECT_BOTTOM,
            project_top: DEFAULT_PROJECT_TOP,
            tolerance_parallel: DEFAULT_TOLERANCE_PARALLEL,
            merge_epsilon: BLOCK_MERGE_EPSILON,
            vertex_normals: None,
        }
    }
}

impl BlockConfig {
    /// Caps follow the per-vertex planes on both sides, so neighbouring
    /// blocks keep a continuous intrados and extrados.
    #[must_use]
    pub fn continuous() -> Self {
        Self {
            project_bottom: false,
            project_top: false,
            ..Self::default()
        }
    }

    /// Flat caps on both sides and no chamfer.
    #[must_use]
    pub fn prismatic() -> Self {
        Self {
            chamfer: 0.0,
            project_bottom: true,
            project_top: true,
            ..Self::default()
        }
    }

    /// Sets the uniform thickness override.
    #[must_use]
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// Sets the chamfer distance.
    #[must_use]
    pub fn with_chamfer(mut self, chamfer: f64) -> Self {
        self.chamfer = chamfer;
        self
    }

    /// Sets the bottom and top thickness scales.
    #[must_use]
    pub fn with_thickness_scales(mut self, bottom: f64, top: f64) -> Self {
        self.thickness_scale_bottom = bottom;
        self.thickness_scale_top = top;
        self
    }

    /// Chooses flat (`true`) or per-vertex (`false`) caps.
    #[must_use]
    pub fn with_projection(mut self, bottom: bool, top: bool) -> Self {
        self.project_bottom = bottom;
        self.project_top = top;
        self
    }

    /// Sets the angular parallel tolerance in radians.
    #[must_use]
    pub fn with_tolerance_parallel(mut self, tolerance: f64) -> Self {
        self.tolerance_parallel = tolerance;
        self
    }

    /// Sets the point merge distance.
    #[must_use]
    pub fn with_merge_epsilon(mut self, epsilon: f64) -> Self {
        self.merge_epsilon = epsilon;
        self
    }

    /// Replaces the mesh vertex normals.
    #[must_use]
    pub fn with_vertex_normals(mut self, normals: Vec<Vec3>) -> Self {
        self.vertex_normals = Some(normals);
        self
    }

    /// Checks every scalar parameter.
    ///
    /// Returns the validated tolerances on success.
    ///
    /// # Errors
    ///
    /// [`BlockError::Configuration`] for non-finite values, a non-positive
    /// merge distance or a parallel tolerance outside `(0, PI/2]`.
    pub fn validate(&self) -> BlockResult<GlobalConfig> {
        let scalars = [
            ("offset", self.offset),
            ("chamfer", self.chamfer),
            ("thickness_scale_bottom", self.thickness_scale_bottom),
            ("thickness_scale_top", self.thickness_scale_top),
        ];
        if let Some((name, value)) = scalars.iter().find(|(_, value)| !value.is_finite()) {
            return Err(BlockError::configuration(format!(
                "{name} must be finite, got {value}"
            )));
        }
        Ok(GlobalConfig::new(
            INTERSECTION_TOLERANCE,
            self.merge_epsilon,
            self.tolerance_parallel,
        )?)
    }
}
