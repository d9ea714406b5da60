//! # Caps
//!
//! Bottom and top polygons of a block, found by cutting every spoke with a
//! cap plane.
//!
//! ## Plane Modes
//!
//! - **Global** (`project_*` set): one plane per face through the face
//!   centroid with the face normal; the top plane is moved by the average
//!   face thickness times `thickness_scale_top`.
//! - **Local**: one plane per corner through `vertex + normal * t * scale`
//!   with the vertex normal, so neighbouring blocks share their cap points.
//!   When the projected neighbours of a corner do not line up, the corner
//!   falls back to the plane of the corner triangle.
//!
//! The bottom uses scale 0 because the working mesh is already displaced;
//! the top uses `thickness_scale_top`.

use rayon::prelude::*;
use tracing::{debug, trace};

use crate::blocks::spokes::SpokePair;
use crate::blocks::thickness::WorkingMesh;
use crate::config::BlockConfig;
use crate::core::plane::Plane;
use crate::core::vec3::{is_parallel, unitize, Vec3};
use crate::error::{BlockError, BlockResult};

/// Which cap of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapSide {
    /// Towards the reference surface.
    Bottom,
    /// Away from the reference surface.
    Top,
}

impl CapSide {
    /// Thickness multiplier of the cap plane.
    pub fn scale(self, config: &BlockConfig) -> f64 {
        match self {
            Self::Bottom => 0.0,
            Self::Top => config.thickness_scale_top,
        }
    }

    /// Whether this cap uses the per-face plane.
    pub fn is_projected(self, config: &BlockConfig) -> bool {
        match self {
            Self::Bottom => config.project_bottom,
            Self::Top => config.project_top,
        }
    }
}

impl std::fmt::Display for CapSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bottom => write!(f, "bottom"),
            Self::Top => write!(f, "top"),
        }
    }
}

/// Raw cap points of one face: two per corner, before duplicate removal.
#[derive(Debug, Clone, PartialEq)]
pub struct CapPoints {
    /// `[spoke0, spoke1]` hits of each corner on the bottom plane.
    pub bottom: Vec<Vec3>,
    /// `[spoke0, spoke1]` hits of each corner on the top plane.
    pub top: Vec<Vec3>,
}

impl CapPoints {
    /// Cuts the spokes of `face` with its bottom and top planes.
    ///
    /// # Errors
    ///
    /// [`BlockError::DegenerateGeometry`] when a cap plane is undefined or a
    /// spoke runs parallel to it.
    pub fn build(
        working: &WorkingMesh,
        face: usize,
        spokes: &[SpokePair],
        config: &BlockConfig,
    ) -> BlockResult<Self> {
        Ok(Self {
            bottom: cap_points(working, face, spokes, CapSide::Bottom, config)?,
            top: cap_points(working, face, spokes, CapSide::Top, config)?,
        })
    }
}

/// Per-face cap plane, moved by `offset` along the face normal.
pub fn global_cap_plane(working: &WorkingMesh, face: usize, offset: f64) -> BlockResult<Plane> {
    let mesh = working.mesh();
    let normal = mesh
        .face_normal(face)
        .ok_or_else(|| BlockError::degenerate_face(face, "face normal vanished"))?;
    let plane = Plane::new(mesh.face_centroid(face), normal)
        .ok_or_else(|| BlockError::degenerate_face(face, "face normal vanished"))?;
    Ok(plane.offset(offset))
}

/// Cap plane at loop position `corner` of `face`.
pub fn local_cap_plane(
    working: &WorkingMesh,
    face: usize,
    corner: usize,
    scale: f64,
    tolerance_parallel: f64,
) -> BlockResult<Plane> {
    let mesh = working.mesh();
    let loop_vertices = mesh.face_vertices(face);
    let n = loop_vertices.len();
    let vertex = loop_vertices[corner];
    let raw = [
        mesh.position(loop_vertices[(corner + n - 1) % n]),
        mesh.position(vertex),
        mesh.position(loop_vertices[(corner + 1) % n]),
    ];
    let lift = working.thickness(vertex) * scale;
    let normal = mesh.vertex_normal(vertex);

    let plane = Plane::new(raw[1] + normal * lift, normal)
        .ok_or_else(|| BlockError::degenerate_corner(face, corner, "vertex normal vanished"))?;
    let [p0, p1, p2] = raw.map(|p| plane.project_point(p));
    let aligned = match (unitize(p1 - p0), unitize(p1 - p2)) {
        (Some(v0), Some(v1)) => is_parallel(v0, -v1, tolerance_parallel),
        _ => false,
    };
    if aligned {
        return Ok(plane);
    }

    let triangle_normal = unitize(raw[1] - raw[0])
        .zip(unitize(raw[1] - raw[2]))
        .and_then(|(v0, v1)| unitize(v1.cross(v0)))
        .ok_or_else(|| {
            BlockError::degenerate_corner(face, corner, "corner triangle has no normal")
        })?;
    trace!(face, corner, "Local cap plane falls back to the corner triangle");
    Ok(Plane::from_unit_normal(raw[1] + triangle_normal * lift, triangle_normal))
}

/// The `2N` raw points of one cap of `face`.
pub fn cap_points(
    working: &WorkingMesh,
    face: usize,
    spokes: &[SpokePair],
    side: CapSide,
    config: &BlockConfig,
) -> BlockResult<Vec<Vec3>> {
    let scale = side.scale(config);
    let global = if side.is_projected(config) {
        let offset = working.average_thickness(face) * scale;
        Some(global_cap_plane(working, face, offset)?)
    } else {
        None
    };

    let mut points = Vec::with_capacity(spokes.len() * 2);
    for (corner, pair) in spokes.iter().enumerate() {
        let plane = match global {
            Some(plane) => plane,
            None => local_cap_plane(working, face, corner, scale, config.tolerance_parallel)?,
        };
        for spoke in [pair.spoke0, pair.spoke1] {
            let point = plane.intersect_line(&spoke.line()).ok_or_else(|| {
                BlockError::degenerate_corner(
                    face,
                    corner,
                    format!("spoke parallel to the {side} cap plane"),
                )
            })?;
            points.push(point);
        }
    }
    Ok(points)
}

/// Cap points of every face whose spokes exist.
pub fn build_caps(
    working: &WorkingMesh,
    spokes: &[BlockResult<Vec<SpokePair>>],
    config: &BlockConfig,
) -> Vec<BlockResult<CapPoints>> {
    let caps: Vec<_> = spokes
        .par_iter()
        .enumerate()
        .map(|(face, pairs)| -> BlockResult<CapPoints> {
            let pairs = pairs.as_ref().map_err(BlockError::clone)?;
            CapPoints::build(working, face, pairs, config)
        })
        .collect();

    debug!(
        faces = caps.len(),
        project_bottom = config.project_bottom,
        project_top = config.project_top,
        "Computed cap points"
    );
    caps
}
