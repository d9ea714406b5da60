//! Spokes.
//!
//! At every face corner two lines run through the block thickness: `spoke0`
//! where the incoming side plane meets the corner plane, `spoke1` where the
//! outgoing side plane meets it. Each spoke points along the vertex normal
//! and starts where it crosses the plane through the vertex perpendicular to
//! that normal.

use rayon::prelude::*;
use tracing::debug;

use crate::blocks::corner_frames::CornerFrame;
use crate::blocks::edge_frames::EdgeFrames;
use crate::core::plane::{Line, Plane};
use crate::core::vec3::Vec3;
use crate::error::{BlockError, BlockResult};
use crate::mesh::halfedge::HalfEdgeId;
use crate::mesh::ReferenceMesh;

/// Ray with a unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spoke {
    /// Start point, on the plane through the vertex.
    pub origin: Vec3,
    /// Unit direction, oriented along the vertex normal.
    pub direction: Vec3,
}

impl Spoke {
    /// The spoke as a two-point line.
    pub fn line(&self) -> Line {
        Line::new(self.origin, self.origin + self.direction)
    }
}

/// The two spokes of one face corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpokePair {
    /// Face half-edge leaving the corner vertex.
    pub halfedge: HalfEdgeId,
    /// Incoming side plane ∩ corner plane.
    pub spoke0: Spoke,
    /// Outgoing side plane ∩ corner plane.
    pub spoke1: Spoke,
}

impl SpokePair {
    /// Computes both spokes of `corner`.
    ///
    /// # Errors
    ///
    /// [`BlockError::DegenerateGeometry`] when a side plane is parallel to
    /// the corner plane or a spoke never crosses the vertex plane.
    pub fn build(
        mesh: &ReferenceMesh,
        edge_frames: &EdgeFrames,
        corner: &CornerFrame,
    ) -> BlockResult<Self> {
        let topology = mesh.topology();
        let id = corner.halfedge;
        let face = topology.halfedge(id).face;
        let index = topology.corner_index(id);
        let fail = |message: &str| BlockError::degenerate_corner(face, index, message);

        let position = mesh.position(corner.vertex);
        let normal = mesh.vertex_normal(corner.vertex);
        let reference = position + normal;
        let anchor = Plane::new(position, normal).ok_or_else(|| fail("vertex normal vanished"))?;
        let corner_plane = corner.frame.plane();

        let spoke = |side: &Plane, which: &str| -> BlockResult<Spoke> {
            let line = side
                .intersect_plane(&corner_plane)
                .ok_or_else(|| fail(&format!("{which}: side plane parallel to corner plane")))?;
            let line = orient_line(line, reference);
            let origin = anchor
                .intersect_line(&line)
                .ok_or_else(|| fail(&format!("{which}: no intersection with the vertex plane")))?;
            let direction = line
                .direction()
                .ok_or_else(|| fail(&format!("{which}: zero-length direction")))?;
            Ok(Spoke { origin, direction })
        };

        Ok(Self {
            halfedge: id,
            spoke0: spoke(&edge_frames.get(topology.prev(id))?.plane(), "spoke0")?,
            spoke1: spoke(&edge_frames.get(id)?.plane(), "spoke1")?,
        })
    }
}

/// Orients `line` so that it points towards `reference`.
///
/// With `d = end - start`, the line is reversed when `start - d` lies closer
/// to `reference` than `end + d`.
///
/// # Examples
/// ```
/// use planar_blocks::blocks::spokes::orient_line;
/// use planar_blocks::{Line, Vec3};
///
/// let down = Line::new(Vec3::Z, Vec3::ZERO);
/// let up = orient_line(down, Vec3::new(0.0, 0.0, 5.0));
/// assert_eq!(up.vector(), Vec3::Z);
/// ```
pub fn orient_line(line: Line, reference: Vec3) -> Line {
    let d = line.vector();
    let behind = (line.start - d - reference).length_squared();
    let ahead = (line.end + d - reference).length_squared();
    if behind < ahead {
        line.reversed()
    } else {
        line
    }
}

/// Spokes of every corner of every face whose corner frames exist.
pub fn build_spokes(
    mesh: &ReferenceMesh,
    edge_frames: &EdgeFrames,
    corner_frames: &[BlockResult<Vec<CornerFrame>>],
) -> Vec<BlockResult<Vec<SpokePair>>> {
    let spokes: Vec<_> = corner_frames
        .par_iter()
        .map(|corners| -> BlockResult<Vec<SpokePair>> {
            corners
                .as_ref()
                .map_err(BlockError::clone)?
                .iter()
                .map(|corner| SpokePair::build(mesh, edge_frames, corner))
                .collect()
        })
        .collect();

    debug!(faces = spokes.len(), "Computed spokes");
    spokes
}
