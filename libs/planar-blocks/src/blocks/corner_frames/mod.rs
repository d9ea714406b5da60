//! # Corner Frames
//!
//! One frame per face corner, keyed by the half-edge leaving the corner
//! vertex. The frame's plane cuts the block at that corner.
//!
//! ## Construction
//!
//! With `n_prev`, `n_curr` the side-plane normals of the incoming and the
//! outgoing edge:
//!
//! - **Parallel** (`n_prev` and `n_curr` within the angular tolerance, either
//!   way round): the frame is spanned by `n_prev + n_curr` and the sum of the
//!   two averaged face normals. No chamfer is applied.
//! - **Non-parallel**: the two side planes are intersected; the frame is
//!   spanned by `n_curr - n_prev` and the intersection direction.
//!
//! ## Chamfer
//!
//! The dihedral factor `(1 - n_prev · n_curr) / 2` runs from 0 for opposite
//! side planes to 1 for coincident ones. Interior, non-parallel corners are
//! moved along their own normal by `chamfer * factor`.

use rayon::prelude::*;
use tracing::debug;

use crate::blocks::edge_frames::EdgeFrames;
use crate::core::frame::Frame;
use crate::core::vec3::{is_parallel, Vec3};
use crate::error::{BlockError, BlockResult};
use crate::mesh::halfedge::HalfEdgeId;
use crate::mesh::ReferenceMesh;

/// Chamfer frame at one face corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerFrame {
    /// Face half-edge leaving the corner vertex.
    pub halfedge: HalfEdgeId,
    /// Corner vertex.
    pub vertex: usize,
    /// Frame before chamfering.
    pub base: Frame,
    /// Frame after chamfering; equal to `base` when no chamfer applies.
    pub frame: Frame,
    /// Whether the incoming and outgoing side planes were classified parallel.
    pub is_parallel: bool,
    /// `(1 - n_prev · n_curr) / 2`.
    pub dihedral_factor: f64,
    /// Distance the frame was moved along its normal.
    pub chamfer_offset: f64,
}

impl CornerFrame {
    /// Builds the corner frame at the start of half-edge `id`.
    ///
    /// # Errors
    ///
    /// [`BlockError::DegenerateGeometry`] when either adjacent edge has no
    /// frame, the side planes of a non-parallel corner do not intersect or
    /// the frame axes vanish.
    pub fn build(
        mesh: &ReferenceMesh,
        edge_frames: &EdgeFrames,
        id: HalfEdgeId,
        chamfer: f64,
        tolerance_parallel: f64,
    ) -> BlockResult<Self> {
        let topology = mesh.topology();
        let halfedge = topology.halfedge(id);
        let face = halfedge.face;
        let corner = topology.corner_index(id);
        let vertex = halfedge.start;

        let prev = edge_frames.get(topology.prev(id))?;
        let curr = edge_frames.get(id)?;
        let (n_prev, n_curr) = (prev.normal(), curr.normal());
        let parallel = is_parallel(n_prev, n_curr, tolerance_parallel);

        let (x, y) = if parallel {
            (n_prev + n_curr, prev.primary() + curr.primary())
        } else {
            let line = prev.plane().intersect_plane(&curr.plane()).ok_or_else(|| {
                BlockError::degenerate_corner(face, corner, "side planes do not intersect")
            })?;
            (n_curr - n_prev, line.vector())
        };
        let base = Frame::new(mesh.position(vertex), x, y).ok_or_else(|| {
            BlockError::degenerate_corner(face, corner, "corner frame axes are dependent")
        })?;

        let dihedral_factor = dihedral_factor(n_prev, n_curr);
        let chamfer_offset = if parallel || mesh.is_vertex_on_boundary(vertex) {
            0.0
        } else {
            chamfer * dihedral_factor
        };
        let frame = if chamfer_offset == 0.0 {
            base
        } else {
            chamfered(&base, chamfer_offset)
        };

        Ok(Self {
            halfedge: id,
            vertex,
            base,
            frame,
            is_parallel: parallel,
            dihedral_factor,
            chamfer_offset,
        })
    }
}

/// `(1 - a · b) / 2` for unit side-plane normals `a` and `b`.
///
/// # Examples
/// ```
/// use planar_blocks::blocks::corner_frames::dihedral_factor;
/// use planar_blocks::Vec3;
/// assert_eq!(dihedral_factor(Vec3::X, -Vec3::X), 1.0);
/// assert_eq!(dihedral_factor(Vec3::X, Vec3::Y), 0.5);
/// ```
pub fn dihedral_factor(a: Vec3, b: Vec3) -> f64 {
    (1.0 - a.dot(b)) / 2.0
}

/// `frame` moved by `distance` along its own normal.
pub fn chamfered(frame: &Frame, distance: f64) -> Frame {
    frame.translated(frame.zaxis() * distance)
}

/// Corner frames of one face, in loop order.
pub fn face_corner_frames(
    mesh: &ReferenceMesh,
    edge_frames: &EdgeFrames,
    face: usize,
    chamfer: f64,
    tolerance_parallel: f64,
) -> BlockResult<Vec<CornerFrame>> {
    mesh.face_halfedges(face)
        .map(|id| CornerFrame::build(mesh, edge_frames, id, chamfer, tolerance_parallel))
        .collect()
}

/// Corner frames of every face, sharded across the rayon pool.
pub fn build_corner_frames(
    mesh: &ReferenceMesh,
    edge_frames: &EdgeFrames,
    chamfer: f64,
    tolerance_parallel: f64,
) -> Vec<BlockResult<Vec<CornerFrame>>> {
    let frames: Vec<_> = (0..mesh.face_count())
        .into_par_iter()
        .map(|face| face_corner_frames(mesh, edge_frames, face, chamfer, tolerance_parallel))
        .collect();

    let chamfered = frames
        .iter()
        .flatten()
        .flatten()
        .filter(|corner| corner.chamfer_offset != 0.0)
        .count();
    debug!(faces = frames.len(), chamfered, "Computed corner frames");
    frames
}

#[cfg(test)]
mod tests;
