//! Edge frames.
//!
//! Every half-edge gets a frame at its edge midpoint: the x-axis is the
//! averaged normal of the adjacent faces, the y-axis the edge tangent, and the
//! z-axis the normal of the side plane that will cut the block along this
//! edge. Both half-edges of an edge share the x-axis and have opposite
//! tangents, so their side-plane normals are opposite too.

use rayon::prelude::*;
use tracing::debug;

use crate::core::frame::Frame;
use crate::core::plane::Plane;
use crate::core::vec3::{zero, Vec3};
use crate::error::{BlockError, BlockResult};
use crate::mesh::halfedge::HalfEdgeId;
use crate::mesh::ReferenceMesh;

/// Frame of one directed edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeFrame {
    /// Half-edge the frame belongs to.
    pub halfedge: HalfEdgeId,
    /// Midpoint frame; its plane is the side plane of the edge.
    pub frame: Frame,
    /// `(n0 + n1) / 2` before normalization, with a zero vector for a
    /// missing face.
    pub averaged_normal: Vec3,
}

impl EdgeFrame {
    /// Side-plane normal (frame z-axis).
    #[inline]
    pub fn normal(&self) -> Vec3 {
        self.frame.zaxis()
    }

    /// Averaged face normal direction (frame x-axis).
    #[inline]
    pub fn primary(&self) -> Vec3 {
        self.frame.xaxis()
    }

    /// Unit edge tangent (frame y-axis).
    #[inline]
    pub fn secondary(&self) -> Vec3 {
        self.frame.yaxis()
    }

    /// Side plane through the edge.
    pub fn plane(&self) -> Plane {
        self.frame.plane()
    }
}

/// Edge frames indexed by half-edge id.
///
/// A half-edge whose frame cannot be built keeps its error in its own slot;
/// only the face owning that half-edge is affected.
#[derive(Debug, Clone, Default)]
pub struct EdgeFrames {
    frames: Vec<BlockResult<EdgeFrame>>,
}

impl EdgeFrames {
    /// Computes the frames of every half-edge of `mesh`.
    ///
    /// A slot holds [`BlockError::DegenerateGeometry`] when an adjacent face
    /// has no normal or the averaged normal of the edge vanishes.
    pub fn build(mesh: &ReferenceMesh) -> Self {
        let topology = mesh.topology();
        let frames: Vec<_> = (0..topology.halfedge_count())
            .into_par_iter()
            .map(|i| edge_frame(mesh, HalfEdgeId(i)))
            .collect();

        let failed = frames.iter().filter(|f| f.is_err()).count();
        debug!(
            halfedges = frames.len(),
            edges = topology.edge_count(),
            failed,
            "Computed edge frames"
        );
        Self { frames }
    }

    /// Frame of half-edge `id`.
    ///
    /// # Errors
    ///
    /// The error recorded for `id` when its frame could not be built.
    #[inline]
    pub fn get(&self, id: HalfEdgeId) -> BlockResult<&EdgeFrame> {
        self.frames[id.index()].as_ref().map_err(BlockError::clone)
    }

    /// Number of half-edge slots.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether there are no slots.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Successfully built frames in half-edge order.
    pub fn iter(&self) -> impl Iterator<Item = &EdgeFrame> {
        self.frames.iter().filter_map(|f| f.as_ref().ok())
    }

    /// Half-edges without a frame, in half-edge order.
    pub fn failures(&self) -> impl Iterator<Item = &BlockError> {
        self.frames.iter().filter_map(|f| f.as_ref().err())
    }
}

fn edge_frame(mesh: &ReferenceMesh, id: HalfEdgeId) -> BlockResult<EdgeFrame> {
    let topology = mesh.topology();
    let halfedge = topology.halfedge(id);
    let face = halfedge.face;
    let corner = topology.corner_index(id);

    // Both directions are derived from the same representative so the shared
    // x-axis is bit-identical.
    let (representative, sign) = match halfedge.twin {
        Some(twin) if twin < id => (twin, -1.0),
        _ => (id, 1.0),
    };
    let edge = topology.halfedge(representative);
    let u = mesh.position(edge.start);
    let v = mesh.position(edge.end);

    let normals = topology.edge_faces(representative).map(|side| match side {
        Some(f) => mesh.face_normal(f).ok_or_else(|| {
            BlockError::degenerate_corner(
                face,
                corner,
                format!("adjacent face {f} has no normal in the working mesh"),
            )
        }),
        None => Ok(zero()),
    });
    let [n0, n1] = normals;
    let averaged_normal = (n0? + n1?) / 2.0;

    let frame = Frame::new((u + v) / 2.0, averaged_normal, (v - u) * sign).ok_or_else(|| {
        BlockError::degenerate_corner(
            face,
            corner,
            format!(
                "edge {} -> {} has no frame: adjacent face normals cancel or align with the edge",
                halfedge.start, halfedge.end
            ),
        )
    })?;

    Ok(EdgeFrame {
        halfedge: id,
        frame,
        averaged_normal,
    })
}

#[cfg(test)]
mod tests;
