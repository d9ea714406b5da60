//! # Mesh Module
//!
//! Polygon reference surface carrying per-vertex normals and thickness.
//!
//! ## Structure
//!
//! - `ReferenceMesh` - positions, normals, thickness field and face loops
//! - `halfedge` - dense half-edge arena derived from the face loops
//!
//! ## Example
//!
//! ```rust
//! use planar_blocks::{ReferenceMesh, Vec3};
//!
//! let mesh = ReferenceMesh::from_polygons(
//!     vec![Vec3::ZERO, Vec3::X, Vec3::new(1.0, 1.0, 0.0), Vec3::Y],
//!     vec![vec![0, 1, 2, 3]],
//! )
//! .expect("valid mesh")
//! .with_uniform_thickness(0.3);
//!
//! assert_eq!(mesh.face_normal(0), Some(Vec3::Z));
//! assert_eq!(mesh.vertex_normal(2), Vec3::Z);
//! assert_eq!(mesh.thickness(1), Some(0.3));
//! ```

pub mod halfedge;

use config::constants::EPSILON_TOLERANCE;

use crate::core::vec3::{centroid, unitize, zero, Vec3};

use self::halfedge::{HalfEdge, HalfEdgeId, HalfEdgeTopology, TopologyError, TopologyResult};

// =============================================================================
// REFERENCE MESH
// =============================================================================

/// Polygon mesh with per-vertex unit normals and an optional thickness.
///
/// Faces are ordered vertex loops; the winding defines the face normal.
#[derive(Debug, Clone)]
pub struct ReferenceMesh {
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    thickness: Vec<Option<f64>>,
    faces: Vec<Vec<usize>>,
    topology: HalfEdgeTopology,
}

impl ReferenceMesh {
    // =========================================================================
    // CONSTRUCTORS
    // =========================================================================

    /// Builds a mesh from vertex positions and face loops.
    ///
    /// Vertex normals are computed as the normalized sum of the normals of
    /// the incident faces. No vertex carries a thickness yet.
    ///
    /// ## Errors
    ///
    /// Returns a [`TopologyError`] for invalid loops, coincident edge
    /// endpoints, faces without a normal, or referenced vertices whose
    /// incident face normals cancel out.
    pub fn from_polygons(positions: Vec<Vec3>, faces: Vec<Vec<usize>>) -> TopologyResult<Self> {
        let topology = HalfEdgeTopology::from_faces(positions.len(), &faces)?;

        for halfedge in topology.halfedges() {
            if positions[halfedge.start].distance(positions[halfedge.end]) <= EPSILON_TOLERANCE {
                return Err(TopologyError::ZeroLengthEdge {
                    face: halfedge.face,
                    start: halfedge.start,
                    end: halfedge.end,
                });
            }
        }

        let mut sums = vec![zero(); positions.len()];
        let mut referenced = vec![false; positions.len()];
        for (face, loop_vertices) in faces.iter().enumerate() {
            let normal = polygon_normal(&positions, loop_vertices)
                .ok_or(TopologyError::DegenerateFaceNormal(face))?;
            for &vertex in loop_vertices {
                sums[vertex] += normal;
                referenced[vertex] = true;
            }
        }

        let normals = sums
            .into_iter()
            .zip(referenced)
            .enumerate()
            .map(|(vertex, (sum, used))| match (unitize(sum), used) {
                (Some(normal), _) => Ok(normal),
                (None, false) => Ok(zero()),
                (None, true) => Err(TopologyError::DegenerateVertexNormal(vertex)),
            })
            .collect::<TopologyResult<Vec<_>>>()?;

        let thickness = vec![None; positions.len()];
        Ok(Self {
            positions,
            normals,
            thickness,
            faces,
            topology,
        })
    }

    /// Replaces the computed vertex normals. Each normal is normalized.
    pub fn with_vertex_normals(mut self, normals: Vec<Vec3>) -> TopologyResult<Self> {
        if normals.len() != self.positions.len() {
            return Err(TopologyError::AttributeLength {
                attribute: "normal",
                expected: self.positions.len(),
                found: normals.len(),
            });
        }
        self.normals = normals
            .into_iter()
            .enumerate()
            .map(|(vertex, n)| unitize(n).ok_or(TopologyError::DegenerateVertexNormal(vertex)))
            .collect::<TopologyResult<Vec<_>>>()?;
        Ok(self)
    }

    /// Assigns the same thickness to every vertex.
    #[must_use]
    pub fn with_uniform_thickness(mut self, thickness: f64) -> Self {
        self.thickness = vec![Some(thickness); self.positions.len()];
        self
    }

    /// Assigns one thickness per vertex.
    pub fn with_thickness(mut self, thickness: Vec<f64>) -> TopologyResult<Self> {
        if thickness.len() != self.positions.len() {
            return Err(TopologyError::AttributeLength {
                attribute: "thickness",
                expected: self.positions.len(),
                found: thickness.len(),
            });
        }
        self.thickness = thickness.into_iter().map(Some).collect();
        Ok(self)
    }

    /// Sets or clears the thickness of one vertex.
    pub fn set_vertex_thickness(&mut self, vertex: usize, thickness: Option<f64>) {
        self.thickness[vertex] = thickness;
    }

    /// Copy of the mesh with new positions and vertex normals.
    ///
    /// Topology and thickness are kept; callers guarantee matching lengths.
    pub(crate) fn displaced(&self, positions: Vec<Vec3>, normals: Vec<Vec3>) -> Self {
        Self {
            positions,
            normals,
            thickness: self.thickness.clone(),
            faces: self.faces.clone(),
            topology: self.topology.clone(),
        }
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of faces.
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Position of `vertex`.
    #[inline]
    pub fn position(&self, vertex: usize) -> Vec3 {
        self.positions[vertex]
    }

    /// All vertex positions.
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Unit normal of `vertex`.
    #[inline]
    pub fn vertex_normal(&self, vertex: usize) -> Vec3 {
        self.normals[vertex]
    }

    /// All vertex normals.
    pub fn vertex_normals(&self) -> &[Vec3] {
        &self.normals
    }

    /// Thickness of `vertex`, if assigned.
    #[inline]
    pub fn thickness(&self, vertex: usize) -> Option<f64> {
        self.thickness[vertex]
    }

    /// Vertex loop of `face`.
    pub fn face_vertices(&self, face: usize) -> &[usize] {
        &self.faces[face]
    }

    /// All face loops.
    pub fn faces(&self) -> &[Vec<usize>] {
        &self.faces
    }

    /// Half-edge connectivity.
    pub fn topology(&self) -> &HalfEdgeTopology {
        &self.topology
    }

    /// Half-edge ids of `face`, in loop order.
    pub fn face_halfedges(&self, face: usize) -> impl ExactSizeIterator<Item = HalfEdgeId> {
        self.topology.face_halfedges(face)
    }

    /// Half-edge by id.
    #[inline]
    pub fn halfedge(&self, id: HalfEdgeId) -> &HalfEdge {
        self.topology.halfedge(id)
    }

    /// One half-edge per undirected edge.
    pub fn edges(&self) -> impl Iterator<Item = HalfEdgeId> + '_ {
        self.topology.edges()
    }

    /// Faces on either side of the edge carried by `id`.
    pub fn edge_faces(&self, id: HalfEdgeId) -> [Option<usize>; 2] {
        self.topology.edge_faces(id)
    }

    /// Whether `vertex` touches a boundary edge.
    pub fn is_vertex_on_boundary(&self, vertex: usize) -> bool {
        self.topology.is_boundary_vertex(vertex)
    }

    // =========================================================================
    // GEOMETRY QUERIES
    // =========================================================================

    /// Unit normal of `face` from its current positions.
    ///
    /// Returns `None` when the loop has no usable area.
    pub fn face_normal(&self, face: usize) -> Option<Vec3> {
        polygon_normal(&self.positions, &self.faces[face])
    }

    /// Mean of the vertex positions of `face`.
    pub fn face_centroid(&self, face: usize) -> Vec3 {
        centroid(&self.face_points(face))
    }

    /// Positions of the vertices of `face`, in loop order.
    pub fn face_points(&self, face: usize) -> Vec<Vec3> {
        self.faces[face].iter().map(|&v| self.positions[v]).collect()
    }
}

/// Normal of a polygon loop: normalized sum of the cross products of
/// consecutive centroid-relative positions.
fn polygon_normal(positions: &[Vec3], loop_vertices: &[usize]) -> Option<Vec3> {
    let points: Vec<Vec3> = loop_vertices.iter().map(|&v| positions[v]).collect();
    let center = centroid(&points);
    let sum = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(&a, &b)| (a - center).cross(b - center))
        .sum::<Vec3>();
    unitize(sum)
}

#[cfg(test)]
mod tests;
