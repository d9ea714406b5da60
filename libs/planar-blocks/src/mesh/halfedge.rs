//! # HalfEdge Topology
//!
//! Dense half-edge arena derived from polygon vertex loops.
//!
//! ## Layout
//!
//! The half-edges of face `f` occupy one contiguous id range, in loop order.
//! Half-edge `i` of a face runs from loop vertex `i` to loop vertex `i + 1`,
//! so the corner at loop vertex `i` is keyed by the half-edge leaving it.
//!
//! ```text
//! face 0: [h0 h1 h2 h3] face 1: [h4 h5 h6] ...
//! HalfEdge: [start, end, face, twin]
//! ```

use std::collections::HashMap;
use std::ops::Range;

use thiserror::Error;

// =============================================================================
// IDS
// =============================================================================

/// Index of a half-edge in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HalfEdgeId(pub usize);

impl HalfEdgeId {
    /// Position of the half-edge in the arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

// =============================================================================
// HALFEDGE STRUCT
// =============================================================================

/// One directed edge of a face loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HalfEdge {
    /// Starting vertex.
    pub start: usize,
    /// Ending vertex.
    pub end: usize,
    /// Face this half-edge borders.
    pub face: usize,
    /// Opposite half-edge of the neighbouring face, `None` on the boundary.
    pub twin: Option<HalfEdgeId>,
}

impl HalfEdge {
    /// Whether the half-edge lies on the mesh boundary.
    #[inline]
    pub fn is_boundary(&self) -> bool {
        self.twin.is_none()
    }
}

// =============================================================================
// ERRORS
// =============================================================================

/// Reasons a set of polygon loops cannot form a reference mesh.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TopologyError {
    /// A face loop with fewer than three vertices.
    #[error("Face {face} has {count} vertices, at least 3 are required")]
    FaceTooSmall {
        /// Offending face.
        face: usize,
        /// Number of vertices in its loop.
        count: usize,
    },

    /// A face loop referencing a vertex that does not exist.
    #[error("Face {face} references vertex {vertex}, but the mesh has {vertex_count} vertices")]
    VertexOutOfRange {
        /// Offending face.
        face: usize,
        /// Referenced vertex index.
        vertex: usize,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },

    /// An edge whose endpoints coincide.
    #[error("Face {face} has a zero-length edge {start} -> {end}")]
    ZeroLengthEdge {
        /// Offending face.
        face: usize,
        /// Edge start vertex.
        start: usize,
        /// Edge end vertex.
        end: usize,
    },

    /// The same directed edge used by two faces (non-manifold or
    /// inconsistent winding).
    #[error("Directed edge {start} -> {end} is used by more than one face")]
    DuplicateHalfEdge {
        /// Edge start vertex.
        start: usize,
        /// Edge end vertex.
        end: usize,
    },

    /// A face without a defined normal.
    #[error("Face {0} has no defined normal")]
    DegenerateFaceNormal(usize),

    /// A vertex without a defined normal.
    #[error("Vertex {0} has no defined normal")]
    DegenerateVertexNormal(usize),

    /// A per-vertex attribute whose length does not match the vertex count.
    #[error("Attribute '{attribute}' has {found} entries, expected {expected}")]
    AttributeLength {
        /// Attribute name.
        attribute: &'static str,
        /// Number of vertices.
        expected: usize,
        /// Number of supplied values.
        found: usize,
    },
}

/// Result type for topology operations.
pub type TopologyResult<T> = Result<T, TopologyError>;

// =============================================================================
// TOPOLOGY
// =============================================================================

/// Half-edge connectivity of a polygon mesh.
///
/// ## Example
///
/// ```rust
/// use planar_blocks::mesh::halfedge::HalfEdgeTopology;
///
/// // Two triangles sharing the edge 1-2
/// let topology = HalfEdgeTopology::from_faces(4, &[vec![0, 1, 2], vec![2, 1, 3]])
///     .expect("valid loops");
/// assert_eq!(topology.halfedge_count(), 6);
/// assert_eq!(topology.edge_count(), 5);
/// assert!(topology.is_boundary_vertex(0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct HalfEdgeTopology {
    halfedges: Vec<HalfEdge>,
    /// `face_offsets[f]..face_offsets[f + 1]` are the half-edges of face `f`.
    face_offsets: Vec<usize>,
    boundary_vertices: Vec<bool>,
    edge_count: usize,
}

impl HalfEdgeTopology {
    /// Builds the arena from face loops over `vertex_count` vertices.
    ///
    /// Loops are validated for size, index range, repeated consecutive
    /// vertices and directed-edge uniqueness; twins are then paired.
    pub fn from_faces(vertex_count: usize, faces: &[Vec<usize>]) -> TopologyResult<Self> {
        let total: usize = faces.iter().map(Vec::len).sum();
        let mut halfedges = Vec::with_capacity(total);
        let mut face_offsets = Vec::with_capacity(faces.len() + 1);
        let mut edge_map: HashMap<(usize, usize), HalfEdgeId> = HashMap::with_capacity(total);

        for (face, loop_vertices) in faces.iter().enumerate() {
            let count = loop_vertices.len();
            if count < 3 {
                return Err(TopologyError::FaceTooSmall { face, count });
            }
            face_offsets.push(halfedges.len());

            for (i, &start) in loop_vertices.iter().enumerate() {
                let end = loop_vertices[(i + 1) % count];
                for vertex in [start, end] {
                    if vertex >= vertex_count {
                        return Err(TopologyError::VertexOutOfRange {
                            face,
                            vertex,
                            vertex_count,
                        });
                    }
                }
                if start == end {
                    return Err(TopologyError::ZeroLengthEdge { face, start, end });
                }

                let id = HalfEdgeId(halfedges.len());
                if edge_map.insert((start, end), id).is_some() {
                    return Err(TopologyError::DuplicateHalfEdge { start, end });
                }
                halfedges.push(HalfEdge {
                    start,
                    end,
                    face,
                    twin: None,
                });
            }
        }
        face_offsets.push(halfedges.len());

        // Pair twins
        for halfedge in &mut halfedges {
            halfedge.twin = edge_map.get(&(halfedge.end, halfedge.start)).copied();
        }

        let mut boundary_vertices = vec![false; vertex_count];
        let mut edge_count = 0;
        for (i, halfedge) in halfedges.iter().enumerate() {
            match halfedge.twin {
                None => {
                    boundary_vertices[halfedge.start] = true;
                    boundary_vertices[halfedge.end] = true;
                    edge_count += 1;
                }
                Some(twin) if i < twin.0 => edge_count += 1,
                Some(_) => {}
            }
        }

        Ok(Self {
            halfedges,
            face_offsets,
            boundary_vertices,
            edge_count,
        })
    }

    /// Number of faces.
    pub fn face_count(&self) -> usize {
        self.face_offsets.len().saturating_sub(1)
    }

    /// Number of half-edges.
    pub fn halfedge_count(&self) -> usize {
        self.halfedges.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// All half-edges, indexed by [`HalfEdgeId`].
    pub fn halfedges(&self) -> &[HalfEdge] {
        &self.halfedges
    }

    /// Half-edge by id.
    #[inline]
    pub fn halfedge(&self, id: HalfEdgeId) -> &HalfEdge {
        &self.halfedges[id.0]
    }

    /// Id range of the half-edges of `face`, in loop order.
    #[inline]
    pub fn face_range(&self, face: usize) -> Range<usize> {
        self.face_offsets[face]..self.face_offsets[face + 1]
    }

    /// Half-edge ids of `face`, in loop order.
    pub fn face_halfedges(&self, face: usize) -> impl ExactSizeIterator<Item = HalfEdgeId> {
        self.face_range(face).map(HalfEdgeId)
    }

    /// Previous half-edge in the same face loop.
    pub fn prev(&self, id: HalfEdgeId) -> HalfEdgeId {
        let range = self.face_range(self.halfedges[id.0].face);
        if id.0 == range.start {
            HalfEdgeId(range.end - 1)
        } else {
            HalfEdgeId(id.0 - 1)
        }
    }

    /// Next half-edge in the same face loop.
    pub fn next(&self, id: HalfEdgeId) -> HalfEdgeId {
        let range = self.face_range(self.halfedges[id.0].face);
        if id.0 + 1 == range.end {
            HalfEdgeId(range.start)
        } else {
            HalfEdgeId(id.0 + 1)
        }
    }

    /// Position of the half-edge within its face loop.
    pub fn corner_index(&self, id: HalfEdgeId) -> usize {
        id.0 - self.face_offsets[self.halfedges[id.0].face]
    }

    /// Whether `vertex` touches a boundary edge.
    #[inline]
    pub fn is_boundary_vertex(&self, vertex: usize) -> bool {
        self.boundary_vertices[vertex]
    }

    /// One representative half-edge per undirected edge.
    ///
    /// Boundary half-edges are their own representative; interior edges are
    /// represented by the lower id of the pair.
    pub fn edges(&self) -> impl Iterator<Item = HalfEdgeId> + '_ {
        self.halfedges
            .iter()
            .enumerate()
            .filter(|(i, halfedge)| halfedge.twin.map_or(true, |twin| *i < twin.0))
            .map(|(i, _)| HalfEdgeId(i))
    }

    /// Faces on either side of the edge carried by `id`.
    ///
    /// The first entry is the face of `id`, the second the face of its twin.
    pub fn edge_faces(&self, id: HalfEdgeId) -> [Option<usize>; 2] {
        let halfedge = &self.halfedges[id.0];
        [
            Some(halfedge.face),
            halfedge.twin.map(|twin| self.halfedges[twin.0].face),
        ]
    }
}
