//! # Block Assembly
//!
//! Turns the raw cap points of a face into a closed solid.
//!
//! ## Polygons
//!
//! With `2N` points per cap, side `i` is `[b_i, b_{i+1}, t_{i+1}, t_i]`
//! (indices wrap). The block polygons are the reversed bottom, the top and
//! the sides. Along each cap, consecutive points closer than the merge
//! distance collapse onto one representative, including the closing pair.
//! Sides are built from the same representatives, so caps and sides share
//! their vertices exactly. Sides that collapse below three points are the
//! empty corner faces of unchamfered corners and are dropped.
//!
//! ```text
//!   t_i ──── t_{i+1}
//!    │  side i  │
//!   b_i ──── b_{i+1}
//! ```

use std::collections::HashMap;

use config::constants::MIN_POLYGON_VERTICES;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::blocks::caps::CapPoints;
use crate::blocks::thickness::WorkingMesh;
use crate::config::BlockConfig;
use crate::core::frame::Frame;
use crate::core::vec3::Vec3;
use crate::error::{BlockError, BlockResult};

// =============================================================================
// BLOCK
// =============================================================================

/// Closed solid built from one reference face.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Reference face the block belongs to.
    pub face: usize,
    /// Bottom cap, wound to face away from the top.
    pub bottom: Vec<Vec3>,
    /// Top cap.
    pub top: Vec<Vec3>,
    /// Side and corner faces.
    pub sides: Vec<Vec<Vec3>>,
    /// Orientation frame on the bottom cap, or flipped onto the top cap
    /// when the top is projected.
    pub frame: Frame,
}

impl Block {
    /// Assembles the block polygons from raw cap points.
    ///
    /// # Errors
    ///
    /// [`BlockError::DegenerateGeometry`] when either cap keeps fewer than
    /// three distinct points.
    pub fn from_cap_points(
        face: usize,
        caps: &CapPoints,
        frame: Frame,
        merge_epsilon: f64,
    ) -> BlockResult<Self> {
        let count = caps.bottom.len();
        let bottom_reps = merge_representatives(&caps.bottom, merge_epsilon);
        let top_reps = merge_representatives(&caps.top, merge_epsilon);

        let mut bottom = kept_points(&caps.bottom, &bottom_reps);
        bottom.reverse();
        let top = kept_points(&caps.top, &top_reps);
        for (name, cap) in [("bottom", &bottom), ("top", &top)] {
            if cap.len() < MIN_POLYGON_VERTICES {
                return Err(BlockError::degenerate_face(
                    face,
                    format!("{name} cap collapsed to {} points", cap.len()),
                ));
            }
        }

        let mut sides = Vec::with_capacity(count);
        for i in 0..count {
            let j = (i + 1) % count;
            let mut corners = vec![
                (false, bottom_reps[i]),
                (false, bottom_reps[j]),
                (true, top_reps[j]),
                (true, top_reps[i]),
            ];
            corners.dedup();
            while corners.len() > 1 && corners.first() == corners.last() {
                corners.pop();
            }
            if corners.len() < MIN_POLYGON_VERTICES {
                trace!(face, side = i, "Dropping collapsed side");
                continue;
            }
            sides.push(
                corners
                    .into_iter()
                    .map(|(on_top, k)| if on_top { caps.top[k] } else { caps.bottom[k] })
                    .collect(),
            );
        }

        Ok(Self {
            face,
            bottom,
            top,
            sides,
            frame,
        })
    }

    /// All polygons: bottom, top, then the sides.
    pub fn polygons(&self) -> impl Iterator<Item = &[Vec3]> {
        [self.bottom.as_slice(), self.top.as_slice()]
            .into_iter()
            .chain(self.sides.iter().map(Vec::as_slice))
    }

    /// Number of polygons.
    pub fn face_count(&self) -> usize {
        2 + self.sides.len()
    }

    /// Indexes the polygons into a mesh.
    ///
    /// Caps and sides share their merged points bit for bit, so equal
    /// points become one vertex.
    pub fn to_mesh(&self) -> BlockMesh {
        let mut mesh = BlockMesh::default();
        for polygon in self.polygons() {
            let mut face: Vec<usize> = Vec::with_capacity(polygon.len());
            for &point in polygon {
                let index = mesh.vertex_index(point);
                if face.last() != Some(&index) {
                    face.push(index);
                }
            }
            while face.len() > 1 && face.first() == face.last() {
                face.pop();
            }
            if face.len() >= MIN_POLYGON_VERTICES {
                mesh.faces.push(face);
            }
        }
        mesh
    }
}

/// Maps every point to the index of the point it merges into.
///
/// A point within `epsilon` of the last kept point merges into it; kept
/// points at the end of the loop within `epsilon` of the first point merge
/// into the first point. Kept points map to themselves.
///
/// # Examples
/// ```
/// use planar_blocks::blocks::block::merge_representatives;
/// use planar_blocks::Vec3;
///
/// // A chain of close points merges into its first point only while the
/// // links stay within epsilon of that point
/// let points = [
///     Vec3::ZERO,
///     Vec3::new(0.0008, 0.0, 0.0),
///     Vec3::new(0.0016, 0.0, 0.0),
///     Vec3::X,
///     Vec3::new(0.0, 0.0005, 0.0),
/// ];
/// assert_eq!(merge_representatives(&points, 1e-3), vec![0, 0, 2, 3, 0]);
/// ```
pub fn merge_representatives(points: &[Vec3], epsilon: f64) -> Vec<usize> {
    let mut reps: Vec<usize> = Vec::with_capacity(points.len());
    let mut kept: Vec<usize> = Vec::new();
    for (i, &point) in points.iter().enumerate() {
        match kept.last() {
            Some(&last) if points[last].distance(point) <= epsilon => reps.push(last),
            _ => {
                reps.push(i);
                kept.push(i);
            }
        }
    }
    while kept.len() > 1 {
        let last = kept[kept.len() - 1];
        if points[kept[0]].distance(points[last]) > epsilon {
            break;
        }
        kept.pop();
        for rep in reps.iter_mut().filter(|rep| **rep == last) {
            *rep = kept[0];
        }
    }
    reps
}

/// Points that survive merging, in loop order.
///
/// # Examples
/// ```
/// use planar_blocks::blocks::block::remove_consecutive_duplicates;
/// use planar_blocks::Vec3;
///
/// let points = [Vec3::ZERO, Vec3::new(0.0005, 0.0, 0.0), Vec3::X, Vec3::Y, Vec3::ZERO];
/// let kept = remove_consecutive_duplicates(&points, 1e-3);
/// assert_eq!(kept, vec![Vec3::ZERO, Vec3::X, Vec3::Y]);
/// ```
pub fn remove_consecutive_duplicates(points: &[Vec3], epsilon: f64) -> Vec<Vec3> {
    kept_points(points, &merge_representatives(points, epsilon))
}

fn kept_points(points: &[Vec3], reps: &[usize]) -> Vec<Vec3> {
    reps.iter()
        .enumerate()
        .filter(|(i, rep)| i == *rep)
        .map(|(i, _)| points[i])
        .collect()
}

/// Orientation frame of a block.
///
/// The origin is the face centroid and the x-axis runs from the first to
/// the second face vertex, projected onto the face plane; the z-axis is the
/// face normal. With `project_top` the frame moves by `top_offset` along its
/// normal and is flipped to sit on the top cap facing outward.
pub fn orientation_frame(
    working: &WorkingMesh,
    face: usize,
    top_offset: f64,
    project_top: bool,
) -> BlockResult<Frame> {
    let mesh = working.mesh();
    let origin = mesh.face_centroid(face);
    let normal = mesh
        .face_normal(face)
        .ok_or_else(|| BlockError::degenerate_face(face, "face normal vanished"))?;
    let vertices = mesh.face_vertices(face);
    let project = |p: Vec3| p - normal * normal.dot(p - origin);
    let x = project(mesh.position(vertices[1])) - project(mesh.position(vertices[0]));
    let frame = Frame::new(origin, x, x.cross(-normal))
        .ok_or_else(|| BlockError::degenerate_face(face, "first edge is parallel to the face normal"))?;

    if project_top {
        Ok(frame.translated(frame.zaxis() * top_offset).flipped())
    } else {
        Ok(frame)
    }
}

/// Blocks of every face whose cap points exist.
pub fn build_blocks(
    working: &WorkingMesh,
    caps: &[BlockResult<CapPoints>],
    config: &BlockConfig,
) -> Vec<BlockResult<Block>> {
    let blocks: Vec<_> = caps
        .par_iter()
        .enumerate()
        .map(|(face, points)| -> BlockResult<Block> {
            let points = points.as_ref().map_err(BlockError::clone)?;
            let top_offset = working.average_thickness(face) * config.thickness_scale_top;
            let frame = orientation_frame(working, face, top_offset, config.project_top)?;
            Block::from_cap_points(face, points, frame, config.merge_epsilon)
        })
        .collect();

    debug!(faces = blocks.len(), "Assembled blocks");
    blocks
}

// =============================================================================
// BLOCK MESH
// =============================================================================

/// Indexed polygon mesh of one block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockMesh {
    /// Vertex positions.
    pub vertices: Vec<Vec3>,
    /// Polygon loops, outward-facing.
    pub faces: Vec<Vec<usize>>,
}

impl BlockMesh {
    fn vertex_index(&mut self, point: Vec3) -> usize {
        match self.vertices.iter().position(|&v| v == point) {
            Some(index) => index,
            None => {
                self.vertices.push(point);
                self.vertices.len() - 1
            }
        }
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of polygons.
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Whether every directed edge is matched by exactly one opposite edge.
    pub fn is_closed(&self) -> bool {
        let mut directed: HashMap<(usize, usize), usize> = HashMap::new();
        for face in &self.faces {
            for (i, &a) in face.iter().enumerate() {
                let b = face[(i + 1) % face.len()];
                *directed.entry((a, b)).or_insert(0) += 1;
            }
        }
        !directed.is_empty()
            && directed
                .iter()
                .all(|(&(a, b), &count)| count == 1 && directed.get(&(b, a)) == Some(&1))
    }

    /// Signed volume, positive for outward-facing polygons.
    pub fn volume(&self) -> f64 {
        self.triangles()
            .map(|[a, b, c]| a.dot(b.cross(c)))
            .sum::<f64>()
            / 6.0
    }

    /// Triangulates the mesh and returns a flat vector of vertex coordinates.
    /// Each triangle is represented by 9 f64 values (3 vertices * 3 coordinates).
    pub fn triangulate(&self) -> Vec<f64> {
        self.triangles()
            .flat_map(|triangle| triangle.into_iter().flat_map(|v| v.to_array()))
            .collect()
    }

    /// Fan triangles of every polygon.
    fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.faces.iter().flat_map(move |face| {
            let v0 = self.vertices[face[0]];
            face.windows(2)
                .skip(1)
                .map(move |w| [v0, self.vertices[w[0]], self.vertices[w[1]]])
        })
    }
}
