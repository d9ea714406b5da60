//! Meshes shared by the pipeline unit tests.

use crate::core::vec3::Vec3;
use crate::mesh::ReferenceMesh;

/// Unit square in the xy-plane, counter-clockwise, with uniform thickness.
pub(crate) fn unit_square(thickness: f64) -> ReferenceMesh {
    grid(1, 1, |_, _| 0.0).with_uniform_thickness(thickness)
}

/// `nx` by `ny` quad grid with unit spacing and `height(x, y)` as z.
///
/// Vertex `(i, j)` has index `j * (nx + 1) + i`; faces are counter-clockwise
/// seen from +z and numbered row by row.
pub(crate) fn grid(nx: usize, ny: usize, height: impl Fn(f64, f64) -> f64) -> ReferenceMesh {
    let mut positions = Vec::with_capacity((nx + 1) * (ny + 1));
    for j in 0..=ny {
        for i in 0..=nx {
            let (x, y) = (i as f64, j as f64);
            positions.push(Vec3::new(x, y, height(x, y)));
        }
    }
    let index = |i: usize, j: usize| j * (nx + 1) + i;
    let mut faces = Vec::with_capacity(nx * ny);
    for j in 0..ny {
        for i in 0..nx {
            faces.push(vec![
                index(i, j),
                index(i + 1, j),
                index(i + 1, j + 1),
                index(i, j + 1),
            ]);
        }
    }
    ReferenceMesh::from_polygons(positions, faces).expect("grid is a valid mesh")
}

/// 2x2 grid bent into a shallow vault: interior edges carry a fold.
pub(crate) fn vault(thickness: f64) -> ReferenceMesh {
    grid(2, 2, |x, y| 0.4 - 0.2 * ((x - 1.0).powi(2) + (y - 1.0).powi(2)))
        .with_uniform_thickness(thickness)
}

/// Two triangles folded flat onto their shared edge `0 -> 1`, plus two
/// healthy triangles hanging off vertices 0 and 1.
///
/// Face 0 faces +z, face 1 faces -z, faces 2 and 3 face +z. The edge
/// `0 -> 1` (half-edges 0 and 3) has cancelling face normals.
pub(crate) fn folded_pair(thickness: f64) -> ReferenceMesh {
    let positions = vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(0.5, 1.0, 0.0),
        Vec3::new(0.5, 0.8, 0.0),
        Vec3::new(-1.0, -1.0, 0.0),
        Vec3::new(0.0, -1.0, 0.0),
        Vec3::new(2.0, -1.0, 0.0),
        Vec3::new(1.0, -1.0, 0.0),
    ];
    let faces = vec![vec![0, 1, 2], vec![1, 0, 3], vec![0, 4, 5], vec![1, 7, 6]];
    ReferenceMesh::from_polygons(positions, faces)
        .expect("folded pair is a valid mesh")
        .with_uniform_thickness(thickness)
}
