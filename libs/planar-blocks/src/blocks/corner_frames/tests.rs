use super::*;
use crate::blocks::fixtures::{folded_pair, unit_square, vault};
use approx::assert_relative_eq;

const TOLERANCE: f64 = 0.5;

fn corners(mesh: &ReferenceMesh, chamfer: f64) -> Vec<CornerFrame> {
    let edge_frames = EdgeFrames::build(mesh);
    build_corner_frames(mesh, &edge_frames, chamfer, TOLERANCE)
        .into_iter()
        .collect::<BlockResult<Vec<_>>>()
        .expect("corner frames")
        .into_iter()
        .flatten()
        .collect()
}

#[test]
fn test_square_corner_is_unchamfered() {
    let mesh = unit_square(0.3);
    for corner in corners(&mesh, 0.5) {
        assert!(!corner.is_parallel);
        assert_eq!(corner.chamfer_offset, 0.0);
        assert_eq!(corner.frame, corner.base);
        assert_eq!(corner.frame.origin(), mesh.position(corner.vertex));
        assert_relative_eq!(corner.dihedral_factor, 0.5, epsilon = 1e-12);
        // The corner plane is vertical
        assert_relative_eq!(corner.frame.zaxis().z, 0.0, epsilon = 1e-12);
    }
}

#[test]
fn test_interior_corners_are_chamfered() {
    let mesh = vault(0.2);
    let chamfer = 0.1;
    let all = corners(&mesh, chamfer);
    assert_eq!(all.len(), 16);

    let interior: Vec<_> = all.iter().filter(|c| c.vertex == 4).collect();
    assert_eq!(interior.len(), 4);
    for corner in interior {
        assert!(!corner.is_parallel);
        assert_relative_eq!(corner.chamfer_offset, chamfer * corner.dihedral_factor);
        assert!(corner.chamfer_offset > 0.0);
        let moved = corner.frame.origin() - corner.base.origin();
        assert_relative_eq!(moved.length(), corner.chamfer_offset, epsilon = 1e-12);
        assert_relative_eq!(moved.dot(corner.base.zaxis()), corner.chamfer_offset, epsilon = 1e-12);
    }

    // Boundary corners keep their base frame
    for corner in all.iter().filter(|c| c.vertex != 4) {
        assert_eq!(corner.frame, corner.base);
    }
}

#[test]
fn test_zero_chamfer_reproduces_base_frame() {
    let mesh = vault(0.2);
    for corner in corners(&mesh, 0.0) {
        assert_eq!(corner.frame, corner.base);
        assert_eq!(corner.chamfer_offset, 0.0);
    }
}

#[test]
fn test_straight_corner_is_parallel() {
    // Vertex 1 sits on the straight edge 0 -> 2
    let mesh = ReferenceMesh::from_polygons(
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(2.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ],
        vec![vec![0, 1, 2, 3, 4]],
    )
    .expect("valid pentagon");

    let corner = corners(&mesh, 0.2)
        .into_iter()
        .find(|c| c.vertex == 1)
        .expect("corner at vertex 1");
    assert!(corner.is_parallel);
    assert_eq!(corner.chamfer_offset, 0.0);
    assert_relative_eq!(corner.dihedral_factor, 0.0);
    // Cuts across the straight edge
    assert_eq!(corner.frame.zaxis(), Vec3::X);
    assert_eq!(corner.frame.origin(), Vec3::X);
}

#[test]
fn test_chamfer_grows_as_corner_sharpens() {
    let factors: Vec<f64> = [0.2f64, 0.8, 1.4, 2.0, 2.6]
        .iter()
        .map(|&angle| dihedral_factor(Vec3::X, Vec3::new(angle.cos(), angle.sin(), 0.0)))
        .collect();
    assert!(factors.windows(2).all(|w| w[0] < w[1]));

    let base = Frame::new(Vec3::ZERO, Vec3::X, Vec3::Y).expect("valid");
    let offsets: Vec<f64> = factors
        .iter()
        .map(|&f| chamfered(&base, 0.1 * f).origin().z)
        .collect();
    assert!(offsets.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_missing_edge_frame_fails_only_its_faces() {
    let mesh = folded_pair(0.1);
    let edge_frames = EdgeFrames::build(&mesh);
    let faces = build_corner_frames(&mesh, &edge_frames, 0.0, TOLERANCE);

    // Corner 0 of each folded face is the first to read the missing frame
    assert!(matches!(
        faces[0],
        Err(BlockError::DegenerateGeometry { face: 0, corner: Some(0), .. })
    ));
    assert!(matches!(
        faces[1],
        Err(BlockError::DegenerateGeometry { face: 1, corner: Some(0), .. })
    ));
    for face in [2, 3] {
        assert_eq!(faces[face].as_ref().expect("healthy face").len(), 3);
    }
}
