use super::*;
use crate::blocks::fixtures::{folded_pair, unit_square, vault};
use crate::blocks::thickness::WorkingMesh;
use crate::config::BlockConfig;
use approx::assert_relative_eq;

#[test]
fn test_opposite_halfedges_share_primary_axis() {
    let mesh = vault(0.2);
    let frames = EdgeFrames::build(&mesh);
    assert_eq!(frames.len(), mesh.topology().halfedge_count());
    assert_eq!(frames.failures().count(), 0);

    for (i, halfedge) in mesh.topology().halfedges().iter().enumerate() {
        let Some(twin) = halfedge.twin else { continue };
        let a = frames.get(HalfEdgeId(i)).expect("frame");
        let b = frames.get(twin).expect("twin frame");
        assert_eq!(a.primary(), b.primary());
        assert_eq!(a.secondary(), -b.secondary());
        assert_eq!(a.normal(), -b.normal());
        assert_eq!(a.frame.origin(), b.frame.origin());
    }
}

#[test]
fn test_boundary_edge_uses_single_face() {
    let mesh = unit_square(0.3);
    let frames = EdgeFrames::build(&mesh);

    // 0 -> 1 runs along +x at y = 0
    let frame = frames.get(HalfEdgeId(0)).expect("frame");
    assert_eq!(frame.averaged_normal, Vec3::new(0.0, 0.0, 0.5));
    assert_eq!(frame.primary(), Vec3::Z);
    assert_eq!(frame.secondary(), Vec3::X);
    assert_eq!(frame.normal(), Vec3::Y);
    assert_eq!(frame.frame.origin(), Vec3::new(0.5, 0.0, 0.0));
}

#[test]
fn test_side_plane_contains_edge() {
    let mesh = vault(0.2);
    let frames = EdgeFrames::build(&mesh);
    for frame in frames.iter() {
        let halfedge = mesh.halfedge(frame.halfedge);
        let plane = frame.plane();
        assert_relative_eq!(plane.signed_distance(mesh.position(halfedge.start)), 0.0, epsilon = 1e-12);
        assert_relative_eq!(plane.signed_distance(mesh.position(halfedge.end)), 0.0, epsilon = 1e-12);
    }
}

#[test]
fn test_collapsed_face_is_degenerate() {
    // Every vertex moves onto the face centre
    let mesh = unit_square((0.5f64).sqrt());
    let centre = Vec3::new(0.5, 0.5, 0.0);
    let normals = mesh.positions().iter().map(|&p| centre - p).collect();
    let config = BlockConfig::default()
        .with_thickness_scales(1.0, 1.0)
        .with_vertex_normals(normals);
    let working = WorkingMesh::new(&mesh, &config).expect("thickness resolves");

    let frames = EdgeFrames::build(working.mesh());
    assert_eq!(frames.failures().count(), 4);
    let err = frames.get(HalfEdgeId(0)).unwrap_err();
    assert!(matches!(err, BlockError::DegenerateGeometry { face: 0, .. }));
}

#[test]
fn test_folded_edge_only_fails_its_own_halfedges() {
    let mesh = folded_pair(0.1);
    let frames = EdgeFrames::build(&mesh);

    // 0 -> 1 of face 0 and 1 -> 0 of face 1 have cancelling normals
    assert_eq!(frames.failures().count(), 2);
    assert_eq!(
        frames.get(HalfEdgeId(0)).unwrap_err(),
        BlockError::degenerate_corner(
            0,
            0,
            "edge 0 -> 1 has no frame: adjacent face normals cancel or align with the edge"
        )
    );
    assert!(matches!(
        frames.get(HalfEdgeId(3)).unwrap_err(),
        BlockError::DegenerateGeometry { face: 1, corner: Some(0), .. }
    ));
    for id in (0..mesh.topology().halfedge_count()).filter(|&i| i != 0 && i != 3) {
        assert!(frames.get(HalfEdgeId(id)).is_ok());
    }
}
