use approx::assert_relative_eq;
use planar_blocks::{BlockConfig, HalfEdgeId, PlanarBlocks, ReferenceMesh, Vec3};

/// 2x2 grid of unit quads; vertex 4 is the only interior vertex.
fn grid(height: impl Fn(f64, f64) -> f64, thickness: f64) -> ReferenceMesh {
    let mut positions = Vec::new();
    for j in 0..3 {
        for i in 0..3 {
            let (x, y) = (i as f64, j as f64);
            positions.push(Vec3::new(x, y, height(x, y)));
        }
    }
    let faces = vec![
        vec![0, 1, 4, 3],
        vec![1, 2, 5, 4],
        vec![3, 4, 7, 6],
        vec![4, 5, 8, 7],
    ];
    ReferenceMesh::from_polygons(positions, faces)
        .unwrap()
        .with_uniform_thickness(thickness)
}

fn flat(thickness: f64) -> ReferenceMesh {
    grid(|_, _| 0.0, thickness)
}

fn dome(thickness: f64) -> ReferenceMesh {
    grid(|x, y| 0.5 - 0.15 * ((x - 1.0).powi(2) + (y - 1.0).powi(2)), thickness)
}

fn flat_config(chamfer: f64) -> BlockConfig {
    BlockConfig::default()
        .with_chamfer(chamfer)
        .with_projection(true, true)
}

#[test]
fn interior_corner_of_flat_grid_is_cut() {
    let result = PlanarBlocks::new(&flat(0.2), flat_config(0.1)).unwrap();

    for block in result.built() {
        // Two caps, four edge sides and one corner face at the interior vertex
        assert_eq!(block.face_count(), 7);
        assert_eq!(block.bottom.len(), 5);
        let solid = block.to_mesh();
        assert!(solid.is_closed());
        // Corner at 45 degrees, cut 0.05 from the vertex: triangle of area 0.0025
        assert_relative_eq!(solid.volume(), 0.2 * (1.0 - 0.0025), epsilon = 1e-9);
    }
}

#[test]
fn boundary_corners_are_never_cut() {
    let mesh = flat(0.2);
    let result = PlanarBlocks::new(&mesh, flat_config(0.3)).unwrap();
    for id in (0..mesh.topology().halfedge_count()).map(HalfEdgeId) {
        let corner = result.corner_frame(id).unwrap();
        if mesh.is_vertex_on_boundary(corner.vertex) {
            assert_eq!(corner.chamfer_offset, 0.0);
            assert_eq!(corner.frame, corner.base);
        } else {
            assert!(corner.chamfer_offset > 0.0);
        }
    }
}

#[test]
fn zero_chamfer_keeps_base_frames() {
    let mesh = dome(0.2);
    let result = PlanarBlocks::new(&mesh, BlockConfig::default().with_chamfer(0.0)).unwrap();
    for id in (0..mesh.topology().halfedge_count()).map(HalfEdgeId) {
        let corner = result.corner_frame(id).unwrap();
        assert_eq!(corner.frame, corner.base);
    }
    for block in result.built() {
        assert_eq!(block.face_count(), 6);
    }
}

#[test]
fn chamfer_offset_scales_with_chamfer_distance() {
    let mesh = dome(0.2);
    let offsets = |chamfer: f64| -> Vec<f64> {
        let result = PlanarBlocks::new(&mesh, BlockConfig::default().with_chamfer(chamfer)).unwrap();
        (0..mesh.topology().halfedge_count())
            .map(|i| result.corner_frame(HalfEdgeId(i)).unwrap().chamfer_offset)
            .collect()
    };
    let small = offsets(0.05);
    let large = offsets(0.1);
    for (a, b) in small.iter().zip(&large) {
        assert_relative_eq!(*b, 2.0 * a, epsilon = 1e-12);
    }
}

#[test]
fn curved_surface_blocks_are_closed() {
    let mesh = dome(0.25);
    for config in [
        BlockConfig::default(),
        BlockConfig::continuous(),
        BlockConfig::prismatic(),
    ] {
        let result = PlanarBlocks::new(&mesh, config).unwrap();
        assert_eq!(result.failures().count(), 0);
        for block in result.built() {
            let solid = block.to_mesh();
            assert!(solid.is_closed());
            assert!(solid.volume() > 0.0);
        }
    }
}

#[test]
fn neighbouring_blocks_share_side_planes() {
    let mesh = dome(0.25);
    let result = PlanarBlocks::new(&mesh, BlockConfig::default()).unwrap();

    // Edge 1 -> 4 of face 0 is edge 4 -> 1 of face 1
    let a = result.edge_frame(HalfEdgeId(1)).unwrap();
    let b = result.edge_frame(HalfEdgeId(7)).unwrap();
    assert_eq!(mesh.halfedge(HalfEdgeId(7)).start, 4);
    assert_eq!(a.normal(), -b.normal());
    assert_relative_eq!(a.plane().signed_distance(b.plane().origin()), 0.0, epsilon = 1e-12);
}

#[test]
fn merge_distance_swallows_small_chamfers() {
    let config = flat_config(0.1).with_merge_epsilon(0.2);
    let result = PlanarBlocks::new(&flat(0.5), config).unwrap();
    for block in result.built() {
        assert_eq!(block.face_count(), 6);
        assert!(block.to_mesh().is_closed());
    }
}
