use super::*;
use approx::assert_relative_eq;

fn unit_square() -> ReferenceMesh {
    ReferenceMesh::from_polygons(
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ],
        vec![vec![0, 1, 2, 3]],
    )
    .expect("valid square")
}

/// Two faces folded 90 degrees about the x-axis.
fn folded_pair() -> ReferenceMesh {
    ReferenceMesh::from_polygons(
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(1.0, 0.0, -1.0),
        ],
        vec![vec![0, 1, 2, 3], vec![4, 5, 1, 0]],
    )
    .expect("valid fold")
}

#[test]
fn test_face_normal_and_centroid() {
    let mesh = unit_square();
    assert_eq!(mesh.face_normal(0), Some(Vec3::Z));
    assert_eq!(mesh.face_centroid(0), Vec3::new(0.5, 0.5, 0.0));
}

#[test]
fn test_vertex_normal_averages_incident_faces() {
    let mesh = folded_pair();
    assert_eq!(mesh.face_normal(1), Some(-Vec3::Y));
    let shared = mesh.vertex_normal(0);
    assert_relative_eq!(shared.y, -std::f64::consts::FRAC_1_SQRT_2, epsilon = 1e-12);
    assert_relative_eq!(shared.z, std::f64::consts::FRAC_1_SQRT_2, epsilon = 1e-12);
    assert_eq!(mesh.vertex_normal(2), Vec3::Z);
}

#[test]
fn test_boundary_and_edges() {
    let mesh = folded_pair();
    assert_eq!(mesh.edges().count(), 7);
    // Every vertex of an open strip is on the boundary
    assert!((0..6).all(|v| mesh.is_vertex_on_boundary(v)));
    let shared = mesh
        .edges()
        .find(|&id| mesh.edge_faces(id)[1].is_some())
        .expect("one interior edge");
    let halfedge = mesh.halfedge(shared);
    assert_eq!((halfedge.start, halfedge.end), (0, 1));
}

#[test]
fn test_thickness_assignment() {
    let mut mesh = unit_square();
    assert_eq!(mesh.thickness(0), None);

    mesh.set_vertex_thickness(0, Some(0.2));
    assert_eq!(mesh.thickness(0), Some(0.2));

    let mesh = mesh
        .with_thickness(vec![0.1, 0.2, 0.3, 0.4])
        .expect("matching length");
    assert_eq!(mesh.thickness(3), Some(0.4));

    let err = unit_square().with_thickness(vec![0.1]).unwrap_err();
    assert!(matches!(err, TopologyError::AttributeLength { attribute: "thickness", .. }));
}

#[test]
fn test_vertex_normal_override_is_normalized() {
    let mesh = unit_square()
        .with_vertex_normals(vec![Vec3::new(0.0, 0.0, 2.0); 4])
        .expect("valid normals");
    assert_eq!(mesh.vertex_normal(1), Vec3::Z);

    let err = unit_square()
        .with_vertex_normals(vec![Vec3::Z, Vec3::Z, Vec3::ZERO, Vec3::Z])
        .unwrap_err();
    assert_eq!(err, TopologyError::DegenerateVertexNormal(2));
}

#[test]
fn test_rejects_coincident_positions() {
    let err = ReferenceMesh::from_polygons(
        vec![Vec3::ZERO, Vec3::ZERO, Vec3::Y],
        vec![vec![0, 1, 2]],
    )
    .unwrap_err();
    assert!(matches!(err, TopologyError::ZeroLengthEdge { start: 0, end: 1, .. }));
}

#[test]
fn test_rejects_collinear_face() {
    let err = ReferenceMesh::from_polygons(
        vec![Vec3::ZERO, Vec3::X, Vec3::X * 2.0],
        vec![vec![0, 1, 2]],
    )
    .unwrap_err();
    assert_eq!(err, TopologyError::DegenerateFaceNormal(0));
}
