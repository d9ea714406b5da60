//! Thickness normalization.
//!
//! Resolves the per-vertex thickness field and moves every vertex along its
//! normal by `thickness * thickness_scale_bottom`. The result is the working
//! mesh all later stages read from.

use tracing::debug;

use crate::config::BlockConfig;
use crate::core::vec3::{unitize, zero, Vec3};
use crate::error::{BlockError, BlockResult};
use crate::mesh::ReferenceMesh;

/// Displaced copy of the reference mesh with a fully resolved thickness.
///
/// Vertex normals of the working mesh are the normals used for the
/// displacement: the configured override or the reference normals.
#[derive(Debug, Clone)]
pub struct WorkingMesh {
    mesh: ReferenceMesh,
    thickness: Vec<f64>,
}

impl WorkingMesh {
    /// Resolves thickness and displaces `reference`.
    ///
    /// A non-zero `config.offset` overrides every vertex thickness. The
    /// reference mesh is not modified.
    ///
    /// # Errors
    ///
    /// [`BlockError::Configuration`] when a vertex has no thickness and no
    /// offset is set, when a thickness is not finite, or when the normal
    /// override does not supply one usable normal per vertex.
    pub fn new(reference: &ReferenceMesh, config: &BlockConfig) -> BlockResult<Self> {
        let thickness = resolve_thickness(reference, config.offset)?;
        let normals = resolve_normals(reference, config.vertex_normals.as_deref())?;

        let positions = reference
            .positions()
            .iter()
            .zip(&normals)
            .zip(&thickness)
            .map(|((&p, &n), &t)| p + n * t * config.thickness_scale_bottom)
            .collect();

        let mesh = reference
            .displaced(positions, normals)
            .with_thickness(thickness.clone())?;

        debug!(
            vertices = mesh.vertex_count(),
            scale = config.thickness_scale_bottom,
            "Displaced working mesh"
        );

        Ok(Self { mesh, thickness })
    }

    /// The displaced mesh.
    pub fn mesh(&self) -> &ReferenceMesh {
        &self.mesh
    }

    /// Resolved thickness of `vertex`.
    #[inline]
    pub fn thickness(&self, vertex: usize) -> f64 {
        self.thickness[vertex]
    }

    /// Resolved thickness of every vertex.
    pub fn thicknesses(&self) -> &[f64] {
        &self.thickness
    }

    /// Mean thickness over the vertices of `face`.
    pub fn average_thickness(&self, face: usize) -> f64 {
        let vertices = self.mesh.face_vertices(face);
        vertices.iter().map(|&v| self.thickness[v]).sum::<f64>() / vertices.len() as f64
    }
}

/// Whether each vertex appears in at least one face loop.
fn referenced_vertices(reference: &ReferenceMesh) -> Vec<bool> {
    let mut referenced = vec![false; reference.vertex_count()];
    for &vertex in reference.faces().iter().flatten() {
        referenced[vertex] = true;
    }
    referenced
}

fn resolve_thickness(reference: &ReferenceMesh, offset: f64) -> BlockResult<Vec<f64>> {
    if offset != 0.0 {
        return Ok(vec![offset; reference.vertex_count()]);
    }
    // Vertices outside every face are never offset and need no thickness
    referenced_vertices(reference)
        .into_iter()
        .enumerate()
        .map(|(vertex, used)| match reference.thickness(vertex) {
            Some(t) if t.is_finite() => Ok(t),
            _ if !used => Ok(0.0),
            Some(t) => Err(BlockError::configuration(format!(
                "thickness of vertex {vertex} is not finite: {t}"
            ))),
            None => Err(BlockError::configuration(format!(
                "missing thickness field at vertex {vertex}"
            ))),
        })
        .collect()
}

fn resolve_normals(reference: &ReferenceMesh, override_normals: Option<&[Vec3]>) -> BlockResult<Vec<Vec3>> {
    let Some(normals) = override_normals else {
        return Ok(reference.vertex_normals().to_vec());
    };
    if normals.len() != reference.vertex_count() {
        return Err(BlockError::configuration(format!(
            "expected {} vertex normals, got {}",
            reference.vertex_count(),
            normals.len()
        )));
    }
    normals
        .iter()
        .zip(referenced_vertices(reference))
        .enumerate()
        .map(|(vertex, (&n, used))| match unitize(n) {
            Some(normal) => Ok(normal),
            None if !used => Ok(zero()),
            None => Err(BlockError::configuration(format!(
                "vertex normal {vertex} has zero length"
            ))),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square() -> ReferenceMesh {
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

    #[test]
    fn test_missing_thickness_is_configuration_error() {
        let err = WorkingMesh::new(&square(), &BlockConfig::default()).unwrap_err();
        match err {
            BlockError::Configuration(msg) => assert!(msg.contains("missing thickness field")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unreferenced_vertex_needs_no_thickness() {
        let mut positions = square().positions().to_vec();
        positions.push(Vec3::new(5.0, 5.0, 5.0));
        let mut mesh = ReferenceMesh::from_polygons(positions, vec![vec![0, 1, 2, 3]])
            .expect("stray vertex is allowed")
            .with_uniform_thickness(0.2);
        mesh.set_vertex_thickness(4, None);

        let working = WorkingMesh::new(&mesh, &BlockConfig::default()).expect("face vertices resolve");
        assert_eq!(working.thickness(4), 0.0);
        assert_eq!(working.mesh().position(4), Vec3::new(5.0, 5.0, 5.0));
        assert_relative_eq!(working.average_thickness(0), 0.2);

        // A stray zero normal in the override is ignored as well
        let mut normals = vec![Vec3::Z; 4];
        normals.push(Vec3::ZERO);
        let config = BlockConfig::default().with_vertex_normals(normals);
        assert!(WorkingMesh::new(&mesh, &config).is_ok());

        // A face vertex without thickness still fails
        mesh.set_vertex_thickness(1, None);
        assert!(matches!(
            WorkingMesh::new(&mesh, &BlockConfig::default()),
            Err(BlockError::Configuration(_))
        ));
    }

    #[test]
    fn test_offset_overrides_thickness() {
        let mesh = square().with_uniform_thickness(0.1);
        let working = WorkingMesh::new(&mesh, &BlockConfig::default().with_offset(0.4))
            .expect("offset resolves thickness");
        assert!(working.thicknesses().iter().all(|&t| t == 0.4));
        assert_relative_eq!(working.average_thickness(0), 0.4);
        // The reference keeps its own field
        assert_eq!(mesh.thickness(0), Some(0.1));
    }

    #[test]
    fn test_displacement_follows_normal_and_scale() {
        let mesh = square().with_uniform_thickness(0.3);
        let config = BlockConfig::default().with_thickness_scales(-0.5, 1.0);
        let working = WorkingMesh::new(&mesh, &config).expect("valid");
        for v in 0..4 {
            assert_relative_eq!(working.mesh().position(v).z, -0.15, epsilon = 1e-12);
            assert_relative_eq!(mesh.position(v).z, 0.0);
        }
    }

    #[test]
    fn test_zero_scale_keeps_positions() {
        let mesh = square().with_uniform_thickness(0.3);
        let working = WorkingMesh::new(&mesh, &BlockConfig::default()).expect("valid");
        assert_eq!(working.mesh().positions(), mesh.positions());
    }

    #[test]
    fn test_normal_override() {
        let mesh = square().with_uniform_thickness(1.0);
        let tilted = Vec3::new(1.0, 0.0, 1.0);
        let config = BlockConfig::default()
            .with_thickness_scales(1.0, 1.0)
            .with_vertex_normals(vec![tilted; 4]);
        let working = WorkingMesh::new(&mesh, &config).expect("valid");
        let expected = tilted.normalize();
        assert_relative_eq!(working.mesh().vertex_normal(0).x, expected.x, epsilon = 1e-12);
        assert_relative_eq!(working.mesh().position(0).x, expected.x, epsilon = 1e-12);

        let short = BlockConfig::default().with_vertex_normals(vec![Vec3::Z; 2]);
        let err = WorkingMesh::new(&mesh, &short).unwrap_err();
        assert!(matches!(err, BlockError::Configuration(_)));
    }
}
