//! # Planar Block Pipeline
//!
//! Four ordered stages over one working copy of the reference mesh:
//!
//! ```text
//! ReferenceMesh
//!     ↓ thickness      resolve thickness, displace along normals
//! WorkingMesh
//!     ↓ edge_frames    one frame per half-edge (global)
//!     ↓ corner_frames  one chamfer frame per face corner (per face)
//!     ↓ spokes, caps   spoke pairs cut by bottom/top planes (per face)
//!     ↓ block          polygons, duplicate removal, frame (per face)
//! Vec<Block>
//! ```
//!
//! Per-face stages run on the rayon pool. A face that fails keeps its error
//! in its own slot; the other faces are unaffected.

pub mod block;
pub mod caps;
pub mod corner_frames;
pub mod edge_frames;
pub mod spokes;
pub mod thickness;

#[cfg(test)]
pub(crate) mod fixtures;

use tracing::{info, warn};

use crate::config::BlockConfig;
use crate::error::{BlockError, BlockResult};
use crate::mesh::halfedge::HalfEdgeId;
use crate::mesh::ReferenceMesh;

use self::block::{build_blocks, Block};
use self::caps::{build_caps, CapPoints};
use self::corner_frames::{build_corner_frames, CornerFrame};
use self::edge_frames::{EdgeFrame, EdgeFrames};
use self::spokes::{build_spokes, SpokePair};
use self::thickness::WorkingMesh;

/// Result of the block pipeline with every intermediate table.
///
/// ## Example
///
/// ```rust
/// use planar_blocks::{BlockConfig, PlanarBlocks, ReferenceMesh, Vec3};
///
/// let mesh = ReferenceMesh::from_polygons(
///     vec![Vec3::ZERO, Vec3::X, Vec3::new(1.0, 1.0, 0.0), Vec3::Y],
///     vec![vec![0, 1, 2, 3]],
/// )
/// .expect("valid mesh")
/// .with_uniform_thickness(0.3);
///
/// let result = PlanarBlocks::new(&mesh, BlockConfig::prismatic()).expect("pipeline runs");
/// let block = result.block(0).as_ref().expect("block built");
/// assert_eq!(block.sides.len(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct PlanarBlocks {
    config: BlockConfig,
    working: WorkingMesh,
    edge_frames: EdgeFrames,
    corner_frames: Vec<BlockResult<Vec<CornerFrame>>>,
    spokes: Vec<BlockResult<Vec<SpokePair>>>,
    caps: Vec<BlockResult<CapPoints>>,
    blocks: Vec<BlockResult<Block>>,
}

impl PlanarBlocks {
    /// Runs the pipeline on `mesh`.
    ///
    /// # Errors
    ///
    /// [`BlockError::Configuration`] for invalid parameters or a missing
    /// thickness field. Geometry failures never abort the run: each is kept
    /// in the slot of the face it belongs to, see [`PlanarBlocks::blocks`].
    pub fn new(mesh: &ReferenceMesh, config: BlockConfig) -> BlockResult<Self> {
        config.validate()?;
        info!(
            faces = mesh.face_count(),
            vertices = mesh.vertex_count(),
            chamfer = config.chamfer,
            "Building planar blocks"
        );

        let working = WorkingMesh::new(mesh, &config)?;
        let edge_frames = EdgeFrames::build(working.mesh());
        let corner_frames = build_corner_frames(
            working.mesh(),
            &edge_frames,
            config.chamfer,
            config.tolerance_parallel,
        );
        let spokes = build_spokes(working.mesh(), &edge_frames, &corner_frames);
        let caps = build_caps(&working, &spokes, &config);
        let blocks = build_blocks(&working, &caps, &config);

        let failed = blocks.iter().filter(|b| b.is_err()).count();
        for err in blocks.iter().filter_map(|b| b.as_ref().err()) {
            warn!("{err}");
        }
        info!(built = blocks.len() - failed, failed, "Planar blocks finished");

        Ok(Self {
            config,
            working,
            edge_frames,
            corner_frames,
            spokes,
            caps,
            blocks,
        })
    }

    /// Configuration the pipeline ran with.
    pub fn config(&self) -> &BlockConfig {
        &self.config
    }

    /// Displaced working mesh.
    pub fn working_mesh(&self) -> &WorkingMesh {
        &self.working
    }

    /// Edge frames of every half-edge.
    pub fn edge_frames(&self) -> &EdgeFrames {
        &self.edge_frames
    }

    /// Edge frame of half-edge `id`, or the error that face recorded for it.
    pub fn edge_frame(&self, id: HalfEdgeId) -> BlockResult<&EdgeFrame> {
        self.edge_frames.get(id)
    }

    /// Corner frames of `face`, in loop order.
    pub fn corner_frames(&self, face: usize) -> &BlockResult<Vec<CornerFrame>> {
        &self.corner_frames[face]
    }

    /// Corner frame keyed by the face half-edge `id`, if its face succeeded.
    pub fn corner_frame(&self, id: HalfEdgeId) -> Option<&CornerFrame> {
        let (face, corner) = self.locate(id);
        self.corner_frames[face].as_ref().ok()?.get(corner)
    }

    /// Spoke pairs of `face`, in loop order.
    pub fn spokes(&self, face: usize) -> &BlockResult<Vec<SpokePair>> {
        &self.spokes[face]
    }

    /// Spoke pair keyed by the face half-edge `id`, if its face succeeded.
    pub fn spoke_pair(&self, id: HalfEdgeId) -> Option<&SpokePair> {
        let (face, corner) = self.locate(id);
        self.spokes[face].as_ref().ok()?.get(corner)
    }

    /// Raw cap points of `face`.
    pub fn cap_points(&self, face: usize) -> &BlockResult<CapPoints> {
        &self.caps[face]
    }

    /// Block of `face`.
    pub fn block(&self, face: usize) -> &BlockResult<Block> {
        &self.blocks[face]
    }

    /// One result per face, in face order.
    pub fn blocks(&self) -> &[BlockResult<Block>] {
        &self.blocks
    }

    /// Successfully built blocks, in face order.
    pub fn built(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter().filter_map(|b| b.as_ref().ok())
    }

    /// Per-face failures, in face order.
    pub fn failures(&self) -> impl Iterator<Item = &BlockError> {
        self.blocks.iter().filter_map(|b| b.as_ref().err())
    }

    /// All blocks, or the first per-face failure.
    pub fn into_blocks(self) -> BlockResult<Vec<Block>> {
        self.blocks.into_iter().collect()
    }

    fn locate(&self, id: HalfEdgeId) -> (usize, usize) {
        let topology = self.working.mesh().topology();
        (topology.halfedge(id).face, topology.corner_index(id))
    }
}

/// Builds one block per face of `mesh`.
///
/// Thin wrapper over [`PlanarBlocks`] that fails on the first face that
/// cannot be built.
pub fn offset_planar_blocks(mesh: &ReferenceMesh, config: &BlockConfig) -> BlockResult<Vec<Block>> {
    PlanarBlocks::new(mesh, config.clone())?.into_blocks()
}
