//! Planar block kernel for fabricating thickened polygon surfaces
//!
//! This crate turns a polygonal reference surface, whose vertices carry a
//! thickness and a normal, into one closed solid per face: planar bottom and
//! top caps, planar sides along the edges and chamfered interior corners.
//!
//! ```rust
//! use planar_blocks::{offset_planar_blocks, BlockConfig, ReferenceMesh, Vec3};
//!
//! let mesh = ReferenceMesh::from_polygons(
//!     vec![Vec3::ZERO, Vec3::X, Vec3::new(1.0, 1.0, 0.0), Vec3::Y],
//!     vec![vec![0, 1, 2, 3]],
//! )
//! .expect("valid mesh")
//! .with_uniform_thickness(0.3);
//!
//! let blocks = offset_planar_blocks(&mesh, &BlockConfig::prismatic()).expect("blocks");
//! let solid = blocks[0].to_mesh();
//! assert!(solid.is_closed());
//! assert!((solid.volume() - 0.3).abs() < 1e-9);
//! ```

pub mod blocks;
pub mod config;
pub mod core;
pub mod error;
pub mod mesh;

pub use blocks::block::{Block, BlockMesh};
pub use blocks::{offset_planar_blocks, PlanarBlocks};
pub use crate::config::BlockConfig;
pub use crate::core::frame::Frame;
pub use crate::core::plane::{Line, Plane};
pub use crate::core::vec3::Vec3;
pub use error::{BlockError, BlockResult};
pub use mesh::halfedge::{HalfEdgeId, TopologyError};
pub use mesh::ReferenceMesh;
