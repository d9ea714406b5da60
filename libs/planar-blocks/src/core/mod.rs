//! Core geometric primitives for the block kernel.
//!
//! Includes the vector alias (`Vec3`), planes and lines with their
//! intersection predicates, and orthonormal frames.

pub mod frame;
pub mod plane;
pub mod vec3;
