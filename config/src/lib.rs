//! # Config Crate
//!
//! Centralized configuration constants for the planar block pipeline.
//! All tolerances and tunable defaults are defined here to ensure
//! consistency across crates and easy configuration management.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{BLOCK_MERGE_EPSILON, DEFAULT_TOLERANCE_PARALLEL, EPSILON_TOLERANCE};
//!
//! // Vectors shorter than EPSILON_TOLERANCE have no direction
//! let length: f64 = 1e-11;
//! assert!(length < EPSILON_TOLERANCE);
//!
//! // Block points closer than the merge epsilon collapse into one
//! let gap = 5.0e-4;
//! assert!(gap <= BLOCK_MERGE_EPSILON);
//!
//! // The parallel tolerance is an angle in radians
//! assert!(DEFAULT_TOLERANCE_PARALLEL < std::f64::consts::FRAC_PI_2);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Fabrication Oriented**: Merge tolerances sized for physical blocks
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;
