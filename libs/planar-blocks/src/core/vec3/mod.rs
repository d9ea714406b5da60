//! Thin wrapper around `glam::DVec3` shared across kernel modules.
//!
//! The helper functions keep vector predicates readable while avoiding direct
//! dependencies on `glam` from higher layers.

use config::constants::EPSILON_TOLERANCE;

pub use glam::DVec3 as Vec3;

/// Creates a zero vector using `glam::DVec3`.
///
/// # Examples
/// ```
/// use planar_blocks::Vec3;
/// let v = planar_blocks::core::vec3::zero();
/// assert_eq!(v, Vec3::new(0.0, 0.0, 0.0));
/// ```
pub fn zero() -> Vec3 {
    Vec3::new(0.0, 0.0, 0.0)
}

/// Returns the unit vector along `v`, or `None` when `v` has no usable length.
///
/// # Examples
/// ```
/// use planar_blocks::core::vec3::{unitize, Vec3};
/// assert_eq!(unitize(Vec3::new(0.0, 3.0, 0.0)), Some(Vec3::Y));
/// assert_eq!(unitize(Vec3::ZERO), None);
/// ```
pub fn unitize(v: Vec3) -> Option<Vec3> {
    let length = v.length();
    if length > EPSILON_TOLERANCE && length.is_finite() {
        Some(v / length)
    } else {
        None
    }
}

/// Angle in radians between two vectors, in `[0, PI]`.
///
/// Returns `None` if either vector is degenerate.
pub fn angle_between(u: Vec3, v: Vec3) -> Option<f64> {
    let u = unitize(u)?;
    let v = unitize(v)?;
    Some(u.dot(v).clamp(-1.0, 1.0).acos())
}

/// Angular parallel test.
///
/// Two vectors are parallel when the angle between them, or its supplement,
/// is below `tolerance` radians. Degenerate vectors are never parallel.
///
/// # Examples
/// ```
/// use planar_blocks::core::vec3::{is_parallel, Vec3};
/// assert!(is_parallel(Vec3::X, Vec3::new(-1.0, 0.1, 0.0), 0.5));
/// assert!(!is_parallel(Vec3::X, Vec3::Y, 0.5));
/// ```
pub fn is_parallel(u: Vec3, v: Vec3, tolerance: f64) -> bool {
    match angle_between(u, v) {
        Some(angle) => angle < tolerance || std::f64::consts::PI - angle < tolerance,
        None => false,
    }
}

/// Arithmetic mean of a set of points.
///
/// Returns the zero vector for an empty set.
pub fn centroid(points: &[Vec3]) -> Vec3 {
    if points.is_empty() {
        return zero();
    }
    points.iter().copied().sum::<Vec3>() / points.len() as f64
}
