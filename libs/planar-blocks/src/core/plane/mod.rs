//! # Planes and Lines
//!
//! Point/normal planes and two-point lines with the intersection predicates
//! the block kernel relies on.
//!
//! ## Contract
//!
//! - `Plane::intersect_plane` returns `None` for parallel or coincident planes
//! - `Plane::intersect_line` returns `None` for a line parallel to the plane
//! - Neither predicate ever returns non-finite points

use config::constants::INTERSECTION_TOLERANCE;
use serde::{Deserialize, Serialize};

use crate::core::vec3::{unitize, Vec3};

// =============================================================================
// LINE
// =============================================================================

/// Infinite line through two distinct points.
///
/// The order of `start` and `end` defines the line's direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// First point on the line.
    pub start: Vec3,
    /// Second point on the line.
    pub end: Vec3,
}

impl Line {
    /// Creates a line from two points.
    pub fn new(start: Vec3, end: Vec3) -> Self {
        Self { start, end }
    }

    /// Vector from `start` to `end`.
    #[inline]
    pub fn vector(&self) -> Vec3 {
        self.end - self.start
    }

    /// Unit direction of the line, if its points are distinct.
    pub fn direction(&self) -> Option<Vec3> {
        unitize(self.vector())
    }

    /// The same line traversed in the opposite direction.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            start: self.end,
            end: self.start,
        }
    }
}

// =============================================================================
// PLANE
// =============================================================================

/// A plane in 3D space defined by a point and a unit normal.
///
/// ## Example
///
/// ```rust
/// use planar_blocks::core::plane::Plane;
/// use planar_blocks::Vec3;
///
/// let plane = Plane::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 2.0)).expect("valid normal");
/// assert_eq!(plane.normal(), Vec3::Z);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    origin: Vec3,
    normal: Vec3,
}

impl Plane {
    /// Creates a plane, normalizing `normal`.
    ///
    /// Returns `None` if the normal has no usable length.
    pub fn new(origin: Vec3, normal: Vec3) -> Option<Self> {
        let normal = unitize(normal)?;
        Some(Self { origin, normal })
    }

    /// Creates a plane from a normal that is already unit length.
    pub(crate) fn from_unit_normal(origin: Vec3, normal: Vec3) -> Self {
        Self { origin, normal }
    }

    /// Point on the plane.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Unit normal of the plane.
    #[inline]
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Signed distance from the plane to `point`, positive on the normal side.
    #[inline]
    pub fn signed_distance(&self, point: Vec3) -> f64 {
        self.normal.dot(point - self.origin)
    }

    /// Orthogonal projection of `point` onto the plane.
    pub fn project_point(&self, point: Vec3) -> Vec3 {
        point - self.normal * self.signed_distance(point)
    }

    /// The same plane moved by `offset` along its normal.
    #[must_use]
    pub fn offset(&self, offset: f64) -> Self {
        Self {
            origin: self.origin + self.normal * offset,
            normal: self.normal,
        }
    }

    /// Intersection of the infinite `line` with the plane.
    ///
    /// Returns `None` when the line is degenerate or parallel to the plane.
    pub fn intersect_line(&self, line: &Line) -> Option<Vec3> {
        let direction = line.direction()?;
        let cos_angle = self.normal.dot(direction);
        if cos_angle.abs() <= INTERSECTION_TOLERANCE {
            return None;
        }
        let ratio = -self.signed_distance(line.start) / cos_angle;
        let point = line.start + direction * ratio;
        point.is_finite().then_some(point)
    }

    /// Intersection line of two planes.
    ///
    /// The returned line starts on both planes and points along
    /// `self.normal × other.normal`. Returns `None` for parallel or
    /// coincident planes.
    pub fn intersect_plane(&self, other: &Plane) -> Option<Line> {
        if (self.normal.dot(other.normal).abs() - 1.0).abs() <= INTERSECTION_TOLERANCE {
            return None;
        }
        let direction = self.normal.cross(other.normal);
        // A vector in this plane, perpendicular to the intersection line
        let in_plane = direction.cross(self.normal);
        let start = other.intersect_line(&Line::new(self.origin, self.origin + in_plane))?;
        Some(Line::new(start, start + direction))
    }
}
