//! Orthonormal frames.
//!
//! A frame is built from an origin and two direction vectors: the first
//! becomes the x-axis, the second is orthogonalized against it to give the
//! y-axis, and the z-axis completes a right-handed basis. The plane of a
//! frame passes through its origin with the z-axis as normal.

use serde::{Deserialize, Serialize};

use crate::core::plane::Plane;
use crate::core::vec3::{unitize, Vec3};

/// Right-handed orthonormal frame.
///
/// # Examples
/// ```
/// use planar_blocks::core::frame::Frame;
/// use planar_blocks::Vec3;
///
/// let frame = Frame::new(Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 0.0))
///     .expect("independent axes");
/// assert_eq!(frame.yaxis(), Vec3::Y);
/// assert_eq!(frame.zaxis(), Vec3::Z);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    origin: Vec3,
    xaxis: Vec3,
    yaxis: Vec3,
    zaxis: Vec3,
}

impl Frame {
    /// Creates a frame from an origin and two direction vectors.
    ///
    /// Returns `None` if `x` is degenerate or `y` is parallel to `x`.
    pub fn new(origin: Vec3, x: Vec3, y: Vec3) -> Option<Self> {
        let xaxis = unitize(x)?;
        let yaxis = unitize(y - xaxis * y.dot(xaxis))?;
        let zaxis = xaxis.cross(yaxis);
        Some(Self {
            origin,
            xaxis,
            yaxis,
            zaxis,
        })
    }

    /// Origin of the frame.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Unit x-axis.
    #[inline]
    pub fn xaxis(&self) -> Vec3 {
        self.xaxis
    }

    /// Unit y-axis, orthogonal to the x-axis.
    #[inline]
    pub fn yaxis(&self) -> Vec3 {
        self.yaxis
    }

    /// Unit z-axis, the normal of the frame's plane.
    #[inline]
    pub fn zaxis(&self) -> Vec3 {
        self.zaxis
    }

    /// Plane through the origin with the z-axis as normal.
    pub fn plane(&self) -> Plane {
        Plane::from_unit_normal(self.origin, self.zaxis)
    }

    /// The same frame moved by `offset`.
    #[must_use]
    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            origin: self.origin + offset,
            ..*self
        }
    }

    /// The frame rotated half a turn about its x-axis.
    ///
    /// The y- and z-axes are reversed; the origin and x-axis are kept.
    #[must_use]
    pub fn flipped(&self) -> Self {
        Self {
            yaxis: -self.yaxis,
            zaxis: -self.zaxis,
            ..*self
        }
    }
}
