// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Reference planes and local coordinate frames used to flatten 3D geometry

use crate::error::{Error, Result};
use crate::tolerance::{normalize3, MIN_NORM};
use nalgebra::{Point2, Point3, Vector3};

/// Coordinate plane spanned by two world axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AxisPlane {
    /// Drop Z
    #[default]
    Xy,
    /// Drop Y
    Xz,
    /// Drop X
    Yz,
}

impl AxisPlane {
    #[inline]
    pub fn project(&self, p: &Point3<f64>) -> Point2<f64> {
        match self {
            Self::Xy => Point2::new(p.x, p.y),
            Self::Xz => Point2::new(p.x, p.z),
            Self::Yz => Point2::new(p.y, p.z),
        }
    }

    /// World axis perpendicular to the plane
    pub fn normal(&self) -> Vector3<f64> {
        match self {
            Self::Xy => Vector3::z(),
            Self::Xz => Vector3::y(),
            Self::Yz => Vector3::x(),
        }
    }
}

/// Orthonormal frame anchored at a point
///
/// `axis_z` is the plane normal; `axis_x`/`axis_y` span the plane.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocalFrame {
    pub origin: Point3<f64>,
    pub axis_x: Vector3<f64>,
    pub axis_y: Vector3<f64>,
    pub axis_z: Vector3<f64>,
}

impl LocalFrame {
    /// Build a frame from an in-plane X axis and the plane normal
    ///
    /// X is re-orthogonalized against Z; Y = Z × X.
    pub fn new(origin: Point3<f64>, axis_x: &Vector3<f64>, axis_z: &Vector3<f64>) -> Result<Self> {
        let axis_z = normalize3(axis_z, "frame normal")?;
        let in_plane = axis_x - axis_z * axis_x.dot(&axis_z);
        let axis_x = in_plane.try_normalize(MIN_NORM).ok_or_else(|| {
            Error::undefined("frame X axis is parallel to the frame normal")
        })?;
        let axis_y = axis_z.cross(&axis_x);
        Ok(Self {
            origin,
            axis_x,
            axis_y,
            axis_z,
        })
    }

    /// Frame on the plane through `origin` perpendicular to `normal`
    ///
    /// The in-plane X axis is derived from the world axis least parallel to
    /// the normal.
    pub fn perpendicular_to(origin: Point3<f64>, normal: &Vector3<f64>) -> Result<Self> {
        let normal = normalize3(normal, "plane normal")?;
        let (ax, ay, az) = (normal.x.abs(), normal.y.abs(), normal.z.abs());
        let reference = if ax <= ay && ax <= az {
            Vector3::x()
        } else if ay <= az {
            Vector3::y()
        } else {
            Vector3::z()
        };
        let axis_x = normal.cross(&reference);
        Self::new(origin, &axis_x, &normal)
    }

    /// Coordinates of a world point in this frame
    #[inline]
    pub fn to_local(&self, p: &Point3<f64>) -> Point3<f64> {
        let v = p - self.origin;
        Point3::new(v.dot(&self.axis_x), v.dot(&self.axis_y), v.dot(&self.axis_z))
    }

    /// World point from coordinates in this frame
    #[inline]
    pub fn from_local(&self, p: &Point3<f64>) -> Point3<f64> {
        self.origin + self.axis_x * p.x + self.axis_y * p.y + self.axis_z * p.z
    }

    /// In-plane coordinates, discarding the normal component
    #[inline]
    pub fn project(&self, p: &Point3<f64>) -> Point2<f64> {
        let v = p - self.origin;
        Point2::new(v.dot(&self.axis_x), v.dot(&self.axis_y))
    }
}

/// Any planar projection from 3D onto 2D
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Projection {
    Axis(AxisPlane),
    Frame(LocalFrame),
}

impl Projection {
    #[inline]
    pub fn project(&self, p: &Point3<f64>) -> Point2<f64> {
        match self {
            Self::Axis(plane) => plane.project(p),
            Self::Frame(frame) => frame.project(p),
        }
    }
}

impl From<AxisPlane> for Projection {
    fn from(plane: AxisPlane) -> Self {
        Self::Axis(plane)
    }
}

impl From<LocalFrame> for Projection {
    fn from(frame: LocalFrame) -> Self {
        Self::Frame(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_axis_plane_projection() {
        let p = Point3::new(1.0, 2.0, 3.0);
        assert_eq!(AxisPlane::Xy.project(&p), Point2::new(1.0, 2.0));
        assert_eq!(AxisPlane::Xz.project(&p), Point2::new(1.0, 3.0));
        assert_eq!(AxisPlane::Yz.project(&p), Point2::new(2.0, 3.0));
    }

    #[test]
    fn test_frame_round_trip() {
        let frame = LocalFrame::new(
            Point3::new(1.0, 1.0, 1.0),
            &Vector3::new(1.0, 1.0, 0.0),
            &Vector3::new(0.0, 0.0, 2.0),
        )
        .unwrap();
        let p = Point3::new(3.0, -2.0, 5.0);
        let back = frame.from_local(&frame.to_local(&p));
        assert_abs_diff_eq!((back - p).norm(), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(frame.axis_y.dot(&frame.axis_x), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(frame.axis_z.cross(&frame.axis_x), frame.axis_y, epsilon = 1e-12);
    }

    #[test]
    fn test_frame_rejects_parallel_axes() {
        let result = LocalFrame::new(Point3::origin(), &Vector3::z(), &Vector3::z());
        assert!(result.is_err());
    }

    #[test]
    fn test_perpendicular_frame_flattens_along_normal() {
        let normal = Vector3::new(1.0, 2.0, 3.0);
        let frame = LocalFrame::perpendicular_to(Point3::origin(), &normal).unwrap();
        let p = Point3::new(0.5, -1.0, 2.0);
        let shifted = p + normal * 7.0;
        let a = frame.project(&p);
        let b = frame.project(&shifted);
        assert_abs_diff_eq!((a - b).norm(), 0.0, epsilon = 1e-9);
    }
}
