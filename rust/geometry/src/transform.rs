// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Rigid transforms for geometry values
//!
//! Every transform returns a new value; nothing is modified in place.

use crate::error::Result;
use crate::tolerance::normalize3;
use nalgebra::{Isometry3, Point3, Translation3, UnitQuaternion, Vector3};

/// Geometry that can be carried through a rigid motion
pub trait Transformable: Sized {
    fn transformed(&self, iso: &Isometry3<f64>) -> Self;

    /// Rotate about the world origin
    fn rotated(&self, rotation: &UnitQuaternion<f64>) -> Self {
        self.transformed(&Isometry3::from_parts(Translation3::identity(), *rotation))
    }

    fn translated(&self, offset: &Vector3<f64>) -> Self {
        self.transformed(&Isometry3::translation(offset.x, offset.y, offset.z))
    }

    /// Move `distance` along `direction`, which need not be normalized
    fn moved(&self, direction: &Vector3<f64>, distance: f64) -> Result<Self> {
        let unit = normalize3(direction, "move direction")?;
        Ok(self.translated(&(unit * distance)))
    }
}

impl Transformable for Point3<f64> {
    #[inline]
    fn transformed(&self, iso: &Isometry3<f64>) -> Self {
        iso * self
    }
}

impl<T: Transformable> Transformable for Vec<T> {
    fn transformed(&self, iso: &Isometry3<f64>) -> Self {
        self.iter().map(|item| item.transformed(iso)).collect()
    }
}

/// Order in which the per-axis rotations of [`EulerAngles`] compose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EulerOrder {
    #[default]
    Xyz,
    Xzy,
    Yxz,
    Yzx,
    Zxy,
    Zyx,
}

/// Rotation angles in radians about the X, Y and Z axes
///
/// The order names the intrinsic sequence: `Xyz` rotates about X first,
/// then about the rotated Y, then about the twice-rotated Z, which is the
/// quaternion product `qx * qy * qz`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EulerAngles {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub order: EulerOrder,
}

impl EulerAngles {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z,
            order: EulerOrder::Xyz,
        }
    }

    pub fn with_order(mut self, order: EulerOrder) -> Self {
        self.order = order;
        self
    }

    pub fn to_quaternion(&self) -> UnitQuaternion<f64> {
        let qx = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), self.x);
        let qy = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), self.y);
        let qz = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), self.z);
        match self.order {
            EulerOrder::Xyz => qx * qy * qz,
            EulerOrder::Xzy => qx * qz * qy,
            EulerOrder::Yxz => qy * qx * qz,
            EulerOrder::Yzx => qy * qz * qx,
            EulerOrder::Zxy => qz * qx * qy,
            EulerOrder::Zyx => qz * qy * qx,
        }
    }
}

impl From<EulerAngles> for UnitQuaternion<f64> {
    fn from(angles: EulerAngles) -> Self {
        angles.to_quaternion()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_point_rotation_about_origin() {
        let q = EulerAngles::new(0.0, 0.0, FRAC_PI_2).to_quaternion();
        let p = Point3::new(1.0, 0.0, 5.0).rotated(&q);
        assert_relative_eq!(p, Point3::new(0.0, 1.0, 5.0), epsilon = 1e-12);
    }

    #[test]
    fn test_move_normalizes_direction() {
        let p = Point3::new(1.0, 1.0, 1.0);
        let moved = p.moved(&Vector3::new(0.0, 0.0, 10.0), 3.0).unwrap();
        assert_relative_eq!(moved, Point3::new(1.0, 1.0, 4.0), epsilon = 1e-12);
        assert!(p.moved(&Vector3::zeros(), 3.0).is_err());
        assert_eq!(p.translated(&Vector3::new(1.0, 2.0, 3.0)), Point3::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn test_xyz_matches_closed_form() {
        let (a, b, c) = (PI / 6.0, PI / 12.0, 0.4);
        let q = EulerAngles::new(a, b, c).to_quaternion();
        let (c1, c2, c3) = ((a / 2.0).cos(), (b / 2.0).cos(), (c / 2.0).cos());
        let (s1, s2, s3) = ((a / 2.0).sin(), (b / 2.0).sin(), (c / 2.0).sin());
        assert_relative_eq!(q.i, s1 * c2 * c3 + c1 * s2 * s3, epsilon = 1e-12);
        assert_relative_eq!(q.j, c1 * s2 * c3 - s1 * c2 * s3, epsilon = 1e-12);
        assert_relative_eq!(q.k, c1 * c2 * s3 + s1 * s2 * c3, epsilon = 1e-12);
        assert_relative_eq!(q.w, c1 * c2 * c3 - s1 * s2 * s3, epsilon = 1e-12);
    }

    #[test]
    fn test_orders_differ() {
        let base = EulerAngles::new(0.3, 0.5, 0.7);
        let xyz = base.to_quaternion();
        let zyx = base.with_order(EulerOrder::Zyx).to_quaternion();
        assert!(xyz.angle_to(&zyx) > 1e-3);

        // Single-axis rotations do not depend on order
        let only_y = EulerAngles::new(0.0, 0.8, 0.0);
        let a = only_y.to_quaternion();
        let b = only_y.with_order(EulerOrder::Yzx).to_quaternion();
        assert!(a.angle_to(&b) < 1e-12);
    }
}
