// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tolerant scalar comparison
//!
//! Every predicate in the workspace compares floats against a fixed absolute
//! epsilon rather than exactly or relative to magnitude.

use crate::error::{Error, Result};
use nalgebra::{Point2, Point3, Vector2, Vector3};
use std::cmp::Ordering;
use std::f64::consts::{PI, TAU};

/// Absolute tolerance used when a caller does not supply one
pub const DEFAULT_EPS: f64 = 1e-3;

/// Smallest norm a vector may have and still be normalized
pub const MIN_NORM: f64 = 1e-12;

/// Three-way comparison of `x` against `y` within `eps`
#[inline]
pub fn compare(x: f64, y: f64, eps: f64) -> Ordering {
    let diff = x - y;
    if diff > eps {
        Ordering::Greater
    } else if diff < -eps {
        Ordering::Less
    } else {
        Ordering::Equal
    }
}

/// `compare` as a sign: -1, 0 or 1
#[inline]
pub fn sign(x: f64, eps: f64) -> i32 {
    compare(x, 0.0, eps) as i32
}

#[inline]
pub fn near(x: f64, y: f64, eps: f64) -> bool {
    compare(x, y, eps) == Ordering::Equal
}

#[inline]
pub fn is_zero(x: f64, eps: f64) -> bool {
    near(x, 0.0, eps)
}

/// Wrap an angle in radians into `[-PI, PI)`
#[inline]
pub fn normalize_angle(rad: f64) -> f64 {
    rad - TAU * ((rad + PI) / TAU).floor()
}

/// Angles equal modulo a full turn
#[inline]
pub fn angle_eq(a: f64, b: f64, eps: f64) -> bool {
    is_zero(normalize_angle(a - b), eps)
}

/// Component-wise tolerant equality of 2D points
#[inline]
pub fn points2_near(a: &Point2<f64>, b: &Point2<f64>, eps: f64) -> bool {
    near(a.x, b.x, eps) && near(a.y, b.y, eps)
}

/// Component-wise tolerant equality of 3D points
#[inline]
pub fn points_near(a: &Point3<f64>, b: &Point3<f64>, eps: f64) -> bool {
    near(a.x, b.x, eps) && near(a.y, b.y, eps) && near(a.z, b.z, eps)
}

/// Component-wise tolerant equality of 3D vectors
#[inline]
pub fn vectors_near(a: &Vector3<f64>, b: &Vector3<f64>, eps: f64) -> bool {
    near(a.x, b.x, eps) && near(a.y, b.y, eps) && near(a.z, b.z, eps)
}

/// Unit vector in the direction of `v`
///
/// `what` names the vector in the error message.
#[inline]
pub fn normalize3(v: &Vector3<f64>, what: &str) -> Result<Vector3<f64>> {
    v.try_normalize(MIN_NORM)
        .ok_or_else(|| Error::undefined(format!("cannot normalize zero-length {}", what)))
}

#[inline]
pub fn normalize2(v: &Vector2<f64>, what: &str) -> Result<Vector2<f64>> {
    v.try_normalize(MIN_NORM)
        .ok_or_else(|| Error::undefined(format!("cannot normalize zero-length {}", what)))
}
