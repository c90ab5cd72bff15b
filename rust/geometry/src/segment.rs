// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Directed line segments in 2D and 3D

use crate::error::Result;
use crate::plane::Projection;
use crate::tolerance::{compare, is_zero, normalize2, normalize3, points2_near, points_near, sign};
use crate::transform::Transformable;
use nalgebra::{Isometry3, Point2, Point3, Vector2, Vector3};
use std::cmp::Ordering;
use std::fmt;

/// Directed 2D segment from `start` to `end`
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment2 {
    pub start: Point2<f64>,
    pub end: Point2<f64>,
}

impl Segment2 {
    #[inline]
    pub fn new(start: Point2<f64>, end: Point2<f64>) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn vector(&self) -> Vector2<f64> {
        self.end - self.start
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.vector().norm()
    }

    /// Unit direction; fails for a zero-length segment
    #[inline]
    pub fn direction(&self) -> Result<Vector2<f64>> {
        normalize2(&self.vector(), "segment direction")
    }

    #[inline]
    pub fn midpoint(&self) -> Point2<f64> {
        nalgebra::center(&self.start, &self.end)
    }

    /// Distance from `p` to the closest point of the finite segment
    pub fn distance_to_point(&self, p: &Point2<f64>, eps: f64) -> f64 {
        if points2_near(&self.start, &self.end, eps) {
            return (p - self.start).norm();
        }
        let along = self.vector();
        let from_start = p - self.start;
        let from_end = p - self.end;
        if compare(along.dot(&from_start), 0.0, eps) == Ordering::Less {
            return from_start.norm();
        }
        if compare(along.dot(&from_end), 0.0, eps) == Ordering::Greater {
            return from_end.norm();
        }
        along.perp(&from_start).abs() / along.norm()
    }

    /// `p` lies on the finite segment within `eps`
    #[inline]
    pub fn contains(&self, p: &Point2<f64>, eps: f64) -> bool {
        is_zero(self.distance_to_point(p, eps), eps)
    }

    /// Same endpoints in the same order, within `eps` per coordinate
    #[inline]
    pub fn approx_eq(&self, other: &Segment2, eps: f64) -> bool {
        points2_near(&self.start, &other.start, eps) && points2_near(&self.end, &other.end, eps)
    }

    /// The two segments cross at a single interior point of both
    ///
    /// Touching at an endpoint or overlapping collinearly does not count.
    pub fn properly_intersects(&self, other: &Segment2, eps: f64) -> bool {
        let a = self.vector();
        let b = other.vector();
        let c1 = sign(a.perp(&(other.start - self.start)), eps);
        let c2 = sign(a.perp(&(other.end - self.start)), eps);
        let c3 = sign(b.perp(&(self.start - other.start)), eps);
        let c4 = sign(b.perp(&(self.end - other.start)), eps);
        c1 * c2 < 0 && c3 * c4 < 0
    }
}

impl fmt::Display for Segment2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}) -> ({}, {})",
            self.start.x, self.start.y, self.end.x, self.end.y
        )
    }
}

/// Directed 3D segment from `start` to `end`
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment3 {
    pub start: Point3<f64>,
    pub end: Point3<f64>,
}

impl Segment3 {
    #[inline]
    pub fn new(start: Point3<f64>, end: Point3<f64>) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn vector(&self) -> Vector3<f64> {
        self.end - self.start
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.vector().norm()
    }

    /// Unit direction; fails for a zero-length segment
    #[inline]
    pub fn direction(&self) -> Result<Vector3<f64>> {
        normalize3(&self.vector(), "segment direction")
    }

    #[inline]
    pub fn midpoint(&self) -> Point3<f64> {
        nalgebra::center(&self.start, &self.end)
    }

    /// Point at normalized parameter `t` (0 = start, 1 = end)
    #[inline]
    pub fn point_at(&self, t: f64) -> Point3<f64> {
        self.start + self.vector() * t
    }

    #[inline]
    pub fn is_degenerate(&self, eps: f64) -> bool {
        is_zero(self.length(), eps)
    }

    #[inline]
    pub fn reversed(&self) -> Self {
        Self::new(self.end, self.start)
    }

    /// Flatten onto a plane
    #[inline]
    pub fn project(&self, projection: &Projection) -> Segment2 {
        Segment2::new(projection.project(&self.start), projection.project(&self.end))
    }

    /// Same endpoints in the same order, within `eps` per coordinate
    ///
    /// Not transitive, so it cannot back `Eq` or `Hash`.
    #[inline]
    pub fn approx_eq(&self, other: &Segment3, eps: f64) -> bool {
        points_near(&self.start, &other.start, eps) && points_near(&self.end, &other.end, eps)
    }

    /// `p` lies on the segment within `eps`
    pub fn contains_point(&self, p: &Point3<f64>, include_endpoints: bool, eps: f64) -> bool {
        if points_near(p, &self.start, eps) || points_near(p, &self.end, eps) {
            return include_endpoints;
        }
        is_zero(
            (p - self.start).norm() + (p - self.end).norm() - self.length(),
            eps,
        )
    }
}

impl Transformable for Segment3 {
    fn transformed(&self, iso: &Isometry3<f64>) -> Self {
        Self::new(iso * self.start, iso * self.end)
    }
}

impl fmt::Display for Segment3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}) -> ({}, {}, {})",
            self.start.x, self.start.y, self.start.z, self.end.x, self.end.y, self.end.z
        )
    }
}
