// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Intersection primitives: ray/plane, line/line, plane/plane, face/face
//!
//! None of these fail. Parallel or degenerate inputs yield `None` (or an
//! empty result) and callers skip them.

use crate::segment::Segment3;
use crate::simple_surface::SimpleSurface;
use crate::tolerance::{is_zero, points_near, MIN_NORM};
use nalgebra::{Point2, Point3, Vector2, Vector3};

/// Infinite 3D line through `point` along `direction`
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Line3 {
    pub point: Point3<f64>,
    pub direction: Vector3<f64>,
}

impl Line3 {
    pub fn new(point: Point3<f64>, direction: Vector3<f64>) -> Self {
        Self { point, direction }
    }

    /// Signed parameter of `p` along the line, in units of `direction`
    #[inline]
    pub fn parameter_of(&self, p: &Point3<f64>) -> f64 {
        (p - self.point).dot(&self.direction) / self.direction.norm_squared()
    }

    #[inline]
    pub fn point_at(&self, t: f64) -> Point3<f64> {
        self.point + self.direction * t
    }
}

/// Where the line `origin + dir * t` meets the plane through `plane_point`
/// with normal `normal`
///
/// `t` may be negative; `None` when the line is parallel to the plane.
pub fn ray_plane(
    origin: &Point3<f64>,
    dir: &Vector3<f64>,
    plane_point: &Point3<f64>,
    normal: &Vector3<f64>,
    eps: f64,
) -> Option<Point3<f64>> {
    let denom = normal.dot(dir);
    if is_zero(denom, eps) {
        return None;
    }
    let t = normal.dot(&(plane_point - origin)) / denom;
    Some(origin + dir * t)
}

/// Parameter along the first line where two 2D lines cross
///
/// Lines are `p + v1 * t` and `q + v2 * s`; `None` when parallel.
#[inline]
pub fn line_line_2d_parameter(
    p: &Point2<f64>,
    v1: &Vector2<f64>,
    q: &Point2<f64>,
    v2: &Vector2<f64>,
    eps: f64,
) -> Option<f64> {
    let denom = v1.perp(v2);
    if is_zero(denom, eps) {
        return None;
    }
    let u = p - q;
    Some(v2.perp(&u) / denom)
}

/// Crossing point of two 2D lines; `None` when parallel
pub fn line_line_2d(
    p: &Point2<f64>,
    v1: &Vector2<f64>,
    q: &Point2<f64>,
    v2: &Vector2<f64>,
    eps: f64,
) -> Option<Point2<f64>> {
    line_line_2d_parameter(p, v1, q, v2, eps).map(|t| p + v1 * t)
}

/// Two 3D lines lie in a common plane
pub fn lines_coplanar(a: &Line3, b: &Line3, eps: f64) -> bool {
    let gap = b.point - a.point;
    let n1 = a.direction.cross(&gap);
    let n2 = b.direction.cross(&gap);
    is_zero(n1.cross(&n2).norm(), eps)
}

/// Crossing point of two coplanar 3D lines
///
/// Solved in the first of the xy, xz, yz coordinate planes where the lines
/// are not parallel. `None` for skew or parallel lines.
pub fn line_line_3d(a: &Line3, b: &Line3, eps: f64) -> Option<Point3<f64>> {
    if !lines_coplanar(a, b, eps) {
        return None;
    }
    let (p1, v1) = (a.point, a.direction);
    let (p2, v2) = (b.point, b.direction);

    let t = if !is_zero(v1.x * v2.y - v1.y * v2.x, eps) {
        (v1.y * (p1.x - p2.x) + v1.x * (p2.y - p1.y)) / (v2.x * v1.y - v1.x * v2.y)
    } else if !is_zero(v1.x * v2.z - v1.z * v2.x, eps) {
        (v1.z * (p1.x - p2.x) + v1.x * (p2.z - p1.z)) / (v2.x * v1.z - v1.x * v2.z)
    } else if !is_zero(v1.y * v2.z - v1.z * v2.y, eps) {
        (v1.z * (p1.y - p2.y) + v1.y * (p2.z - p1.z)) / (v2.y * v1.z - v1.y * v2.z)
    } else {
        return None;
    };
    Some(b.point_at(t))
}

/// Intersection line of two planes given by a point and a normal each
///
/// The returned direction is a unit vector. `None` for parallel planes.
pub fn plane_plane(
    p1: &Point3<f64>,
    n1: &Vector3<f64>,
    p2: &Point3<f64>,
    n2: &Vector3<f64>,
    eps: f64,
) -> Option<Line3> {
    let n1 = n1.try_normalize(MIN_NORM)?;
    let n2 = n2.try_normalize(MIN_NORM)?;
    let dir = n1.cross(&n2);
    if is_zero(dir.norm(), eps) {
        return None;
    }
    let s1 = n1.dot(&p1.coords);
    let s2 = n2.dot(&p2.coords);
    let dot = n1.dot(&n2);
    let denom = dot * dot - 1.0;
    let t = (s2 * dot - s1) / denom;
    let s = (s1 * dot - s2) / denom;
    Some(Line3::new(Point3::from(n1 * t + n2 * s), dir.normalize()))
}

/// Order collinear points along the line through the first point and the
/// first later point distinct from it
pub fn sort_along_line(points: &[Point3<f64>], eps: f64) -> Vec<Point3<f64>> {
    let Some(first) = points.first() else {
        return Vec::new();
    };
    match points.iter().find(|p| !points_near(p, first, eps)) {
        Some(other) => sort_by_line(points, &Line3::new(*first, other - first)),
        None => points.to_vec(),
    }
}

fn sort_by_line(points: &[Point3<f64>], line: &Line3) -> Vec<Point3<f64>> {
    let mut keyed: Vec<(f64, Point3<f64>)> =
        points.iter().map(|p| (line.parameter_of(p), *p)).collect();
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
    keyed.into_iter().map(|(_, p)| p).collect()
}

/// Segments along which two planar faces overlap
///
/// Cuts the planes' intersection line with every boundary edge of both
/// faces and keeps each consecutive piece whose midpoint lies in both.
pub fn face_intersection(
    f1: &SimpleSurface,
    f2: &SimpleSurface,
    include_border: bool,
    eps: f64,
) -> Vec<Segment3> {
    let Some(line) = plane_plane(&f1.origin(), &f1.normal(), &f2.origin(), &f2.normal(), eps)
    else {
        return Vec::new();
    };

    let hits: Vec<Point3<f64>> = f1
        .boundary()
        .chain(f2.boundary())
        .filter(|edge| !edge.is_degenerate(eps))
        .filter_map(|edge| line_line_3d(&Line3::new(edge.start, edge.vector()), &line, eps))
        .collect();
    if hits.len() < 2 {
        return Vec::new();
    }

    sort_by_line(&hits, &line)
        .windows(2)
        .filter(|w| !points_near(&w[0], &w[1], eps))
        .map(|w| Segment3::new(w[0], w[1]))
        .filter(|piece| {
            let mid = piece.midpoint();
            f1.contains_point(&mid, include_border, eps) && f2.contains_point(&mid, include_border, eps)
        })
        .collect()
}
