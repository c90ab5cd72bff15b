// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Closed 2D rings and point-in-polygon classification

use crate::tolerance::{is_zero, near};
use nalgebra::Point2;

/// Where a point lies relative to a ring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Containment {
    Outside,
    Inside,
    OnBoundary,
}

/// Classify `point` against the closed polygon `ring`
///
/// Ray-crossing test with explicit boundary detection, after Hormann and
/// Agathos, "The Point in Polygon Problem for Arbitrary Polygons". The
/// closing edge from the last point back to the first is implicit and the
/// winding of `ring` does not matter. Rings of fewer than 3 points contain
/// nothing.
pub fn classify(ring: &[Point2<f64>], point: &Point2<f64>, eps: f64) -> Containment {
    let n = ring.len();
    if n < 3 {
        return Containment::Outside;
    }

    let mut inside = false;
    let mut ip = ring[0];
    for i in 1..=n {
        let ip_next = ring[i % n];

        if near(ip_next.y, point.y, eps)
            && (near(ip_next.x, point.x, eps)
                || (near(ip.y, point.y, eps) && ((ip_next.x > point.x) == (ip.x < point.x))))
        {
            return Containment::OnBoundary;
        }

        if (ip.y < point.y) != (ip_next.y < point.y) {
            if ip.x >= point.x {
                if ip_next.x > point.x {
                    inside = !inside;
                } else {
                    match crossing_flips(&ip, &ip_next, point, eps) {
                        Some(flip) => inside ^= flip,
                        None => return Containment::OnBoundary,
                    }
                }
            } else if ip_next.x > point.x {
                match crossing_flips(&ip, &ip_next, point, eps) {
                    Some(flip) => inside ^= flip,
                    None => return Containment::OnBoundary,
                }
            }
        }

        ip = ip_next;
    }

    if inside {
        Containment::Inside
    } else {
        Containment::Outside
    }
}

/// Whether an edge straddling the ray flips parity; `None` when the point
/// sits on the edge
#[inline]
fn crossing_flips(ip: &Point2<f64>, ip_next: &Point2<f64>, point: &Point2<f64>, eps: f64) -> Option<bool> {
    let d = (ip.x - point.x) * (ip_next.y - point.y) - (ip_next.x - point.x) * (ip.y - point.y);
    if is_zero(d, eps) {
        return None;
    }
    Some((d > 0.0) == (ip_next.y > ip.y))
}

/// Signed area of a closed contour (shoelace)
///
/// Positive = counter-clockwise, negative = clockwise
pub fn signed_area(contour: &[Point2<f64>]) -> f64 {
    let n = contour.len();
    if n < 3 {
        return 0.0;
    }
    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += contour[i].x * contour[j].y;
        area -= contour[j].x * contour[i].y;
    }
    area * 0.5
}

/// Closed polygon boundary in the plane
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ring2 {
    points: Vec<Point2<f64>>,
}

impl Ring2 {
    pub fn new(points: Vec<Point2<f64>>) -> Self {
        Self { points }
    }

    #[inline]
    pub fn points(&self) -> &[Point2<f64>] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn signed_area(&self) -> f64 {
        signed_area(&self.points)
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    pub fn is_ccw(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// Re-orient counter-clockwise in place
    ///
    /// Reverses every point after the first, so the ring keeps its start.
    pub fn make_ccw(&mut self) {
        if !self.is_ccw() {
            self.reverse_keeping_start();
        }
    }

    /// Re-orient clockwise in place, keeping the first point
    pub fn make_cw(&mut self) {
        if self.is_ccw() {
            self.reverse_keeping_start();
        }
    }

    fn reverse_keeping_start(&mut self) {
        if self.points.len() > 1 {
            self.points[1..].reverse();
        }
    }

    #[inline]
    pub fn classify(&self, point: &Point2<f64>, eps: f64) -> Containment {
        classify(&self.points, point, eps)
    }
}

impl From<Vec<Point2<f64>>> for Ring2 {
    fn from(points: Vec<Point2<f64>>) -> Self {
        Self::new(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tolerance::DEFAULT_EPS;
    use proptest::prelude::*;

    fn square() -> Vec<Point2<f64>> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
        ]
    }

    #[test]
    fn test_square_containment() {
        let ring = square();
        assert_eq!(classify(&ring, &Point2::new(5.0, 5.0), DEFAULT_EPS), Containment::Inside);
        assert_eq!(classify(&ring, &Point2::new(11.0, 5.0), DEFAULT_EPS), Containment::Outside);
        assert_eq!(classify(&ring, &Point2::new(5.0, 0.0), DEFAULT_EPS), Containment::OnBoundary);
    }

    #[test]
    fn test_vertices_and_vertical_edges_are_boundary() {
        let ring = square();
        assert_eq!(classify(&ring, &Point2::new(10.0, 10.0), DEFAULT_EPS), Containment::OnBoundary);
        assert_eq!(classify(&ring, &Point2::new(10.0, 4.0), DEFAULT_EPS), Containment::OnBoundary);
        assert_eq!(classify(&ring, &Point2::new(0.0, 7.0), DEFAULT_EPS), Containment::OnBoundary);
    }

    #[test]
    fn test_point_level_with_vertex() {
        // Ray through the (1, 0) vertex must count one crossing, not two
        let diamond = vec![
            Point2::new(0.0, -1.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(-1.0, 0.0),
        ];
        assert_eq!(classify(&diamond, &Point2::new(0.5, 0.0), DEFAULT_EPS), Containment::Inside);
        assert_eq!(classify(&diamond, &Point2::new(-0.5, 0.0), DEFAULT_EPS), Containment::Inside);
        assert_eq!(classify(&diamond, &Point2::new(1.5, 0.0), DEFAULT_EPS), Containment::Outside);
        assert_eq!(classify(&diamond, &Point2::new(0.5, 0.5), DEFAULT_EPS), Containment::OnBoundary);
    }

    #[test]
    fn test_concave_ring() {
        // U shape opening upward
        let u = vec![
            Point2::new(0.0, 0.0),
            Point2::new(9.0, 0.0),
            Point2::new(9.0, 9.0),
            Point2::new(6.0, 9.0),
            Point2::new(6.0, 3.0),
            Point2::new(3.0, 3.0),
            Point2::new(3.0, 9.0),
            Point2::new(0.0, 9.0),
        ];
        assert_eq!(classify(&u, &Point2::new(1.5, 6.0), DEFAULT_EPS), Containment::Inside);
        assert_eq!(classify(&u, &Point2::new(4.5, 6.0), DEFAULT_EPS), Containment::Outside);
        assert_eq!(classify(&u, &Point2::new(7.5, 6.0), DEFAULT_EPS), Containment::Inside);
        assert_eq!(classify(&u, &Point2::new(4.5, 1.5), DEFAULT_EPS), Containment::Inside);
    }

    #[test]
    fn test_fewer_than_three_points_is_outside() {
        let line = vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)];
        assert_eq!(classify(&line, &Point2::new(0.5, 0.0), DEFAULT_EPS), Containment::Outside);
        assert_eq!(classify(&[], &Point2::new(0.0, 0.0), DEFAULT_EPS), Containment::Outside);
    }

    #[test]
    fn test_orientation_in_place() {
        let mut ring = Ring2::new(square());
        assert!(ring.is_ccw());
        assert!((ring.area() - 100.0).abs() < 1e-9);

        ring.make_cw();
        assert!(!ring.is_ccw());
        assert_eq!(ring.points()[0], Point2::new(0.0, 0.0));
        assert_eq!(ring.points()[1], Point2::new(0.0, 10.0));

        ring.make_ccw();
        assert_eq!(ring.points(), square().as_slice());
    }

    proptest! {
        #[test]
        fn classification_ignores_start_and_winding(
            x in -2.0f64..12.0,
            y in -2.0f64..12.0,
            shift in 0usize..4,
            reverse in any::<bool>(),
        ) {
            let base = square();
            let expected = classify(&base, &Point2::new(x, y), DEFAULT_EPS);
            let mut ring = base.clone();
            ring.rotate_left(shift);
            if reverse {
                ring.reverse();
            }
            prop_assert_eq!(classify(&ring, &Point2::new(x, y), DEFAULT_EPS), expected);
        }
    }
}
