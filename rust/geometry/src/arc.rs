// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Triangle helpers and circular arc sampling

use crate::error::{Error, Result};
use crate::tolerance::MIN_NORM;
use nalgebra::{Point2, Vector2};
use std::f64::consts::{PI, TAU};

/// Signed triangle area: positive when `a, b, c` turn counter-clockwise
#[inline]
pub fn signed_area(a: &Point2<f64>, b: &Point2<f64>, c: &Point2<f64>) -> f64 {
    (b - a).perp(&(c - a)) * 0.5
}

/// Center of the circle through three points; `None` when they are collinear
pub fn circumcenter(a: &Point2<f64>, b: &Point2<f64>, c: &Point2<f64>) -> Option<Point2<f64>> {
    let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
    if d.abs() < MIN_NORM {
        return None;
    }
    let a2 = a.coords.norm_squared();
    let b2 = b.coords.norm_squared();
    let c2 = c.coords.norm_squared();
    let ux = a2 * (b.y - c.y) + b2 * (c.y - a.y) + c2 * (a.y - b.y);
    let uy = a2 * (c.x - b.x) + b2 * (a.x - c.x) + c2 * (b.x - a.x);
    Some(Point2::new(ux / d, uy / d))
}

/// Points along the circular arc from `head` through `body` to `tail`
///
/// A half turn is split into `quality` pieces; any arc gets at least one.
/// The first and last returned points are exactly `head` and `tail`.
pub fn sample_arc(
    head: &Point2<f64>,
    body: &Point2<f64>,
    tail: &Point2<f64>,
    quality: usize,
) -> Result<Vec<Point2<f64>>> {
    let center = circumcenter(head, body, tail)
        .ok_or_else(|| Error::degenerate("arc points are collinear"))?;

    let start = (head.y - center.y).atan2(head.x - center.x);
    let end = (tail.y - center.y).atan2(tail.x - center.x);
    let sweep = if signed_area(head, body, tail) > 0.0 {
        (end - start).rem_euclid(TAU)
    } else {
        -(start - end).rem_euclid(TAU)
    };
    let radius = ((head - center).norm() + (body - center).norm() + (tail - center).norm()) / 3.0;

    let count = (sweep.abs() / PI * quality as f64).floor() as usize + 1;
    let step = sweep / count as f64;

    let mut points: Vec<Point2<f64>> = (0..=count)
        .map(|i| {
            let angle = start + step * i as f64;
            center + Vector2::new(angle.cos(), angle.sin()) * radius
        })
        .collect();
    points[0] = *head;
    points[count] = *tail;
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_circumcenter() {
        let c = circumcenter(
            &Point2::new(1.0, 0.0),
            &Point2::new(0.0, 1.0),
            &Point2::new(-1.0, 0.0),
        )
        .unwrap();
        assert_relative_eq!(c, Point2::origin(), epsilon = 1e-12);
        assert!(circumcenter(
            &Point2::new(0.0, 0.0),
            &Point2::new(1.0, 1.0),
            &Point2::new(2.0, 2.0)
        )
        .is_none());
    }

    #[test]
    fn test_half_circle_counter_clockwise() {
        let head = Point2::new(1.0, 0.0);
        let tail = Point2::new(-1.0, 0.0);
        let pts = sample_arc(&head, &Point2::new(0.0, 1.0), &tail, 4).unwrap();
        assert_eq!(pts.len(), 6);
        assert_eq!(pts[0], head);
        assert_eq!(*pts.last().unwrap(), tail);
        for p in &pts {
            assert_relative_eq!(p.coords.norm(), 1.0, epsilon = 1e-9);
            assert!(p.y >= -1e-9);
        }
    }

    #[test]
    fn test_arc_follows_body_side() {
        // Same endpoints, body below: the arc must pass through negative y
        let pts = sample_arc(
            &Point2::new(1.0, 0.0),
            &Point2::new(0.0, -1.0),
            &Point2::new(-1.0, 0.0),
            4,
        )
        .unwrap();
        assert!(pts.iter().all(|p| p.y <= 1e-9));

        // Short arc through a quarter turn
        let quarter = sample_arc(
            &Point2::new(1.0, 0.0),
            &Point2::new(0.5f64.sqrt(), 0.5f64.sqrt()),
            &Point2::new(0.0, 1.0),
            3,
        )
        .unwrap();
        assert_eq!(quarter.len(), 3);
    }

    #[test]
    fn test_collinear_arc_fails() {
        let err = sample_arc(
            &Point2::new(0.0, 0.0),
            &Point2::new(1.0, 0.0),
            &Point2::new(2.0, 0.0),
            8,
        );
        assert!(matches!(err, Err(Error::DegenerateConstruction(_))));
    }
}
