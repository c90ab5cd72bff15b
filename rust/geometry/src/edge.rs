// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Boundary edges of surfaces: straight lines or sampled curves

use crate::arc::sample_arc;
use crate::error::{Error, Result};
use crate::plane::LocalFrame;
use crate::segment::Segment3;
use crate::transform::Transformable;
use nalgebra::{Isometry3, Point3};

/// One edge of a surface boundary
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Edge {
    Straight { start: Point3<f64>, end: Point3<f64> },
    /// Polyline through at least 3 sample points
    Curve(Vec<Point3<f64>>),
}

impl Edge {
    pub fn straight(start: Point3<f64>, end: Point3<f64>) -> Self {
        Self::Straight { start, end }
    }

    pub fn curve(points: Vec<Point3<f64>>) -> Result<Self> {
        if points.len() < 3 {
            return Err(Error::degenerate(format!(
                "a curve edge needs at least 3 points, got {}",
                points.len()
            )));
        }
        Ok(Self::Curve(points))
    }

    /// Straight edge for 2 points, curve for more
    pub fn from_points(points: Vec<Point3<f64>>) -> Result<Self> {
        match points.len() {
            0 | 1 => Err(Error::degenerate(format!(
                "an edge needs at least 2 points, got {}",
                points.len()
            ))),
            2 => Ok(Self::straight(points[0], points[1])),
            _ => Ok(Self::Curve(points)),
        }
    }

    /// Circular arc from `head` through `body` to `tail`, sampled with
    /// `quality` pieces per half turn
    pub fn arc(
        head: Point3<f64>,
        body: Point3<f64>,
        tail: Point3<f64>,
        quality: usize,
    ) -> Result<Self> {
        let normal = (body - head).cross(&(tail - head));
        let frame = LocalFrame::new(head, &(body - head), &normal)
            .map_err(|_| Error::degenerate("arc points are collinear"))?;
        let flat = sample_arc(
            &frame.project(&head),
            &frame.project(&body),
            &frame.project(&tail),
            quality,
        )?;
        let mut points: Vec<Point3<f64>> = flat
            .iter()
            .map(|p| frame.from_local(&Point3::new(p.x, p.y, 0.0)))
            .collect();
        if let Some(first) = points.first_mut() {
            *first = head;
        }
        if let Some(last) = points.last_mut() {
            *last = tail;
        }
        Self::from_points(points)
    }

    #[inline]
    pub fn is_curve(&self) -> bool {
        matches!(self, Self::Curve(_))
    }

    /// Consecutive segments from the first point to the last
    pub fn decompose(&self) -> Vec<Segment3> {
        match self {
            Self::Straight { start, end } => vec![Segment3::new(*start, *end)],
            Self::Curve(points) => points
                .windows(2)
                .map(|w| Segment3::new(w[0], w[1]))
                .collect(),
        }
    }

    pub fn points(&self) -> Vec<Point3<f64>> {
        match self {
            Self::Straight { start, end } => vec![*start, *end],
            Self::Curve(points) => points.clone(),
        }
    }

    /// Start point; `None` only for a hand-built empty `Curve`
    pub fn first(&self) -> Option<Point3<f64>> {
        match self {
            Self::Straight { start, .. } => Some(*start),
            Self::Curve(points) => points.first().copied(),
        }
    }

    /// End point; `None` only for a hand-built empty `Curve`
    pub fn last(&self) -> Option<Point3<f64>> {
        match self {
            Self::Straight { end, .. } => Some(*end),
            Self::Curve(points) => points.last().copied(),
        }
    }

    /// Flip direction in place
    pub fn reverse(&mut self) {
        match self {
            Self::Straight { start, end } => std::mem::swap(start, end),
            Self::Curve(points) => points.reverse(),
        }
    }

    pub fn reversed(&self) -> Self {
        let mut edge = self.clone();
        edge.reverse();
        edge
    }
}

impl Transformable for Edge {
    fn transformed(&self, iso: &Isometry3<f64>) -> Self {
        match self {
            Self::Straight { start, end } => Self::straight(iso * start, iso * end),
            Self::Curve(points) => Self::Curve(points.transformed(iso)),
        }
    }
}
