// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Planar faces with holes

use crate::error::{Error, Result};
use crate::plane::LocalFrame;
use crate::ring::{classify, Containment};
use crate::segment::Segment3;
use crate::tolerance::{is_zero, DEFAULT_EPS};
use crate::transform::Transformable;
use nalgebra::{Isometry3, Point2, Point3, Vector3};
use std::fmt;

/// Planar face: one outer ring and zero or more holes, as closed loops of
/// directed segments
///
/// The unit normal is `dir(e0) × dir(e1)` for the first two outer edges and
/// is fixed at construction.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimpleSurface {
    outer: Vec<Segment3>,
    inners: Vec<Vec<Segment3>>,
    normal: Vector3<f64>,
}

/// Close a point loop into segments, last point back to the first
fn close_loop(points: &[Point3<f64>]) -> Vec<Segment3> {
    let n = points.len();
    (0..n)
        .map(|i| Segment3::new(points[i], points[(i + 1) % n]))
        .collect()
}

impl SimpleSurface {
    /// Face bounded by `outer`, which needs at least 3 points
    ///
    /// The unit directions of the first two edges must cross with a norm
    /// above [`DEFAULT_EPS`]. Construction always uses that tolerance; the
    /// `eps` passed to later predicates does not apply here.
    pub fn new(outer: &[Point3<f64>]) -> Result<Self> {
        if outer.len() < 3 {
            return Err(Error::degenerate(format!(
                "a face needs at least 3 points, got {}",
                outer.len()
            )));
        }
        let outer = close_loop(outer);
        let normal = face_normal(&outer[0], &outer[1])?;
        Ok(Self {
            outer,
            inners: Vec::new(),
            normal,
        })
    }

    /// Face built from an outer ring and its holes
    pub fn with_holes(outer: &[Point3<f64>], holes: &[Vec<Point3<f64>>]) -> Result<Self> {
        let mut face = Self::new(outer)?;
        for hole in holes {
            face.add_inner(hole)?;
        }
        Ok(face)
    }

    /// Cut a hole; needs at least 3 points
    pub fn add_inner(&mut self, points: &[Point3<f64>]) -> Result<()> {
        if points.len() < 3 {
            return Err(Error::degenerate(format!(
                "a hole needs at least 3 points, got {}",
                points.len()
            )));
        }
        self.inners.push(close_loop(points));
        Ok(())
    }

    #[inline]
    pub fn outer(&self) -> &[Segment3] {
        &self.outer
    }

    #[inline]
    pub fn inners(&self) -> &[Vec<Segment3>] {
        &self.inners
    }

    #[inline]
    pub fn normal(&self) -> Vector3<f64> {
        self.normal
    }

    /// First vertex of the outer ring
    #[inline]
    pub fn origin(&self) -> Point3<f64> {
        self.outer[0].start
    }

    pub fn outer_points(&self) -> Vec<Point3<f64>> {
        self.outer.iter().map(|s| s.start).collect()
    }

    /// Every boundary segment, outer ring first
    pub fn boundary(&self) -> impl Iterator<Item = &Segment3> {
        self.outer.iter().chain(self.inners.iter().flatten())
    }

    /// In-plane frame: X along the first outer edge, Z along the normal
    pub fn frame(&self) -> Result<LocalFrame> {
        LocalFrame::new(self.origin(), &self.outer[0].vector(), &self.normal)
    }

    /// Whether `p` lies on the face
    ///
    /// Off-plane points are rejected. With `include_border` the outer
    /// boundary counts as part of the face and hole boundaries do not.
    pub fn contains_point(&self, p: &Point3<f64>, include_border: bool, eps: f64) -> bool {
        if !is_zero((p - self.origin()).dot(&self.normal), eps) {
            return false;
        }
        let Ok(frame) = self.frame() else {
            return false;
        };
        let flat = frame.project(p);

        match classify(&flatten(&self.outer, &frame), &flat, eps) {
            Containment::Outside => false,
            Containment::OnBoundary => include_border,
            Containment::Inside => self.inners.iter().all(|inner| {
                match classify(&flatten(inner, &frame), &flat, eps) {
                    Containment::Inside => false,
                    Containment::OnBoundary => !include_border,
                    Containment::Outside => true,
                }
            }),
        }
    }
}

fn flatten(ring: &[Segment3], frame: &LocalFrame) -> Vec<Point2<f64>> {
    ring.iter().map(|s| frame.project(&s.start)).collect()
}

fn face_normal(e0: &Segment3, e1: &Segment3) -> Result<Vector3<f64>> {
    let cross = e0.direction()?.cross(&e1.direction()?);
    if is_zero(cross.norm(), DEFAULT_EPS) {
        return Err(Error::undefined(
            "face normal is undefined: first two edges are parallel",
        ));
    }
    Ok(cross.normalize())
}

impl Transformable for SimpleSurface {
    fn transformed(&self, iso: &Isometry3<f64>) -> Self {
        Self {
            outer: self.outer.transformed(iso),
            inners: self.inners.transformed(iso),
            normal: iso * self.normal,
        }
    }
}

impl fmt::Display for SimpleSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SimpleSurface: outer")?;
        for s in &self.outer {
            writeln!(f, "  {}", s)?;
        }
        for (i, inner) in self.inners.iter().enumerate() {
            writeln!(f, "inner {}", i)?;
            for s in inner {
                writeln!(f, "  {}", s)?;
            }
        }
        Ok(())
    }
}
