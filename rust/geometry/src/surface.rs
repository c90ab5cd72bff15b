// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Surfaces bounded by edges: flat caps and ruled sides

use crate::edge::Edge;
use crate::error::{Error, Result};
use crate::segment::Segment3;
use crate::simple_surface::SimpleSurface;
use crate::tolerance::DEFAULT_EPS;
use crate::transform::Transformable;
use nalgebra::{Isometry3, Point3, Vector3};

fn edges_from_points(loops: Vec<Vec<Point3<f64>>>) -> Result<Vec<Edge>> {
    loops.into_iter().map(Edge::from_points).collect()
}

/// Vertices of an edge loop, each edge contributing all but its last point
fn loop_points(edges: &[Edge]) -> Vec<Point3<f64>> {
    edges
        .iter()
        .flat_map(|edge| edge.decompose().into_iter().map(|s| s.start))
        .collect()
}

fn reversed_loop(edges: &[Edge]) -> Vec<Edge> {
    edges.iter().rev().map(Edge::reversed).collect()
}

/// Planar region bounded by an outer loop of edges and optional hole loops
///
/// Its face is computed once from the edges and kept alongside them.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlatPlane {
    outer: Vec<Edge>,
    inners: Vec<Vec<Edge>>,
    face: SimpleSurface,
}

impl FlatPlane {
    /// Outer boundary from one point list per edge: 2 points make a straight
    /// edge, more make a curve
    pub fn new(outer: Vec<Vec<Point3<f64>>>) -> Result<Self> {
        Self::from_edges(edges_from_points(outer)?)
    }

    pub fn from_edges(outer: Vec<Edge>) -> Result<Self> {
        let face = SimpleSurface::new(&loop_points(&outer))?;
        Ok(Self {
            outer,
            inners: Vec::new(),
            face,
        })
    }

    /// Add a hole given as one point list per edge
    pub fn add_inner(&mut self, inner: Vec<Vec<Point3<f64>>>) -> Result<()> {
        self.add_inner_edges(edges_from_points(inner)?)
    }

    pub fn add_inner_edges(&mut self, inner: Vec<Edge>) -> Result<()> {
        self.face.add_inner(&loop_points(&inner))?;
        self.inners.push(inner);
        Ok(())
    }

    #[inline]
    pub fn outer(&self) -> &[Edge] {
        &self.outer
    }

    #[inline]
    pub fn inners(&self) -> &[Vec<Edge>] {
        &self.inners
    }

    #[inline]
    pub fn normal(&self) -> Vector3<f64> {
        self.face.normal()
    }

    #[inline]
    pub fn face(&self) -> &SimpleSurface {
        &self.face
    }

    /// Flip the winding in place: every edge is reversed, as is the order
    /// of edges and of holes. The normal flips with it.
    ///
    /// On error the plane is left unchanged.
    pub fn reverse(&mut self) -> Result<()> {
        let outer = reversed_loop(&self.outer);
        let inners: Vec<Vec<Edge>> = self.inners.iter().rev().map(|l| reversed_loop(l)).collect();
        let mut face = SimpleSurface::new(&loop_points(&outer))?;
        for inner in &inners {
            face.add_inner(&loop_points(inner))?;
        }
        self.outer = outer;
        self.inners = inners;
        self.face = face;
        Ok(())
    }

    pub fn decompose_to_simple_surfaces(&self) -> Vec<SimpleSurface> {
        vec![self.face.clone()]
    }

    /// Every boundary segment, outer loop first
    pub fn visible_segments(&self) -> Vec<Segment3> {
        self.outer
            .iter()
            .chain(self.inners.iter().flatten())
            .flat_map(Edge::decompose)
            .collect()
    }
}

impl Transformable for FlatPlane {
    fn transformed(&self, iso: &Isometry3<f64>) -> Self {
        Self {
            outer: self.outer.transformed(iso),
            inners: self.inners.transformed(iso),
            face: self.face.transformed(iso),
        }
    }
}

/// Surface swept between two rails with matching sample counts
///
/// Corresponding rail points are joined by straight beams; each pair of
/// consecutive beams bounds one planar quad.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RuledSurface {
    top: Edge,
    bottom: Edge,
    faces: Vec<SimpleSurface>,
}

impl RuledSurface {
    pub fn new(top: Edge, bottom: Edge) -> Result<Self> {
        let top_segments = top.decompose();
        let bottom_segments = bottom.decompose();
        if top_segments.len() != bottom_segments.len() {
            return Err(Error::degenerate(format!(
                "ruled surface rails differ in length: {} vs {} segments",
                top_segments.len(),
                bottom_segments.len()
            )));
        }
        let faces = top_segments
            .iter()
            .zip(&bottom_segments)
            .map(|(t, b)| SimpleSurface::new(&[t.start, t.end, b.end, b.start]))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { top, bottom, faces })
    }

    /// Sweep `edge` between two offsets
    pub fn from_edge(edge: &Edge, backward: &Vector3<f64>, forward: &Vector3<f64>) -> Result<Self> {
        Self::new(edge.translated(forward), edge.translated(backward))
    }

    #[inline]
    pub fn top(&self) -> &Edge {
        &self.top
    }

    #[inline]
    pub fn bottom(&self) -> &Edge {
        &self.bottom
    }

    /// Quads `(t.start, t.end, b.end, b.start)` in rail order
    #[inline]
    pub fn faces(&self) -> &[SimpleSurface] {
        &self.faces
    }

    /// Segments from each top rail point to its bottom counterpart
    pub fn beams(&self) -> Vec<Segment3> {
        self.top
            .points()
            .into_iter()
            .zip(self.bottom.points())
            .map(|(t, b)| Segment3::new(t, b))
            .collect()
    }

    pub fn decompose_to_simple_surfaces(&self) -> Vec<SimpleSurface> {
        self.faces.clone()
    }

    /// First and last beams, plus the silhouette beams of a curved sweep
    ///
    /// A quad faces the viewer when its normal has a positive component
    /// along `view`. Between two curved rails, a beam is a silhouette where
    /// the quads on either side of it disagree.
    ///
    /// Beam midpoints are matched to the quads they bound with
    /// [`DEFAULT_EPS`]; they lie on those quads by construction, so the
    /// result does not depend on a caller tolerance.
    pub fn visible_segments(&self, view: &Vector3<f64>) -> Vec<Segment3> {
        let beams = self.beams();
        let (Some(first), Some(last)) = (beams.first(), beams.last()) else {
            return Vec::new();
        };
        let mut visible = Vec::with_capacity(2);

        if self.top.is_curve() && self.bottom.is_curve() {
            let mut last_facing = true;
            let n_faces = self.faces.len();
            for (i, beam) in beams.iter().enumerate() {
                let mid = beam.midpoint();
                let neighbours = &self.faces[i.saturating_sub(1)..(i + 1).min(n_faces)];
                for face in neighbours {
                    if !face.contains_point(&mid, true, DEFAULT_EPS) {
                        continue;
                    }
                    let facing = face.normal().dot(view) > 0.0;
                    if facing != last_facing && i > 0 && i + 1 < beams.len() {
                        visible.push(*beam);
                    }
                    last_facing = facing;
                }
            }
        }

        visible.push(*first);
        visible.push(*last);
        visible
    }
}

impl Transformable for RuledSurface {
    fn transformed(&self, iso: &Isometry3<f64>) -> Self {
        Self {
            top: self.top.transformed(iso),
            bottom: self.bottom.transformed(iso),
            faces: self.faces.transformed(iso),
        }
    }
}

/// Any surface a solid is assembled from
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Surface {
    Flat(FlatPlane),
    Ruled(RuledSurface),
}

impl Surface {
    pub fn decompose_to_simple_surfaces(&self) -> Vec<SimpleSurface> {
        match self {
            Self::Flat(plane) => plane.decompose_to_simple_surfaces(),
            Self::Ruled(ruled) => ruled.decompose_to_simple_surfaces(),
        }
    }

    pub fn visible_segments(&self, view: &Vector3<f64>) -> Vec<Segment3> {
        match self {
            Self::Flat(plane) => plane.visible_segments(),
            Self::Ruled(ruled) => ruled.visible_segments(view),
        }
    }
}

impl From<FlatPlane> for Surface {
    fn from(plane: FlatPlane) -> Self {
        Self::Flat(plane)
    }
}

impl From<RuledSurface> for Surface {
    fn from(ruled: RuledSurface) -> Self {
        Self::Ruled(ruled)
    }
}

impl Transformable for Surface {
    fn transformed(&self, iso: &Isometry3<f64>) -> Self {
        match self {
            Self::Flat(plane) => Self::Flat(plane.transformed(iso)),
            Self::Ruled(ruled) => Self::Ruled(ruled.transformed(iso)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square_loops() -> Vec<Vec<Point3<f64>>> {
        vec![
            vec![Point3::new(0.0, 0.0, 0.0), Point3::new(4.0, 0.0, 0.0)],
            vec![Point3::new(4.0, 0.0, 0.0), Point3::new(4.0, 4.0, 0.0)],
            vec![Point3::new(4.0, 4.0, 0.0), Point3::new(0.0, 4.0, 0.0)],
            vec![Point3::new(0.0, 4.0, 0.0), Point3::new(0.0, 0.0, 0.0)],
        ]
    }

    fn half_disc_rail(z: f64) -> Edge {
        half_disc_rail_with_radius(2.0, z)
    }

    /// Semicircle around the origin bulging toward -y
    fn half_disc_rail_with_radius(radius: f64, z: f64) -> Edge {
        let pts = (0..=8)
            .map(|i| {
                let a = std::f64::consts::PI * (1.0 + i as f64 / 8.0);
                Point3::new(radius * a.cos(), radius * a.sin(), z)
            })
            .collect();
        Edge::curve(pts).unwrap()
    }

    #[test]
    fn test_flat_plane_normal_and_reverse() {
        let mut plane = FlatPlane::new(square_loops()).unwrap();
        assert_relative_eq!(plane.normal(), Vector3::z(), epsilon = 1e-12);
        assert_eq!(plane.visible_segments().len(), 4);

        plane.reverse().unwrap();
        assert_relative_eq!(plane.normal(), -Vector3::z(), epsilon = 1e-12);
        assert_eq!(plane.outer()[0].first(), Some(Point3::new(0.0, 0.0, 0.0)));
        assert_eq!(plane.outer()[0].last(), Some(Point3::new(0.0, 4.0, 0.0)));
    }

    #[test]
    fn test_flat_plane_with_hole() {
        let mut plane = FlatPlane::new(square_loops()).unwrap();
        plane
            .add_inner(vec![
                vec![Point3::new(1.0, 1.0, 0.0), Point3::new(3.0, 1.0, 0.0)],
                vec![Point3::new(3.0, 1.0, 0.0), Point3::new(3.0, 3.0, 0.0)],
                vec![Point3::new(3.0, 3.0, 0.0), Point3::new(1.0, 3.0, 0.0)],
                vec![Point3::new(1.0, 3.0, 0.0), Point3::new(1.0, 1.0, 0.0)],
            ])
            .unwrap();
        assert_eq!(plane.visible_segments().len(), 8);
        let face = &plane.decompose_to_simple_surfaces()[0];
        assert!(!face.contains_point(&Point3::new(2.0, 2.0, 0.0), false, DEFAULT_EPS));
        assert!(face.contains_point(&Point3::new(0.5, 2.0, 0.0), false, DEFAULT_EPS));

        assert!(plane.add_inner(vec![vec![Point3::origin()]]).is_err());
        assert_eq!(plane.inners().len(), 1);
    }

    #[test]
    fn test_ruled_surface_quads_and_beams() {
        let edge = Edge::straight(Point3::new(0.0, 0.0, 0.0), Point3::new(4.0, 0.0, 0.0));
        let ruled =
            RuledSurface::from_edge(&edge, &Vector3::zeros(), &Vector3::new(0.0, 0.0, 3.0)).unwrap();
        assert_eq!(ruled.faces().len(), 1);
        assert_eq!(ruled.beams().len(), 2);
        let outer = ruled.faces()[0].outer_points();
        assert_eq!(outer[0], Point3::new(0.0, 0.0, 3.0));
        assert_eq!(outer[2], Point3::new(4.0, 0.0, 0.0));

        // Straight rails only show their end beams
        let segs = ruled.visible_segments(&Vector3::y());
        assert_eq!(segs.len(), 2);
    }

    #[test]
    fn test_rails_must_match() {
        let short = Edge::straight(Point3::origin(), Point3::new(1.0, 0.0, 0.0));
        assert!(matches!(
            RuledSurface::new(half_disc_rail(1.0), short),
            Err(Error::DegenerateConstruction(_))
        ));
    }

    #[test]
    fn test_curved_silhouette() {
        // Quads face inward; seen along +x they stop facing the viewer at
        // the lowest point of the bulge, so one extra beam appears at x = 0
        let ruled = RuledSurface::new(half_disc_rail(1.0), half_disc_rail(0.0)).unwrap();
        let segs = ruled.visible_segments(&Vector3::x());
        assert_eq!(segs.len(), 3);
        assert_relative_eq!(segs[0].start.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(segs[0].start.y, -2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_silhouette_at_small_scale() {
        // Rails far smaller than the fixed tolerance still toggle once
        let ruled = RuledSurface::new(
            half_disc_rail_with_radius(1e-4, 1e-4),
            half_disc_rail_with_radius(1e-4, 0.0),
        )
        .unwrap();
        let segs = ruled.visible_segments(&Vector3::x());
        assert_eq!(segs.len(), 3);
        assert_relative_eq!(segs[0].start.y, -1e-4, epsilon = 1e-12);
    }
}
