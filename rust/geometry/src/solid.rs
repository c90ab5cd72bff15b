// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The two views a hidden-line pass needs of any solid

use crate::segment::Segment3;
use crate::simple_surface::SimpleSurface;
use crate::surface::Surface;
use nalgebra::Vector3;

/// A closed body as seen by the occlusion pass
pub trait Solid {
    /// Candidate visible edges, in a stable order
    ///
    /// `view` points toward the viewer and decides which silhouette lines
    /// of curved sides are drawn.
    fn decompose_to_segments(&self, view: &Vector3<f64>) -> Vec<Segment3>;

    /// Planar faces that can hide other geometry
    fn decompose_to_simple_surfaces(&self) -> Vec<SimpleSurface>;
}

impl Solid for Surface {
    fn decompose_to_segments(&self, view: &Vector3<f64>) -> Vec<Segment3> {
        self.visible_segments(view)
    }

    fn decompose_to_simple_surfaces(&self) -> Vec<SimpleSurface> {
        Surface::decompose_to_simple_surfaces(self)
    }
}

/// A lone face shows its whole boundary
impl Solid for SimpleSurface {
    fn decompose_to_segments(&self, _view: &Vector3<f64>) -> Vec<Segment3> {
        self.boundary().copied().collect()
    }

    fn decompose_to_simple_surfaces(&self) -> Vec<SimpleSurface> {
        vec![self.clone()]
    }
}

impl<S: Solid + ?Sized> Solid for Box<S> {
    fn decompose_to_segments(&self, view: &Vector3<f64>) -> Vec<Segment3> {
        (**self).decompose_to_segments(view)
    }

    fn decompose_to_simple_surfaces(&self) -> Vec<SimpleSurface> {
        (**self).decompose_to_simple_surfaces()
    }
}
