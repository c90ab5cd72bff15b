// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Prisms: a flat outline swept along a straight axis

use crate::error::Result;
use crate::segment::Segment3;
use crate::simple_surface::SimpleSurface;
use crate::solid::Solid;
use crate::surface::{FlatPlane, RuledSurface, Surface};
use crate::tolerance::normalize3;
use crate::transform::Transformable;
use nalgebra::{Isometry3, Vector3};

/// Closed solid made of one ruled side per outline edge and two caps
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Prism {
    surfaces: Vec<Surface>,
}

impl Prism {
    /// Sweep `plane` from `plane + backward` to `plane + forward`
    ///
    /// The outline is first re-wound so its normal points along the sweep.
    /// Sides follow the outer edges, then every hole edge; the bottom cap
    /// comes next and the reversed top cap last.
    pub fn new(plane: FlatPlane, backward: Vector3<f64>, forward: Vector3<f64>) -> Result<Self> {
        let axis = normalize3(&(forward - backward), "prism axis")?;
        let mut plane = plane;
        if plane.normal().dot(&axis) < 0.0 {
            plane.reverse()?;
        }

        let mut surfaces = plane
            .outer()
            .iter()
            .chain(plane.inners().iter().flatten())
            .map(|edge| RuledSurface::from_edge(edge, &backward, &forward).map(Surface::from))
            .collect::<Result<Vec<_>>>()?;

        let bottom = plane.translated(&backward);
        let mut top = plane.translated(&forward);
        top.reverse()?;
        surfaces.push(bottom.into());
        surfaces.push(top.into());

        Ok(Self { surfaces })
    }

    #[inline]
    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }
}

impl Solid for Prism {
    fn decompose_to_segments(&self, view: &Vector3<f64>) -> Vec<Segment3> {
        self.surfaces
            .iter()
            .flat_map(|surface| surface.visible_segments(view))
            .collect()
    }

    fn decompose_to_simple_surfaces(&self) -> Vec<SimpleSurface> {
        self.surfaces
            .iter()
            .flat_map(Surface::decompose_to_simple_surfaces)
            .collect()
    }
}

impl Transformable for Prism {
    fn transformed(&self, iso: &Isometry3<f64>) -> Self {
        Self {
            surfaces: self.surfaces.transformed(iso),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    fn unit_square() -> FlatPlane {
        FlatPlane::new(vec![
            vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)],
            vec![Point3::new(1.0, 0.0, 0.0), Point3::new(1.0, 1.0, 0.0)],
            vec![Point3::new(1.0, 1.0, 0.0), Point3::new(0.0, 1.0, 0.0)],
            vec![Point3::new(0.0, 1.0, 0.0), Point3::new(0.0, 0.0, 0.0)],
        ])
        .unwrap()
    }

    #[test]
    fn test_cube_layout() {
        let cube = Prism::new(unit_square(), Vector3::zeros(), Vector3::new(0.0, 0.0, 1.0)).unwrap();
        assert_eq!(cube.surfaces().len(), 6);
        assert_eq!(cube.decompose_to_simple_surfaces().len(), 6);
        // 4 sides x 2 beams + 2 caps x 4 edges
        assert_eq!(cube.decompose_to_segments(&Vector3::z()).len(), 16);

        let Surface::Flat(bottom) = &cube.surfaces()[4] else {
            panic!("bottom cap should be flat");
        };
        let Surface::Flat(top) = &cube.surfaces()[5] else {
            panic!("top cap should be flat");
        };
        assert_relative_eq!(bottom.normal(), Vector3::z(), epsilon = 1e-12);
        assert_relative_eq!(top.normal(), -Vector3::z(), epsilon = 1e-12);
        assert_relative_eq!(top.face().origin().z, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_outline_rewound_against_axis() {
        let down = Prism::new(unit_square(), Vector3::zeros(), Vector3::new(0.0, 0.0, -2.0)).unwrap();
        let Surface::Flat(bottom) = &down.surfaces()[4] else {
            panic!("bottom cap should be flat");
        };
        assert_relative_eq!(bottom.normal(), -Vector3::z(), epsilon = 1e-12);
    }

    #[test]
    fn test_zero_axis_fails() {
        let v = Vector3::new(1.0, 2.0, 3.0);
        assert!(Prism::new(unit_square(), v, v).is_err());
    }
}
