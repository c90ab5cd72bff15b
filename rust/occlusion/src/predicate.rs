// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Point occlusion test against a single face

use wireframe_geometry::intersection::ray_plane;
use wireframe_geometry::tolerance::MIN_NORM;
use wireframe_geometry::{Point3, SimpleSurface, Vector3};

/// Whether `face` hides `point` when looking back along `direction`
///
/// The ray from `point` along `direction` must meet the face's plane
/// strictly ahead (by more than `eps`) and land inside the face, border
/// included and holes excluded. A zero direction hides nothing.
pub fn is_point_occluded(
    point: &Point3<f64>,
    face: &SimpleSurface,
    direction: &Vector3<f64>,
    eps: f64,
) -> bool {
    let Some(direction) = direction.try_normalize(MIN_NORM) else {
        return false;
    };
    let Some(hit) = ray_plane(point, &direction, &face.origin(), &face.normal(), eps) else {
        return false;
    };
    if (hit - point).dot(&direction) < eps {
        return false;
    }
    face.contains_point(&hit, true, eps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wireframe_geometry::DEFAULT_EPS;

    fn ground() -> SimpleSurface {
        SimpleSurface::new(&[
            Point3::new(-5.0, -5.0, 0.0),
            Point3::new(5.0, -5.0, 0.0),
            Point3::new(5.0, 5.0, 0.0),
            Point3::new(-5.0, 5.0, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_face_ahead_occludes() {
        let face = ground();
        assert!(is_point_occluded(&Point3::new(0.0, 0.0, -10.0), &face, &Vector3::z(), DEFAULT_EPS));
        assert!(!is_point_occluded(&Point3::new(0.0, 0.0, 10.0), &face, &Vector3::z(), DEFAULT_EPS));
    }

    #[test]
    fn test_direction_length_is_irrelevant() {
        let face = ground();
        let p = Point3::new(1.0, 1.0, -3.0);
        assert!(is_point_occluded(&p, &face, &Vector3::new(0.0, 0.0, 42.0), DEFAULT_EPS));
        assert!(!is_point_occluded(&p, &face, &Vector3::zeros(), DEFAULT_EPS));
    }

    #[test]
    fn test_points_on_or_beside_the_face() {
        let face = ground();
        // Coincident with the plane: not strictly ahead
        assert!(!is_point_occluded(&Point3::new(0.0, 0.0, 0.0), &face, &Vector3::z(), DEFAULT_EPS));
        // Ray misses the face
        assert!(!is_point_occluded(&Point3::new(8.0, 0.0, -1.0), &face, &Vector3::z(), DEFAULT_EPS));
        // Ray parallel to the plane
        assert!(!is_point_occluded(&Point3::new(0.0, 0.0, -1.0), &face, &Vector3::x(), DEFAULT_EPS));
        // Landing on the border still hides
        assert!(is_point_occluded(&Point3::new(5.0, 0.0, -1.0), &face, &Vector3::z(), DEFAULT_EPS));
    }

    #[test]
    fn test_hole_lets_the_ray_through() {
        let hole = vec![
            Point3::new(-1.0, -1.0, 0.0),
            Point3::new(1.0, -1.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(-1.0, 1.0, 0.0),
        ];
        let face = SimpleSurface::with_holes(&ground().outer_points(), &[hole]).unwrap();
        assert!(!is_point_occluded(&Point3::new(0.0, 0.0, -10.0), &face, &Vector3::z(), DEFAULT_EPS));
        assert!(is_point_occluded(&Point3::new(3.0, 0.0, -10.0), &face, &Vector3::z(), DEFAULT_EPS));
        // The hole's rim belongs to the hole
        assert!(!is_point_occluded(&Point3::new(1.0, 0.0, -10.0), &face, &Vector3::z(), DEFAULT_EPS));
    }

    #[test]
    fn test_oblique_view() {
        let face = ground();
        let view = Vector3::new(1.0, 0.0, 1.0);
        assert!(is_point_occluded(&Point3::new(-2.0, 0.0, -2.0), &face, &view, DEFAULT_EPS));
        assert!(!is_point_occluded(&Point3::new(-8.0, 0.0, -2.0), &face, &view, DEFAULT_EPS));
    }
}
