// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Wireframe Geometry
//!
//! Planar geometry for hidden-line removal: tolerant comparison, segments,
//! rings, faces with holes, intersection primitives, and the edge/surface/
//! prism model that solids are built from.
//!
//! All floating comparisons go through [`tolerance`] with a fixed absolute
//! epsilon ([`DEFAULT_EPS`] unless a caller passes its own).
//!
//! ## Quick Start
//!
//! ```rust
//! use wireframe_geometry::{FlatPlane, Point3, Prism, Solid, Vector3};
//!
//! let square = FlatPlane::new(vec![
//!     vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)],
//!     vec![Point3::new(1.0, 0.0, 0.0), Point3::new(1.0, 1.0, 0.0)],
//!     vec![Point3::new(1.0, 1.0, 0.0), Point3::new(0.0, 1.0, 0.0)],
//!     vec![Point3::new(0.0, 1.0, 0.0), Point3::new(0.0, 0.0, 0.0)],
//! ])?;
//! let cube = Prism::new(square, Vector3::zeros(), Vector3::new(0.0, 0.0, 1.0))?;
//! assert_eq!(cube.decompose_to_simple_surfaces().len(), 6);
//! # Ok::<(), wireframe_geometry::Error>(())
//! ```

pub mod arc;
pub mod edge;
pub mod error;
pub mod intersection;
pub mod plane;
pub mod prism;
pub mod ring;
pub mod segment;
pub mod simple_surface;
pub mod solid;
pub mod surface;
pub mod tolerance;
pub mod transform;

// Re-export nalgebra types for convenience
pub use nalgebra::{Isometry3, Point2, Point3, UnitQuaternion, Vector2, Vector3};

pub use arc::{circumcenter, sample_arc};
pub use edge::Edge;
pub use error::{Error, Result};
pub use intersection::{
    face_intersection, line_line_2d, line_line_3d, plane_plane, ray_plane, sort_along_line, Line3,
};
pub use plane::{AxisPlane, LocalFrame, Projection};
pub use prism::Prism;
pub use ring::{classify, Containment, Ring2};
pub use segment::{Segment2, Segment3};
pub use simple_surface::SimpleSurface;
pub use solid::Solid;
pub use surface::{FlatPlane, RuledSurface, Surface};
pub use tolerance::{compare, near, DEFAULT_EPS};
pub use transform::{EulerAngles, EulerOrder, Transformable};
