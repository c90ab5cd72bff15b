// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Wireframe Occlusion
//!
//! Hidden-line removal for scenes of planar solids. Every candidate edge is
//! cut wherever another edge crosses it in projection, then each piece is
//! kept only if no face lies ahead of its midpoint along the view
//! direction.
//!
//! ## Quick Start
//!
//! ```rust
//! use wireframe_geometry::{FlatPlane, Point3, Prism, Vector3};
//! use wireframe_occlusion::{occlude, OcclusionConfig};
//!
//! let square = FlatPlane::new(vec![
//!     vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)],
//!     vec![Point3::new(1.0, 0.0, 0.0), Point3::new(1.0, 1.0, 0.0)],
//!     vec![Point3::new(1.0, 1.0, 0.0), Point3::new(0.0, 1.0, 0.0)],
//!     vec![Point3::new(0.0, 1.0, 0.0), Point3::new(0.0, 0.0, 0.0)],
//! ])?;
//! let cube = Prism::new(square, Vector3::zeros(), Vector3::new(0.0, 0.0, 1.0))?;
//!
//! let visible = occlude(&[cube], &OcclusionConfig::default())?;
//! assert!(!visible.is_empty());
//! # Ok::<(), wireframe_occlusion::Error>(())
//! ```
//!
//! ## Logging
//!
//! Passes emit `tracing` events; install a subscriber to see them.

pub mod breaking;
pub mod cancel;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod predicate;

pub use breaking::{break_projected, break_segments, BrokenSegment};
pub use cancel::CancelToken;
pub use config::{BreakPolicy, OcclusionConfig, ReferencePlane};
pub use error::{Error, Result};
pub use pipeline::{
    occlude, occlude_against_face, occlude_detailed, occlude_with_cancel, OcclusionOutput,
    OcclusionStats,
};
pub use predicate::is_point_occluded;
