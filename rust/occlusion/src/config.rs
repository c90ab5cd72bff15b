// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Occlusion pass configuration, optionally loaded from environment variables.

use crate::error::{Error, Result};
use std::str::FromStr;
use wireframe_geometry::tolerance::MIN_NORM;
use wireframe_geometry::{AxisPlane, LocalFrame, Point3, Projection, Vector3, DEFAULT_EPS};

/// Environment variable overriding [`OcclusionConfig::tolerance`]
pub const ENV_TOLERANCE: &str = "WIREFRAME_TOLERANCE";
/// Environment variable overriding [`OcclusionConfig::parallel`]
pub const ENV_PARALLEL: &str = "WIREFRAME_PARALLEL";
/// Environment variable overriding [`OcclusionConfig::break_policy`]
pub const ENV_BREAK_POLICY: &str = "WIREFRAME_BREAK_POLICY";

/// Which finite extents a crossing must lie on to cut a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BreakPolicy {
    /// Only the target's extent; a breaker's supporting line cuts even past
    /// the breaker's own endpoints
    #[default]
    TargetExtent,
    /// Both the target's and the breaker's extents
    BothExtents,
}

impl FromStr for BreakPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "target" | "target-extent" | "target_extent" => Ok(Self::TargetExtent),
            "both" | "both-extents" | "both_extents" => Ok(Self::BothExtents),
            other => Err(Error::invalid_config(format!(
                "unknown break policy '{}', expected 'target' or 'both'",
                other
            ))),
        }
    }
}

/// Plane segments are flattened onto before they are broken
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReferencePlane {
    /// A fixed coordinate plane
    Axis(AxisPlane),
    /// The plane perpendicular to the view direction
    ViewAligned,
}

impl Default for ReferencePlane {
    fn default() -> Self {
        Self::Axis(AxisPlane::Xy)
    }
}

impl ReferencePlane {
    pub fn resolve(&self, view_direction: &Vector3<f64>) -> Result<Projection> {
        match self {
            Self::Axis(plane) => Ok((*plane).into()),
            Self::ViewAligned => {
                Ok(LocalFrame::perpendicular_to(Point3::origin(), view_direction)?.into())
            }
        }
    }
}

/// Occlusion pass configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OcclusionConfig {
    /// Direction toward the viewer; a face hides a point when it lies ahead
    /// of the point along this vector
    pub view_direction: Vector3<f64>,
    /// Projection used to find crossings between segments
    pub reference_plane: ReferencePlane,
    pub break_policy: BreakPolicy,
    /// Absolute tolerance for every comparison in the pass
    pub tolerance: f64,
    /// Spread breaking and occlusion tests over the rayon pool
    pub parallel: bool,
}

impl Default for OcclusionConfig {
    fn default() -> Self {
        Self {
            view_direction: Vector3::z(),
            reference_plane: ReferencePlane::default(),
            break_policy: BreakPolicy::default(),
            tolerance: DEFAULT_EPS,
            parallel: true,
        }
    }
}

impl OcclusionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_view_direction(mut self, view_direction: Vector3<f64>) -> Self {
        self.view_direction = view_direction;
        self
    }

    pub fn with_reference_plane(mut self, reference_plane: ReferencePlane) -> Self {
        self.reference_plane = reference_plane;
        self
    }

    pub fn with_break_policy(mut self, break_policy: BreakPolicy) -> Self {
        self.break_policy = break_policy;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Defaults overridden by `WIREFRAME_*` environment variables.
    ///
    /// Values that fail to parse are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable name
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_TOLERANCE) {
            match raw.trim().parse::<f64>() {
                Ok(tolerance) => config.tolerance = tolerance,
                Err(_) => tracing::warn!(key = ENV_TOLERANCE, value = %raw, "Ignoring unparsable tolerance"),
            }
        }

        if let Some(raw) = lookup(ENV_PARALLEL) {
            match parse_flag(&raw) {
                Some(parallel) => config.parallel = parallel,
                None => tracing::warn!(key = ENV_PARALLEL, value = %raw, "Ignoring unparsable flag"),
            }
        }

        if let Some(raw) = lookup(ENV_BREAK_POLICY) {
            match raw.parse::<BreakPolicy>() {
                Ok(policy) => config.break_policy = policy,
                Err(e) => tracing::warn!(key = ENV_BREAK_POLICY, error = %e, "Ignoring break policy"),
            }
        }

        config
    }

    /// Reject settings no pass can run with
    pub fn validate(&self) -> Result<()> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(Error::invalid_config(format!(
                "tolerance must be positive and finite, got {}",
                self.tolerance
            )));
        }
        if !self.view_direction.iter().all(|c| c.is_finite())
            || self.view_direction.norm() < MIN_NORM
        {
            return Err(Error::invalid_config(format!(
                "view direction must be a finite non-zero vector, got {:?}",
                self.view_direction
            )));
        }
        Ok(())
    }

    /// The projection segments are broken in
    pub fn projection(&self) -> Result<Projection> {
        self.reference_plane.resolve(&self.view_direction)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
