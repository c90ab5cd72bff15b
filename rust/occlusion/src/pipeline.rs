// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The occlusion pass: break every candidate edge, then keep the pieces no
//! face hides

use crate::breaking::{break_projected, BrokenSegment};
use crate::cancel::CancelToken;
use crate::config::OcclusionConfig;
use crate::error::{Error, Result};
use crate::predicate::is_point_occluded;
use rayon::prelude::*;
use std::time::{Duration, Instant};
use wireframe_geometry::tolerance::normalize3;
use wireframe_geometry::{Segment3, SimpleSurface, Solid, Vector3};

/// Counters gathered during one pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OcclusionStats {
    pub solids: usize,
    /// Candidate segments before breaking
    pub segments: usize,
    pub faces: usize,
    /// Pieces after breaking
    pub broken: usize,
    pub visible: usize,
    pub elapsed: Duration,
}

/// Visible segments of a pass together with its statistics
#[derive(Debug, Clone, PartialEq)]
pub struct OcclusionOutput {
    pub visible: Vec<Segment3>,
    pub stats: OcclusionStats,
}

/// Visible pieces of every solid's edges, in input order
pub fn occlude<S: Solid + Sync>(solids: &[S], config: &OcclusionConfig) -> Result<Vec<Segment3>> {
    Ok(occlude_detailed(solids, config, None)?.visible)
}

/// Like [`occlude`], stopping with [`Error::Cancelled`] once `cancel` fires
///
/// The token is checked before each target while breaking and before each
/// piece while testing occlusion.
pub fn occlude_with_cancel<S: Solid + Sync>(
    solids: &[S],
    config: &OcclusionConfig,
    cancel: &CancelToken,
) -> Result<Vec<Segment3>> {
    Ok(occlude_detailed(solids, config, Some(cancel))?.visible)
}

/// Full pass returning statistics alongside the visible segments
pub fn occlude_detailed<S: Solid + Sync>(
    solids: &[S],
    config: &OcclusionConfig,
    cancel: Option<&CancelToken>,
) -> Result<OcclusionOutput> {
    config.validate()?;
    let started = Instant::now();
    let view = normalize3(&config.view_direction, "view direction")?;

    let segments: Vec<Segment3> = solids
        .iter()
        .flat_map(|solid| solid.decompose_to_segments(&view))
        .collect();
    let faces: Vec<SimpleSurface> = solids
        .iter()
        .flat_map(|solid| solid.decompose_to_simple_surfaces())
        .collect();

    tracing::info!(
        solids = solids.len(),
        segments = segments.len(),
        faces = faces.len(),
        parallel = config.parallel,
        "Starting occlusion pass"
    );

    let (visible, broken) = run_pass(&segments, &faces, &view, config, cancel)?;

    let stats = OcclusionStats {
        solids: solids.len(),
        segments: segments.len(),
        faces: faces.len(),
        broken,
        visible: visible.len(),
        elapsed: started.elapsed(),
    };
    tracing::info!(
        broken = stats.broken,
        visible = stats.visible,
        elapsed_ms = stats.elapsed.as_millis(),
        "Occlusion pass complete"
    );

    Ok(OcclusionOutput { visible, stats })
}

/// Trim `segment` against a single face
///
/// Runs the pass over the face's outer boundary plus `segment`, so the
/// result holds the visible pieces of both.
pub fn occlude_against_face(
    face: &SimpleSurface,
    segment: &Segment3,
    config: &OcclusionConfig,
) -> Result<Vec<Segment3>> {
    config.validate()?;
    let view = normalize3(&config.view_direction, "view direction")?;
    let mut segments = face.outer().to_vec();
    segments.push(*segment);
    let (visible, _) = run_pass(&segments, std::slice::from_ref(face), &view, config, None)?;
    Ok(visible)
}

/// Break, then filter by midpoint occlusion. Returns the visible segments
/// and the number of pieces tested.
fn run_pass(
    segments: &[Segment3],
    faces: &[SimpleSurface],
    view: &Vector3<f64>,
    config: &OcclusionConfig,
    cancel: Option<&CancelToken>,
) -> Result<(Vec<Segment3>, usize)> {
    let projection = config.projection()?;
    let eps = config.tolerance;

    let broken = break_projected(
        segments,
        &projection,
        config.break_policy,
        eps,
        config.parallel,
        cancel,
    )?;
    tracing::debug!(
        input = segments.len(),
        pieces = broken.len(),
        policy = ?config.break_policy,
        "Segments broken"
    );

    let is_visible = |piece: &BrokenSegment| {
        let mid = piece.segment.midpoint();
        !faces.iter().any(|face| is_point_occluded(&mid, face, view, eps))
    };
    let cancelled = || cancel.is_some_and(CancelToken::is_cancelled);

    let verdicts: Vec<Option<bool>> = if config.parallel {
        broken
            .par_iter()
            .map(|piece| (!cancelled()).then(|| is_visible(piece)))
            .collect()
    } else {
        let mut verdicts = Vec::with_capacity(broken.len());
        for piece in &broken {
            if cancelled() {
                break;
            }
            verdicts.push(Some(is_visible(piece)));
        }
        verdicts
    };

    let processed = verdicts.iter().filter(|v| v.is_some()).count();
    if processed < broken.len() {
        tracing::warn!(processed, total = broken.len(), "Occlusion pass cancelled");
        return Err(Error::Cancelled {
            processed,
            total: broken.len(),
        });
    }

    let visible = broken
        .iter()
        .zip(&verdicts)
        .filter(|(_, verdict)| **verdict == Some(true))
        .map(|(piece, _)| piece.segment)
        .collect();
    Ok((visible, broken.len()))
}
