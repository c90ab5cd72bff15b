// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Segment breaking
//!
//! Every segment is cut wherever another segment's supporting line crosses
//! it in the projection plane, so that afterwards each piece is either
//! wholly hidden or wholly visible and a midpoint test decides it.

use crate::cancel::CancelToken;
use crate::config::{BreakPolicy, OcclusionConfig};
use crate::error::{Error, Result};
use rayon::prelude::*;
use smallvec::SmallVec;
use wireframe_geometry::intersection::line_line_2d;
use wireframe_geometry::tolerance::is_zero;
use wireframe_geometry::{Projection, Segment2, Segment3};

/// One piece of a broken segment
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BrokenSegment {
    pub segment: Segment3,
    /// Index of the input segment this piece came from
    pub parent: usize,
    /// Span of the piece along its parent, within `[0, 1]`
    pub t_start: f64,
    pub t_end: f64,
}

type Cuts = SmallVec<[f64; 8]>;

/// Break `segments` using the projection, policy and tolerance of `config`
pub fn break_segments(segments: &[Segment3], config: &OcclusionConfig) -> Result<Vec<BrokenSegment>> {
    let projection = config.projection()?;
    break_projected(
        segments,
        &projection,
        config.break_policy,
        config.tolerance,
        config.parallel,
        None,
    )
}

/// Break `segments` against each other in `projection`
///
/// Targets whose projection is shorter than `eps` produce no pieces. The
/// output lists each remaining target's pieces in order along the target,
/// targets in input order, in both sequential and parallel mode.
///
/// `cancel` is checked before each target; once it fires the call returns
/// [`Error::Cancelled`] with the number of targets already split.
pub fn break_projected(
    segments: &[Segment3],
    projection: &Projection,
    policy: BreakPolicy,
    eps: f64,
    parallel: bool,
    cancel: Option<&CancelToken>,
) -> Result<Vec<BrokenSegment>> {
    let flat: Vec<Segment2> = segments.iter().map(|s| s.project(projection)).collect();
    let cancelled = || cancel.is_some_and(CancelToken::is_cancelled);
    let split = |i: usize| (!cancelled()).then(|| split_target(i, segments, &flat, policy, eps));

    let targets: Vec<Option<Vec<BrokenSegment>>> = if parallel {
        (0..segments.len()).into_par_iter().map(split).collect()
    } else {
        (0..segments.len()).map(split).collect()
    };

    let processed = targets.iter().filter(|t| t.is_some()).count();
    if processed < segments.len() {
        tracing::warn!(processed, total = segments.len(), "Segment breaking cancelled");
        return Err(Error::Cancelled {
            processed,
            total: segments.len(),
        });
    }

    Ok(targets.into_iter().flatten().flatten().collect())
}

fn split_target(
    index: usize,
    segments: &[Segment3],
    flat: &[Segment2],
    policy: BreakPolicy,
    eps: f64,
) -> Vec<BrokenSegment> {
    let target = &flat[index];
    let length = target.length();
    if is_zero(length, eps) {
        return Vec::new();
    }
    let direction = target.vector() / length;

    let mut cuts = Cuts::new();
    for (j, breaker) in flat.iter().enumerate() {
        if j == index {
            continue;
        }
        let breaker_length = breaker.length();
        if is_zero(breaker_length, eps) {
            continue;
        }
        let breaker_direction = breaker.vector() / breaker_length;
        let Some(hit) = line_line_2d(&target.start, &direction, &breaker.start, &breaker_direction, eps)
        else {
            continue;
        };
        if !target.contains(&hit, eps) {
            continue;
        }
        if policy == BreakPolicy::BothExtents && !breaker.contains(&hit, eps) {
            continue;
        }
        let t = ((hit - target.start).norm() / length).min(1.0);
        // Cuts at the ends would only produce empty pieces
        if t * length > eps && (1.0 - t) * length > eps {
            cuts.push(t);
        }
    }

    cuts.sort_by(|a, b| a.total_cmp(b));
    cuts.dedup_by(|next, kept| (*next - *kept) * length <= eps);

    emit_pieces(index, &segments[index], &cuts)
}

/// Pieces between consecutive cuts; the outer ends are the exact endpoints
fn emit_pieces(parent: usize, segment: &Segment3, cuts: &[f64]) -> Vec<BrokenSegment> {
    let mut pieces = Vec::with_capacity(cuts.len() + 1);
    let mut t_start = 0.0;
    let mut start = segment.start;
    for &t in cuts {
        let end = segment.point_at(t);
        pieces.push(BrokenSegment {
            segment: Segment3::new(start, end),
            parent,
            t_start,
            t_end: t,
        });
        t_start = t;
        start = end;
    }
    pieces.push(BrokenSegment {
        segment: Segment3::new(start, segment.end),
        parent,
        t_start,
        t_end: 1.0,
    });
    pieces
}
