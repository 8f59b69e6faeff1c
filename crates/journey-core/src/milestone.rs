//! # Milestone Mapper
//!
//! Places an ordered list of milestones evenly along a curve by arc length.
//!
//! ## Key Types
//! - `Milestone`: An index plus an opaque payload (year, title, ...).
//! - `ResolvedMilestone`: A milestone with its fraction and point on the curve.
//! - `MilestoneCache`: Memoises resolved points per `(CurveId, count)`.

use crate::curve::{Curve, CurveId};
use kurbo::Point;

#[derive(Clone, Debug, PartialEq)]
pub struct Milestone<P> {
    pub index: usize,
    pub payload: P,
}

impl<P> Milestone<P> {
    pub fn new(index: usize, payload: P) -> Self {
        Self { index, payload }
    }

    /// Indexes `payloads` in order.
    pub fn sequence(payloads: impl IntoIterator<Item = P>) -> Vec<Self> {
        payloads
            .into_iter()
            .enumerate()
            .map(|(index, payload)| Self { index, payload })
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedMilestone<P> {
    pub milestone: Milestone<P>,
    pub point: Point,
    pub normalized_fraction: f64,
}

/// Fraction of the curve at which milestone `index` of `count` sits.
pub fn milestone_fraction(index: usize, count: usize) -> f64 {
    if count > 1 {
        index as f64 / (count - 1) as f64
    } else {
        0.0
    }
}

/// Resolves every milestone to its point on `curve`.
///
/// Spacing follows the position in `milestones`, not `Milestone::index`.
/// An empty slice yields an empty vector.
pub fn resolve<P: Clone>(curve: &Curve, milestones: &[Milestone<P>]) -> Vec<ResolvedMilestone<P>> {
    let count = milestones.len();
    milestones
        .iter()
        .enumerate()
        .map(|(i, milestone)| {
            let fraction = milestone_fraction(i, count);
            ResolvedMilestone {
                milestone: milestone.clone(),
                point: curve.point_at(fraction).point,
                normalized_fraction: fraction,
            }
        })
        .collect()
}

/// Points and fractions for `count` evenly spaced milestones.
pub fn resolve_points(curve: &Curve, count: usize) -> Vec<(f64, Point)> {
    (0..count)
        .map(|i| {
            let fraction = milestone_fraction(i, count);
            (fraction, curve.point_at(fraction).point)
        })
        .collect()
}

/// Remembers the last resolution and recomputes only when the curve or the
/// milestone count changes.
#[derive(Clone, Debug, Default)]
pub struct MilestoneCache {
    key: Option<(CurveId, usize)>,
    points: Vec<(f64, Point)>,
    recomputations: usize,
}

impl MilestoneCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve<P: Clone>(&mut self, curve: &Curve, milestones: &[Milestone<P>]) -> Vec<ResolvedMilestone<P>> {
        let points = self.points(curve, milestones.len());
        milestones
            .iter()
            .zip(points)
            .map(|(milestone, &(fraction, point))| ResolvedMilestone {
                milestone: milestone.clone(),
                point,
                normalized_fraction: fraction,
            })
            .collect()
    }

    pub fn points(&mut self, curve: &Curve, count: usize) -> &[(f64, Point)] {
        let key = (curve.id(), count);
        if self.key != Some(key) {
            tracing::debug!("Resolving {} milestones on curve {:?}", count, curve.id());
            self.points = resolve_points(curve, count);
            self.key = Some(key);
            self.recomputations += 1;
        }
        &self.points
    }

    /// How many times the cache has had to resolve from scratch.
    pub fn recomputations(&self) -> usize {
        self.recomputations
    }

    pub fn invalidate(&mut self) {
        self.key = None;
    }
}
