//! # Curve Sampler
//!
//! Arc-length parameterised sampling of a planar cubic Bézier.
//!
//! ## Responsibilities
//! - **Construction**: control points, `kurbo::CubicBez`, or single-segment SVG path data.
//! - **Arc-Length Table**: cumulative length at evenly spaced parameter values, built once.
//! - **Sampling**: point and tangent angle at a normalised arc-length fraction.
//!
//! ## Key Types
//! - `Curve`: Immutable curve plus its shared `ArcLengthTable`.
//! - `CurveSample`: Point, tangent angle, Bézier parameter and arc length at a fraction.
//! - `CurveId`: Identity shared by clones, used as a memoisation key.

use crate::error::CurveError;
use kurbo::{BezPath, CubicBez, ParamCurve, ParamCurveArclen, ParamCurveDeriv, PathSeg, Point, Rect, Vec2};
use std::f64::consts::PI;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Default number of parameter intervals in the arc-length table.
pub const DEFAULT_ARC_LENGTH_SAMPLES: usize = 256;

const MIN_SAMPLES: usize = 16;
const MAX_SAMPLES: usize = 4096;
/// Absolute accuracy handed to kurbo when measuring one table interval.
const INTERVAL_ACCURACY: f64 = 1e-7;

static NEXT_CURVE_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CurveId(u64);

impl CurveId {
    fn next() -> Self {
        CurveId(NEXT_CURVE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Result of sampling a curve at a fraction of its length.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CurveSample {
    pub point: Point,
    /// Direction of travel in radians, in `(-π, π]`.
    pub tangent_angle: f64,
    /// Bézier parameter the fraction resolved to.
    pub t: f64,
    /// Arc length from the start of the curve to `point`.
    pub arc_length: f64,
}

/// Monotonic lookup from Bézier parameter to cumulative arc length.
///
/// Entry `i` holds the length of the curve between `t = 0` and `t = i / n`.
#[derive(Clone, Debug)]
pub struct ArcLengthTable {
    lengths: Vec<f64>,
}

impl ArcLengthTable {
    pub fn build(cubic: &CubicBez, samples: usize) -> Self {
        let n = samples.clamp(MIN_SAMPLES, MAX_SAMPLES);
        let mut lengths = Vec::with_capacity(n + 1);
        lengths.push(0.0);

        let mut total = 0.0;
        for i in 0..n {
            let t0 = i as f64 / n as f64;
            let t1 = (i + 1) as f64 / n as f64;
            let piece = cubic.subsegment(t0..t1);
            // A piece whose control polygon has no length is a single point.
            if control_polygon_length(&piece) > 0.0 {
                total += piece.arclen(INTERVAL_ACCURACY);
            }
            lengths.push(total);
        }

        Self { lengths }
    }

    /// Number of parameter intervals.
    pub fn intervals(&self) -> usize {
        self.lengths.len() - 1
    }

    pub fn total_length(&self) -> f64 {
        self.lengths.last().copied().unwrap_or(0.0)
    }

    /// Cumulative length at table entry `i`.
    pub fn length_at_entry(&self, i: usize) -> Option<f64> {
        self.lengths.get(i).copied()
    }

    /// Inverts the table: Bézier parameter at arc length `s`.
    pub fn param_at_length(&self, s: f64) -> f64 {
        let total = self.total_length();
        if total <= 0.0 {
            return 0.0;
        }
        let s = if s.is_nan() { 0.0 } else { s.clamp(0.0, total) };

        let hi = self.lengths.partition_point(|&len| len < s);
        if hi == 0 {
            return 0.0;
        }
        let lo = hi - 1;
        let span = self.lengths[hi] - self.lengths[lo];
        let local = if span > 0.0 {
            (s - self.lengths[lo]) / span
        } else {
            0.0
        };

        (lo as f64 + local) / self.intervals() as f64
    }
}

/// An immutable cubic Bézier with cached arc-length data.
///
/// Cloning is cheap: the arc-length table is shared.
#[derive(Clone)]
pub struct Curve {
    id: CurveId,
    cubic: CubicBez,
    table: Arc<ArcLengthTable>,
}

impl Curve {
    pub fn new(
        p0: impl Into<Point>,
        p1: impl Into<Point>,
        p2: impl Into<Point>,
        p3: impl Into<Point>,
    ) -> Result<Self, CurveError> {
        Self::from_cubic(CubicBez::new(p0.into(), p1.into(), p2.into(), p3.into()))
    }

    pub fn from_cubic(cubic: CubicBez) -> Result<Self, CurveError> {
        Self::with_samples(cubic, DEFAULT_ARC_LENGTH_SAMPLES)
    }

    /// Builds a curve whose arc-length table has `samples` intervals
    /// (clamped to 16..=4096).
    pub fn with_samples(cubic: CubicBez, samples: usize) -> Result<Self, CurveError> {
        let finite = [cubic.p0, cubic.p1, cubic.p2, cubic.p3]
            .iter()
            .all(|p| p.x.is_finite() && p.y.is_finite());
        if !finite {
            return Err(CurveError::NonFiniteControlPoint);
        }

        let table = ArcLengthTable::build(&cubic, samples);
        let curve = Self {
            id: CurveId::next(),
            cubic,
            table: Arc::new(table),
        };

        if curve.is_degenerate() {
            tracing::warn!(
                "Curve {:?} has zero length; every sample resolves to ({}, {})",
                curve.id,
                cubic.p0.x,
                cubic.p0.y
            );
        } else {
            tracing::debug!(
                "Built curve {:?}: length {:.3} over {} intervals",
                curve.id,
                curve.total_length(),
                curve.table.intervals()
            );
        }

        Ok(curve)
    }

    /// Parses SVG path data holding a single segment, e.g.
    /// `"M 50 128 C 250 50, 550 200, 750 128"`.
    ///
    /// Line and quadratic segments are raised to the equivalent cubic.
    pub fn from_svg(data: &str) -> Result<Self, CurveError> {
        Self::from_svg_with_samples(data, DEFAULT_ARC_LENGTH_SAMPLES)
    }

    pub fn from_svg_with_samples(data: &str, samples: usize) -> Result<Self, CurveError> {
        let path = BezPath::from_svg(data)
            .map_err(|err| CurveError::InvalidPathData(format!("{err:?} in {data:?}")))?;

        let segments: Vec<PathSeg> = path.segments().collect();
        if segments.len() != 1 {
            return Err(CurveError::UnsupportedPath {
                segments: segments.len(),
            });
        }

        let cubic = match segments[0] {
            PathSeg::Cubic(c) => c,
            PathSeg::Quad(q) => CubicBez::new(
                q.p0,
                q.p0.lerp(q.p1, 2.0 / 3.0),
                q.p2.lerp(q.p1, 2.0 / 3.0),
                q.p2,
            ),
            PathSeg::Line(l) => CubicBez::new(
                l.p0,
                l.p0.lerp(l.p1, 1.0 / 3.0),
                l.p0.lerp(l.p1, 2.0 / 3.0),
                l.p1,
            ),
        };

        Self::with_samples(cubic, samples)
    }

    pub fn id(&self) -> CurveId {
        self.id
    }

    pub fn cubic(&self) -> &CubicBez {
        &self.cubic
    }

    pub fn control_points(&self) -> [Point; 4] {
        [self.cubic.p0, self.cubic.p1, self.cubic.p2, self.cubic.p3]
    }

    pub fn start(&self) -> Point {
        self.cubic.p0
    }

    pub fn end(&self) -> Point {
        self.cubic.p3
    }

    pub fn arc_length_table(&self) -> &ArcLengthTable {
        &self.table
    }

    pub fn total_length(&self) -> f64 {
        self.table.total_length()
    }

    pub fn is_degenerate(&self) -> bool {
        self.total_length() <= 0.0
    }

    /// Bounding box of the control polygon, which contains the curve.
    pub fn bounding_box(&self) -> Rect {
        Rect::from_points(self.cubic.p0, self.cubic.p3)
            .union_pt(self.cubic.p1)
            .union_pt(self.cubic.p2)
    }

    /// Diagonal of `bounding_box`, a scale for geometric tolerances.
    pub fn extent(&self) -> f64 {
        let bbox = self.bounding_box();
        bbox.width().hypot(bbox.height())
    }

    /// Samples the curve at `fraction` of its arc length.
    ///
    /// `fraction` is clamped to `[0, 1]`; NaN reads as 0.
    pub fn point_at(&self, fraction: f64) -> CurveSample {
        let fraction = clamp_fraction(fraction);
        self.point_at_length(fraction * self.total_length())
    }

    /// Samples the curve at an absolute arc length, clamped to the curve.
    pub fn point_at_length(&self, s: f64) -> CurveSample {
        let total = self.total_length();
        if total <= 0.0 {
            return CurveSample {
                point: self.cubic.p0,
                tangent_angle: 0.0,
                t: 0.0,
                arc_length: 0.0,
            };
        }

        let s = if s.is_nan() { 0.0 } else { s.clamp(0.0, total) };
        let t = self.table.param_at_length(s);

        CurveSample {
            point: self.cubic.eval(t),
            tangent_angle: self.tangent_angle_at_param(t),
            t,
            arc_length: s,
        }
    }

    /// The part of the curve between its start and `fraction`.
    pub fn traversed(&self, fraction: f64) -> CubicBez {
        let t = self.point_at(fraction).t;
        self.cubic.subsegment(0.0..t)
    }

    pub fn to_svg(&self) -> String {
        let [p0, p1, p2, p3] = self.control_points();
        format!(
            "M {} {} C {} {}, {} {}, {} {}",
            p0.x, p0.y, p1.x, p1.y, p2.x, p2.y, p3.x, p3.y
        )
    }

    fn tangent_angle_at_param(&self, t: f64) -> f64 {
        let tolerance = 1e-12 * self.extent().max(1.0);
        let mut dir = self.cubic.deriv().eval(t).to_vec2();

        if dir.hypot() <= tolerance {
            dir = self.fallback_direction(t);
        }
        if dir.hypot() <= tolerance {
            return 0.0;
        }
        normalize_angle(dir.y.atan2(dir.x))
    }

    // The derivative vanishes where control points coincide with an end
    // point or at a cusp.
    fn fallback_direction(&self, t: f64) -> Vec2 {
        let [p0, p1, p2, p3] = self.control_points();
        if t <= 0.0 {
            return [p1, p2, p3]
                .into_iter()
                .find(|p| *p != p0)
                .map(|p| p - p0)
                .unwrap_or(Vec2::ZERO);
        }
        if t >= 1.0 {
            return [p2, p1, p0]
                .into_iter()
                .find(|p| *p != p3)
                .map(|p| p3 - p)
                .unwrap_or(Vec2::ZERO);
        }
        let h = 1e-4;
        self.cubic.eval((t + h).min(1.0)) - self.cubic.eval((t - h).max(0.0))
    }
}

impl fmt::Debug for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Curve")
            .field("id", &self.id)
            .field("cubic", &self.cubic)
            .field("total_length", &self.total_length())
            .finish()
    }
}

impl PartialEq for Curve {
    fn eq(&self, other: &Self) -> bool {
        self.cubic == other.cubic
    }
}

fn control_polygon_length(cubic: &CubicBez) -> f64 {
    (cubic.p1 - cubic.p0).hypot() + (cubic.p2 - cubic.p1).hypot() + (cubic.p3 - cubic.p2).hypot()
}

pub(crate) fn clamp_fraction(fraction: f64) -> f64 {
    if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    }
}

/// Maps an angle into `(-π, π]`.
pub fn normalize_angle(angle: f64) -> f64 {
    if !angle.is_finite() {
        return 0.0;
    }
    let mut a = angle % (2.0 * PI);
    if a <= -PI {
        a += 2.0 * PI;
    } else if a > PI {
        a -= 2.0 * PI;
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;

    fn journey_curve() -> Curve {
        Curve::new((50.0, 128.0), (250.0, 50.0), (550.0, 200.0), (750.0, 128.0)).unwrap()
    }

    #[test]
    fn test_straight_line_length() {
        let curve = Curve::from_svg("M 0 0 L 100 0").unwrap();
        assert!((curve.total_length() - 100.0).abs() < 1e-6);

        let mid = curve.point_at(0.5);
        assert!((mid.point.x - 50.0).abs() < 1e-6);
        assert!(mid.point.y.abs() < 1e-9);
        assert!(mid.tangent_angle.abs() < 1e-9);
    }

    #[test]
    fn test_length_matches_kurbo() {
        let curve = journey_curve();
        let reference = curve.cubic().arclen(1e-9);
        assert!((curve.total_length() - reference).abs() < 1e-4);
    }

    #[test]
    fn test_midpoint_is_geometric_not_parametric() {
        // Control points bunched at the start make the curve fast at the end.
        let curve = Curve::new((0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (300.0, 0.0)).unwrap();
        let mid = curve.point_at(0.5);

        assert!((mid.point.x - 150.0).abs() < 0.5, "x = {}", mid.point.x);
        assert!(mid.t > 0.5);
        assert!((curve.cubic().eval(0.5).x - 150.0).abs() > 50.0);
    }

    #[test]
    fn test_fraction_is_clamped() {
        let curve = journey_curve();
        assert_eq!(curve.point_at(-0.5), curve.point_at(0.0));
        assert_eq!(curve.point_at(4.0), curve.point_at(1.0));
        assert_eq!(curve.point_at(f64::NAN), curve.point_at(0.0));
    }

    #[test]
    fn test_endpoints_exact() {
        let curve = journey_curve();
        assert_eq!(curve.point_at(0.0).point, Point::new(50.0, 128.0));
        assert_eq!(curve.point_at(1.0).point, Point::new(750.0, 128.0));
        assert_eq!(curve.point_at(1.0).t, 1.0);
    }

    #[test]
    fn test_tangent_angle_range() {
        // Right-to-left line: atan2 gives ±π, we report +π.
        let curve = Curve::from_svg("M 100 0 L 0 0").unwrap();
        let sample = curve.point_at(0.3);
        assert!((sample.tangent_angle - PI).abs() < 1e-9);

        let curve = journey_curve();
        for i in 0..=20 {
            let angle = curve.point_at(i as f64 / 20.0).tangent_angle;
            assert!(angle > -PI && angle <= PI);
        }
    }

    #[test]
    fn test_tangent_with_coincident_start_controls() {
        let curve = Curve::new((0.0, 0.0), (0.0, 0.0), (0.0, 100.0), (0.0, 100.0)).unwrap();
        let start = curve.point_at(0.0);
        assert!((start.tangent_angle - PI / 2.0).abs() < 1e-9);
        let end = curve.point_at(1.0);
        assert!((end.tangent_angle - PI / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_curve() {
        let curve = Curve::new((10.0, 10.0), (10.0, 10.0), (10.0, 10.0), (10.0, 10.0)).unwrap();
        assert!(curve.is_degenerate());
        for f in [0.0, 0.25, 0.5, 1.0, -1.0, 2.0] {
            let sample = curve.point_at(f);
            assert_eq!(sample.point, Point::new(10.0, 10.0));
            assert_eq!(sample.tangent_angle, 0.0);
            assert_eq!(sample.arc_length, 0.0);
        }
    }

    #[test]
    fn test_svg_quad_is_raised() {
        let quad = Curve::from_svg("M 0 0 Q 50 100 100 0").unwrap();
        let reference = kurbo::QuadBez::new((0.0, 0.0), (50.0, 100.0), (100.0, 0.0)).arclen(1e-9);
        assert!((quad.total_length() - reference).abs() < 1e-4);
    }

    #[test]
    fn test_svg_rejects_multi_segment_paths() {
        let err = Curve::from_svg("M 0 0 L 10 0 L 10 10").unwrap_err();
        assert_eq!(err, CurveError::UnsupportedPath { segments: 2 });

        let err = Curve::from_svg("M 0 0").unwrap_err();
        assert_eq!(err, CurveError::UnsupportedPath { segments: 0 });
    }

    #[test]
    fn test_svg_rejects_garbage() {
        assert!(matches!(
            Curve::from_svg("M 0 0 X 1 2"),
            Err(CurveError::InvalidPathData(_))
        ));
    }

    #[test]
    fn test_non_finite_control_point() {
        let err = Curve::new((0.0, 0.0), (f64::NAN, 0.0), (1.0, 1.0), (2.0, 2.0)).unwrap_err();
        assert_eq!(err, CurveError::NonFiniteControlPoint);
    }

    #[test]
    fn test_clones_share_identity_and_table() {
        let curve = journey_curve();
        let clone = curve.clone();
        assert_eq!(curve.id(), clone.id());
        assert!(Arc::ptr_eq(&curve.table, &clone.table));

        let rebuilt = journey_curve();
        assert_ne!(curve.id(), rebuilt.id());
        assert_eq!(curve, rebuilt);
    }

    #[test]
    fn test_sample_count_is_clamped() {
        let cubic = *journey_curve().cubic();
        assert_eq!(Curve::with_samples(cubic, 1).unwrap().arc_length_table().intervals(), 16);
        assert_eq!(Curve::with_samples(cubic, 1_000_000).unwrap().arc_length_table().intervals(), 4096);
    }

    #[test]
    fn test_traversed_subpath() {
        let curve = journey_curve();
        let half = curve.traversed(0.5);
        assert!((half.arclen(1e-9) - curve.total_length() * 0.5).abs() < 0.05);
        assert_eq!(half.p0, curve.start());
    }

    #[test]
    fn test_svg_round_trip() {
        let curve = journey_curve();
        assert_eq!(curve.to_svg(), "M 50 128 C 250 50, 550 200, 750 128");
        assert_eq!(Curve::from_svg(&curve.to_svg()).unwrap(), curve);
    }

    #[test]
    fn test_normalize_angle() {
        assert!((normalize_angle(-PI) - PI).abs() < 1e-12);
        assert!((normalize_angle(2.5 * PI) - PI / 2.0).abs() < 1e-9);
        assert!((normalize_angle(-PI / 2.0) + PI / 2.0).abs() < 1e-12);
        assert_eq!(normalize_angle(f64::INFINITY), 0.0);
    }

    #[test]
    fn test_new_accepts_mixed_point_types() {
        let curve = Curve::new(Point::new(0.0, 0.0), (1.0, 0.0), Point::new(2.0, 0.0), (3.0, 0.0)).unwrap();
        assert_eq!(curve.end(), Point::new(3.0, 0.0));
        assert!((curve.total_length() - 3.0).abs() < 1e-6);
    }
}
