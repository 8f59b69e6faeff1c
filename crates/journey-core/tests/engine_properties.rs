use journey_core::milestone::resolve;
use journey_core::{
    Curve, EasingType, Journey, Milestone, MilestoneCache, Point, ProgressController, ProgressError,
    RenderAdapter, Selection, TransitionConfig,
};
use kurbo::{ParamCurve, ParamCurveArclen};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

fn journey_curve() -> Curve {
    Curve::new((50.0, 128.0), (250.0, 50.0), (550.0, 200.0), (750.0, 128.0)).unwrap()
}

fn years() -> Vec<Milestone<&'static str>> {
    Milestone::sequence(["2018", "2019", "2021", "2023", "Today"])
}

#[test]
fn test_arc_length_is_monotonic() {
    init_tracing();
    let curve = journey_curve();

    let table = curve.arc_length_table();
    let entries: Vec<f64> = (0..=table.intervals())
        .map(|i| table.length_at_entry(i).unwrap())
        .collect();
    assert_eq!(entries[0], 0.0);
    assert!(entries.windows(2).all(|w| w[0] < w[1]));

    let mut previous = curve.point_at(0.0);
    for step in 1..=1000 {
        let sample = curve.point_at(step as f64 / 1000.0);
        assert!(sample.t >= previous.t);
        assert!(sample.arc_length > previous.arc_length);
        previous = sample;
    }
}

#[test]
fn test_endpoints() {
    let curve = journey_curve();
    let start = curve.point_at(0.0);
    let end = curve.point_at(1.0);

    assert_eq!(start.point, Point::new(50.0, 128.0));
    assert!((end.point - Point::new(750.0, 128.0)).hypot() < 1e-6);
    assert!(start.tangent_angle > -std::f64::consts::PI && start.tangent_angle <= std::f64::consts::PI);

    // Out-of-range fractions clamp to the endpoints.
    assert_eq!(curve.point_at(-3.0).point, start.point);
    assert_eq!(curve.point_at(7.0).point, end.point);
}

#[test]
fn test_milestones_evenly_spaced_by_arc_length() {
    let curve = journey_curve();
    let resolved = resolve(&curve, &years());
    let expected_gap = curve.total_length() / 4.0;

    let params: Vec<f64> = resolved
        .iter()
        .map(|m| curve.point_at(m.normalized_fraction).t)
        .collect();

    for pair in params.windows(2) {
        let gap = curve.cubic().subsegment(pair[0]..pair[1]).arclen(1e-9);
        assert!(
            (gap - expected_gap).abs() < expected_gap * 0.005,
            "gap {gap} vs {expected_gap}"
        );
    }

    let fractions: Vec<f64> = resolved.iter().map(|m| m.normalized_fraction).collect();
    assert_eq!(fractions, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    assert!(resolve::<&str>(&curve, &[]).is_empty());
}

#[test]
fn test_resolution_is_idempotent() {
    let curve = journey_curve();
    let milestones = years();
    assert_eq!(resolve(&curve, &milestones), resolve(&curve, &milestones));

    let mut cache = MilestoneCache::new();
    let first = cache.resolve(&curve, &milestones);
    let second = cache.resolve(&curve, &milestones);
    assert_eq!(first, second);
    assert_eq!(cache.recomputations(), 1);
}

#[test]
fn test_reselecting_current_milestone_is_noop() {
    let mut controller = ProgressController::new(5, TransitionConfig::default());
    let before = controller.state();

    assert_eq!(controller.select_milestone(0, 10.0), Ok(Selection::Unchanged));
    assert_eq!(controller.state(), before);
    assert!(!controller.is_transitioning());
}

#[test]
fn test_mid_flight_redirect_is_continuous() {
    init_tracing();
    let mut controller = ProgressController::new(5, TransitionConfig::new(3.0, EasingType::JOURNEY));

    controller.select_milestone(4, 0.0).unwrap();
    let p1 = controller.tick(1.5);
    assert!(p1 > 0.0 && p1 < 1.0);

    match controller.select_milestone(1, 1.5).unwrap() {
        Selection::Started { from, to } => {
            assert_eq!(from, p1);
            assert_eq!(to, 0.25);
        }
        Selection::Unchanged => panic!("redirect should start a transition"),
    }

    // No jump at the redirect instant.
    assert_eq!(controller.tick(1.5), p1);
    let later = controller.tick(1.6);
    assert!((later - p1).abs() < 0.05);
    assert_eq!(controller.tick(4.5), 0.25);
}

#[test]
fn test_out_of_range_rejected() {
    let mut controller = ProgressController::new(5, TransitionConfig::default());
    controller.select_milestone(2, 0.0).unwrap();
    controller.tick(0.5);
    let before = controller.state();

    for index in [-1, 5, 99] {
        assert_eq!(
            controller.select_milestone(index, 1.0),
            Err(ProgressError::IndexOutOfRange { index, count: 5 })
        );
    }
    assert_eq!(controller.state(), before);
    assert_eq!(controller.active_index(), 2);
}

#[test]
fn test_degenerate_curve_is_safe() {
    init_tracing();
    let p = (10.0, 10.0);
    let curve = Curve::new(p, p, p, p).unwrap();
    assert_eq!(curve.total_length(), 0.0);

    for fraction in [0.0, 0.3, 1.0, f64::NAN] {
        let sample = curve.point_at(fraction);
        assert_eq!(sample.point, Point::new(10.0, 10.0));
        assert_eq!(sample.tangent_angle, 0.0);
    }

    let mut journey = Journey::new(curve, years(), Default::default());
    journey.select(3, 0.0).unwrap();
    let frame = journey.frame(5.0);
    assert_eq!(frame.traversed_arc_length, 0.0);
    assert_eq!(frame.marker_point, Point::new(10.0, 10.0));
    assert!(frame.marker_angle.is_finite());
}

#[test]
fn test_end_to_end_scenario() {
    init_tracing();
    let curve = journey_curve();
    let mut controller = ProgressController::new(5, TransitionConfig::default());
    let mut adapter = RenderAdapter::new();

    assert!(matches!(
        controller.select_milestone(2, 0.0),
        Ok(Selection::Started { to, .. }) if to == 0.5
    ));

    let mid = adapter.frame(&mut controller, &curve, 1.5);
    assert!(mid.animating);
    assert!(mid.traversed_arc_length > 0.0 && mid.traversed_arc_length < 0.5 * curve.total_length());

    let frame = adapter.frame(&mut controller, &curve, 3.0 + 1e-3);
    assert!(!frame.animating);
    let expected = 0.5 * curve.total_length();
    assert!((frame.traversed_arc_length - expected).abs() <= expected * 0.01);

    let resolved = resolve(&curve, &years());
    assert!((frame.marker_point - resolved[2].point).hypot() < 1e-9);
}
