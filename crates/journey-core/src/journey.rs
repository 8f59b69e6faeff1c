//! # Journey
//!
//! One timeline widget: a curve, its milestones, the progress controller and
//! the render adapter, plus the viewport the host draws into.
//!
//! ## Responsibilities
//! - **Layout**: Resolved milestone points, recomputed when the curve or the milestone set changes.
//! - **Interaction**: Milestone selection by index or by pointer position.
//! - **Frames**: Per-frame marker values in curve and screen coordinates.

use crate::config::EngineConfig;
use crate::curve::Curve;
use crate::error::{EngineError, ProgressError};
use crate::milestone::{Milestone, MilestoneCache, ResolvedMilestone};
use crate::progress::{ProgressController, ProgressState, Selection};
use crate::render::{Frame, RenderAdapter};
use crate::viewport::{AspectMode, MeasurementProvider, Viewport};
use journey_data::{MilestoneData, TimelineDefinition};
use kurbo::{Point, Rect};

/// Radius, in screen pixels, of the clickable area around a milestone.
pub const DEFAULT_HIT_RADIUS: f64 = 16.0;

#[derive(Clone, Debug)]
pub struct Journey<P> {
    curve: Curve,
    milestones: Vec<Milestone<P>>,
    controller: ProgressController,
    adapter: RenderAdapter,
    cache: MilestoneCache,
    viewport: Viewport,
}

impl<P: Clone> Journey<P> {
    /// Creates a journey drawn in curve coordinates (identity viewport).
    pub fn new(curve: Curve, milestones: Vec<Milestone<P>>, config: EngineConfig) -> Self {
        let controller = ProgressController::new(milestones.len(), config.transition);
        Self {
            curve,
            milestones,
            controller,
            adapter: RenderAdapter::with_rotation_offset(config.marker_rotation_offset),
            cache: MilestoneCache::new(),
            viewport: Viewport::new(Rect::new(0.0, 0.0, 1.0, 1.0), AspectMode::Stretch),
        }
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    pub fn milestones(&self) -> &[Milestone<P>] {
        &self.milestones
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn controller(&self) -> &ProgressController {
        &self.controller
    }

    pub fn state(&self) -> ProgressState {
        self.controller.state()
    }

    /// The payload of the selected milestone.
    pub fn active(&self) -> Option<&Milestone<P>> {
        self.milestones.get(self.controller.active_index())
    }

    pub fn resolved_milestones(&mut self) -> Vec<ResolvedMilestone<P>> {
        self.cache.resolve(&self.curve, &self.milestones)
    }

    /// Milestone points in container pixels.
    pub fn screen_milestones(&mut self) -> Vec<Point> {
        let viewport = self.viewport;
        self.cache
            .points(&self.curve, self.milestones.len())
            .iter()
            .map(|&(_, point)| viewport.to_screen(point))
            .collect()
    }

    pub fn select(&mut self, index: i64, now: f64) -> Result<Selection, ProgressError> {
        self.controller.select_milestone(index, now)
    }

    /// Selects the milestone under `screen_point`, if any lies within
    /// `radius` pixels. The closest one wins.
    pub fn select_at(&mut self, screen_point: Point, radius: f64, now: f64) -> Option<Selection> {
        let index = self.milestone_at(screen_point, radius)?;
        self.controller.select_milestone(index as i64, now).ok()
    }

    pub fn milestone_at(&mut self, screen_point: Point, radius: f64) -> Option<usize> {
        self.screen_milestones()
            .iter()
            .enumerate()
            .map(|(i, p)| (i, (*p - screen_point).hypot()))
            .filter(|&(_, d)| d <= radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }

    /// Frame in curve coordinates.
    pub fn frame(&mut self, now: f64) -> Frame {
        self.adapter.frame(&mut self.controller, &self.curve, now)
    }

    /// Frame with the marker mapped into container pixels.
    pub fn screen_frame(&mut self, now: f64) -> Frame {
        let frame = self.frame(now);
        frame.to_screen(&self.viewport)
    }

    /// Swaps the geometry, e.g. after the host reflowed the widget. The
    /// progress state is kept.
    pub fn set_curve(&mut self, curve: Curve) {
        tracing::debug!("Journey curve replaced: {:?} -> {:?}", self.curve.id(), curve.id());
        self.curve = curve;
        self.adapter.invalidate();
    }

    pub fn set_milestones(&mut self, milestones: Vec<Milestone<P>>) {
        self.controller.set_milestone_count(milestones.len());
        self.milestones = milestones;
        self.adapter.invalidate();
    }

    /// Asks `provider` for the container size and refits the viewport.
    ///
    /// Returns true if the layout changed. An unmeasurable container keeps
    /// the previous layout.
    pub fn relayout(&mut self, provider: &impl MeasurementProvider) -> bool {
        match provider.measure() {
            Some(size) => {
                let changed = self.viewport.resize(size);
                if changed {
                    tracing::debug!("Journey resized to {}x{}", size.width, size.height);
                }
                changed
            }
            None => false,
        }
    }
}

impl Journey<MilestoneData> {
    /// Builds a journey from a validated timeline definition.
    pub fn from_definition(def: &TimelineDefinition) -> Result<Self, EngineError> {
        def.validate()?;
        let config = EngineConfig::from(def);
        let curve = Curve::from_svg_with_samples(&def.path, config.arc_length_samples)?;
        let viewport = Viewport::from_view_box(def.view_box, def.aspect.into());
        let milestones = Milestone::sequence(def.milestones.iter().cloned());

        tracing::debug!(
            "Loaded timeline {:?}: {} milestones, length {:.2}",
            def.name.as_deref().unwrap_or("unnamed"),
            milestones.len(),
            curve.total_length()
        );

        Ok(Self::new(curve, milestones, config).with_viewport(viewport))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::FixedSize;
    use kurbo::Size;

    fn journey() -> Journey<&'static str> {
        let curve = Curve::from_svg("M 50 128 C 250 50, 550 200, 750 128").unwrap();
        let milestones = Milestone::sequence(["2018", "2019", "2021", "2023", "Today"]);
        Journey::new(curve, milestones, EngineConfig::default())
            .with_viewport(Viewport::from_view_box([0.0, 0.0, 800.0, 256.0], AspectMode::Stretch))
    }

    #[test]
    fn test_active_payload_follows_selection() {
        let mut j = journey();
        assert_eq!(j.active().map(|m| m.payload), Some("2018"));
        j.select(3, 0.0).unwrap();
        assert_eq!(j.active().map(|m| m.payload), Some("2023"));
    }

    #[test]
    fn test_relayout_moves_screen_points_only() {
        let mut j = journey();
        let before = j.resolved_milestones();
        assert!(j.relayout(&FixedSize(Size::new(400.0, 128.0))));
        assert!(!j.relayout(&FixedSize(Size::new(400.0, 128.0))));

        let screen = j.screen_milestones();
        assert_eq!(screen[0], Point::new(25.0, 64.0));
        assert_eq!(j.resolved_milestones(), before);
    }

    #[test]
    fn test_unmounted_container_keeps_layout() {
        let mut j = journey();
        let unmounted = || -> Option<Size> { None };
        assert!(!j.relayout(&unmounted));
        assert_eq!(j.viewport().size(), Size::new(800.0, 256.0));
    }

    #[test]
    fn test_select_by_pointer() {
        let mut j = journey();
        let target = j.screen_milestones()[2];
        let near = Point::new(target.x + 5.0, target.y - 5.0);

        assert_eq!(j.milestone_at(near, DEFAULT_HIT_RADIUS), Some(2));
        assert!(matches!(
            j.select_at(near, DEFAULT_HIT_RADIUS, 0.0),
            Some(Selection::Started { .. })
        ));
        assert_eq!(j.milestone_at(Point::new(400.0, 0.0), DEFAULT_HIT_RADIUS), None);
    }

    #[test]
    fn test_set_milestones_retargets() {
        let mut j = journey();
        j.select(4, 0.0).unwrap();
        j.frame(10.0);
        j.set_milestones(Milestone::sequence(["Year 1", "Year 2", "Year 3"]));

        let frame = j.frame(11.0);
        assert_eq!(frame.active_index, 2);
        assert_eq!(frame.fraction, 1.0);
        assert_eq!(j.resolved_milestones().len(), 3);
    }

    #[test]
    fn test_screen_frame_scales_marker() {
        let mut j = journey();
        j.relayout(&FixedSize(Size::new(1600.0, 512.0)));
        let frame = j.screen_frame(0.0);
        assert_eq!(frame.marker_point, Point::new(100.0, 256.0));
        // Arc lengths stay in curve units.
        assert_eq!(frame.dash_offset, j.curve().total_length());
    }
}
