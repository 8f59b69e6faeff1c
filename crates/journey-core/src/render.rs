//! # Render Adapter
//!
//! Converts controller progress into values a host can paint: marker
//! position and rotation, and the traversed stroke length.
//!
//! Frames are recomputed every call while a transition runs and served from
//! a cache while the controller is idle.

use crate::curve::{normalize_angle, Curve, CurveId};
use crate::progress::ProgressController;
use crate::viewport::Viewport;
use kurbo::Point;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub fraction: f64,
    pub marker_point: Point,
    /// Radians in `(-π, π]`, including the adapter's rotation offset.
    pub marker_angle: f64,
    /// Length of the stroke drawn from the start of the curve.
    pub traversed_arc_length: f64,
    /// `total_length - traversed_arc_length`: the dash offset that reveals the
    /// traversed part of a stroke dashed with `total_length`.
    pub dash_offset: f64,
    pub active_index: usize,
    pub animating: bool,
}

impl Frame {
    /// Maps the marker into container pixels. Arc lengths stay in curve
    /// units, which is what a stroke dash pattern drawn in the view box uses.
    pub fn to_screen(&self, viewport: &Viewport) -> Frame {
        Frame {
            marker_point: viewport.to_screen(self.marker_point),
            marker_angle: viewport.angle_to_screen(self.marker_angle),
            ..*self
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct RenderAdapter {
    rotation_offset: f64,
    cached: Option<CachedFrame>,
    computed: usize,
}

#[derive(Clone, Copy, Debug)]
struct CachedFrame {
    curve: CurveId,
    frame: Frame,
}

impl RenderAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `offset` radians to every marker angle.
    pub fn with_rotation_offset(offset: f64) -> Self {
        Self {
            rotation_offset: offset,
            ..Self::default()
        }
    }

    pub fn rotation_offset(&self) -> f64 {
        self.rotation_offset
    }

    /// Number of frames computed rather than served from the cache.
    pub fn computed_frames(&self) -> usize {
        self.computed
    }

    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    /// Ticks `controller` to `now` and returns the drawable frame.
    pub fn frame(&mut self, controller: &mut ProgressController, curve: &Curve, now: f64) -> Frame {
        let fraction = controller.tick(now);
        let animating = controller.is_transitioning();
        let active_index = controller.active_index();

        if !animating {
            if let Some(cached) = self.cached {
                if cached.curve == curve.id()
                    && cached.frame.fraction == fraction
                    && cached.frame.active_index == active_index
                {
                    return cached.frame;
                }
            }
        }

        let frame = self.compute(curve, fraction, active_index, animating);
        self.cached = if animating {
            None
        } else {
            Some(CachedFrame {
                curve: curve.id(),
                frame,
            })
        };
        frame
    }

    /// Frame for an explicit fraction, bypassing controller and cache.
    pub fn frame_at_fraction(&self, curve: &Curve, fraction: f64, active_index: usize) -> Frame {
        build_frame(curve, fraction, active_index, false, self.rotation_offset)
    }

    fn compute(&mut self, curve: &Curve, fraction: f64, active_index: usize, animating: bool) -> Frame {
        self.computed += 1;
        build_frame(curve, fraction, active_index, animating, self.rotation_offset)
    }
}

fn build_frame(curve: &Curve, fraction: f64, active_index: usize, animating: bool, rotation_offset: f64) -> Frame {
    let sample = curve.point_at(fraction);
    let total = curve.total_length();
    let traversed = sample.arc_length;

    Frame {
        fraction,
        marker_point: sample.point,
        marker_angle: normalize_angle(sample.tangent_angle + rotation_offset),
        traversed_arc_length: traversed,
        dash_offset: (total - traversed).max(0.0),
        active_index,
        animating,
    }
}
