//! # Viewport
//!
//! Maps curve coordinates (an SVG-style view box) to container pixels.
//!
//! ## Key Types
//! - `Viewport`: View box, container size and fitting mode.
//! - `MeasurementProvider`: Host hook reporting the container size on demand.

use crate::curve::normalize_angle;
use glam::{DAffine2, DVec2};
use journey_data::AspectSpec;
use kurbo::{Point, Rect, Size};

/// How the view box is fitted into the container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AspectMode {
    /// Independent scale per axis.
    #[default]
    Stretch,
    /// Uniform scale, centred, letterboxed.
    Meet,
}

impl From<AspectSpec> for AspectMode {
    fn from(spec: AspectSpec) -> Self {
        match spec {
            AspectSpec::None => AspectMode::Stretch,
            AspectSpec::Meet => AspectMode::Meet,
        }
    }
}

/// Reports the current size of the container the curve is drawn in.
///
/// `None` means the container is not laid out yet.
pub trait MeasurementProvider {
    fn measure(&self) -> Option<Size>;
}

/// A container whose size never changes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedSize(pub Size);

impl MeasurementProvider for FixedSize {
    fn measure(&self) -> Option<Size> {
        Some(self.0)
    }
}

impl<F> MeasurementProvider for F
where
    F: Fn() -> Option<Size>,
{
    fn measure(&self) -> Option<Size> {
        self()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    view_box: Rect,
    size: Size,
    aspect: AspectMode,
    transform: DAffine2,
}

impl Viewport {
    /// A viewport showing `view_box` at its own size.
    pub fn new(view_box: Rect, aspect: AspectMode) -> Self {
        Self::with_size(view_box, view_box.size(), aspect)
    }

    pub fn with_size(view_box: Rect, size: Size, aspect: AspectMode) -> Self {
        let view_box = view_box.abs();
        Self {
            view_box,
            size,
            aspect,
            transform: fit_transform(view_box, size, aspect),
        }
    }

    /// From `[min_x, min_y, width, height]`.
    pub fn from_view_box(view_box: [f64; 4], aspect: AspectMode) -> Self {
        let [x, y, w, h] = view_box;
        Self::new(Rect::new(x, y, x + w, y + h), aspect)
    }

    pub fn view_box(&self) -> Rect {
        self.view_box
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn aspect(&self) -> AspectMode {
        self.aspect
    }

    /// Returns true if the size changed.
    pub fn resize(&mut self, size: Size) -> bool {
        if size == self.size {
            return false;
        }
        self.size = size;
        self.transform = fit_transform(self.view_box, size, self.aspect);
        true
    }

    pub fn transform(&self) -> DAffine2 {
        self.transform
    }

    pub fn to_screen(&self, point: Point) -> Point {
        let p = self.transform.transform_point2(DVec2::new(point.x, point.y));
        Point::new(p.x, p.y)
    }

    /// Maps a direction angle through the (possibly non-uniform) scale.
    pub fn angle_to_screen(&self, angle: f64) -> f64 {
        let dir = self
            .transform
            .transform_vector2(DVec2::new(angle.cos(), angle.sin()));
        if dir.length_squared() == 0.0 {
            return normalize_angle(angle);
        }
        normalize_angle(dir.y.atan2(dir.x))
    }

    /// Inverse of `to_screen`; `None` while the container has no area.
    pub fn to_view_box(&self, point: Point) -> Option<Point> {
        if self.size.width <= 0.0 || self.size.height <= 0.0 {
            return None;
        }
        let p = self
            .transform
            .inverse()
            .transform_point2(DVec2::new(point.x, point.y));
        Some(Point::new(p.x, p.y))
    }
}

fn fit_transform(view_box: Rect, size: Size, aspect: AspectMode) -> DAffine2 {
    let vb_w = view_box.width();
    let vb_h = view_box.height();
    if vb_w <= 0.0 || vb_h <= 0.0 {
        return DAffine2::from_scale(DVec2::ZERO);
    }

    let sx = size.width / vb_w;
    let sy = size.height / vb_h;
    let origin = DVec2::new(view_box.x0, view_box.y0);

    match aspect {
        AspectMode::Stretch => DAffine2::from_scale(DVec2::new(sx, sy)) * DAffine2::from_translation(-origin),
        AspectMode::Meet => {
            let s = sx.min(sy);
            let offset = DVec2::new((size.width - vb_w * s) / 2.0, (size.height - vb_h * s) / 2.0);
            DAffine2::from_translation(offset)
                * DAffine2::from_scale(DVec2::splat(s))
                * DAffine2::from_translation(-origin)
        }
    }
}
