use journey_data::EasingSpec;
use keyframe::EasingFunction;

/// Timing curves for progress transitions.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum EasingType {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// CSS `cubic-bezier(x1, y1, x2, y2)` timing function.
    CubicBezier { x1: f64, y1: f64, x2: f64, y2: f64 },
}

impl EasingType {
    /// `cubic-bezier(0.45, 0, 0.55, 1)`, the journey marker's transition curve.
    pub const JOURNEY: EasingType = EasingType::CubicBezier {
        x1: 0.45,
        y1: 0.0,
        x2: 0.55,
        y2: 1.0,
    };

    /// Eases `x`, clamped to `[0, 1]`.
    pub fn eval(&self, x: f64) -> f64 {
        if x.is_nan() || x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }
        self.y(x)
    }
}

impl Default for EasingType {
    fn default() -> Self {
        EasingType::JOURNEY
    }
}

impl EasingFunction for EasingType {
    fn y(&self, x: f64) -> f64 {
        match *self {
            EasingType::Linear => keyframe::functions::Linear.y(x),
            EasingType::EaseIn => keyframe::functions::EaseIn.y(x),
            EasingType::EaseOut => keyframe::functions::EaseOut.y(x),
            EasingType::EaseInOut => keyframe::functions::EaseInOut.y(x),
            EasingType::CubicBezier { x1, y1, x2, y2 } => {
                let t = solve_bezier_time(x, x1.clamp(0.0, 1.0), x2.clamp(0.0, 1.0));
                bezier_component(t, y1, y2)
            }
        }
    }
}

impl From<EasingSpec> for EasingType {
    fn from(spec: EasingSpec) -> Self {
        match spec {
            EasingSpec::Linear => EasingType::Linear,
            EasingSpec::EaseIn => EasingType::EaseIn,
            EasingSpec::EaseOut => EasingType::EaseOut,
            EasingSpec::EaseInOut => EasingType::EaseInOut,
            EasingSpec::CubicBezier { x1, y1, x2, y2 } => EasingType::CubicBezier { x1, y1, x2, y2 },
        }
    }
}

// One axis of a cubic with fixed end points 0 and 1.
fn bezier_component(t: f64, c1: f64, c2: f64) -> f64 {
    let mt = 1.0 - t;
    3.0 * mt * mt * t * c1 + 3.0 * mt * t * t * c2 + t * t * t
}

fn bezier_component_deriv(t: f64, c1: f64, c2: f64) -> f64 {
    let mt = 1.0 - t;
    3.0 * mt * mt * c1 + 6.0 * mt * t * (c2 - c1) + 3.0 * t * t * (1.0 - c2)
}

/// Finds the curve parameter whose x coordinate equals `x`.
///
/// With both x controls in `[0, 1]` the x component is monotonic, so
/// bisection always converges; Newton steps just get there faster.
fn solve_bezier_time(x: f64, x1: f64, x2: f64) -> f64 {
    const EPSILON: f64 = 1e-9;

    let mut t = x;
    for _ in 0..8 {
        let err = bezier_component(t, x1, x2) - x;
        if err.abs() < EPSILON {
            return t;
        }
        let d = bezier_component_deriv(t, x1, x2);
        if d.abs() < 1e-6 {
            break;
        }
        t = (t - err / d).clamp(0.0, 1.0);
    }

    let (mut lo, mut hi) = (0.0, 1.0);
    t = x;
    for _ in 0..64 {
        let value = bezier_component(t, x1, x2);
        if (value - x).abs() < EPSILON {
            break;
        }
        if value < x {
            lo = t;
        } else {
            hi = t;
        }
        t = 0.5 * (lo + hi);
    }
    t
}
