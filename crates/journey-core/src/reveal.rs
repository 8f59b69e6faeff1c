use crate::animation::EasingType;

/// One-shot "fade in when scrolled into view" trigger.
///
/// Feed it the visible fraction of the section; once that reaches the
/// threshold the latch stays revealed for good.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealLatch {
    threshold: f64,
    fade_duration: f64,
    easing: EasingType,
    revealed_at: Option<f64>,
}

impl Default for RevealLatch {
    fn default() -> Self {
        Self::new(0.2, 1.0)
    }
}

impl RevealLatch {
    pub fn new(threshold: f64, fade_duration: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            fade_duration: fade_duration.max(0.0),
            easing: EasingType::EaseIn,
            revealed_at: None,
        }
    }

    pub fn with_easing(mut self, easing: EasingType) -> Self {
        self.easing = easing;
        self
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed_at.is_some()
    }

    pub fn revealed_at(&self) -> Option<f64> {
        self.revealed_at
    }

    /// Reports the intersection ratio observed at `now`. Returns true on the
    /// observation that triggers the reveal.
    pub fn observe(&mut self, ratio: f64, now: f64) -> bool {
        if self.revealed_at.is_some() || ratio.is_nan() || ratio < self.threshold {
            return false;
        }
        // A zero threshold still needs the section to be on screen.
        if self.threshold == 0.0 && ratio <= 0.0 {
            return false;
        }
        tracing::debug!("Section revealed at {:.3} (ratio {:.2})", now, ratio);
        self.revealed_at = Some(now);
        true
    }

    pub fn opacity(&self, now: f64) -> f64 {
        match self.revealed_at {
            None => 0.0,
            Some(_) if self.fade_duration == 0.0 => 1.0,
            Some(at) => self.easing.eval((now - at) / self.fade_duration),
        }
    }
}
