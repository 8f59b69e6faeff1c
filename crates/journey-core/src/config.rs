use crate::animation::EasingType;
use crate::curve::DEFAULT_ARC_LENGTH_SAMPLES;
use journey_data::TimelineDefinition;

/// Timing of a milestone-to-milestone transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionConfig {
    /// Seconds.
    pub duration: f64,
    pub easing: EasingType,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            duration: 3.0,
            easing: EasingType::JOURNEY,
        }
    }
}

impl TransitionConfig {
    pub fn new(duration: f64, easing: EasingType) -> Self {
        Self { duration, easing }
    }

    /// Negative or non-finite durations behave as an instant jump.
    pub(crate) fn effective_duration(&self) -> f64 {
        if self.duration.is_finite() && self.duration > 0.0 {
            self.duration
        } else {
            0.0
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineConfig {
    /// Intervals in each curve's arc-length table.
    pub arc_length_samples: usize,
    pub transition: TransitionConfig,
    /// Added to every marker angle, in radians. Useful when the marker glyph
    /// is not drawn pointing along +x.
    pub marker_rotation_offset: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            arc_length_samples: DEFAULT_ARC_LENGTH_SAMPLES,
            transition: TransitionConfig::default(),
            marker_rotation_offset: 0.0,
        }
    }
}

impl From<&TimelineDefinition> for EngineConfig {
    fn from(def: &TimelineDefinition) -> Self {
        Self {
            arc_length_samples: def
                .arc_length_samples
                .unwrap_or(DEFAULT_ARC_LENGTH_SAMPLES),
            transition: TransitionConfig {
                duration: def.transition.duration,
                easing: def.transition.easing.into(),
            },
            marker_rotation_offset: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use journey_data::{EasingSpec, TransitionSpec};

    #[test]
    fn test_defaults_match_website_transition() {
        let config = EngineConfig::default();
        assert_eq!(config.transition.duration, 3.0);
        assert_eq!(config.transition.easing, EasingType::JOURNEY);
        assert_eq!(config.arc_length_samples, 256);
    }

    #[test]
    fn test_from_definition() {
        let def = TimelineDefinition {
            name: None,
            path: "M 0 0 L 1 0".into(),
            view_box: [0.0, 0.0, 800.0, 256.0],
            aspect: Default::default(),
            transition: TransitionSpec {
                duration: 1.0,
                easing: EasingSpec::Linear,
            },
            arc_length_samples: Some(128),
            milestones: vec![],
        };

        let config = EngineConfig::from(&def);
        assert_eq!(config.arc_length_samples, 128);
        assert_eq!(config.transition, TransitionConfig::new(1.0, EasingType::Linear));
    }

    #[test]
    fn test_effective_duration() {
        assert_eq!(TransitionConfig::new(-1.0, EasingType::Linear).effective_duration(), 0.0);
        assert_eq!(TransitionConfig::new(f64::NAN, EasingType::Linear).effective_duration(), 0.0);
        assert_eq!(TransitionConfig::new(2.0, EasingType::Linear).effective_duration(), 2.0);
    }
}
