use crate::error::DataError;
use serde::{Deserialize, Serialize};

/// A journey timeline as authored in JSON.
///
/// ```json
/// {
///   "name": "home",
///   "path": "M 50 128 C 250 50, 550 200, 750 128",
///   "view_box": [0, 0, 800, 256],
///   "transition": { "duration": 3.0, "easing": { "type": "cubic-bezier", "x1": 0.45, "y1": 0, "x2": 0.55, "y2": 1 } },
///   "milestones": [{ "year": "2018", "title": "The Spark of an Idea" }]
/// }
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TimelineDefinition {
    #[serde(default)]
    pub name: Option<String>,
    /// SVG path data with a single segment.
    pub path: String,
    /// `[min_x, min_y, width, height]` of the coordinate space the path lives in.
    #[serde(default = "default_view_box")]
    pub view_box: [f64; 4],
    #[serde(default)]
    pub aspect: AspectSpec,
    #[serde(default)]
    pub transition: TransitionSpec,
    #[serde(default)]
    pub arc_length_samples: Option<usize>,
    #[serde(default)]
    pub milestones: Vec<MilestoneData>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct MilestoneData {
    pub year: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// How the view box is fitted into the container.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AspectSpec {
    /// Scale each axis independently (`preserveAspectRatio="none"`).
    #[default]
    None,
    /// Uniform scale, centred (`xMidYMid meet`).
    Meet,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TransitionSpec {
    /// Seconds.
    #[serde(default = "default_duration")]
    pub duration: f64,
    #[serde(default)]
    pub easing: EasingSpec,
}

impl Default for TransitionSpec {
    fn default() -> Self {
        Self {
            duration: default_duration(),
            easing: EasingSpec::default(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum EasingSpec {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    CubicBezier { x1: f64, y1: f64, x2: f64, y2: f64 },
}

impl Default for EasingSpec {
    fn default() -> Self {
        EasingSpec::CubicBezier {
            x1: 0.45,
            y1: 0.0,
            x2: 0.55,
            y2: 1.0,
        }
    }
}

fn default_view_box() -> [f64; 4] {
    [0.0, 0.0, 800.0, 256.0]
}

fn default_duration() -> f64 {
    3.0
}

impl TimelineDefinition {
    /// Parses and validates a definition.
    pub fn from_json(json: &str) -> Result<Self, DataError> {
        let definition: TimelineDefinition = serde_json::from_str(json)?;
        definition.validate()?;
        Ok(definition)
    }

    pub fn to_json_pretty(&self) -> Result<String, DataError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), DataError> {
        if self.path.trim().is_empty() {
            return Err(DataError::Validation("path data is empty".into()));
        }

        let [min_x, min_y, width, height] = self.view_box;
        if ![min_x, min_y, width, height].iter().all(|v| v.is_finite()) {
            return Err(DataError::Validation("view_box must be finite".into()));
        }
        if width <= 0.0 || height <= 0.0 {
            return Err(DataError::Validation(format!(
                "view_box size must be positive, got {width}x{height}"
            )));
        }

        if !self.transition.duration.is_finite() || self.transition.duration < 0.0 {
            return Err(DataError::Validation(format!(
                "transition duration must be a non-negative number of seconds, got {}",
                self.transition.duration
            )));
        }

        if let EasingSpec::CubicBezier { x1, y1, x2, y2 } = self.transition.easing {
            if ![x1, y1, x2, y2].iter().all(|v| v.is_finite()) {
                return Err(DataError::Validation(
                    "cubic-bezier control values must be finite".into(),
                ));
            }
            // Same restriction as CSS: the curve must stay a function of time.
            if !(0.0..=1.0).contains(&x1) || !(0.0..=1.0).contains(&x2) {
                return Err(DataError::Validation(format!(
                    "cubic-bezier x values must lie in [0, 1], got {x1} and {x2}"
                )));
            }
        }

        if self.arc_length_samples == Some(0) {
            return Err(DataError::Validation(
                "arc_length_samples must be at least 1".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_definition_uses_defaults() {
        let def = TimelineDefinition::from_json(r#"{ "path": "M 0 0 L 10 0" }"#).unwrap();

        assert_eq!(def.view_box, [0.0, 0.0, 800.0, 256.0]);
        assert_eq!(def.aspect, AspectSpec::None);
        assert_eq!(def.transition.duration, 3.0);
        assert_eq!(def.transition.easing, EasingSpec::default());
        assert!(def.milestones.is_empty());
    }

    #[test]
    fn test_easing_tags() {
        let def = TimelineDefinition::from_json(
            r#"{
                "path": "M 0 0 L 10 0",
                "aspect": "meet",
                "transition": { "duration": 1.0, "easing": { "type": "ease-in-out" } },
                "milestones": [{ "year": "Year 1", "title": "Foundation & Vision" }]
            }"#,
        )
        .unwrap();

        assert_eq!(def.aspect, AspectSpec::Meet);
        assert_eq!(def.transition.easing, EasingSpec::EaseInOut);
        assert_eq!(def.milestones[0].description, "");
    }

    #[test]
    fn test_rejects_bad_view_box() {
        let err = TimelineDefinition::from_json(r#"{ "path": "M 0 0 L 1 1", "view_box": [0, 0, 0, 10] }"#)
            .unwrap_err();
        assert!(matches!(err, DataError::Validation(_)));
    }

    #[test]
    fn test_rejects_cubic_bezier_outside_time_range() {
        let err = TimelineDefinition::from_json(
            r#"{
                "path": "M 0 0 L 1 1",
                "transition": { "easing": { "type": "cubic-bezier", "x1": 1.5, "y1": 0, "x2": 0.5, "y2": 1 } }
            }"#,
        )
        .unwrap_err();
        assert!(matches!(err, DataError::Validation(_)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = TimelineDefinition::from_json("{ path: }").unwrap_err();
        assert!(matches!(err, DataError::Json(_)));
    }
}
