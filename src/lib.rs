//! # Journey Engine
//!
//! Animated journey timelines: milestones spread evenly along a cubic Bézier
//! path, with a marker that glides between them by arc length.
//!
//! ```
//! use journey_engine::{presets, Journey};
//!
//! let mut journey = Journey::from_definition(&presets::home()).unwrap();
//! journey.select(2, 0.0).unwrap();
//! let frame = journey.frame(3.0);
//! assert!((frame.traversed_arc_length - 0.5 * journey.curve().total_length()).abs() < 1e-6);
//! ```

pub mod presets;

pub use journey_core::*;
pub use journey_data::{
    AspectSpec, DataError, EasingSpec, MilestoneData, TimelineDefinition, TransitionSpec,
};
