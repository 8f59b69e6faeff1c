pub mod animation;
pub mod config;
pub mod curve;
pub mod error;
pub mod journey;
pub mod leaf_stack;
pub mod milestone;
pub mod particles;
pub mod progress;
pub mod render;
pub mod reveal;
pub mod viewport;

pub use animation::EasingType;
pub use config::{EngineConfig, TransitionConfig};
pub use curve::{ArcLengthTable, Curve, CurveId, CurveSample, DEFAULT_ARC_LENGTH_SAMPLES};
pub use error::{CurveError, EngineError, LeafError, ProgressError, Result};
pub use journey::{Journey, DEFAULT_HIT_RADIUS};
pub use leaf_stack::{FlipDirection, LeafStack};
pub use milestone::{milestone_fraction, Milestone, MilestoneCache, ResolvedMilestone};
pub use particles::{AmbientParticles, Particle, TrailEmitter};
pub use progress::{ProgressController, ProgressPhase, ProgressState, Selection};
pub use render::{Frame, RenderAdapter};
pub use reveal::RevealLatch;
pub use viewport::{AspectMode, FixedSize, MeasurementProvider, Viewport};

pub use kurbo::{Point, Rect, Size};
