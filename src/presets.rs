//! Built-in timelines.

use journey_data::{AspectSpec, EasingSpec, MilestoneData, TimelineDefinition, TransitionSpec};

/// Path shared by the built-in timelines, in a 800x256 view box.
pub const JOURNEY_PATH: &str = "M 50 128 C 250 50, 550 200, 750 128";
pub const JOURNEY_VIEW_BOX: [f64; 4] = [0.0, 0.0, 800.0, 256.0];

/// Names accepted by [`by_name`].
pub const NAMES: &[&str] = &["home", "about"];

fn milestone(year: &str, title: &str, description: &str) -> MilestoneData {
    MilestoneData {
        year: year.to_string(),
        title: title.to_string(),
        description: description.to_string(),
    }
}

fn timeline(name: &str, duration: f64, milestones: Vec<MilestoneData>) -> TimelineDefinition {
    TimelineDefinition {
        name: Some(name.to_string()),
        path: JOURNEY_PATH.to_string(),
        view_box: JOURNEY_VIEW_BOX,
        aspect: AspectSpec::None,
        transition: TransitionSpec {
            duration,
            easing: EasingSpec::default(),
        },
        arc_length_samples: None,
        milestones,
    }
}

/// Five-stop company history with a slow, 3 second glide.
pub fn home() -> TimelineDefinition {
    timeline(
        "home",
        3.0,
        vec![
            milestone(
                "2018",
                "The Spark of an Idea",
                "It all began with a simple question: how can we make mindfulness accessible to everyone?",
            ),
            milestone(
                "2019",
                "Building the Foundation",
                "Developers and meditation experts came together to build the first version of the app.",
            ),
            milestone(
                "2021",
                "A Community Sprouts",
                "The beta program launched and a small but dedicated community started to form.",
            ),
            milestone(
                "2023",
                "Expanding Horizons",
                "Guided courses, live sessions and teacher training reached users in 50 countries.",
            ),
            milestone(
                "Today",
                "A Global Movement",
                "What started as an idea is now a thriving global movement.",
            ),
        ],
    )
}

/// Three-year plan with a quicker, 1 second glide.
pub fn about() -> TimelineDefinition {
    timeline(
        "about",
        1.0,
        vec![
            milestone(
                "Year 1",
                "Foundation & Vision",
                "Local workshops built a foundational community of 100 members.",
            ),
            milestone(
                "Year 2",
                "Growth & Digital Expansion",
                "An online platform and core digital courses grew the community past 5,000 members.",
            ),
            milestone(
                "Year 3",
                "Impact & Innovation",
                "Corporate wellness programs, personalised coaching and a new mobile app.",
            ),
        ],
    )
}

pub fn by_name(name: &str) -> Option<TimelineDefinition> {
    match name {
        "home" => Some(home()),
        "about" => Some(about()),
        _ => None,
    }
}
