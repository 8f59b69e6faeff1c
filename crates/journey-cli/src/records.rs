//! JSON shapes printed by the CLI.

use journey_engine::{Frame, MilestoneData, Point, ResolvedMilestone, TimelineDefinition};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ResolveReport {
    pub name: Option<String>,
    pub total_length: f64,
    pub view_box: [f64; 4],
    pub size: [f64; 2],
    pub milestones: Vec<MilestoneRecord>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct MilestoneRecord {
    pub index: usize,
    pub year: String,
    pub title: String,
    pub fraction: f64,
    /// View box coordinates.
    pub point: [f64; 2],
    /// Container pixels.
    pub screen: [f64; 2],
}

impl MilestoneRecord {
    pub fn new(resolved: &ResolvedMilestone<MilestoneData>, screen: Point) -> Self {
        Self {
            index: resolved.milestone.index,
            year: resolved.milestone.payload.year.clone(),
            title: resolved.milestone.payload.title.clone(),
            fraction: resolved.normalized_fraction,
            point: [resolved.point.x, resolved.point.y],
            screen: [screen.x, screen.y],
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FrameRecord {
    pub time: f64,
    pub fraction: f64,
    pub active_index: usize,
    pub animating: bool,
    pub marker: [f64; 2],
    /// Radians.
    pub marker_angle: f64,
    pub screen_marker: [f64; 2],
    pub screen_angle: f64,
    pub traversed_arc_length: f64,
    pub dash_offset: f64,
}

impl FrameRecord {
    pub fn new(time: f64, frame: &Frame, screen: &Frame) -> Self {
        Self {
            time,
            fraction: frame.fraction,
            active_index: frame.active_index,
            animating: frame.animating,
            marker: [frame.marker_point.x, frame.marker_point.y],
            marker_angle: frame.marker_angle,
            screen_marker: [screen.marker_point.x, screen.marker_point.y],
            screen_angle: screen.marker_angle,
            traversed_arc_length: frame.traversed_arc_length,
            dash_offset: frame.dash_offset,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PresetRecord<'a> {
    pub name: &'a str,
    pub milestones: Vec<&'a str>,
    pub duration: f64,
}

impl<'a> PresetRecord<'a> {
    pub fn new(name: &'a str, definition: &'a TimelineDefinition) -> Self {
        Self {
            name,
            milestones: definition.milestones.iter().map(|m| m.year.as_str()).collect(),
            duration: definition.transition.duration,
        }
    }
}
