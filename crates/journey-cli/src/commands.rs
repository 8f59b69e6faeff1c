use crate::records::{FrameRecord, MilestoneRecord, PresetRecord, ResolveReport};
use crate::{ContainerSize, TimelineSource};
use anyhow::{anyhow, bail, Context, Result};
use journey_engine::{presets, FixedSize, Journey, MilestoneData, Size, TimelineDefinition};
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

/// `INDEX@SECONDS` from the command line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScheduledSelection {
    pub index: i64,
    pub at: f64,
}

impl FromStr for ScheduledSelection {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (index, at) = s
            .split_once('@')
            .ok_or_else(|| anyhow!("expected INDEX@SECONDS, got {s:?}"))?;
        let index = index
            .trim()
            .parse::<i64>()
            .with_context(|| format!("invalid milestone index in {s:?}"))?;
        let at = at
            .trim()
            .parse::<f64>()
            .with_context(|| format!("invalid time in {s:?}"))?;
        if !at.is_finite() || at < 0.0 {
            bail!("selection time must be a non-negative number of seconds, got {at}");
        }
        Ok(Self { index, at })
    }
}

pub fn parse_selection(s: &str) -> Result<ScheduledSelection, String> {
    s.parse().map_err(|err: anyhow::Error| format!("{err:#}"))
}

pub fn load_definition(source: &TimelineSource) -> Result<TimelineDefinition> {
    match (&source.timeline, &source.preset) {
        (Some(path), _) => load_file(path),
        (None, Some(name)) => presets::by_name(name).ok_or_else(|| {
            anyhow!(
                "unknown preset {name:?} (available: {})",
                presets::NAMES.join(", ")
            )
        }),
        (None, None) => bail!("either --timeline or --preset is required"),
    }
}

fn load_file(path: &Path) -> Result<TimelineDefinition> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read timeline {}", path.display()))?;
    TimelineDefinition::from_json(&json)
        .with_context(|| format!("Invalid timeline {}", path.display()))
}

pub fn build_journey(definition: &TimelineDefinition, size: ContainerSize) -> Result<Journey<MilestoneData>> {
    let mut journey = Journey::from_definition(definition).context("Failed to build journey")?;

    if let (Some(width), Some(height)) = (size.width, size.height) {
        if !(width.is_finite() && height.is_finite() && width >= 0.0 && height >= 0.0) {
            bail!("container size must be non-negative, got {width}x{height}");
        }
        journey.relayout(&FixedSize(Size::new(width, height)));
    }

    Ok(journey)
}

pub fn resolve(source: &TimelineSource, size: ContainerSize, out: &mut impl Write) -> Result<()> {
    let definition = load_definition(source)?;
    let mut journey = build_journey(&definition, size)?;

    let screen = journey.screen_milestones();
    let milestones = journey
        .resolved_milestones()
        .into_iter()
        .zip(screen)
        .map(|(resolved, screen)| MilestoneRecord::new(&resolved, screen))
        .collect();

    let viewport = journey.viewport();
    let report = ResolveReport {
        name: definition.name,
        total_length: journey.curve().total_length(),
        view_box: definition.view_box,
        size: [viewport.size().width, viewport.size().height],
        milestones,
    };

    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}

/// Renders frames at `fps` from 0 to `until`, applying each selection on the
/// first frame at or after its time.
pub fn simulate(
    source: &TimelineSource,
    size: ContainerSize,
    selections: &[ScheduledSelection],
    fps: f64,
    until: Option<f64>,
    out: &mut impl Write,
) -> Result<()> {
    if !fps.is_finite() || fps <= 0.0 {
        bail!("--fps must be positive, got {fps}");
    }

    let mut journey = build_journey(&load_definition(source)?, size)?;
    let mut pending = selections.to_vec();
    pending.sort_by(|a, b| a.at.total_cmp(&b.at));

    if let Some(until) = until {
        if !until.is_finite() || until < 0.0 {
            bail!("--until must be a non-negative number of seconds, got {until}");
        }
    }

    let duration = journey.controller().transition().duration;
    let until = until.unwrap_or_else(|| pending.last().map_or(0.0, |s| s.at) + duration.max(0.0));
    let frame_count = (until.max(0.0) * fps).floor() as u64;

    tracing::info!(
        "Simulating {} frames at {} fps with {} selections",
        frame_count + 1,
        fps,
        pending.len()
    );

    let mut next = 0;
    for frame_index in 0..=frame_count {
        let now = frame_index as f64 / fps;

        while let Some(selection) = pending.get(next).filter(|s| s.at <= now) {
            // Rejected indices are logged by the controller; the replay goes on.
            if let Ok(outcome) = journey.select(selection.index, selection.at) {
                tracing::debug!("Selection {} at {:.3}: {:?}", selection.index, selection.at, outcome);
            }
            next += 1;
        }

        let frame = journey.frame(now);
        let screen = frame.to_screen(journey.viewport());
        serde_json::to_writer(&mut *out, &FrameRecord::new(now, &frame, &screen))?;
        writeln!(out)?;
    }

    if next < pending.len() {
        tracing::warn!("{} selections scheduled after {:.3}s were not replayed", pending.len() - next, until);
    }

    out.flush()?;
    Ok(())
}

pub fn presets(name: Option<&str>, out: &mut impl Write) -> Result<()> {
    match name {
        Some(name) => {
            let definition = presets::by_name(name).ok_or_else(|| {
                anyhow!(
                    "unknown preset {name:?} (available: {})",
                    presets::NAMES.join(", ")
                )
            })?;
            writeln!(out, "{}", definition.to_json_pretty()?)?;
        }
        None => {
            for name in presets::NAMES {
                if let Some(definition) = presets::by_name(name) {
                    serde_json::to_writer(&mut *out, &PresetRecord::new(name, &definition))?;
                    writeln!(out)?;
                }
            }
        }
    }
    Ok(())
}
