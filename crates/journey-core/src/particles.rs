//! Decorative particles: a steady ambient drift and a sparse pointer trail.
//!
//! Both emitters are deterministic given their random source and have no
//! link to the progress engine.

use kurbo::{Point, Rect};
use rand::Rng;
use std::ops::Range;

pub const AMBIENT_SPAWN_INTERVAL: f64 = 0.9;
pub const TRAIL_PROBABILITY: f64 = 0.15;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub id: u64,
    pub spawned_at: f64,
    pub position: Point,
    pub size: f64,
    pub lifetime: f64,
}

impl Particle {
    pub fn is_alive(&self, now: f64) -> bool {
        now >= self.spawned_at && now < self.spawned_at + self.lifetime
    }

    /// Full opacity at spawn, fading linearly to zero at the end of its life.
    pub fn opacity(&self, now: f64) -> f64 {
        if !self.is_alive(now) || self.lifetime <= 0.0 {
            return 0.0;
        }
        1.0 - (now - self.spawned_at) / self.lifetime
    }
}

/// Endless stream of particles scattered over `bounds`, one per interval.
#[derive(Debug)]
pub struct AmbientParticles<R> {
    rng: R,
    bounds: Rect,
    start: f64,
    interval: f64,
    size: Range<f64>,
    lifetime: Range<f64>,
    next_id: u64,
}

impl<R: Rng> AmbientParticles<R> {
    pub fn new(rng: R, bounds: Rect, start: f64) -> Self {
        Self {
            rng,
            bounds: bounds.abs(),
            start,
            interval: AMBIENT_SPAWN_INTERVAL,
            size: 2.0..6.0,
            lifetime: 4.0..10.0,
            next_id: 0,
        }
    }

    pub fn with_interval(mut self, interval: f64) -> Self {
        if interval.is_finite() && interval > 0.0 {
            self.interval = interval;
        }
        self
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Spawn time of the next particle the iterator will yield.
    pub fn next_spawn(&self) -> f64 {
        self.start + self.next_id as f64 * self.interval
    }

    /// Yields every particle spawned up to and including `now`.
    pub fn spawn_until(&mut self, now: f64) -> Vec<Particle> {
        let mut spawned = Vec::new();
        while self.next_spawn() <= now {
            spawned.extend(self.next());
        }
        spawned
    }
}

impl<R: Rng> Iterator for AmbientParticles<R> {
    type Item = Particle;

    fn next(&mut self) -> Option<Particle> {
        let particle = Particle {
            id: self.next_id,
            spawned_at: self.next_spawn(),
            position: Point::new(
                sample(&mut self.rng, self.bounds.x0..self.bounds.x1),
                sample(&mut self.rng, self.bounds.y0..self.bounds.y1),
            ),
            size: sample(&mut self.rng, self.size.clone()),
            lifetime: sample(&mut self.rng, self.lifetime.clone()),
        };
        self.next_id += 1;
        Some(particle)
    }
}

/// Occasionally drops a particle where the pointer moved.
#[derive(Debug)]
pub struct TrailEmitter<R> {
    rng: R,
    probability: f64,
    size: Range<f64>,
    lifetime: Range<f64>,
    next_id: u64,
}

impl<R: Rng> TrailEmitter<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            probability: TRAIL_PROBABILITY,
            size: 2.0..7.0,
            lifetime: 2.0..4.0,
            next_id: 0,
        }
    }

    /// Non-finite values keep the default probability.
    pub fn with_probability(mut self, probability: f64) -> Self {
        self.probability = if probability.is_finite() {
            probability.clamp(0.0, 1.0)
        } else {
            TRAIL_PROBABILITY
        };
        self
    }

    pub fn pointer_moved(&mut self, position: Point, now: f64) -> Option<Particle> {
        if !self.rng.gen_bool(self.probability) {
            return None;
        }
        let particle = Particle {
            id: self.next_id,
            spawned_at: now,
            position,
            size: sample(&mut self.rng, self.size.clone()),
            lifetime: sample(&mut self.rng, self.lifetime.clone()),
        };
        self.next_id += 1;
        Some(particle)
    }
}

// gen_range panics on an empty range; a flat bounds axis yields its start.
fn sample<R: Rng>(rng: &mut R, range: Range<f64>) -> f64 {
    if range.start < range.end {
        rng.gen_range(range)
    } else {
        range.start
    }
}
