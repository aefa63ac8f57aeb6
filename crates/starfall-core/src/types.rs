//! Fundamental geometric and simulation types.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Simulation time tracking.
///
/// Unlike a fixed-rate simulation, the combat tick is driven by rendered
/// frames, so every advance carries its own (already clamped) delta.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Global frame counter (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.tick += 1;
        self.elapsed_secs += dt as f64;
    }
}

/// Clamp a raw frame delta into the range the simulation accepts.
///
/// Negative or NaN deltas become zero; large deltas (tab switch, stall) are
/// capped at `max_dt`.
pub fn clamp_dt(dt: f32, max_dt: f32) -> f32 {
    if dt.is_nan() || dt <= 0.0 {
        0.0
    } else {
        dt.min(max_dt)
    }
}

/// Whether the segment `from..to` passes within `radius` of `center`.
///
/// Used as the exact hit test: a projectile sweeps a segment each tick, so a
/// point test alone would let fast shots tunnel through small targets.
pub fn segment_hits_sphere(from: Vec3, to: Vec3, center: Vec3, radius: f32) -> bool {
    let seg = to - from;
    let len_sq = seg.length_squared();
    let closest = if len_sq <= f32::EPSILON {
        from
    } else {
        let t = ((center - from).dot(seg) / len_sq).clamp(0.0, 1.0);
        from + seg * t
    };
    closest.distance_squared(center) <= radius * radius
}
