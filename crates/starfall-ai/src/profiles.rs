//! Kind-specific behavioral profiles.
//!
//! Consolidates per-kind parameters for the enemy FSM and spawn factories.

use starfall_core::enums::{EnemyKind, VisualStyle};

/// Behavioral profile for an enemy kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyProfile {
    pub max_health: f32,
    /// Distance at which the enemy switches to Engage.
    pub attack_range: f32,
    /// Seconds between shots.
    pub attack_cooldown: f32,
    /// Damage per shot.
    pub attack_power: f32,
    pub projectile_speed: f32,
    /// Patrol movement speed (units/s). Zero for stationary kinds.
    pub move_speed: f32,
    /// Radius of the wander region around the home point.
    pub patrol_radius: f32,
    /// Bounding sphere radius used by the exact hit test.
    pub hit_radius: f32,
    /// Height kept above terrain in ground combat.
    pub ground_clearance: f32,
    /// Amplitude of the visual hover bob.
    pub hover_amplitude: f32,
    /// Angular speed of the hover bob (rad/s).
    pub hover_frequency: f32,
    pub hull_style: VisualStyle,
}

/// Get the behavioral profile for a given kind.
pub fn get_profile(kind: EnemyKind) -> EnemyProfile {
    match kind {
        EnemyKind::Drone => EnemyProfile {
            max_health: 50.0,
            attack_range: 40.0,
            attack_cooldown: 2.0,
            attack_power: 8.0,
            projectile_speed: 45.0,
            move_speed: 8.0,
            patrol_radius: 30.0,
            hit_radius: 2.5,
            ground_clearance: 4.0,
            hover_amplitude: 0.5,
            hover_frequency: 2.0,
            hull_style: VisualStyle::DroneHull,
        },
        EnemyKind::Turret => EnemyProfile {
            max_health: 120.0,
            attack_range: 60.0,
            attack_cooldown: 3.0,
            attack_power: 15.0,
            projectile_speed: 40.0,
            move_speed: 0.0,
            patrol_radius: 0.0,
            hit_radius: 3.5,
            ground_clearance: 0.0,
            hover_amplitude: 0.0,
            hover_frequency: 0.0,
            hull_style: VisualStyle::TurretHull,
        },
    }
}
