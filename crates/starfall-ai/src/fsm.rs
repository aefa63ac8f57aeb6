//! Enemy behavior finite state machine.
//!
//! Pure functions that compute state transitions, movement and fire requests
//! for one enemy from its kind, current state and situation.
//! No ECS dependency; operates on plain data.

use glam::Vec3;
use rand::Rng;

use starfall_core::constants::{ENEMY_SHOT_RANGE_FACTOR, PATROL_ARRIVAL_DISTANCE};
use starfall_core::enums::{AiState, EnemyKind};

use crate::profiles::{get_profile, EnemyProfile};

/// Input to the enemy FSM for a single entity.
#[derive(Debug, Clone)]
pub struct AiContext {
    pub kind: EnemyKind,
    pub state: AiState,
    pub position: Vec3,
    pub facing: Vec3,
    pub home: Vec3,
    pub patrol_radius: f32,
    pub patrol_target: Option<Vec3>,
    /// Position of the player, or `None` if there is nothing to target.
    pub target: Option<Vec3>,
    pub cooldown_remaining: f32,
    /// Seconds since this enemy was last evaluated.
    pub dt: f32,
    /// Extra fraction of range an engaged enemy tolerates before disengaging.
    pub hysteresis: f32,
}

/// A shot the enemy wants to fire this evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireRequest {
    pub origin: Vec3,
    /// Unit vector toward the target.
    pub direction: Vec3,
    pub speed: f32,
    pub power: f32,
    pub range: f32,
}

/// Output from the enemy FSM.
#[derive(Debug, Clone)]
pub struct AiUpdate {
    pub new_state: AiState,
    pub state_changed: bool,
    pub position: Vec3,
    pub facing: Vec3,
    pub patrol_target: Option<Vec3>,
    pub cooldown_remaining: f32,
    pub fire: Option<FireRequest>,
}

/// Whether an enemy at `distance` should be engaging.
///
/// With zero hysteresis this is exactly `distance <= attack_range`.
pub fn should_engage(state: AiState, distance: f32, attack_range: f32, hysteresis: f32) -> bool {
    match state {
        AiState::Patrol => distance <= attack_range,
        AiState::Engage => distance <= attack_range * (1.0 + hysteresis),
    }
}

/// Evaluate the FSM for one enemy.
pub fn evaluate<R: Rng + ?Sized>(ctx: &AiContext, rng: &mut R) -> AiUpdate {
    let profile = get_profile(ctx.kind);
    let cooldown = (ctx.cooldown_remaining - ctx.dt).max(0.0);

    let engage_target = ctx.target.filter(|target| {
        should_engage(
            ctx.state,
            ctx.position.distance(*target),
            profile.attack_range,
            ctx.hysteresis,
        )
    });

    let mut update = match engage_target {
        Some(target) => evaluate_engage(ctx, &profile, target, cooldown),
        None => evaluate_patrol(ctx, &profile, cooldown, rng),
    };
    update.state_changed = update.new_state != ctx.state;
    update
}

fn evaluate_engage(
    ctx: &AiContext,
    profile: &EnemyProfile,
    target: Vec3,
    cooldown: f32,
) -> AiUpdate {
    let facing = (target - ctx.position).try_normalize().unwrap_or(ctx.facing);

    let (fire, cooldown) = if cooldown <= 0.0 {
        let shot = FireRequest {
            origin: ctx.position,
            direction: facing,
            speed: profile.projectile_speed,
            power: profile.attack_power,
            range: profile.attack_range * ENEMY_SHOT_RANGE_FACTOR,
        };
        (Some(shot), profile.attack_cooldown)
    } else {
        (None, cooldown)
    };

    AiUpdate {
        new_state: AiState::Engage,
        state_changed: false,
        position: ctx.position,
        facing,
        patrol_target: ctx.patrol_target,
        cooldown_remaining: cooldown,
        fire,
    }
}

fn evaluate_patrol<R: Rng + ?Sized>(
    ctx: &AiContext,
    profile: &EnemyProfile,
    cooldown: f32,
    rng: &mut R,
) -> AiUpdate {
    let idle = AiUpdate {
        new_state: AiState::Patrol,
        state_changed: false,
        position: ctx.position,
        facing: ctx.facing,
        patrol_target: ctx.patrol_target,
        cooldown_remaining: cooldown,
        fire: None,
    };

    // Stationary kinds just wait for something to come into range.
    if profile.move_speed <= 0.0 || ctx.patrol_radius <= 0.0 {
        return idle;
    }

    let mut destination = ctx
        .patrol_target
        .unwrap_or_else(|| pick_patrol_point(ctx.home, ctx.patrol_radius, rng));
    if ctx.position.distance(destination) < PATROL_ARRIVAL_DISTANCE {
        destination = pick_patrol_point(ctx.home, ctx.patrol_radius, rng);
    }

    let (position, facing) = step_toward(
        ctx.position,
        destination,
        profile.move_speed * ctx.dt,
        ctx.facing,
    );

    AiUpdate {
        position,
        facing,
        patrol_target: Some(destination),
        ..idle
    }
}

/// Uniform random point around `home`. Vertical excursion is half the
/// horizontal one.
pub fn pick_patrol_point<R: Rng + ?Sized>(home: Vec3, radius: f32, rng: &mut R) -> Vec3 {
    if radius <= 0.0 {
        return home;
    }
    home + Vec3::new(
        rng.gen_range(-radius..=radius),
        rng.gen_range(-radius..=radius) * 0.5,
        rng.gen_range(-radius..=radius),
    )
}

/// Move up to `max_step` toward `to` without overshooting.
fn step_toward(from: Vec3, to: Vec3, max_step: f32, facing: Vec3) -> (Vec3, Vec3) {
    let delta = to - from;
    let distance = delta.length();
    if distance <= f32::EPSILON || max_step <= 0.0 {
        return (from, facing);
    }
    let direction = delta / distance;
    if distance <= max_step {
        (to, direction)
    } else {
        (from + direction * max_step, direction)
    }
}

/// Vertical hover bob for rendering only. Never fed back into the logic.
pub fn hover_offset(kind: EnemyKind, phase: f32) -> f32 {
    get_profile(kind).hover_amplitude * phase.sin()
}
