//! Enemy AI system: throttled FSM evaluation for every live enemy.
//!
//! Calls the state machine from starfall-ai and writes the result back into
//! the ECS components. Enemies far from the player are only evaluated on
//! some ticks; the time they skip is accumulated and handed to their next
//! evaluation.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use starfall_core::components::{EnemyBrain, EnemyId, Lifecycle, Transform};
use starfall_core::config::CombatConfig;
use starfall_core::constants::MAX_AI_DT;
use starfall_core::enums::{AiState, QualityLevel};
use starfall_core::events::CombatEvent;
use starfall_core::terrain::HeightProvider;
use starfall_core::Vec3;

use starfall_ai::fsm::{evaluate, AiContext, FireRequest};
use starfall_ai::profiles::get_profile;

/// Throttle modulus for enemies outside the full-rate radius.
pub fn throttle_modulus(config: &CombatConfig, quality: QualityLevel) -> u64 {
    match quality {
        QualityLevel::Normal => config.ai_throttle_normal,
        QualityLevel::Degraded => config.ai_throttle_degraded,
    }
    .max(1)
}

/// Whether the enemy at roster `index` gets a full evaluation this tick.
pub fn is_due(
    tick: u64,
    index: usize,
    distance_to_player: f32,
    full_rate_radius: f32,
    modulus: u64,
) -> bool {
    distance_to_player <= full_rate_radius || (tick + index as u64) % modulus == 0
}

/// Read-only inputs for one AI pass.
pub struct AiInputs<'a> {
    pub config: &'a CombatConfig,
    pub tick: u64,
    pub dt: f32,
    pub quality: QualityLevel,
    /// Player position, or `None` once the player is dead.
    pub target: Option<Vec3>,
    pub terrain: Option<&'a dyn HeightProvider>,
}

/// Step 7: evaluate enemy AI and return the shots requested this tick.
pub fn run(
    world: &mut World,
    roster: &[Entity],
    rng: &mut ChaCha8Rng,
    inputs: &AiInputs<'_>,
    events: &mut Vec<CombatEvent>,
) -> Vec<FireRequest> {
    let modulus = throttle_modulus(inputs.config, inputs.quality);
    let mut shots = Vec::new();

    for (index, &entity) in roster.iter().enumerate() {
        let Ok((id, brain, transform, lifecycle)) = world
            .query_one_mut::<(&EnemyId, &mut EnemyBrain, &mut Transform, &Lifecycle)>(entity)
        else {
            continue;
        };
        if *lifecycle != Lifecycle::Alive {
            continue;
        }

        let profile = get_profile(brain.kind);
        brain.hover_phase = (brain.hover_phase + profile.hover_frequency * inputs.dt)
            .rem_euclid(std::f32::consts::TAU);
        brain.pending_dt = (brain.pending_dt + inputs.dt).min(MAX_AI_DT);

        let distance = inputs
            .target
            .map_or(f32::INFINITY, |t| transform.position.distance(t));
        if !is_due(
            inputs.tick,
            index,
            distance,
            inputs.config.ai_full_rate_radius,
            modulus,
        ) {
            continue;
        }

        let ctx = AiContext {
            kind: brain.kind,
            state: brain.state,
            position: transform.position,
            facing: transform.facing,
            home: brain.home,
            patrol_radius: brain.patrol_radius,
            patrol_target: brain.patrol_target,
            target: inputs.target,
            cooldown_remaining: brain.cooldown_remaining,
            dt: brain.pending_dt,
            hysteresis: inputs.config.engage_hysteresis,
        };
        brain.pending_dt = 0.0;

        let update = evaluate(&ctx, rng);

        let mut position = update.position;
        if let Some(terrain) = inputs.terrain {
            let floor = terrain.height_at(position.x, position.z) + profile.ground_clearance;
            position.y = position.y.max(floor);
        }
        transform.position = position;
        transform.facing = update.facing;
        brain.state = update.new_state;
        brain.patrol_target = update.patrol_target;
        brain.cooldown_remaining = update.cooldown_remaining;

        if update.state_changed {
            events.push(match update.new_state {
                AiState::Engage => CombatEvent::EnemyEngaged { enemy_id: id.0 },
                AiState::Patrol => CombatEvent::EnemyDisengaged { enemy_id: id.0 },
            });
        }
        if let Some(shot) = update.fire {
            shots.push(FireRequest {
                origin: position,
                ..shot
            });
        }
    }

    shots
}
