//! Scripted headless session used by the `starfall` binary.
//!
//! Drives a `LoopSession` with a fixed frame delta: enters combat, aims at
//! the nearest live enemy every frame and fires whenever energy allows.

use serde::Serialize;

use starfall_core::commands::ModeCommand;
use starfall_core::config::CombatConfig;
use starfall_core::constants::COST_SPECIAL;
use starfall_core::enums::{AttackButton, GameMode, PlayerClass, ProjectileOrigin};
use starfall_core::error::ConfigurationError;
use starfall_core::events::{CombatEvent, ModeEvent};
use starfall_core::state::{CombatSnapshot, PlayerView};
use starfall_core::Vec3;

use crate::game_loop::LoopSession;

/// Frames between special attacks.
const SPECIAL_EVERY: u32 = 90;

#[derive(Debug, Clone)]
pub struct AutopilotOptions {
    /// Frames to run before giving up.
    pub ticks: u32,
    /// Land on generated terrain instead of fighting in space.
    pub ground: bool,
    pub terrain_seed: u64,
    pub class: PlayerClass,
}

impl Default for AutopilotOptions {
    fn default() -> Self {
        Self {
            ticks: 1800,
            ground: false,
            terrain_seed: 1,
            class: PlayerClass::Titan,
        }
    }
}

/// How the session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    Won,
    Lost,
    Aborted,
    /// Still fighting when the frame budget ran out.
    Unfinished,
}

/// JSON summary printed by the binary.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub seed: u64,
    pub mode: GameMode,
    pub outcome: Outcome,
    pub frames: u32,
    pub enemies_killed: u32,
    pub shots_fired: u32,
    pub shots_recycled: u32,
    pub damage_taken: f32,
    pub player: PlayerView,
}

/// Run one scripted combat session.
pub fn run(config: CombatConfig, options: &AutopilotOptions) -> Result<RunSummary, ConfigurationError> {
    let seed = config.seed;
    let dt = config.target_frame_interval.max(f32::EPSILON);
    let mut session = LoopSession::new(config, options.class)?;

    let mode = if options.ground {
        session.handle(ModeCommand::EnterGroundCombat {
            origin: Vec3::ZERO,
            terrain_seed: options.terrain_seed,
        });
        GameMode::GroundCombat
    } else {
        session.handle(ModeCommand::EnterSpaceCombat { origin: Vec3::ZERO });
        GameMode::SpaceCombat
    };

    let mut summary = RunSummary {
        seed,
        mode,
        outcome: Outcome::Unfinished,
        frames: 0,
        enemies_killed: 0,
        shots_fired: 0,
        shots_recycled: 0,
        damage_taken: 0.0,
        player: session.player().view(),
    };
    if let Some(outcome) = outcome_of(&session.take_mode_events()) {
        summary.outcome = outcome;
        return Ok(summary);
    }

    let mut last: Option<CombatSnapshot> = None;
    for frame in 0..options.ticks {
        if let Some(direction) = last.as_ref().and_then(nearest_enemy_direction) {
            let button = if frame % SPECIAL_EVERY == 0 && session.player().energy >= COST_SPECIAL {
                AttackButton::Special
            } else {
                AttackButton::Basic
            };
            session.handle(ModeCommand::Attack { button, direction });
        }

        let Some(snapshot) = session.frame(dt) else {
            continue;
        };
        summary.frames += 1;
        tally(&mut summary, &snapshot);

        if let Some(outcome) = outcome_of(&session.take_mode_events()) {
            summary.outcome = outcome;
            break;
        }
        last = Some(snapshot);
    }

    if summary.outcome == Outcome::Unfinished {
        session.handle(ModeCommand::LeaveCombat);
    }
    summary.player = session.player().view();
    Ok(summary)
}

fn outcome_of(events: &[ModeEvent]) -> Option<Outcome> {
    events.iter().find_map(|e| match e {
        ModeEvent::CombatWon => Some(Outcome::Won),
        ModeEvent::CombatLost => Some(Outcome::Lost),
        ModeEvent::CombatAborted => Some(Outcome::Aborted),
        _ => None,
    })
}

fn tally(summary: &mut RunSummary, snapshot: &CombatSnapshot) {
    for event in &snapshot.events {
        match event {
            CombatEvent::EnemyKilled { .. } => summary.enemies_killed += 1,
            CombatEvent::ProjectileSpawned {
                origin: ProjectileOrigin::Player,
                ..
            } => summary.shots_fired += 1,
            CombatEvent::ProjectileRecycled { .. } => summary.shots_recycled += 1,
            CombatEvent::PlayerHit { damage } => summary.damage_taken += damage,
            _ => {}
        }
    }
}

/// Aim from the player toward the closest live enemy.
fn nearest_enemy_direction(snapshot: &CombatSnapshot) -> Option<Vec3> {
    let from = snapshot.player.position;
    snapshot
        .enemies
        .iter()
        .filter(|e| e.alive)
        .min_by(|a, b| {
            from.distance_squared(a.position)
                .total_cmp(&from.distance_squared(b.position))
        })
        .map(|e| e.position - from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_autopilot_is_deterministic() {
        let options = AutopilotOptions {
            ticks: 600,
            ..Default::default()
        };
        let a = run(CombatConfig::default(), &options).unwrap();
        let b = run(CombatConfig::default(), &options).unwrap();
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
        assert!(a.frames > 0);
        assert!(a.shots_fired > 0);
    }

    #[test]
    fn test_ground_autopilot_runs() {
        let options = AutopilotOptions {
            ticks: 120,
            ground: true,
            ..Default::default()
        };
        let summary = run(CombatConfig::default(), &options).unwrap();
        assert_eq!(summary.mode, GameMode::GroundCombat);
        assert_ne!(summary.outcome, Outcome::Aborted);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = CombatConfig {
            pool_capacity: 0,
            ..Default::default()
        };
        assert!(run(config, &AutopilotOptions::default()).is_err());
    }

    #[test]
    fn test_kills_are_rewarded() {
        let options = AutopilotOptions {
            ticks: 3600,
            class: PlayerClass::Phantom,
            ..Default::default()
        };
        let summary = run(CombatConfig::default(), &options).unwrap();
        assert_eq!(
            summary.player.currency,
            summary.enemies_killed * CombatConfig::default().reward_base_currency
        );
    }
}
