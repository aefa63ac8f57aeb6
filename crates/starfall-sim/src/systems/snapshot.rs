//! Snapshot system: builds the read-only `CombatSnapshot` and pushes
//! current transforms to the rendering layer.

use hecs::{Entity, World};

use starfall_core::components::*;
use starfall_core::enums::{GameMode, SessionPhase};
use starfall_core::events::{CombatEvent, EffectRequest};
use starfall_core::render::VisualAdapter;
use starfall_core::state::*;
use starfall_core::types::SimTime;
use starfall_core::Vec3;

use starfall_ai::fsm::hover_offset;

use crate::player::Player;
use crate::pool::ProjectilePool;

/// Everything the snapshot is built from.
pub struct SnapshotSource<'a> {
    pub world: &'a World,
    pub roster: &'a [Entity],
    pub pool: &'a ProjectilePool,
    pub player: &'a Player,
    pub time: SimTime,
    pub phase: SessionPhase,
    pub mode: GameMode,
}

/// Build a complete snapshot of the session.
pub fn build_snapshot(
    source: &SnapshotSource<'_>,
    events: Vec<CombatEvent>,
    effects: Vec<EffectRequest>,
) -> CombatSnapshot {
    let enemies = build_enemies(source.world, source.roster);
    let active_enemy_count = enemies.iter().filter(|e| e.alive).count();

    CombatSnapshot {
        time: source.time,
        phase: source.phase,
        mode: source.mode,
        player: source.player.view(),
        enemies,
        projectiles: build_projectiles(source.pool),
        pool: PoolView {
            capacity: source.pool.capacity(),
            in_use: source.pool.in_use(),
        },
        active_enemy_count,
        events,
        effects,
    }
}

/// Enemy views in roster order.
fn build_enemies(world: &World, roster: &[Entity]) -> Vec<EnemyView> {
    roster
        .iter()
        .filter_map(|&entity| {
            let mut query = world
                .query_one::<(&EnemyId, &EnemyBrain, &Transform, &Health, &Lifecycle)>(entity)
                .ok()?;
            let (id, brain, transform, health, lifecycle) = query.get()?;
            Some(EnemyView {
                enemy_id: id.0,
                kind: brain.kind,
                position: transform.position,
                render_position: render_position(brain, transform),
                facing: transform.facing,
                health: health.current,
                max_health: health.max,
                ai_state: brain.state,
                alive: *lifecycle == Lifecycle::Alive,
            })
        })
        .collect()
}

fn build_projectiles(pool: &ProjectilePool) -> Vec<ProjectileView> {
    pool.iter()
        .map(|(slot, p)| ProjectileView {
            slot: slot.0,
            origin: p.origin,
            position: p.position,
            direction: p.direction,
            style: p.style,
        })
        .collect()
}

/// Logical position plus the visual-only hover bob.
fn render_position(brain: &EnemyBrain, transform: &Transform) -> Vec3 {
    transform.position + Vec3::Y * hover_offset(brain.kind, brain.hover_phase)
}

/// Push enemy and projectile transforms to their visuals.
pub fn sync_visuals(
    world: &World,
    roster: &[Entity],
    pool: &ProjectilePool,
    visuals: &mut dyn VisualAdapter,
) {
    for &entity in roster {
        let Ok(mut query) =
            world.query_one::<(&EnemyBrain, &Transform, &Lifecycle, &ActorVisual)>(entity)
        else {
            continue;
        };
        let Some((brain, transform, lifecycle, visual)) = query.get() else {
            continue;
        };
        if let (Lifecycle::Alive, Some(handle)) = (lifecycle, visual.handle) {
            visuals.set_transform(handle, render_position(brain, transform), transform.facing);
        }
    }
    pool.sync_visuals(visuals);
}
