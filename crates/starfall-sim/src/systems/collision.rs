//! Projectile hit detection.
//!
//! Broad phase: squared distance against a fraction of the projectile's
//! squared range. Exact test: the segment swept this tick against the
//! target's bounding sphere. A projectile resolves against at most one
//! target per tick, the first hit in roster order.

use hecs::{Entity, World};

use starfall_core::components::{ActorVisual, EnemyBrain, EnemyId, Lifecycle, Transform};
use starfall_core::enums::{EnemyKind, ProjectileOrigin};
use starfall_core::error::TickFault;
use starfall_core::events::CombatEvent;
use starfall_core::render::{VisualAdapter, VisualHandle};
use starfall_core::types::segment_hits_sphere;
use starfall_core::Vec3;

use starfall_ai::profiles::get_profile;

use crate::player::Player;
use crate::pool::Projectile;

/// An enemy that player projectiles can hit this tick.
#[derive(Debug, Clone)]
pub struct Target {
    pub entity: Entity,
    pub enemy_id: u32,
    pub kind: EnemyKind,
    pub position: Vec3,
    pub hit_radius: f32,
    pub visual: Option<VisualHandle>,
    /// Cleared when the target dies mid-tick so later projectiles skip it.
    pub alive: bool,
}

/// What a projectile struck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// Index into the target list.
    Enemy(usize),
    Player,
}

/// Gather live enemies in roster order.
pub fn collect_targets(world: &World, roster: &[Entity], faults: &mut Vec<TickFault>) -> Vec<Target> {
    let mut targets = Vec::with_capacity(roster.len());
    for (index, &entity) in roster.iter().enumerate() {
        let Ok(mut query) =
            world.query_one::<(&EnemyId, &EnemyBrain, &Transform, &Lifecycle, &ActorVisual)>(entity)
        else {
            faults.push(TickFault::MissingActor { index });
            continue;
        };
        let Some((id, brain, transform, lifecycle, visual)) = query.get() else {
            faults.push(TickFault::MissingActor { index });
            continue;
        };
        if *lifecycle != Lifecycle::Alive {
            continue;
        }
        targets.push(Target {
            entity,
            enemy_id: id.0,
            kind: brain.kind,
            position: transform.position,
            hit_radius: get_profile(brain.kind).hit_radius,
            visual: visual.handle,
            alive: true,
        });
    }
    targets
}

/// Find the single thing `projectile` hit this tick, if any.
pub fn find_hit(
    projectile: &Projectile,
    targets: &[Target],
    player: &Player,
    visuals: &dyn VisualAdapter,
    broad_phase_factor: f32,
    events: &mut Vec<CombatEvent>,
    faults: &mut Vec<TickFault>,
) -> Option<Hit> {
    match projectile.origin {
        ProjectileOrigin::Player => {
            find_enemy_hit(projectile, targets, visuals, broad_phase_factor, events, faults)
                .map(Hit::Enemy)
        }
        ProjectileOrigin::Enemy => {
            let struck = player.is_alive()
                && segment_hits_sphere(
                    projectile.previous_position,
                    projectile.position,
                    player.position,
                    player.hit_radius,
                );
            struck.then_some(Hit::Player)
        }
    }
}

fn find_enemy_hit(
    projectile: &Projectile,
    targets: &[Target],
    visuals: &dyn VisualAdapter,
    broad_phase_factor: f32,
    events: &mut Vec<CombatEvent>,
    faults: &mut Vec<TickFault>,
) -> Option<usize> {
    let threshold = projectile.range * projectile.range * broad_phase_factor;
    for (index, target) in targets.iter().enumerate() {
        if !target.alive {
            continue;
        }
        if projectile.position.distance_squared(target.position) >= threshold {
            continue;
        }
        if !target.visual.is_some_and(|h| visuals.is_live(h)) {
            faults.push(TickFault::MissingTarget {
                enemy_id: target.enemy_id,
            });
            events.push(CombatEvent::TargetSkipped {
                enemy_id: target.enemy_id,
            });
            continue;
        }
        if segment_hits_sphere(
            projectile.previous_position,
            projectile.position,
            target.position,
            target.hit_radius,
        ) {
            return Some(index);
        }
    }
    None
}
