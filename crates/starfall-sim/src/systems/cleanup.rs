//! Cleanup system: removes enemies that died on an earlier tick.
//!
//! Death is marked the tick health reaches zero; the entity and its visual
//! are only torn down from the next tick on.

use hecs::{Entity, World};

use starfall_core::components::{EnemyId, Lifecycle};
use starfall_core::error::TickFault;
use starfall_core::events::CombatEvent;
use starfall_core::render::VisualAdapter;

use crate::world_setup;

/// Step 0: reap dying enemies and drop stale roster entries.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(
    world: &mut World,
    roster: &mut Vec<Entity>,
    visuals: &mut dyn VisualAdapter,
    current_tick: u64,
    despawn_buffer: &mut Vec<Entity>,
    events: &mut Vec<CombatEvent>,
    faults: &mut Vec<TickFault>,
) {
    despawn_buffer.clear();

    let mut index = 0;
    roster.retain(|&entity| {
        let keep = match world.get::<&Lifecycle>(entity) {
            Ok(lifecycle) => match *lifecycle {
                Lifecycle::Alive => true,
                Lifecycle::Dying { since_tick } => {
                    if since_tick < current_tick {
                        despawn_buffer.push(entity);
                        false
                    } else {
                        true
                    }
                }
            },
            Err(_) => {
                faults.push(TickFault::MissingActor { index });
                false
            }
        };
        index += 1;
        keep
    });

    for entity in despawn_buffer.drain(..) {
        if let Ok(id) = world.get::<&EnemyId>(entity).map(|id| id.0) {
            events.push(CombatEvent::EnemyRemoved { enemy_id: id });
        }
        world_setup::despawn_enemy(world, visuals, entity);
    }
}

/// Tear down every enemy in the roster.
pub fn despawn_all(world: &mut World, roster: &mut Vec<Entity>, visuals: &mut dyn VisualAdapter) {
    for entity in roster.drain(..) {
        world_setup::despawn_enemy(world, visuals, entity);
    }
    world.clear();
}
