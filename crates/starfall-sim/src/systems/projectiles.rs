//! Projectile integration and retirement.

use starfall_core::events::CombatEvent;
use starfall_core::render::VisualAdapter;

use crate::pool::{ProjectilePool, SlotId};

/// Step 1: move every active projectile.
pub fn advance(pool: &mut ProjectilePool, dt: f32) {
    pool.advance(dt);
}

/// Step 6: free slots whose projectile hit something or outran its range.
pub fn retire(
    pool: &mut ProjectilePool,
    visuals: &mut dyn VisualAdapter,
    hit: &[SlotId],
    events: &mut Vec<CombatEvent>,
) {
    for &slot in hit {
        pool.release(slot, visuals);
    }

    let expired: Vec<SlotId> = pool
        .iter()
        .filter(|(_, p)| p.is_expired())
        .map(|(slot, _)| slot)
        .collect();
    for slot in expired {
        if pool.release(slot, visuals).is_some() {
            events.push(CombatEvent::ProjectileExpired { slot: slot.0 });
        }
    }
}
