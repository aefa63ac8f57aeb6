//! Damage application, death marking and rewards.

use hecs::World;

use starfall_core::components::{ActorVisual, Health, Lifecycle};
use starfall_core::config::CombatConfig;
use starfall_core::enums::{EffectKind, EnemyKind};
use starfall_core::events::{CombatEvent, EffectRequest};
use starfall_core::render::VisualAdapter;
use starfall_core::Vec3;

use crate::actor;
use crate::player::Player;
use crate::systems::collision::Target;

/// Experience and currency for destroying an enemy of `kind`.
pub fn reward_for(kind: EnemyKind, config: &CombatConfig) -> (u32, u32) {
    let tier = match kind {
        EnemyKind::Drone => 1.0,
        _ => config.reward_tier_multiplier,
    };
    (
        (config.reward_base_xp as f32 * tier).round() as u32,
        (config.reward_base_currency as f32 * tier).round() as u32,
    )
}

/// Per-tick sinks shared by the damage helpers.
pub struct DamageContext<'a> {
    pub config: &'a CombatConfig,
    pub tick: u64,
    pub events: &'a mut Vec<CombatEvent>,
    pub effects: &'a mut Vec<EffectRequest>,
}

impl DamageContext<'_> {
    fn effect(&mut self, kind: EffectKind, position: Vec3) {
        let duration_ticks = match kind {
            EffectKind::HitSpark => self.config.effect_hit_spark_ticks,
            EffectKind::Explosion => self.config.effect_explosion_ticks,
            EffectKind::MuzzleFlash => self.config.effect_muzzle_flash_ticks,
            EffectKind::LevelUp => self.config.effect_level_up_ticks,
        };
        self.effects.push(EffectRequest {
            kind,
            position,
            start_tick: self.tick,
            duration_ticks,
        });
    }
}

/// Apply a player projectile hit to `target`.
///
/// On the hit that takes health to zero the enemy is marked dying, its
/// visual hidden, and the reward granted. Removal happens on a later tick.
pub fn hit_enemy(
    world: &mut World,
    visuals: &mut dyn VisualAdapter,
    target: &mut Target,
    power: f32,
    player: &mut Player,
    ctx: &mut DamageContext<'_>,
) {
    let Ok((health, lifecycle, visual)) =
        world.query_one_mut::<(&mut Health, &mut Lifecycle, &ActorVisual)>(target.entity)
    else {
        target.alive = false;
        return;
    };
    if *lifecycle != Lifecycle::Alive {
        target.alive = false;
        return;
    }

    let dealt = actor::apply_damage(health, power, 0);
    ctx.events.push(CombatEvent::EnemyHit {
        enemy_id: target.enemy_id,
        damage: dealt,
    });
    ctx.effect(EffectKind::HitSpark, target.position);
    log::debug!(
        "Enemy {} hit for {:.1} ({:.1} left)",
        target.enemy_id,
        dealt,
        health.current
    );

    if !health.is_depleted() {
        return;
    }

    *lifecycle = Lifecycle::Dying {
        since_tick: ctx.tick,
    };
    target.alive = false;
    if let Some(handle) = visual.handle {
        visuals.set_visible(handle, false);
    }

    let (experience, currency) = reward_for(target.kind, ctx.config);
    ctx.events.push(CombatEvent::EnemyKilled {
        enemy_id: target.enemy_id,
        kind: target.kind,
        experience,
        currency,
    });
    ctx.effect(EffectKind::Explosion, target.position);

    player.add_currency(currency);
    let levels = player.gain_experience(experience);
    if levels > 0 {
        ctx.events.push(CombatEvent::PlayerLevelUp {
            level: player.level,
        });
        ctx.effect(EffectKind::LevelUp, player.position);
    }
}

/// Apply an enemy projectile hit to the player.
///
/// Returns true if this hit defeated the player.
pub fn hit_player(player: &mut Player, power: f32, ctx: &mut DamageContext<'_>) -> bool {
    if !player.is_alive() {
        return false;
    }
    let dealt = player.take_damage(power);
    ctx.events.push(CombatEvent::PlayerHit { damage: dealt });
    ctx.effect(EffectKind::HitSpark, player.position);
    !player.is_alive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drone_reward_is_base() {
        let config = CombatConfig::default();
        assert_eq!(reward_for(EnemyKind::Drone, &config), (20, 10));
    }

    #[test]
    fn test_higher_tier_reward() {
        let config = CombatConfig::default();
        assert_eq!(reward_for(EnemyKind::Turret, &config), (50, 25));
    }
}
