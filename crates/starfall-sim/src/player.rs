//! Player actor: energy-gated attack generation, upgrades and rewards.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use starfall_core::components::Health;
use starfall_core::constants::*;
use starfall_core::enums::{AttackButton, PlayerClass, ProjectileOrigin, UpgradeStat, VisualStyle};
use starfall_core::error::UpgradeError;
use starfall_core::state::PlayerView;

use crate::actor;
use crate::pool::ProjectileSpec;

/// Per-stat upgrade levels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Upgrades {
    pub attack: u32,
    pub defense: u32,
    pub energy: u32,
    pub health: u32,
}

impl Upgrades {
    pub fn level(&self, stat: UpgradeStat) -> u32 {
        match stat {
            UpgradeStat::Attack => self.attack,
            UpgradeStat::Defense => self.defense,
            UpgradeStat::Energy => self.energy,
            UpgradeStat::Health => self.health,
        }
    }

    fn set_level(&mut self, stat: UpgradeStat, level: u32) {
        match stat {
            UpgradeStat::Attack => self.attack = level,
            UpgradeStat::Defense => self.defense = level,
            UpgradeStat::Energy => self.energy = level,
            UpgradeStat::Health => self.health = level,
        }
    }
}

/// Currency cost to raise `stat` from `current_level`.
/// Returns None if already at max level.
pub fn upgrade_cost(stat: UpgradeStat, current_level: u32) -> Option<u32> {
    if current_level >= MAX_UPGRADE_LEVEL {
        return None;
    }
    let base = match stat {
        UpgradeStat::Attack => 50,
        UpgradeStat::Defense => 60,
        UpgradeStat::Energy => 40,
        UpgradeStat::Health => 40,
    };
    Some(base * (current_level + 1))
}

/// Special-attack archetype for a class: (speed, power multiplier, range, style).
fn special_profile(class: PlayerClass) -> (f32, f32, f32, VisualStyle) {
    match class {
        PlayerClass::Titan => (30.0, 3.0, 80.0, VisualStyle::HeavyOrb),
        PlayerClass::Phantom => (120.0, 1.5, 250.0, VisualStyle::LanceBeam),
    }
}

/// The player. Shared with the resolver for the duration of a tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub class: PlayerClass,
    pub position: Vec3,
    pub health: Health,
    pub energy: f32,
    pub max_energy: f32,
    /// Base projectile power before upgrades.
    pub attack_power: f32,
    pub hit_radius: f32,
    pub upgrades: Upgrades,
    pub currency: u32,
    /// Experience toward the next level.
    pub experience: u32,
    pub level: u32,
}

impl Player {
    pub fn new(class: PlayerClass) -> Self {
        Self {
            class,
            position: Vec3::ZERO,
            health: Health::full(PLAYER_BASE_HEALTH),
            energy: PLAYER_BASE_ENERGY,
            max_energy: PLAYER_BASE_ENERGY,
            attack_power: PLAYER_BASE_ATTACK,
            hit_radius: PLAYER_HIT_RADIUS,
            upgrades: Upgrades::default(),
            currency: 0,
            experience: 0,
            level: 1,
        }
    }

    pub fn is_alive(&self) -> bool {
        !self.health.is_depleted()
    }

    /// Apply incoming damage after the defense upgrade. Returns damage dealt.
    pub fn take_damage(&mut self, amount: f32) -> f32 {
        actor::apply_damage(&mut self.health, amount, self.upgrades.defense)
    }

    /// Projectile power after the attack upgrade.
    pub fn attack_multiplier(&self) -> f32 {
        1.0 + self.upgrades.attack as f32 * ATTACK_BONUS_PER_LEVEL
    }

    /// Fire the attack bound to `button`.
    pub fn attack(&mut self, button: AttackButton, direction: Vec3) -> Option<ProjectileSpec> {
        match button {
            AttackButton::Basic => self.attack_basic(direction),
            AttackButton::Special => self.attack_special(direction),
        }
    }

    /// Basic shot. `None` (and no energy spent) if energy is short.
    pub fn attack_basic(&mut self, direction: Vec3) -> Option<ProjectileSpec> {
        if !self.spend_energy(COST_BASIC) {
            return None;
        }
        Some(ProjectileSpec {
            origin: ProjectileOrigin::Player,
            position: self.position,
            direction: aim(direction),
            speed: BASIC_SHOT_SPEED,
            power: self.attack_power * self.attack_multiplier(),
            range: BASIC_SHOT_RANGE,
            style: VisualStyle::PlayerBolt,
        })
    }

    /// Class special. `None` (and no energy spent) if energy is short.
    pub fn attack_special(&mut self, direction: Vec3) -> Option<ProjectileSpec> {
        if !self.spend_energy(COST_SPECIAL) {
            return None;
        }
        let (speed, power_factor, range, style) = special_profile(self.class);
        Some(ProjectileSpec {
            origin: ProjectileOrigin::Player,
            position: self.position,
            direction: aim(direction),
            speed,
            power: self.attack_power * power_factor * self.attack_multiplier(),
            range,
            style,
        })
    }

    /// Deduct `cost` if the whole amount is available.
    fn spend_energy(&mut self, cost: f32) -> bool {
        if !self.is_alive() || self.energy < cost {
            return false;
        }
        self.energy -= cost;
        true
    }

    /// Regain energy over `dt` seconds, clamped to max.
    pub fn regenerate(&mut self, rate: f32, dt: f32) {
        if dt > 0.0 && rate > 0.0 && self.is_alive() {
            self.energy = (self.energy + rate * dt).min(self.max_energy);
        }
    }

    /// Experience needed to leave the current level.
    pub fn experience_to_next(&self) -> u32 {
        self.level * XP_PER_LEVEL
    }

    /// Add experience and return how many levels were gained.
    pub fn gain_experience(&mut self, amount: u32) -> u32 {
        self.experience = self.experience.saturating_add(amount);
        let mut gained = 0;
        while self.experience >= self.experience_to_next() {
            self.experience -= self.experience_to_next();
            self.level += 1;
            gained += 1;
        }
        gained
    }

    pub fn add_currency(&mut self, amount: u32) {
        self.currency = self.currency.saturating_add(amount);
    }

    /// Buy one level of `stat`. Returns the currency spent.
    pub fn purchase_upgrade(&mut self, stat: UpgradeStat) -> Result<u32, UpgradeError> {
        let level = self.upgrades.level(stat);
        let cost = upgrade_cost(stat, level).ok_or(UpgradeError::MaxLevel { stat })?;
        if self.currency < cost {
            return Err(UpgradeError::InsufficientCurrency {
                cost,
                available: self.currency,
            });
        }
        self.currency -= cost;
        self.upgrades.set_level(stat, level + 1);
        self.apply_pool_upgrades();
        Ok(cost)
    }

    /// Re-derive max energy and max health from upgrade levels.
    /// Raising a max also grants the difference.
    fn apply_pool_upgrades(&mut self) {
        let max_energy =
            PLAYER_BASE_ENERGY * (1.0 + self.upgrades.energy as f32 * POOL_BONUS_PER_LEVEL);
        self.energy += (max_energy - self.max_energy).max(0.0);
        self.max_energy = max_energy;
        self.energy = self.energy.min(self.max_energy);

        let max_health =
            PLAYER_BASE_HEALTH * (1.0 + self.upgrades.health as f32 * POOL_BONUS_PER_LEVEL);
        let grant = (max_health - self.health.max).max(0.0);
        actor::set_max_health(&mut self.health, max_health);
        if self.is_alive() {
            actor::heal(&mut self.health, grant);
        }
    }

    pub fn view(&self) -> PlayerView {
        PlayerView {
            class: self.class,
            position: self.position,
            health: self.health.current,
            max_health: self.health.max,
            energy: self.energy,
            max_energy: self.max_energy,
            level: self.level,
            experience: self.experience,
            currency: self.currency,
        }
    }
}

/// Normalize an aim direction; a zero vector fires straight ahead.
fn aim(direction: Vec3) -> Vec3 {
    direction.try_normalize().unwrap_or(Vec3::NEG_Z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_energy_gate_leaves_energy_untouched() {
        let mut player = Player::new(PlayerClass::Titan);
        player.energy = 5.0;
        assert!(player.attack_basic(Vec3::X).is_none());
        assert_eq!(player.energy, 5.0);
        assert!(player.attack_special(Vec3::X).is_none());
        assert_eq!(player.energy, 5.0);
    }

    #[test]
    fn test_attack_deducts_exact_cost_once() {
        let mut player = Player::new(PlayerClass::Phantom);
        player.energy = 40.0;
        assert!(player.attack_basic(Vec3::X).is_some());
        assert_eq!(player.energy, 30.0);
        assert!(player.attack_special(Vec3::X).is_some());
        assert_eq!(player.energy, 5.0);
        assert!(player.attack(AttackButton::Special, Vec3::X).is_none());
        assert_eq!(player.energy, 5.0);
    }

    #[test]
    fn test_special_needs_full_cost() {
        let mut player = Player::new(PlayerClass::Titan);
        player.energy = COST_SPECIAL - 0.01;
        assert!(player.attack_special(Vec3::X).is_none());
        assert_eq!(player.energy, COST_SPECIAL - 0.01);
        // Basic is still affordable.
        assert!(player.attack_basic(Vec3::X).is_some());
    }

    #[test]
    fn test_attack_upgrade_scales_basic_power() {
        let mut player = Player::new(PlayerClass::Titan);
        let base = player.attack_basic(Vec3::X).unwrap().power;
        player.upgrades.attack = 2;
        let boosted = player.attack_basic(Vec3::X).unwrap().power;
        assert!((boosted - base * 1.4).abs() < 1e-4);
    }

    #[test]
    fn test_special_archetypes_differ() {
        let heavy = Player::new(PlayerClass::Titan)
            .attack_special(Vec3::X)
            .unwrap();
        let light = Player::new(PlayerClass::Phantom)
            .attack_special(Vec3::X)
            .unwrap();
        assert!(heavy.power > light.power);
        assert!(heavy.speed < light.speed);
        assert!(heavy.range < light.range);
    }

    #[test]
    fn test_direction_is_normalized() {
        let mut player = Player::new(PlayerClass::Titan);
        let spec = player.attack_basic(Vec3::new(3.0, 0.0, 4.0)).unwrap();
        assert!((spec.direction.length() - 1.0).abs() < 1e-5);
        let spec = player.attack_basic(Vec3::ZERO).unwrap();
        assert_eq!(spec.direction, Vec3::NEG_Z);
    }

    #[test]
    fn test_dead_player_cannot_attack() {
        let mut player = Player::new(PlayerClass::Titan);
        player.take_damage(1000.0);
        assert!(!player.is_alive());
        assert!(player.attack_basic(Vec3::X).is_none());
        assert_eq!(player.energy, PLAYER_BASE_ENERGY);
    }

    #[test]
    fn test_regenerate_clamps() {
        let mut player = Player::new(PlayerClass::Titan);
        player.energy = 90.0;
        player.regenerate(5.0, 1.0);
        assert_eq!(player.energy, 95.0);
        player.regenerate(5.0, 10.0);
        assert_eq!(player.energy, player.max_energy);
    }

    #[test]
    fn test_experience_levels() {
        let mut player = Player::new(PlayerClass::Titan);
        assert_eq!(player.gain_experience(50), 0);
        assert_eq!(player.gain_experience(60), 1);
        assert_eq!(player.level, 2);
        assert_eq!(player.experience, 10);
        // 200 to leave level 2, 300 to leave level 3.
        assert_eq!(player.gain_experience(490), 2);
        assert_eq!(player.level, 4);
        assert_eq!(player.experience, 0);
    }

    #[test]
    fn test_purchase_upgrade() {
        let mut player = Player::new(PlayerClass::Titan);
        assert_eq!(
            player.purchase_upgrade(UpgradeStat::Attack),
            Err(UpgradeError::InsufficientCurrency {
                cost: 50,
                available: 0
            })
        );
        player.add_currency(500);
        assert_eq!(player.purchase_upgrade(UpgradeStat::Attack), Ok(50));
        assert_eq!(player.purchase_upgrade(UpgradeStat::Attack), Ok(100));
        assert_eq!(player.upgrades.attack, 2);
        assert_eq!(player.currency, 350);
    }

    #[test]
    fn test_upgrade_max_level() {
        let mut player = Player::new(PlayerClass::Titan);
        player.add_currency(100_000);
        for _ in 0..MAX_UPGRADE_LEVEL {
            player.purchase_upgrade(UpgradeStat::Defense).unwrap();
        }
        assert_eq!(
            player.purchase_upgrade(UpgradeStat::Defense),
            Err(UpgradeError::MaxLevel {
                stat: UpgradeStat::Defense
            })
        );
    }

    #[test]
    fn test_pool_upgrades_raise_max() {
        let mut player = Player::new(PlayerClass::Titan);
        player.add_currency(1000);
        player.energy = 50.0;
        player.purchase_upgrade(UpgradeStat::Energy).unwrap();
        assert!((player.max_energy - 110.0).abs() < 1e-4);
        assert!((player.energy - 60.0).abs() < 1e-4);

        player.take_damage(30.0);
        player.purchase_upgrade(UpgradeStat::Health).unwrap();
        assert!((player.health.max - 110.0).abs() < 1e-4);
        assert!((player.health.current - 80.0).abs() < 1e-4);
    }

    #[test]
    fn test_defense_upgrade_reduces_player_damage() {
        let mut player = Player::new(PlayerClass::Titan);
        player.upgrades.defense = 4;
        let dealt = player.take_damage(10.0);
        assert!((dealt - 8.0).abs() < 1e-5);
    }
}
