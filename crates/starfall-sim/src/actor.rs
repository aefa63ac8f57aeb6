//! Actor damage model shared by the player and enemies.

use starfall_core::components::Health;
use starfall_core::constants::DEFENSE_REDUCTION_PER_LEVEL;

/// Fraction of incoming damage that gets through at a defense level.
pub fn damage_multiplier(defense_level: u32) -> f32 {
    (1.0 - defense_level as f32 * DEFENSE_REDUCTION_PER_LEVEL).max(0.0)
}

/// Apply incoming damage and return the amount actually removed.
///
/// Never heals: negative or NaN amounts deal nothing. Health floors at zero.
pub fn apply_damage(health: &mut Health, amount: f32, defense_level: u32) -> f32 {
    if amount.is_nan() || amount <= 0.0 {
        return 0.0;
    }
    let before = health.current.clamp(0.0, health.max);
    let after = (before - amount * damage_multiplier(defense_level)).max(0.0);
    health.current = after;
    before - after
}

/// Restore health, never above max.
pub fn heal(health: &mut Health, amount: f32) {
    if amount > 0.0 {
        health.current = (health.current + amount).min(health.max);
    }
}

/// Change max health, keeping current within the new bound.
pub fn set_max_health(health: &mut Health, max: f32) {
    health.max = max.max(0.0);
    health.current = health.current.min(health.max);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_monotonic_and_bounded() {
        let amounts = [-50.0, -0.1, 0.0, 0.5, 10.0, 99.9, 100.0, 250.0, f32::NAN];
        for defense in [0, 1, 3, 5, 25] {
            for &amount in &amounts {
                let mut health = Health::full(100.0);
                health.current = 60.0;
                let before = health.current;
                let dealt = apply_damage(&mut health, amount, defense);
                assert!(health.current <= before, "damage {amount} healed");
                assert!(
                    (0.0..=health.max).contains(&health.current),
                    "health {} out of range for amount {amount}",
                    health.current
                );
                assert!(dealt >= 0.0);
            }
        }
    }

    #[test]
    fn test_overkill_floors_at_zero() {
        let mut health = Health::full(50.0);
        let dealt = apply_damage(&mut health, 500.0, 0);
        assert_eq!(health.current, 0.0);
        assert_eq!(dealt, 50.0);
        assert!(health.is_depleted());
    }

    #[test]
    fn test_defense_reduces_damage() {
        let mut health = Health::full(100.0);
        let dealt = apply_damage(&mut health, 20.0, 2);
        assert!((dealt - 18.0).abs() < 1e-5, "two levels = 10% off, got {dealt}");
        assert!((health.current - 82.0).abs() < 1e-5);
    }

    #[test]
    fn test_defense_never_inverts() {
        assert_eq!(damage_multiplier(40), 0.0);
        let mut health = Health::full(10.0);
        apply_damage(&mut health, 5.0, 40);
        assert_eq!(health.current, 10.0);
    }

    #[test]
    fn test_heal_and_max() {
        let mut health = Health::full(100.0);
        apply_damage(&mut health, 30.0, 0);
        heal(&mut health, 50.0);
        assert_eq!(health.current, 100.0);
        heal(&mut health, -10.0);
        assert_eq!(health.current, 100.0);
        set_max_health(&mut health, 80.0);
        assert_eq!(health.current, 80.0);
    }
}
