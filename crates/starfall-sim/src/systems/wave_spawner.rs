//! Wave composition for combat sessions.

use starfall_core::constants::GROUND_TURRET_EVERY;
use starfall_core::enums::EnemyKind;

/// Kinds for a wave of `count` enemies.
///
/// Space waves are all drones. Ground waves replace every
/// `GROUND_TURRET_EVERY`-th enemy with a turret.
pub fn composition(count: u32, ground: bool) -> Vec<EnemyKind> {
    (1..=count)
        .map(|n| {
            if ground && n % GROUND_TURRET_EVERY == 0 {
                EnemyKind::Turret
            } else {
                EnemyKind::Drone
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_wave_is_all_drones() {
        let wave = composition(7, false);
        assert_eq!(wave.len(), 7);
        assert!(wave.iter().all(|k| *k == EnemyKind::Drone));
    }

    #[test]
    fn test_ground_wave_mixes_turrets() {
        let wave = composition(6, true);
        let turrets = wave.iter().filter(|k| **k == EnemyKind::Turret).count();
        assert_eq!(turrets, 2);
        assert_eq!(wave[2], EnemyKind::Turret);
        assert_eq!(wave[0], EnemyKind::Drone);
    }

    #[test]
    fn test_empty_wave() {
        assert!(composition(0, true).is_empty());
    }
}
