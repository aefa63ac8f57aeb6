#[cfg(test)]
mod tests {
    use glam::Vec3;

    use crate::commands::ModeCommand;
    use crate::config::CombatConfig;
    use crate::enums::*;
    use crate::error::ConfigurationError;
    use crate::events::CombatEvent;
    use crate::render::{HeadlessVisuals, SpawnKind, SpawnRequest, VisualAdapter};
    use crate::state::CombatSnapshot;
    use crate::terrain::HeightProvider;
    use crate::types::{clamp_dt, segment_hits_sphere, SimTime};

    #[test]
    fn test_combat_event_tagged_serde() {
        let event = CombatEvent::EnemyKilled {
            enemy_id: 7,
            kind: EnemyKind::Turret,
            experience: 50,
            currency: 25,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"EnemyKilled\""), "got {json}");
        let back: CombatEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }

    #[test]
    fn test_mode_command_from_frontend_json() {
        let json = r#"{"type":"Attack","button":"Special","direction":[0.0,0.0,-1.0]}"#;
        let cmd: ModeCommand = serde_json::from_str(json).unwrap();
        assert_eq!(
            cmd,
            ModeCommand::Attack {
                button: AttackButton::Special,
                direction: Vec3::NEG_Z,
            }
        );
    }

    #[test]
    fn test_default_snapshot_serializes() {
        let snap = CombatSnapshot::default();
        let json = serde_json::to_string(&snap).unwrap();
        let back: CombatSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.phase, SessionPhase::Inactive);
        assert_eq!(back.active_enemy_count, 0);
    }

    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        for _ in 0..10 {
            time.advance(0.1);
        }
        assert_eq!(time.tick, 10);
        assert!((time.elapsed_secs - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_clamp_dt() {
        assert_eq!(clamp_dt(0.016, 0.1), 0.016);
        assert_eq!(clamp_dt(3.0, 0.1), 0.1, "stalls are capped");
        assert_eq!(clamp_dt(-1.0, 0.1), 0.0);
        assert_eq!(clamp_dt(f32::NAN, 0.1), 0.0);
    }

    #[test]
    fn test_segment_hits_sphere() {
        let center = Vec3::new(0.0, 0.0, 0.0);
        // Segment passes straight through the sphere even though both
        // endpoints are outside it.
        assert!(segment_hits_sphere(
            Vec3::new(-5.0, 0.0, 0.0),
            Vec3::new(5.0, 0.0, 0.0),
            center,
            1.0
        ));
        // Parallel miss.
        assert!(!segment_hits_sphere(
            Vec3::new(-5.0, 2.0, 0.0),
            Vec3::new(5.0, 2.0, 0.0),
            center,
            1.0
        ));
        // Segment stops short.
        assert!(!segment_hits_sphere(
            Vec3::new(-5.0, 0.0, 0.0),
            Vec3::new(-2.0, 0.0, 0.0),
            center,
            1.0
        ));
        // Degenerate segment inside the sphere.
        assert!(segment_hits_sphere(
            Vec3::new(0.5, 0.0, 0.0),
            Vec3::new(0.5, 0.0, 0.0),
            center,
            1.0
        ));
    }

    #[test]
    fn test_config_defaults_validate() {
        let config = CombatConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.pool_capacity, 50);
        assert_eq!(config.ai_throttle_normal, 5);
        assert_eq!(config.ai_throttle_degraded, 10);
        assert_eq!(config.engage_hysteresis, 0.0);
    }

    #[test]
    fn test_config_partial_json_uses_defaults() {
        let config = CombatConfig::from_json(r#"{ "pool_capacity": 8, "seed": 9 }"#).unwrap();
        assert_eq!(config.pool_capacity, 8);
        assert_eq!(config.seed, 9);
        assert_eq!(config.max_tick_dt, CombatConfig::default().max_tick_dt);
    }

    #[test]
    fn test_config_zero_capacity_rejected() {
        let err = CombatConfig::from_json(r#"{ "pool_capacity": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigurationError::ZeroPoolCapacity));
    }

    #[test]
    fn test_config_bad_json_is_parse_error() {
        let err = CombatConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigurationError::Parse(_)));
    }

    #[test]
    fn test_config_load_missing_file_falls_back() {
        let path = std::env::temp_dir().join("starfall-config-does-not-exist.json");
        let config = CombatConfig::load(&path);
        assert_eq!(config, CombatConfig::default());
    }

    #[test]
    fn test_config_load_from_file() {
        let path = std::env::temp_dir().join(format!(
            "starfall-config-test-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"{ "wave_size": 12, "engage_hysteresis": 0.05 }"#).unwrap();
        let config = CombatConfig::load(&path);
        std::fs::remove_file(&path).ok();
        assert_eq!(config.wave_size, 12);
        assert!((config.engage_hysteresis - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_headless_visuals_lifecycle() {
        let mut visuals = HeadlessVisuals::new();
        let handle = visuals.request_visual(&SpawnRequest {
            kind: SpawnKind::PlayerProjectile,
            position: Vec3::ZERO,
            orientation: Vec3::NEG_Z,
            style: VisualStyle::PlayerBolt,
        });
        assert!(visuals.is_live(handle));
        assert_eq!(visuals.visible_count(), 1);

        visuals.set_visible(handle, false);
        assert_eq!(visuals.visible_count(), 0);

        visuals.set_transform(handle, Vec3::ONE, Vec3::X);
        assert_eq!(visuals.record(handle).unwrap().position, Vec3::ONE);

        visuals.destroy(handle);
        visuals.destroy(handle);
        assert!(!visuals.is_live(handle));
        assert_eq!(visuals.destroyed, 1, "double destroy is ignored");
    }

    #[test]
    fn test_closure_height_provider() {
        let slope = |x: f32, _z: f32| x * 0.5;
        assert_eq!(slope.height_at(4.0, 100.0), 2.0);
    }
}
