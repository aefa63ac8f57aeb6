//! Entity spawn factories for combat sessions.
//!
//! Creates enemy entities with their component bundles and asks the
//! rendering layer for their visuals.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use starfall_core::components::*;
use starfall_core::enums::{AiState, EnemyKind};
use starfall_core::render::{SpawnKind, SpawnRequest, VisualAdapter};
use starfall_core::terrain::HeightProvider;
use starfall_core::Vec3;

use starfall_ai::profiles::get_profile;

/// Spawn one enemy at `position`.
///
/// In ground combat the enemy is lifted to its clearance above the terrain.
/// The first shot is delayed by a random fraction of the kind's cooldown so
/// a wave does not fire in lockstep.
pub fn spawn_enemy(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    visuals: &mut dyn VisualAdapter,
    terrain: Option<&dyn HeightProvider>,
    enemy_id: u32,
    kind: EnemyKind,
    position: Vec3,
) -> Entity {
    let profile = get_profile(kind);

    let mut position = position;
    if let Some(terrain) = terrain {
        position.y = terrain.height_at(position.x, position.z) + profile.ground_clearance;
    }
    let facing = Vec3::NEG_Z;

    let handle = visuals.request_visual(&SpawnRequest {
        kind: SpawnKind::Enemy(kind),
        position,
        orientation: facing,
        style: profile.hull_style,
    });

    let brain = EnemyBrain {
        kind,
        state: AiState::Patrol,
        cooldown_remaining: rng.gen_range(0.0..=profile.attack_cooldown),
        home: position,
        patrol_radius: profile.patrol_radius,
        patrol_target: None,
        pending_dt: 0.0,
        hover_phase: rng.gen_range(0.0..std::f32::consts::TAU),
    };

    world.spawn((
        Enemy,
        EnemyId(enemy_id),
        Transform { position, facing },
        Health::full(profile.max_health),
        brain,
        Lifecycle::Alive,
        ActorVisual {
            handle: Some(handle),
        },
    ))
}

/// Random point on a horizontal ring around `center`.
pub fn ring_position(rng: &mut ChaCha8Rng, center: Vec3, min_radius: f32, max_radius: f32) -> Vec3 {
    let bearing = rng.gen_range(0.0..std::f32::consts::TAU);
    let radius = rng.gen_range(min_radius..=max_radius);
    let lift = rng.gen_range(-0.1..=0.1) * radius;
    center + Vec3::new(bearing.cos() * radius, lift, bearing.sin() * radius)
}

/// Despawn an enemy and tear down its visual.
pub fn despawn_enemy(world: &mut World, visuals: &mut dyn VisualAdapter, entity: Entity) {
    if let Ok(visual) = world.get::<&ActorVisual>(entity) {
        if let Some(handle) = visual.handle {
            visuals.destroy(handle);
        }
    }
    let _ = world.despawn(entity);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use starfall_core::render::HeadlessVisuals;

    #[test]
    fn test_spawn_enemy_bundle() {
        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut visuals = HeadlessVisuals::new();
        let entity = spawn_enemy(
            &mut world,
            &mut rng,
            &mut visuals,
            None,
            7,
            EnemyKind::Turret,
            Vec3::new(10.0, 2.0, 5.0),
        );

        assert_eq!(world.get::<&EnemyId>(entity).unwrap().0, 7);
        assert_eq!(*world.get::<&Lifecycle>(entity).unwrap(), Lifecycle::Alive);
        let health = *world.get::<&Health>(entity).unwrap();
        assert_eq!(health.current, get_profile(EnemyKind::Turret).max_health);
        let brain = world.get::<&EnemyBrain>(entity).unwrap();
        assert!(brain.cooldown_remaining <= get_profile(EnemyKind::Turret).attack_cooldown);
        assert_eq!(brain.state, AiState::Patrol);
        assert_eq!(visuals.live_count(), 1);
    }

    #[test]
    fn test_spawn_on_terrain_uses_clearance() {
        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut visuals = HeadlessVisuals::new();
        let ground = |_x: f32, _z: f32| 12.0_f32;
        let entity = spawn_enemy(
            &mut world,
            &mut rng,
            &mut visuals,
            Some(&ground as &dyn HeightProvider),
            0,
            EnemyKind::Drone,
            Vec3::new(0.0, -50.0, 0.0),
        );
        let y = world.get::<&Transform>(entity).unwrap().position.y;
        assert_eq!(y, 12.0 + get_profile(EnemyKind::Drone).ground_clearance);
    }

    #[test]
    fn test_ring_position_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let center = Vec3::new(100.0, 0.0, -40.0);
        for _ in 0..200 {
            let p = ring_position(&mut rng, center, 40.0, 90.0);
            let d = Vec3::new(p.x - center.x, 0.0, p.z - center.z).length();
            assert!((39.99..=90.01).contains(&d), "ring distance {d}");
        }
    }

    #[test]
    fn test_despawn_enemy_destroys_visual() {
        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut visuals = HeadlessVisuals::new();
        let entity = spawn_enemy(
            &mut world,
            &mut rng,
            &mut visuals,
            None,
            0,
            EnemyKind::Drone,
            Vec3::ZERO,
        );
        despawn_enemy(&mut world, &mut visuals, entity);
        assert!(!world.contains(entity));
        assert_eq!(visuals.live_count(), 0);
    }
}
