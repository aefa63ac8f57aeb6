//! Combat resolver: the per-tick core of a combat session.
//!
//! `CombatResolver` owns the hecs world of enemies, the roster order, the
//! projectile pool and the rendering adapter. It runs the ordered combat
//! systems and produces a `CombatSnapshot` per tick. Completely headless and
//! deterministic for a given seed and input sequence.

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use starfall_core::components::{ActorVisual, EnemyId, Lifecycle};
use starfall_core::config::CombatConfig;
use starfall_core::constants::{WAVE_SPAWN_MAX_RADIUS, WAVE_SPAWN_MIN_RADIUS};
use starfall_core::enums::*;
use starfall_core::error::{ConfigurationError, TickFault};
use starfall_core::events::{CombatEvent, EffectRequest};
use starfall_core::render::{VisualAdapter, VisualHandle};
use starfall_core::state::CombatSnapshot;
use starfall_core::terrain::HeightProvider;
use starfall_core::types::{clamp_dt, SimTime};
use starfall_core::Vec3;

use crate::player::Player;
use crate::pool::{ProjectilePool, ProjectileSpec, SlotId};
use crate::systems;
use crate::systems::damage::DamageContext;
use crate::systems::enemy_ai::AiInputs;
use crate::systems::snapshot::SnapshotSource;
use crate::world_setup;

/// Where a session takes place.
pub enum CombatArena {
    Space,
    /// Enemies are kept above the supplied terrain.
    Ground(Box<dyn HeightProvider>),
}

impl CombatArena {
    pub fn mode(&self) -> GameMode {
        match self {
            CombatArena::Space => GameMode::SpaceCombat,
            CombatArena::Ground(_) => GameMode::GroundCombat,
        }
    }
}

/// Owns all combat session state.
pub struct CombatResolver<V: VisualAdapter> {
    config: CombatConfig,
    world: World,
    /// Enemy entities in spawn order. Collision resolves in this order.
    roster: Vec<Entity>,
    pool: ProjectilePool,
    visuals: V,
    terrain: Option<Box<dyn HeightProvider>>,
    time: SimTime,
    phase: SessionPhase,
    mode: GameMode,
    origin: Vec3,
    rng: ChaCha8Rng,
    next_enemy_id: u32,
    events: Vec<CombatEvent>,
    effects: Vec<EffectRequest>,
    player_defeat_reported: bool,
    despawn_buffer: Vec<Entity>,
}

impl<V: VisualAdapter> CombatResolver<V> {
    /// Create an inactive resolver. Fails on an invalid config.
    pub fn new(config: CombatConfig, visuals: V) -> Result<Self, ConfigurationError> {
        config.validate()?;
        let pool = ProjectilePool::new(config.pool_capacity)?;
        Ok(Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            world: World::new(),
            roster: Vec::new(),
            pool,
            visuals,
            terrain: None,
            time: SimTime::default(),
            phase: SessionPhase::Inactive,
            mode: GameMode::Overworld,
            origin: Vec3::ZERO,
            next_enemy_id: 0,
            events: Vec::new(),
            effects: Vec::new(),
            player_defeat_reported: false,
            despawn_buffer: Vec::new(),
        })
    }

    // --- Session lifecycle ---

    /// Prepare a fresh session around `origin`. Waves may be spawned until
    /// `activate` is called.
    pub fn initialize(
        &mut self,
        origin: Vec3,
        player: &Player,
        arena: CombatArena,
    ) -> Result<(), ConfigurationError> {
        if !matches!(self.phase, SessionPhase::Inactive | SessionPhase::Complete) {
            return Err(ConfigurationError::InvalidTransition {
                action: "initialize",
                phase: self.phase,
            });
        }
        if !player.is_alive() {
            return Err(ConfigurationError::MissingPlayer);
        }

        self.teardown();
        self.mode = arena.mode();
        self.terrain = match arena {
            CombatArena::Space => None,
            CombatArena::Ground(terrain) => Some(terrain),
        };
        self.origin = origin;
        self.time = SimTime::default();
        self.phase = SessionPhase::Initializing;
        log::info!("Combat session initializing: {:?} at {}", self.mode, origin);
        Ok(())
    }

    /// Start per-tick updates.
    pub fn activate(&mut self) -> Result<(), ConfigurationError> {
        if self.phase != SessionPhase::Initializing {
            return Err(ConfigurationError::InvalidTransition {
                action: "activate",
                phase: self.phase,
            });
        }
        self.phase = SessionPhase::Active;
        log::info!(
            "Combat session active with {} enemies",
            self.active_enemy_count()
        );
        Ok(())
    }

    /// End the session from any phase, releasing every projectile and enemy.
    pub fn deactivate(&mut self) {
        if self.phase != SessionPhase::Inactive {
            log::info!("Combat session deactivated from {:?}", self.phase);
        }
        self.teardown();
        self.phase = SessionPhase::Inactive;
        self.mode = GameMode::Overworld;
        self.terrain = None;
    }

    fn teardown(&mut self) {
        self.pool.release_all(&mut self.visuals);
        systems::cleanup::despawn_all(&mut self.world, &mut self.roster, &mut self.visuals);
        self.events.clear();
        self.effects.clear();
        self.next_enemy_id = 0;
        self.player_defeat_reported = false;
    }

    // --- Spawning ---

    /// Spawn a wave of `count` enemies on a ring around `origin`.
    /// Returns the new enemy ids.
    pub fn spawn_wave(&mut self, origin: Vec3, count: u32) -> Result<Vec<u32>, ConfigurationError> {
        self.ensure_spawnable("spawn a wave in")?;
        let ground = self.terrain.is_some();
        let mut ids = Vec::with_capacity(count as usize);
        for kind in systems::wave_spawner::composition(count, ground) {
            let position = world_setup::ring_position(
                &mut self.rng,
                origin,
                WAVE_SPAWN_MIN_RADIUS,
                WAVE_SPAWN_MAX_RADIUS,
            );
            ids.push(self.insert_enemy(kind, position));
        }
        log::debug!("Spawned wave of {} around {}", count, origin);
        Ok(ids)
    }

    /// Spawn a single enemy. Returns its id.
    pub fn spawn_enemy(&mut self, kind: EnemyKind, position: Vec3) -> Result<u32, ConfigurationError> {
        self.ensure_spawnable("spawn an enemy in")?;
        Ok(self.insert_enemy(kind, position))
    }

    fn ensure_spawnable(&self, action: &'static str) -> Result<(), ConfigurationError> {
        match self.phase {
            SessionPhase::Initializing | SessionPhase::Active => Ok(()),
            phase => Err(ConfigurationError::InvalidTransition { action, phase }),
        }
    }

    fn insert_enemy(&mut self, kind: EnemyKind, position: Vec3) -> u32 {
        let id = self.next_enemy_id;
        self.next_enemy_id += 1;
        let entity = world_setup::spawn_enemy(
            &mut self.world,
            &mut self.rng,
            &mut self.visuals,
            self.terrain.as_deref(),
            id,
            kind,
            position,
        );
        self.roster.push(entity);
        id
    }

    /// Launch a projectile. Only accepted while the session is active.
    pub fn spawn_projectile(&mut self, spec: &ProjectileSpec) -> Option<SlotId> {
        if self.phase != SessionPhase::Active {
            return None;
        }
        let acquired = self
            .pool
            .acquire(spec, self.time.elapsed_secs, &mut self.visuals);
        if acquired.recycled.is_some() {
            self.events.push(CombatEvent::ProjectileRecycled {
                slot: acquired.slot.0,
            });
        }
        self.events.push(CombatEvent::ProjectileSpawned {
            slot: acquired.slot.0,
            origin: spec.origin,
        });
        self.effects.push(EffectRequest {
            kind: EffectKind::MuzzleFlash,
            position: spec.position,
            start_tick: self.time.tick,
            duration_ticks: self.config.effect_muzzle_flash_ticks,
        });
        Some(acquired.slot)
    }

    // --- Tick ---

    /// Advance the session by one frame and return the resulting snapshot.
    ///
    /// `dt` is clamped to the configured maximum. Nothing moves unless the
    /// session is active; a completed session still reaps its dead.
    pub fn tick(&mut self, dt: f32, player: &mut Player, quality: QualityLevel) -> CombatSnapshot {
        let dt = clamp_dt(dt, self.config.max_tick_dt);
        let mut faults = Vec::new();

        match self.phase {
            SessionPhase::Active => {
                self.run_systems(dt, player, quality, &mut faults);
                self.time.advance(dt);
            }
            SessionPhase::Complete => {
                self.reap(&mut faults);
                self.time.advance(dt);
            }
            SessionPhase::Inactive | SessionPhase::Initializing => {}
        }

        for fault in &faults {
            log::warn!("Tick {}: {}", self.time.tick, fault);
        }

        systems::snapshot::sync_visuals(&self.world, &self.roster, &self.pool, &mut self.visuals);
        systems::snapshot::build_snapshot(
            &SnapshotSource {
                world: &self.world,
                roster: &self.roster,
                pool: &self.pool,
                player,
                time: self.time,
                phase: self.phase,
                mode: self.mode,
            },
            std::mem::take(&mut self.events),
            std::mem::take(&mut self.effects),
        )
    }

    /// Run all systems in order.
    fn run_systems(
        &mut self,
        dt: f32,
        player: &mut Player,
        quality: QualityLevel,
        faults: &mut Vec<TickFault>,
    ) {
        let tick = self.time.tick;

        // 0. Remove enemies that died on an earlier tick
        self.reap(faults);

        // 1. Projectile integration
        systems::projectiles::advance(&mut self.pool, dt);

        // 2-5. Collision, damage, death marking, rewards (slot order)
        let mut targets = systems::collision::collect_targets(&self.world, &self.roster, faults);
        let mut spent: Vec<SlotId> = Vec::new();
        let mut ctx = DamageContext {
            config: &self.config,
            tick,
            events: &mut self.events,
            effects: &mut self.effects,
        };
        for (slot, projectile) in self.pool.iter() {
            let Some(hit) = systems::collision::find_hit(
                projectile,
                &targets,
                player,
                &self.visuals,
                self.config.broad_phase_factor,
                ctx.events,
                faults,
            ) else {
                continue;
            };
            spent.push(slot);
            match hit {
                systems::collision::Hit::Enemy(index) => systems::damage::hit_enemy(
                    &mut self.world,
                    &mut self.visuals,
                    &mut targets[index],
                    projectile.power,
                    player,
                    &mut ctx,
                ),
                systems::collision::Hit::Player => {
                    let defeated = systems::damage::hit_player(player, projectile.power, &mut ctx);
                    if defeated && !self.player_defeat_reported {
                        self.player_defeat_reported = true;
                        ctx.events.push(CombatEvent::PlayerDefeated);
                        log::info!("Player defeated at tick {}", tick);
                    }
                }
            }
        }

        // 6. Retire spent and expired projectiles
        systems::projectiles::retire(&mut self.pool, &mut self.visuals, &spent, &mut self.events);

        // 7. Enemy AI; shots enter the pool for the next tick
        let target = player.is_alive().then_some(player.position);
        let shots = systems::enemy_ai::run(
            &mut self.world,
            &self.roster,
            &mut self.rng,
            &AiInputs {
                config: &self.config,
                tick,
                dt,
                quality,
                target,
                terrain: self.terrain.as_deref(),
            },
            &mut self.events,
        );
        for shot in shots {
            self.spawn_projectile(&ProjectileSpec {
                origin: ProjectileOrigin::Enemy,
                position: shot.origin,
                direction: shot.direction,
                speed: shot.speed,
                power: shot.power,
                range: shot.range,
                style: VisualStyle::EnemyBolt,
            });
        }

        // 8. Session completion
        if self.active_enemy_count() == 0 {
            self.phase = SessionPhase::Complete;
            self.events.push(CombatEvent::SessionComplete);
            log::info!("Combat session complete at tick {}", tick);
        }
    }

    fn reap(&mut self, faults: &mut Vec<TickFault>) {
        systems::cleanup::run(
            &mut self.world,
            &mut self.roster,
            &mut self.visuals,
            self.time.tick,
            &mut self.despawn_buffer,
            &mut self.events,
            faults,
        );
    }

    // --- Accessors ---

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn is_complete(&self) -> bool {
        self.phase == SessionPhase::Complete
    }

    /// Enemies still alive. Dying enemies awaiting removal are not counted.
    pub fn active_enemy_count(&self) -> usize {
        self.roster
            .iter()
            .filter(|&&e| {
                self.world
                    .get::<&Lifecycle>(e)
                    .is_ok_and(|l| *l == Lifecycle::Alive)
            })
            .count()
    }

    /// Number of roster entries, including dying enemies.
    pub fn roster_len(&self) -> usize {
        self.roster.len()
    }

    pub fn pool(&self) -> &ProjectilePool {
        &self.pool
    }

    /// Read-only access to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn visuals(&self) -> &V {
        &self.visuals
    }

    pub fn visuals_mut(&mut self) -> &mut V {
        &mut self.visuals
    }

    /// Visual handle of an enemy, if it still has one.
    pub fn enemy_visual(&self, enemy_id: u32) -> Option<VisualHandle> {
        self.roster.iter().find_map(|&e| {
            let mut query = self.world.query_one::<(&EnemyId, &ActorVisual)>(e).ok()?;
            let (id, visual) = query.get()?;
            (id.0 == enemy_id).then_some(visual.handle).flatten()
        })
    }
}
