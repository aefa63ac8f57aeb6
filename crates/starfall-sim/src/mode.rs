//! Mode controller: decides when a combat session runs.
//!
//! Owns the resolver and hands the game back to the overworld when the
//! session is won, lost or abandoned. Setup failures never leave a
//! half-built session behind; they log and return to the overworld.

use starfall_core::config::CombatConfig;
use starfall_core::enums::{AttackButton, GameMode, QualityLevel, SessionPhase};
use starfall_core::error::ConfigurationError;
use starfall_core::events::{CombatEvent, ModeEvent};
use starfall_core::render::VisualAdapter;
use starfall_core::state::CombatSnapshot;
use starfall_core::types::clamp_dt;
use starfall_core::Vec3;

use starfall_terrain::generate_landing_site;

use crate::effects::{ActiveEffect, EffectTimeline};
use crate::pacing::PerformanceMonitor;
use crate::player::Player;
use crate::pool::SlotId;
use crate::resolver::{CombatArena, CombatResolver};

pub struct ModeController<V: VisualAdapter> {
    config: CombatConfig,
    mode: GameMode,
    resolver: CombatResolver<V>,
    effects: EffectTimeline,
    perf: PerformanceMonitor,
    events: Vec<ModeEvent>,
}

impl<V: VisualAdapter> ModeController<V> {
    pub fn new(config: CombatConfig, visuals: V) -> Result<Self, ConfigurationError> {
        let resolver = CombatResolver::new(config.clone(), visuals)?;
        Ok(Self {
            config,
            mode: GameMode::Overworld,
            resolver,
            effects: EffectTimeline::new(),
            perf: PerformanceMonitor::new(),
            events: Vec::new(),
        })
    }

    /// Start a space combat session around `origin`.
    pub fn enter_space_combat(
        &mut self,
        origin: Vec3,
        player: &Player,
    ) -> Result<(), ConfigurationError> {
        self.enter(origin, player, CombatArena::Space)
    }

    /// Land and start a ground combat session on terrain generated from
    /// `terrain_seed`.
    pub fn enter_ground_combat(
        &mut self,
        origin: Vec3,
        terrain_seed: u64,
        player: &Player,
    ) -> Result<(), ConfigurationError> {
        let terrain = generate_landing_site(terrain_seed, origin.x, origin.z);
        self.enter(origin, player, CombatArena::Ground(Box::new(terrain)))
    }

    fn enter(
        &mut self,
        origin: Vec3,
        player: &Player,
        arena: CombatArena,
    ) -> Result<(), ConfigurationError> {
        if self.mode != GameMode::Overworld {
            return Err(ConfigurationError::InvalidTransition {
                action: "enter combat from",
                phase: self.resolver.phase(),
            });
        }
        let mode = arena.mode();
        match self.start_session(origin, player, arena) {
            Ok(()) => {
                self.mode = mode;
                self.events.push(ModeEvent::CombatStarted { mode });
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to start {:?}: {}", mode, e);
                self.resolver.deactivate();
                self.effects.clear();
                self.mode = GameMode::Overworld;
                self.events.push(ModeEvent::CombatAborted);
                Err(e)
            }
        }
    }

    fn start_session(
        &mut self,
        origin: Vec3,
        player: &Player,
        arena: CombatArena,
    ) -> Result<(), ConfigurationError> {
        self.resolver.initialize(origin, player, arena)?;
        self.resolver.spawn_wave(origin, self.config.wave_size)?;
        self.resolver.activate()
    }

    /// Leave the combat area. No-op in the overworld.
    pub fn leave_combat(&mut self) {
        if self.mode == GameMode::Overworld {
            return;
        }
        self.hand_back(ModeEvent::CombatAbandoned);
    }

    fn hand_back(&mut self, event: ModeEvent) {
        log::info!("{:?}: returning to overworld", event);
        self.resolver.deactivate();
        self.effects.clear();
        self.mode = GameMode::Overworld;
        self.events.push(event);
    }

    /// Fire a player attack into the running session.
    ///
    /// Outside active combat nothing happens and no energy is spent.
    pub fn attack(
        &mut self,
        button: AttackButton,
        direction: Vec3,
        player: &mut Player,
    ) -> Option<SlotId> {
        if self.resolver.phase() != SessionPhase::Active {
            return None;
        }
        let spec = player.attack(button, direction)?;
        self.resolver.spawn_projectile(&spec)
    }

    /// Run one frame.
    ///
    /// `frame_dt` is the raw frame time; it feeds the performance monitor
    /// before the resolver clamps it.
    pub fn tick(&mut self, frame_dt: f32, player: &mut Player) -> CombatSnapshot {
        let quality = self.perf.record(frame_dt);
        if self.mode != GameMode::Overworld {
            player.regenerate(
                self.config.energy_regen,
                clamp_dt(frame_dt, self.config.max_tick_dt),
            );
        }

        let snapshot = self.resolver.tick(frame_dt, player, quality);
        self.effects.ingest(snapshot.effects.iter().copied());
        self.effects.expire(self.resolver.time().tick);

        if self.mode != GameMode::Overworld {
            if snapshot.events.contains(&CombatEvent::PlayerDefeated) {
                self.hand_back(ModeEvent::CombatLost);
            } else if self.resolver.is_complete() {
                self.hand_back(ModeEvent::CombatWon);
            }
        }
        snapshot
    }

    /// Effects running at the current session tick.
    pub fn active_effects(&mut self) -> Vec<ActiveEffect> {
        self.effects.poll(self.resolver.time().tick)
    }

    pub fn effects(&self) -> &EffectTimeline {
        &self.effects
    }

    /// Take mode events produced since the last call.
    pub fn drain_events(&mut self) -> Vec<ModeEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn quality(&self) -> QualityLevel {
        self.perf.quality()
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn resolver(&self) -> &CombatResolver<V> {
        &self.resolver
    }

    pub fn resolver_mut(&mut self) -> &mut CombatResolver<V> {
        &mut self.resolver
    }
}
