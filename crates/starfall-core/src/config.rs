//! Combat configuration. Loaded from a JSON file or built from defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigurationError;

/// Tunables for one combat core instance.
///
/// Every field has a default, so a config file only needs the values it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// RNG seed. Same seed and inputs give the same session.
    pub seed: u64,
    /// Number of projectile slots.
    pub pool_capacity: usize,
    /// Largest delta one tick integrates (seconds).
    pub max_tick_dt: f32,
    /// Minimum time between two rendered ticks (seconds).
    pub target_frame_interval: f32,
    /// Enemies closer than this to the player are updated every tick.
    pub ai_full_rate_radius: f32,
    pub ai_throttle_normal: u64,
    pub ai_throttle_degraded: u64,
    /// Broad-phase prefilter factor applied to range².
    pub broad_phase_factor: f32,
    /// Fraction of attack range an engaged enemy may drift past before it
    /// disengages. Zero keeps the plain `d <= range` rule.
    pub engage_hysteresis: f32,
    pub wave_size: u32,
    pub reward_base_xp: u32,
    pub reward_base_currency: u32,
    pub reward_tier_multiplier: f32,
    /// Player energy regained per second.
    pub energy_regen: f32,
    pub effect_hit_spark_ticks: u32,
    pub effect_explosion_ticks: u32,
    pub effect_muzzle_flash_ticks: u32,
    pub effect_level_up_ticks: u32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            pool_capacity: DEFAULT_POOL_CAPACITY,
            max_tick_dt: MAX_TICK_DT,
            target_frame_interval: TARGET_FRAME_INTERVAL,
            ai_full_rate_radius: AI_FULL_RATE_RADIUS,
            ai_throttle_normal: AI_THROTTLE_NORMAL,
            ai_throttle_degraded: AI_THROTTLE_DEGRADED,
            broad_phase_factor: BROAD_PHASE_FACTOR,
            engage_hysteresis: 0.0,
            wave_size: DEFAULT_WAVE_SIZE,
            reward_base_xp: REWARD_BASE_XP,
            reward_base_currency: REWARD_BASE_CURRENCY,
            reward_tier_multiplier: REWARD_TIER_MULTIPLIER,
            energy_regen: PLAYER_ENERGY_REGEN,
            effect_hit_spark_ticks: EFFECT_HIT_SPARK_TICKS,
            effect_explosion_ticks: EFFECT_EXPLOSION_TICKS,
            effect_muzzle_flash_ticks: EFFECT_MUZZLE_FLASH_TICKS,
            effect_level_up_ticks: EFFECT_LEVEL_UP_TICKS,
        }
    }
}

impl CombatConfig {
    /// Parse and validate a config from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigurationError> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    /// Parse and validate a config from a JSON string.
    pub fn from_json(data: &str) -> Result<Self, ConfigurationError> {
        let config: Self = serde_json::from_str(data)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file, falling back to defaults if it is missing or bad.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            log::info!("No combat config at {:?}, using defaults", path);
            return Self::default();
        }
        match Self::from_path(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Invalid combat config at {:?}: {}, using defaults", path, e);
                Self::default()
            }
        }
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.pool_capacity == 0 {
            return Err(ConfigurationError::ZeroPoolCapacity);
        }
        if !(self.max_tick_dt > 0.0) {
            return Err(ConfigurationError::InvalidValue {
                field: "max_tick_dt",
                reason: format!("must be positive, got {}", self.max_tick_dt),
            });
        }
        if self.target_frame_interval < 0.0 {
            return Err(ConfigurationError::InvalidValue {
                field: "target_frame_interval",
                reason: format!("must not be negative, got {}", self.target_frame_interval),
            });
        }
        if self.ai_throttle_normal == 0 || self.ai_throttle_degraded == 0 {
            return Err(ConfigurationError::InvalidValue {
                field: "ai_throttle",
                reason: "throttle modulus must be at least 1".into(),
            });
        }
        if self.engage_hysteresis < 0.0 {
            return Err(ConfigurationError::InvalidValue {
                field: "engage_hysteresis",
                reason: format!("must not be negative, got {}", self.engage_hysteresis),
            });
        }
        Ok(())
    }
}
