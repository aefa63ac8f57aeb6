//! Simulation constants and tuning parameters.
//!
//! Values that a deployment may want to tune live in `CombatConfig`; the
//! constants here are the defaults it falls back to plus fixed game rules.

// --- Tick ---

/// Largest delta a single tick integrates (seconds).
pub const MAX_TICK_DT: f32 = 0.1;

/// Target interval between rendered ticks (seconds, 60 fps).
pub const TARGET_FRAME_INTERVAL: f32 = 1.0 / 60.0;

// --- Projectile pool ---

/// Default number of projectile slots.
pub const DEFAULT_POOL_CAPACITY: usize = 50;

/// Broad-phase prefilter: enemies with distance² below range² * factor get
/// the exact test.
pub const BROAD_PHASE_FACTOR: f32 = 0.5;

// --- AI ---

/// Enemies within this distance of the player get an AI update every tick.
pub const AI_FULL_RATE_RADIUS: f32 = 60.0;

/// Throttle modulus for far enemies at normal quality.
pub const AI_THROTTLE_NORMAL: u64 = 5;

/// Throttle modulus for far enemies at degraded quality.
pub const AI_THROTTLE_DEGRADED: u64 = 10;

/// Distance at which a drone counts as having reached its patrol point.
pub const PATROL_ARRIVAL_DISTANCE: f32 = 1.0;

/// Enemy shots travel this multiple of the attack range.
pub const ENEMY_SHOT_RANGE_FACTOR: f32 = 1.2;

/// Largest AI delta accumulated by a throttled enemy (seconds).
pub const MAX_AI_DT: f32 = 1.0;

// --- Damage model ---

/// Fractional damage reduction per defense level.
pub const DEFENSE_REDUCTION_PER_LEVEL: f32 = 0.05;

// --- Player ---

/// Energy cost of the basic attack.
pub const COST_BASIC: f32 = 10.0;

/// Energy cost of the special attack.
pub const COST_SPECIAL: f32 = 25.0;

/// Power bonus per attack upgrade level.
pub const ATTACK_BONUS_PER_LEVEL: f32 = 0.2;

/// Max-energy / max-health bonus per upgrade level.
pub const POOL_BONUS_PER_LEVEL: f32 = 0.1;

/// Highest level any upgrade stat can reach.
pub const MAX_UPGRADE_LEVEL: u32 = 5;

pub const PLAYER_BASE_HEALTH: f32 = 100.0;
pub const PLAYER_BASE_ENERGY: f32 = 100.0;
pub const PLAYER_BASE_ATTACK: f32 = 20.0;
pub const PLAYER_HIT_RADIUS: f32 = 1.5;

/// Energy regained per second.
pub const PLAYER_ENERGY_REGEN: f32 = 5.0;

/// Experience needed per level: `level * XP_PER_LEVEL`.
pub const XP_PER_LEVEL: u32 = 100;

pub const BASIC_SHOT_SPEED: f32 = 60.0;
pub const BASIC_SHOT_RANGE: f32 = 150.0;

// --- Rewards ---

/// Experience for destroying a drone.
pub const REWARD_BASE_XP: u32 = 20;

/// Currency for destroying a drone.
pub const REWARD_BASE_CURRENCY: u32 = 10;

/// Multiplier applied to rewards for non-drone kinds.
pub const REWARD_TIER_MULTIPLIER: f32 = 2.5;

// --- Waves ---

/// Default enemies per wave.
pub const DEFAULT_WAVE_SIZE: u32 = 5;

/// Enemies spawn in a ring around the wave origin.
pub const WAVE_SPAWN_MIN_RADIUS: f32 = 40.0;
pub const WAVE_SPAWN_MAX_RADIUS: f32 = 90.0;

/// Every Nth enemy of a ground wave is a turret.
pub const GROUND_TURRET_EVERY: u32 = 3;

// --- Effects (ticks at 60 fps) ---

pub const EFFECT_HIT_SPARK_TICKS: u32 = 12;
pub const EFFECT_EXPLOSION_TICKS: u32 = 45;
pub const EFFECT_MUZZLE_FLASH_TICKS: u32 = 6;
pub const EFFECT_LEVEL_UP_TICKS: u32 = 90;

// --- Performance monitor ---

/// Frame-time samples kept by the performance monitor.
pub const PERF_SAMPLE_WINDOW: usize = 60;

/// Average frame time above which quality degrades (seconds, ~40 fps).
pub const PERF_DEGRADE_FRAME_TIME: f32 = 0.025;

/// Average frame time below which quality recovers (seconds, ~50 fps).
pub const PERF_RECOVER_FRAME_TIME: f32 = 0.020;
