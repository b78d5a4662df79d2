// Tick and timing
pub const TARGET_FRAME_MS: u64 = 33;
pub const MAX_FRAME_SECONDS: f64 = 0.25;
pub const INPUT_DEBOUNCE_SECONDS: f64 = 0.03;
pub const AUTOSAVE_INTERVAL_SECONDS: u64 = 30;

// Layer geometry (world units, y grows downward)
pub const LAYER_WIDTH: f64 = 96.0;
pub const LAYER_HEIGHT: f64 = 48.0;
pub const FIRST_LAYER_TOP: f64 = 120.0;

// Layer hardness: tier steps every HARDNESS_TIER_SIZE indices, health and
// reward grow geometrically per tier
pub const HARDNESS_TIER_SIZE: u64 = 10;
pub const LAYER_BASE_HEALTH: f64 = 10.0;
pub const LAYER_HEALTH_GROWTH: f64 = 1.35;
pub const LAYER_BASE_REWARD: f64 = 5.0;
pub const LAYER_REWARD_GROWTH: f64 = 1.42;

// Layer fragments (destroy animation)
pub const FRAGMENTS_PER_LAYER: usize = 6;
pub const FRAGMENT_LIFETIME_SECONDS: f64 = 0.9;
pub const FRAGMENT_GRAVITY: f64 = 380.0;

// World generation and culling
pub const GEN_AHEAD_LAYERS: usize = 8;
pub const GEN_BATCH_PER_TICK: usize = 4;
pub const GEN_EMPTY_RECOVERY_BATCH: usize = 24;
pub const CULL_MARGIN: f64 = 160.0;
pub const VISIBLE_MARGIN: f64 = 64.0;

// Drill base stats
pub const DRILL_REST_Y: f64 = 120.0;
pub const DEPTH_SCALE: f64 = 12.0;
pub const BASE_POWER: f64 = 10.0;
pub const BASE_SPEED: f64 = 60.0;
pub const IMPULSE_FRACTION: f64 = 0.35;
pub const CONTACT_RANGE: f64 = 10.0;

// Drill motion: dt-scaled approach factor, clamped strictly below 1 so the
// drill never overshoots its target
pub const POSITION_SMOOTHING_RATE: f64 = 8.0;
pub const MAX_SMOOTHING_STEP: f64 = 0.85;

// Drill heat
pub const MAX_TEMPERATURE: f64 = 100.0;
pub const HEAT_PER_ACTION: f64 = 3.0;
pub const HEAT_DECAY_PER_SECOND: f64 = 14.0;

// Combat modifiers
pub const RAMPAGE_WINDOW_SECONDS: f64 = 0.45;
pub const SUPER_STRIKE_BONUS: f64 = 2.0;
pub const MAX_CRITICAL_CHANCE: f64 = 0.5;

// Camera
pub const CAMERA_LEAD_OFFSET: f64 = 140.0;
pub const CAMERA_SMOOTHING_RATE: f64 = 6.0;
pub const DEFAULT_VIEWPORT_HEIGHT: f64 = 480.0;

// Economy
pub const DOUBLE_COIN_CHANCE: f64 = 0.05;
pub const GEM_DROP_CHANCE: f64 = 0.01;
pub const DEPTH_COIN_BONUS_PER_METER: f64 = 0.002;

// Particle pool
pub const PARTICLE_POOL_CAPACITY: usize = 256;
pub const DEBRIS_PER_DESTROY: usize = 6;
pub const DEBRIS_LIFETIME_SECONDS: f64 = 0.7;
pub const SPARK_LIFETIME_SECONDS: f64 = 0.35;

// Boss encounters
pub const BOSS_DEPTH_INTERVAL: f64 = 400.0;
pub const BOSS_SPAWN_SECONDS: f64 = 1.6;
pub const BOSS_COMBAT_SECONDS: f64 = 10.0;
pub const BOSS_EXIT_SECONDS: f64 = 1.2;
pub const BOSS_CONTINUE_SECONDS: f64 = 6.0;
pub const BOSS_BASE_TAP_HEALTH: u32 = 30;
pub const BOSS_TAP_HEALTH_PER_WIN: u32 = 8;

// Boss victory bonuses: (multiplier, duration seconds)
pub const BOSS_BONUS_COIN: (f64, f64) = (2.0, 90.0);
pub const BOSS_BONUS_POWER: (f64, f64) = (1.5, 60.0);
pub const BOSS_BONUS_SPEED: (f64, f64) = (1.25, 60.0);

// Upgrade costs: cost(level) = base * UPGRADE_COST_GROWTH^level
pub const UPGRADE_COST_GROWTH: f64 = 1.6;

// Upgrade effects per level
pub const POWER_GROWTH_PER_LEVEL: f64 = 1.25;
pub const SPEED_GROWTH_PER_LEVEL: f64 = 1.15;
pub const CRIT_CHANCE_PER_LEVEL: f64 = 0.03;
pub const RAMPAGE_BONUS_PER_LEVEL: f64 = 0.25;
pub const COIN_GAIN_GROWTH_PER_LEVEL: f64 = 1.2;
pub const COOLING_BONUS_PER_LEVEL: f64 = 0.2;
pub const SUPER_STRIKE_BASE_INTERVAL: u32 = 10;
pub const SUPER_STRIKE_MIN_INTERVAL: u32 = 4;

// Prestige
pub const PRESTIGE_POWER_BONUS_PER_RANK: f64 = 0.1;

// Offline progression
pub const OFFLINE_MULTIPLIER: f64 = 0.25;
pub const OFFLINE_SECONDS_PER_LAYER: f64 = 4.0;
pub const MAX_OFFLINE_SECONDS: i64 = 7 * 24 * 60 * 60;

// Save file
pub const SAVE_VERSION_MAGIC: u64 = 0x5354_5241_5441_0001;

// Event log capacity in the binary
pub const EVENT_LOG_CAPACITY: usize = 12;
