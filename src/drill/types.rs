//! Drill state: position, motion target, depth ratchet, and heat.

use serde::{Deserialize, Serialize};

use crate::core::constants::*;

/// The player-controlled drill. `position_y` is the world-space tip of the
/// bit; `depth` is the monotonic progress metric derived from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Drill {
    pub position_y: f64,
    pub target_y: f64,
    /// Never decreases except on an explicit prestige reset.
    pub depth: f64,
    pub base_power: f64,
    pub base_speed: f64,
    /// Bounded heat accumulator: rises on action, decays while idle.
    pub temperature: f64,
    /// Count of engaged actions this run (super-strike ordinal).
    pub actions_taken: u64,
    /// Whether the player drove the drill this step (transient).
    #[serde(skip)]
    pub engaged: bool,
    /// Simulation time of the previous engaged action (rampage window).
    #[serde(skip, default = "long_ago")]
    pub last_action_time: f64,
}

fn long_ago() -> f64 {
    f64::MIN
}

impl Default for Drill {
    fn default() -> Self {
        Self::new()
    }
}

impl Drill {
    pub fn new() -> Self {
        Self {
            position_y: DRILL_REST_Y,
            target_y: DRILL_REST_Y,
            depth: 0.0,
            base_power: BASE_POWER,
            base_speed: BASE_SPEED,
            temperature: 0.0,
            actions_taken: 0,
            engaged: false,
            last_action_time: long_ago(),
        }
    }

    /// Approaches the motion target and ratchets depth. The approach factor
    /// stays strictly below 1, so the drill never overshoots; the lag is
    /// what reads as the plunge on screen.
    pub fn integrate(&mut self, dt: f64) {
        let alpha = (POSITION_SMOOTHING_RATE * dt).min(MAX_SMOOTHING_STEP);
        self.position_y += (self.target_y - self.position_y) * alpha;
        self.depth = self.depth.max((self.position_y - DRILL_REST_Y) / DEPTH_SCALE);
    }

    /// Accumulates heat from an action, clamped to the ceiling.
    pub fn heat_up(&mut self, amount: f64) {
        self.temperature = (self.temperature + amount).min(MAX_TEMPERATURE);
    }

    /// Linear heat decay toward zero while idle.
    pub fn cool(&mut self, dt: f64, cooling_rate: f64) {
        self.temperature = (self.temperature - cooling_rate * dt).max(0.0);
    }

    /// Heat as a 0..1 fraction for presentation.
    pub fn heat_fraction(&self) -> f64 {
        self.temperature / MAX_TEMPERATURE
    }

    /// Places the drill at rest on a layer top without motion lag
    /// (load, offline catch-up).
    pub fn rest_at(&mut self, top: f64) {
        self.position_y = top;
        self.target_y = top;
        self.depth = self.depth.max((top - DRILL_REST_Y) / DEPTH_SCALE);
    }

    /// Back to the surface for a new run.
    pub fn reset_for_prestige(&mut self) {
        *self = Self::new();
    }
}
