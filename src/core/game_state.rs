use serde::{Deserialize, Serialize};

use crate::boss::BossEncounter;
use crate::camera::Camera;
use crate::drill::Drill;
use crate::economy::Economy;
use crate::effects::ParticlePool;
use crate::modifiers::{ActiveBonuses, UpgradeLevels};
use crate::world::layer::center_y_for;
use crate::world::LayerColumn;

fn long_ago() -> f64 {
    f64::MIN
}

/// Main game state containing all run progress.
///
/// Persistent fields form the serializable snapshot: drill scalars, the
/// world frontier counter, economy, and prestige. Transient fields carry
/// the live simulation window and are rebuilt after a load rather than
/// replayed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub session_id: String,
    pub created_at: i64,
    pub last_save_time: i64,
    pub play_time_seconds: f64,

    /// Accumulated simulation clock. Timed bonuses store expiries against
    /// this clock, so it persists with them.
    pub sim_time: f64,

    pub prestige_rank: u32,
    pub total_prestige_count: u64,

    /// Deepest point ever reached, across prestige resets.
    #[serde(default)]
    pub best_depth: f64,

    pub drill: Drill,
    pub economy: Economy,
    #[serde(default)]
    pub column: LayerColumn,
    #[serde(default)]
    pub upgrades: UpgradeLevels,
    #[serde(default)]
    pub bonuses: ActiveBonuses,
    #[serde(default)]
    pub boss: BossEncounter,

    /// Live camera (transient; snaps onto the drill after a load).
    #[serde(skip)]
    pub camera: Camera,

    /// Particle pool (transient feedback only).
    #[serde(skip)]
    pub effects: ParticlePool,

    /// While paused, rendering continues but entity updates are skipped.
    #[serde(skip)]
    pub paused: bool,

    /// Simulation time of the last accepted engage event (input debounce).
    #[serde(skip, default = "long_ago")]
    pub last_engage_time: f64,

    /// Whether the prestige-available event already fired this run.
    #[serde(skip)]
    pub prestige_notified: bool,

    /// Layers broken this session (transient, for the stats panel).
    #[serde(skip)]
    pub session_layers_broken: u64,
}

impl GameState {
    /// Creates a new game state with default values
    pub fn new(current_time: i64) -> Self {
        use uuid::Uuid;

        let mut state = Self {
            session_id: Uuid::new_v4().to_string(),
            created_at: current_time,
            last_save_time: current_time,
            play_time_seconds: 0.0,
            sim_time: 0.0,
            prestige_rank: 0,
            total_prestige_count: 0,
            best_depth: 0.0,
            drill: Drill::new(),
            economy: Economy::new(),
            column: LayerColumn::new(),
            upgrades: UpgradeLevels::default(),
            bonuses: ActiveBonuses::default(),
            boss: BossEncounter::new(),
            camera: Camera::default(),
            effects: ParticlePool::default(),
            paused: false,
            last_engage_time: long_ago(),
            prestige_notified: false,
            session_layers_broken: 0,
        };
        state.camera.snap_to(state.drill.position_y);
        state
    }

    /// Returns true while a boss encounter suspends normal drilling.
    pub fn is_boss_active(&self) -> bool {
        self.boss.is_active()
    }

    /// Reconstructs the transient simulation window after deserialization:
    /// the column regenerates from its persisted frontier and the drill
    /// comes to rest on it. This produces an equivalent live window, not a
    /// replay of the saved one.
    pub fn rebuild_after_load(&mut self) {
        self.column.rebuild();
        let frontier_top =
            center_y_for(self.column.current_layer_index) - crate::core::constants::LAYER_HEIGHT / 2.0;
        self.drill.rest_at(frontier_top);
        self.best_depth = self.best_depth.max(self.drill.depth);
        self.camera.snap_to(self.drill.position_y);
        self.effects.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::*;

    #[test]
    fn test_new_game_state() {
        let current_time = 1234567890;
        let state = GameState::new(current_time);

        assert_eq!(state.prestige_rank, 0);
        assert_eq!(state.total_prestige_count, 0);
        assert_eq!(state.last_save_time, current_time);
        assert_eq!(state.created_at, current_time);
        assert_eq!(state.play_time_seconds, 0.0);
        assert_eq!(state.drill.depth, 0.0);
        assert_eq!(state.economy.coins, 0.0);
        assert!(!state.is_boss_active());
        assert!(!state.paused);
    }

    #[test]
    fn test_session_id_uniqueness() {
        let state1 = GameState::new(0);
        let state2 = GameState::new(0);

        // Each session should have a unique ID
        assert_ne!(state1.session_id, state2.session_id);
        // IDs should be valid UUIDs (36 chars with hyphens)
        assert_eq!(state1.session_id.len(), 36);
        assert_eq!(state2.session_id.len(), 36);
    }

    #[test]
    fn test_camera_starts_on_the_drill() {
        let state = GameState::new(0);
        assert!(state
            .camera
            .is_visible(state.drill.position_y - 1.0, state.drill.position_y + 1.0));
    }

    #[test]
    fn test_serialization_round_trip_preserves_persistent_fields() {
        let mut state = GameState::new(42);
        state.prestige_rank = 3;
        state.total_prestige_count = 5;
        state.play_time_seconds = 3600.0;
        state.sim_time = 120.5;
        state.drill.depth = 812.0;
        state.economy.credit(5000.0);
        state.upgrades.power = 4;
        state.column.advance_resolved(67);
        state.boss.last_boss_depth = 800.0;

        let json = serde_json::to_string(&state).unwrap();
        let loaded: GameState = serde_json::from_str(&json).unwrap();

        assert_eq!(loaded.prestige_rank, 3);
        assert_eq!(loaded.total_prestige_count, 5);
        assert_eq!(loaded.play_time_seconds, 3600.0);
        assert_eq!(loaded.sim_time, 120.5);
        assert_eq!(loaded.drill.depth, 812.0);
        assert_eq!(loaded.economy.coins, 5000.0);
        assert_eq!(loaded.upgrades.power, 4);
        assert_eq!(loaded.column.current_layer_index, 68);
        assert_eq!(loaded.boss.last_boss_depth, 800.0);
        assert_eq!(loaded.last_save_time, 42);
    }

    #[test]
    fn test_serialization_skips_transient_fields() {
        let mut state = GameState::new(0);
        state.paused = true;
        state.session_layers_broken = 99;
        state.column.ensure_generated(1000.0);
        state.effects.spawn(
            (0.0, 0.0),
            (0.0, 0.0),
            crate::effects::ParticleKind::Spark,
            (255, 255, 255),
            1.0,
            1.0,
        );

        let json = serde_json::to_string(&state).unwrap();
        let loaded: GameState = serde_json::from_str(&json).unwrap();

        // Transient fields should be at default values after deserialization
        assert!(!loaded.paused);
        assert_eq!(loaded.session_layers_broken, 0);
        assert!(loaded.column.layers.is_empty());
        assert!(loaded.effects.is_empty());
        assert!(!loaded.boss.is_active());
    }

    #[test]
    fn test_rebuild_after_load_reconstructs_equivalent_window() {
        let mut state = GameState::new(0);
        state.column.advance_resolved(49);
        state.drill.depth = 200.0;

        let json = serde_json::to_string(&state).unwrap();
        let mut loaded: GameState = serde_json::from_str(&json).unwrap();
        loaded.rebuild_after_load();

        // The window starts at the persisted frontier
        let head = loaded.column.layers.front().unwrap();
        assert_eq!(head.index, 50);
        assert!(!head.destroyed);

        // The drill rests on the frontier layer and kept its depth
        assert!((loaded.drill.position_y - head.top()).abs() < 1e-9);
        assert!(loaded.drill.depth >= 200.0);

        // And the camera can see it
        assert!(loaded
            .camera
            .is_visible(loaded.drill.position_y - 1.0, loaded.drill.position_y + 1.0));
    }

    #[test]
    fn test_old_save_without_optional_fields_gets_defaults() {
        // Simulate loading from an older save that lacks optional fields
        let minimal_json = serde_json::json!({
            "session_id": "test-id",
            "created_at": 0,
            "last_save_time": 0,
            "play_time_seconds": 10.0,
            "sim_time": 10.0,
            "prestige_rank": 1,
            "total_prestige_count": 1,
            "drill": {
                "position_y": DRILL_REST_Y,
                "target_y": DRILL_REST_Y,
                "depth": 0.0,
                "base_power": BASE_POWER,
                "base_speed": BASE_SPEED,
                "temperature": 0.0,
                "actions_taken": 0
            },
            "economy": {
                "coins": 12.0,
                "gems": 0,
                "lifetime_coins": 12.0,
                "lifetime_gems": 0
            }
        });

        let loaded: GameState = serde_json::from_value(minimal_json).unwrap();

        // #[serde(default)] fields should get their defaults
        assert_eq!(loaded.column.current_layer_index, 0);
        assert_eq!(loaded.upgrades.power, 0);
        assert!(loaded.bonuses.is_empty());
        assert_eq!(loaded.boss.last_boss_depth, 0.0);
        assert_eq!(loaded.best_depth, 0.0);
        assert_eq!(loaded.economy.coins, 12.0);
    }
}
