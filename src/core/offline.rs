//! Offline progression system.
//!
//! Converts time away into layers broken at a reduced rate, using the pure
//! per-index reward function so the credited coins match what drilling the
//! same stretch would have paid.

use chrono::Utc;

use super::constants::*;
use super::game_state::GameState;
use crate::drill::logic::depth_multiplier;
use crate::prestige::get_prestige_tier;
use crate::world::layer::reward_for;

/// Report of offline progression results
#[derive(Debug, Default, Clone)]
pub struct OfflineReport {
    pub elapsed_seconds: i64,
    pub layers_broken: u64,
    pub coins_gained: f64,
    pub depth_before: f64,
    pub depth_after: f64,
    /// Effective offline break rate as a percentage of the online estimate
    pub offline_rate_percent: f64,
}

/// Estimated layers broken while away. Elapsed time is capped at
/// [`MAX_OFFLINE_SECONDS`] and scaled down by [`OFFLINE_MULTIPLIER`].
pub fn estimate_offline_breaks(elapsed_seconds: i64) -> u64 {
    let capped_seconds = elapsed_seconds.min(MAX_OFFLINE_SECONDS).max(0);
    ((capped_seconds as f64 / OFFLINE_SECONDS_PER_LAYER) * OFFLINE_MULTIPLIER) as u64
}

/// Coins for breaking `count` layers starting at `start_index`, applying
/// the run's coin multiplier and the per-layer depth bonus.
pub fn calculate_offline_coins(start_index: u64, count: u64, coin_multiplier: f64) -> f64 {
    let mut total = 0.0;
    for index in start_index..start_index + count {
        let depth_at_layer = index as f64 * LAYER_HEIGHT / DEPTH_SCALE;
        total += reward_for(index) * coin_multiplier * depth_multiplier(depth_at_layer);
    }
    total
}

/// Processes offline progression and updates game state.
///
/// The frontier counter, drill depth, and economy all advance; the live
/// window is rebuilt from the new frontier. Boss boundaries crossed while
/// away resolve later through the normal trigger check (at most one
/// encounter per check).
pub fn process_offline_progression(state: &mut GameState) -> OfflineReport {
    let current_time = Utc::now().timestamp();
    let elapsed_seconds = current_time - state.last_save_time;

    if elapsed_seconds <= 0 {
        return OfflineReport::default();
    }

    let layers_broken = estimate_offline_breaks(elapsed_seconds);
    let depth_before = state.drill.depth;

    let coin_multiplier =
        state.upgrades.coin_multiplier() * get_prestige_tier(state.prestige_rank).multiplier;
    let start_index = state.column.current_layer_index;
    let coins_gained = calculate_offline_coins(start_index, layers_broken, coin_multiplier);

    state.economy.credit(coins_gained);
    for index in start_index..start_index + layers_broken {
        state.column.advance_resolved(index);
    }
    state.column.rebuild();

    let frontier_top = crate::world::layer::center_y_for(state.column.current_layer_index)
        - LAYER_HEIGHT / 2.0;
    state.drill.rest_at(frontier_top);
    state.best_depth = state.best_depth.max(state.drill.depth);
    state.camera.snap_to(state.drill.position_y);

    state.last_save_time = current_time;

    OfflineReport {
        elapsed_seconds,
        layers_broken,
        coins_gained,
        depth_before,
        depth_after: state.drill.depth,
        offline_rate_percent: OFFLINE_MULTIPLIER * 100.0,
    }
}
