use crate::core::game_state::GameState;

/// Represents a prestige tier with its properties
#[derive(Debug, Clone)]
pub struct PrestigeTier {
    pub rank: u32,
    pub name: &'static str,
    pub required_depth: f64,
    pub multiplier: f64,
}

/// Gets the prestige tier for a given rank
///
/// # Arguments
/// * `rank` - The prestige rank
///
/// # Returns
/// The PrestigeTier with name, required depth, and coin multiplier
pub fn get_prestige_tier(rank: u32) -> PrestigeTier {
    match rank {
        0 => PrestigeTier {
            rank: 0,
            name: "None",
            required_depth: 0.0,
            multiplier: 1.0,
        },
        1 => PrestigeTier {
            rank: 1,
            name: "Copper Bit",
            required_depth: 500.0,
            multiplier: 1.5,
        },
        2 => PrestigeTier {
            rank: 2,
            name: "Bronze Bit",
            required_depth: 1_200.0,
            multiplier: 2.25,
        },
        3 => PrestigeTier {
            rank: 3,
            name: "Iron Bit",
            required_depth: 2_500.0,
            multiplier: 3.375,
        },
        5 => PrestigeTier {
            rank: 5,
            name: "Cobalt Bit",
            required_depth: 6_000.0,
            multiplier: 7.59375,
        },
        10 => PrestigeTier {
            rank: 10,
            name: "Diamond Bit",
            required_depth: 20_000.0,
            multiplier: 57.665039,
        },
        _ => {
            // For other ranks, interpolate based on the pattern
            let multiplier = 1.5_f64.powi(rank as i32);
            let required_depth = if rank < 3 {
                500.0 + (rank - 1) as f64 * 700.0
            } else if rank < 10 {
                2_500.0 + (rank - 3) as f64 * 1_750.0
            } else {
                20_000.0 + (rank - 10) as f64 * 8_000.0
            };

            PrestigeTier {
                rank,
                name: "Deep Core",
                required_depth,
                multiplier,
            }
        }
    }
}

/// Gets the next prestige tier based on current rank
pub fn get_next_prestige_tier(current_rank: u32) -> PrestigeTier {
    get_prestige_tier(current_rank + 1)
}

/// Checks if the player can prestige
///
/// # Arguments
/// * `state` - The current game state
///
/// # Returns
/// true if the drill has reached the depth required for the next tier
pub fn can_prestige(state: &GameState) -> bool {
    let next_tier = get_next_prestige_tier(state.prestige_rank);
    state.drill.depth >= next_tier.required_depth
}

/// Performs a prestige: resets the run and increments the prestige rank.
///
/// Coins, upgrades, the layer column, boss progress, and the drill all
/// reset; gems, lifetime totals, and the new rank's permanent multiplier
/// survive.
pub fn perform_prestige(state: &mut GameState) {
    // Only prestige if eligible
    if !can_prestige(state) {
        return;
    }

    state.prestige_rank += 1;
    state.total_prestige_count += 1;

    state.drill.reset_for_prestige();
    state.column.reset();
    state.economy.reset_for_prestige();
    state.upgrades.reset();
    state.bonuses.clear();
    state.boss.reset_for_prestige();
    state.effects.clear();
    state.prestige_notified = false;
    state.camera.snap_to(state.drill.position_y);
}
