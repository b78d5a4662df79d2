//! Currency counters.
//!
//! The economy is a leaf: it holds coin and gem balances and exposes
//! credit/debit operations. All mutation happens through these methods so
//! the rest of the simulation never touches the counters directly.

use serde::{Deserialize, Serialize};

/// Coin and gem balances for one run, plus lifetime totals that survive
/// prestige resets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Economy {
    pub coins: f64,
    pub gems: u64,
    pub lifetime_coins: f64,
    pub lifetime_gems: u64,
}

impl Default for Economy {
    fn default() -> Self {
        Self::new()
    }
}

impl Economy {
    pub fn new() -> Self {
        Self {
            coins: 0.0,
            gems: 0,
            lifetime_coins: 0.0,
            lifetime_gems: 0,
        }
    }

    /// Adds coins to the balance. Negative amounts are ignored.
    pub fn credit(&mut self, amount: f64) {
        if amount <= 0.0 {
            return;
        }
        self.coins += amount;
        self.lifetime_coins += amount;
    }

    /// Removes coins if the balance covers the amount. Returns whether the
    /// debit went through.
    pub fn debit(&mut self, amount: f64) -> bool {
        if amount < 0.0 || self.coins < amount {
            return false;
        }
        self.coins -= amount;
        true
    }

    /// Adds a single gem (the secondary resource).
    pub fn credit_gem(&mut self) {
        self.gems += 1;
        self.lifetime_gems += 1;
    }

    /// Resets the run balance. Gems and lifetime totals survive.
    pub fn reset_for_prestige(&mut self) {
        self.coins = 0.0;
    }
}
