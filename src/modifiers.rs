//! Modifier providers: purchasable upgrades and timed boss bonuses.
//!
//! Every modifier is a closed tagged variant matched exhaustively at the
//! point of application; the simulation composes them by plain
//! multiplication and never cares where a factor came from.

use serde::{Deserialize, Serialize};

use crate::core::constants::*;
use crate::economy::Economy;

/// The purchasable drill upgrades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeKind {
    /// Damage per hit
    Power,
    /// Impulse distance per action
    Speed,
    /// Chance to destroy a layer outright
    Critical,
    /// Every Nth action strikes for double
    SuperStrike,
    /// Bonus for rapid consecutive actions
    Rampage,
    /// Coin reward multiplier
    CoinGain,
    /// Faster heat decay
    Cooling,
}

impl UpgradeKind {
    pub const ALL: [UpgradeKind; 7] = [
        UpgradeKind::Power,
        UpgradeKind::Speed,
        UpgradeKind::Critical,
        UpgradeKind::SuperStrike,
        UpgradeKind::Rampage,
        UpgradeKind::CoinGain,
        UpgradeKind::Cooling,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            UpgradeKind::Power => "Drill Power",
            UpgradeKind::Speed => "Drill Speed",
            UpgradeKind::Critical => "Critical Bit",
            UpgradeKind::SuperStrike => "Super Strike",
            UpgradeKind::Rampage => "Rampage",
            UpgradeKind::CoinGain => "Coin Yield",
            UpgradeKind::Cooling => "Coolant",
        }
    }

    /// First-level cost in coins; later levels grow geometrically.
    fn base_cost(&self) -> f64 {
        match self {
            UpgradeKind::Power => 50.0,
            UpgradeKind::Speed => 40.0,
            UpgradeKind::Critical => 120.0,
            UpgradeKind::SuperStrike => 200.0,
            UpgradeKind::Rampage => 150.0,
            UpgradeKind::CoinGain => 80.0,
            UpgradeKind::Cooling => 60.0,
        }
    }
}

/// Owned upgrade levels for the current run. Reset on prestige.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpgradeLevels {
    pub power: u32,
    pub speed: u32,
    pub critical: u32,
    pub super_strike: u32,
    pub rampage: u32,
    pub coin_gain: u32,
    pub cooling: u32,
}

impl UpgradeLevels {
    pub fn level(&self, kind: UpgradeKind) -> u32 {
        match kind {
            UpgradeKind::Power => self.power,
            UpgradeKind::Speed => self.speed,
            UpgradeKind::Critical => self.critical,
            UpgradeKind::SuperStrike => self.super_strike,
            UpgradeKind::Rampage => self.rampage,
            UpgradeKind::CoinGain => self.coin_gain,
            UpgradeKind::Cooling => self.cooling,
        }
    }

    fn level_mut(&mut self, kind: UpgradeKind) -> &mut u32 {
        match kind {
            UpgradeKind::Power => &mut self.power,
            UpgradeKind::Speed => &mut self.speed,
            UpgradeKind::Critical => &mut self.critical,
            UpgradeKind::SuperStrike => &mut self.super_strike,
            UpgradeKind::Rampage => &mut self.rampage,
            UpgradeKind::CoinGain => &mut self.coin_gain,
            UpgradeKind::Cooling => &mut self.cooling,
        }
    }

    /// Cost of the next level of `kind`.
    pub fn next_cost(&self, kind: UpgradeKind) -> f64 {
        (kind.base_cost() * UPGRADE_COST_GROWTH.powi(self.level(kind) as i32)).round()
    }

    /// Buys one level of `kind`, debiting the economy. Returns whether the
    /// purchase went through.
    pub fn purchase(&mut self, kind: UpgradeKind, economy: &mut Economy) -> bool {
        let cost = self.next_cost(kind);
        if !economy.debit(cost) {
            return false;
        }
        *self.level_mut(kind) += 1;
        true
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    // ── Effect lookups, composed into effective drill stats ────────

    pub fn power_multiplier(&self) -> f64 {
        POWER_GROWTH_PER_LEVEL.powi(self.power as i32)
    }

    pub fn speed_multiplier(&self) -> f64 {
        SPEED_GROWTH_PER_LEVEL.powi(self.speed as i32)
    }

    pub fn critical_chance(&self) -> f64 {
        (CRIT_CHANCE_PER_LEVEL * self.critical as f64).min(MAX_CRITICAL_CHANCE)
    }

    /// 0 = disabled; level 1 starts at the base interval and each further
    /// level tightens it down to the minimum.
    pub fn super_strike_interval(&self) -> u32 {
        if self.super_strike == 0 {
            0
        } else {
            (SUPER_STRIKE_BASE_INTERVAL.saturating_sub(self.super_strike - 1))
                .max(SUPER_STRIKE_MIN_INTERVAL)
        }
    }

    /// 1.0 = neutral until the upgrade is bought.
    pub fn rampage_multiplier(&self) -> f64 {
        1.0 + RAMPAGE_BONUS_PER_LEVEL * self.rampage as f64
    }

    pub fn coin_multiplier(&self) -> f64 {
        COIN_GAIN_GROWTH_PER_LEVEL.powi(self.coin_gain as i32)
    }

    pub fn cooling_multiplier(&self) -> f64 {
        1.0 + COOLING_BONUS_PER_LEVEL * self.cooling as f64
    }
}

/// The stats a timed boss bonus can multiply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BonusKind {
    CoinGain,
    DrillPower,
    DrillSpeed,
}

impl BonusKind {
    pub fn name(&self) -> &'static str {
        match self {
            BonusKind::CoinGain => "Coin Rush",
            BonusKind::DrillPower => "Overdrive",
            BonusKind::DrillSpeed => "Turbo",
        }
    }
}

/// One granted bonus: a multiplier active until its own expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimedBonus {
    pub kind: BonusKind,
    pub multiplier: f64,
    pub expires_at: f64,
}

/// The set of currently active timed bonuses. Each one expires on its own
/// clock; they are never required to expire together.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActiveBonuses {
    bonuses: Vec<TimedBonus>,
}

impl ActiveBonuses {
    pub fn grant(&mut self, kind: BonusKind, multiplier: f64, expires_at: f64) {
        self.bonuses.push(TimedBonus {
            kind,
            multiplier,
            expires_at,
        });
    }

    /// Product of all active multipliers for `kind` at time `now`;
    /// 1.0 when none apply.
    pub fn multiplier_for(&self, kind: BonusKind, now: f64) -> f64 {
        self.bonuses
            .iter()
            .filter(|b| b.kind == kind && b.expires_at > now)
            .map(|b| b.multiplier)
            .product()
    }

    /// Drops expired bonuses, returning the kinds that just reverted to 1x.
    pub fn expire(&mut self, now: f64) -> Vec<BonusKind> {
        let mut expired = Vec::new();
        self.bonuses.retain(|b| {
            if b.expires_at <= now {
                expired.push(b.kind);
                false
            } else {
                true
            }
        });
        expired
    }

    pub fn iter(&self) -> impl Iterator<Item = &TimedBonus> {
        self.bonuses.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.bonuses.is_empty()
    }

    pub fn clear(&mut self) {
        self.bonuses.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_cost_grows_geometrically() {
        let mut levels = UpgradeLevels::default();
        let first = levels.next_cost(UpgradeKind::Power);

        let mut economy = Economy::new();
        economy.credit(1_000_000.0);
        assert!(levels.purchase(UpgradeKind::Power, &mut economy));

        let second = levels.next_cost(UpgradeKind::Power);
        assert!((second - (first * UPGRADE_COST_GROWTH).round()).abs() < 1.0);
    }

    #[test]
    fn test_purchase_debits_exactly_the_cost() {
        let mut levels = UpgradeLevels::default();
        let mut economy = Economy::new();
        let cost = levels.next_cost(UpgradeKind::Speed);
        economy.credit(cost + 5.0);

        assert!(levels.purchase(UpgradeKind::Speed, &mut economy));
        assert_eq!(levels.speed, 1);
        assert!((economy.coins - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_purchase_refuses_when_balance_is_short() {
        let mut levels = UpgradeLevels::default();
        let mut economy = Economy::new();
        economy.credit(levels.next_cost(UpgradeKind::Critical) - 1.0);

        assert!(!levels.purchase(UpgradeKind::Critical, &mut economy));
        assert_eq!(levels.critical, 0);
    }

    #[test]
    fn test_critical_chance_is_capped() {
        let mut levels = UpgradeLevels::default();
        levels.critical = 100;
        assert_eq!(levels.critical_chance(), MAX_CRITICAL_CHANCE);
    }

    #[test]
    fn test_super_strike_disabled_at_level_zero() {
        let levels = UpgradeLevels::default();
        assert_eq!(levels.super_strike_interval(), 0);
    }

    #[test]
    fn test_super_strike_tightens_with_levels() {
        let mut levels = UpgradeLevels::default();
        levels.super_strike = 1;
        assert_eq!(levels.super_strike_interval(), SUPER_STRIKE_BASE_INTERVAL);

        levels.super_strike = 3;
        assert_eq!(
            levels.super_strike_interval(),
            SUPER_STRIKE_BASE_INTERVAL - 2
        );

        levels.super_strike = 100;
        assert_eq!(levels.super_strike_interval(), SUPER_STRIKE_MIN_INTERVAL);
    }

    #[test]
    fn test_bonuses_expire_independently() {
        let mut bonuses = ActiveBonuses::default();
        bonuses.grant(BonusKind::CoinGain, 2.0, 10.0);
        bonuses.grant(BonusKind::DrillPower, 1.5, 20.0);

        assert_eq!(bonuses.multiplier_for(BonusKind::CoinGain, 5.0), 2.0);
        assert_eq!(bonuses.multiplier_for(BonusKind::DrillPower, 5.0), 1.5);

        let expired = bonuses.expire(12.0);
        assert_eq!(expired, vec![BonusKind::CoinGain]);
        assert_eq!(bonuses.multiplier_for(BonusKind::CoinGain, 12.0), 1.0);
        assert_eq!(bonuses.multiplier_for(BonusKind::DrillPower, 12.0), 1.5);

        let expired = bonuses.expire(25.0);
        assert_eq!(expired, vec![BonusKind::DrillPower]);
        assert!(bonuses.is_empty());
    }

    #[test]
    fn test_stacked_bonuses_multiply() {
        let mut bonuses = ActiveBonuses::default();
        bonuses.grant(BonusKind::CoinGain, 2.0, 100.0);
        bonuses.grant(BonusKind::CoinGain, 1.5, 100.0);

        assert!((bonuses.multiplier_for(BonusKind::CoinGain, 0.0) - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_expired_bonus_no_longer_multiplies_even_before_expire_call() {
        let mut bonuses = ActiveBonuses::default();
        bonuses.grant(BonusKind::DrillSpeed, 1.25, 10.0);

        // Evaluated by clock comparison: past-expiry reads are already 1x
        assert_eq!(bonuses.multiplier_for(BonusKind::DrillSpeed, 10.5), 1.0);
    }
}
