//! The engaged-action pipeline: impulse, collision, damage, reward.

use rand::Rng;

use crate::core::constants::*;
use crate::drill::types::Drill;
use crate::economy::Economy;
use crate::effects::{ParticleKind, ParticlePool};
use crate::modifiers::{ActiveBonuses, BonusKind, UpgradeLevels};
use crate::prestige::get_prestige_tier;
use crate::world::LayerColumn;

/// Drill stats with every modifier provider composed in: base stats x
/// upgrade levels x prestige x active timed bonuses. Recomputed at the
/// point of use each action, so expiring bonuses take effect immediately.
#[derive(Debug, Clone)]
pub struct EffectiveStats {
    pub power: f64,
    pub speed: f64,
    pub critical_chance: f64,
    /// 0 = disabled.
    pub super_strike_interval: u32,
    pub rampage_multiplier: f64,
    pub coin_multiplier: f64,
    pub double_coin_chance: f64,
    pub gem_chance: f64,
    pub cooling_rate: f64,
}

pub fn effective_stats(
    drill: &Drill,
    upgrades: &UpgradeLevels,
    prestige_rank: u32,
    bonuses: &ActiveBonuses,
    now: f64,
) -> EffectiveStats {
    let prestige_power = 1.0 + PRESTIGE_POWER_BONUS_PER_RANK * prestige_rank as f64;
    let prestige_coins = get_prestige_tier(prestige_rank).multiplier;

    EffectiveStats {
        power: drill.base_power
            * upgrades.power_multiplier()
            * prestige_power
            * bonuses.multiplier_for(BonusKind::DrillPower, now),
        speed: drill.base_speed
            * upgrades.speed_multiplier()
            * bonuses.multiplier_for(BonusKind::DrillSpeed, now),
        critical_chance: upgrades.critical_chance(),
        super_strike_interval: upgrades.super_strike_interval(),
        rampage_multiplier: upgrades.rampage_multiplier(),
        coin_multiplier: upgrades.coin_multiplier()
            * prestige_coins
            * bonuses.multiplier_for(BonusKind::CoinGain, now),
        double_coin_chance: DOUBLE_COIN_CHANCE,
        gem_chance: GEM_DROP_CHANCE,
        cooling_rate: HEAT_DECAY_PER_SECOND * upgrades.cooling_multiplier(),
    }
}

/// What one engaged action did. The tick orchestrator maps these onto the
/// public event stream.
#[derive(Debug, Clone, PartialEq)]
pub enum DrillEvent {
    Damaged {
        index: u64,
        damage: f64,
        health_remaining: f64,
        super_strike: bool,
    },
    Destroyed {
        index: u64,
        critical: bool,
    },
    Reward {
        index: u64,
        amount: f64,
        doubled: bool,
    },
    GemFound {
        index: u64,
    },
}

/// Coin scaling with depth: deeper breaks pay proportionally more.
pub fn depth_multiplier(depth: f64) -> f64 {
    1.0 + depth.max(0.0) * DEPTH_COIN_BONUS_PER_METER
}

/// Runs one engaged action through the full pipeline:
/// impulse -> collision scan -> critical/damage branch -> reward.
///
/// `view` is the camera's `(top, bottom)` window; only the visible layer
/// subset is collision-tested. `drift_multiplier` comes from the external
/// drift collaborator (1.0 = neutral).
#[allow(clippy::too_many_arguments)]
pub fn engage_action<R: Rng>(
    drill: &mut Drill,
    column: &mut LayerColumn,
    economy: &mut Economy,
    effects: &mut ParticlePool,
    stats: &EffectiveStats,
    drift_multiplier: f64,
    view: (f64, f64),
    now: f64,
    rng: &mut R,
) -> Vec<DrillEvent> {
    let mut events = Vec::new();

    // ── 1. Impulse ──────────────────────────────────────────────
    drill.actions_taken += 1;
    let super_strike = stats.super_strike_interval > 0
        && drill.actions_taken % stats.super_strike_interval as u64 == 0;
    let super_bonus = if super_strike { SUPER_STRIKE_BONUS } else { 1.0 };
    let rampage_bonus = if drill.actions_taken > 1
        && now - drill.last_action_time <= RAMPAGE_WINDOW_SECONDS
    {
        stats.rampage_multiplier
    } else {
        1.0
    };
    let composite = drift_multiplier * rampage_bonus * super_bonus;

    drill.target_y += stats.speed * IMPULSE_FRACTION * composite;
    drill.heat_up(HEAT_PER_ACTION * composite);
    drill.engaged = true;
    drill.last_action_time = now;

    // ── 2. Collision scan over the visible subset ───────────────
    let range = column.visible_range(view.0, view.1);
    let tip = drill.position_y;
    let mut contact: Option<usize> = None;
    let mut best_gap = f64::INFINITY;
    for slot in range {
        let layer = &column.layers[slot];
        if layer.destroyed {
            continue;
        }
        let gap = layer.top() - tip;
        if gap >= -1e-6 && gap < best_gap {
            best_gap = gap;
            contact = Some(slot);
        }
    }
    let slot = match contact {
        Some(slot) if best_gap <= CONTACT_RANGE => slot,
        // Nothing in contact range: the impulse still happened, but no
        // damage is applied this step
        _ => return events,
    };

    let index = column.layers[slot].index;
    let layer_top = column.layers[slot].top();
    let layer_center = column.layers[slot].position_y;
    let reward = column.layers[slot].reward;

    // ── 3/4. Critical bypass or damage formula ──────────────────
    let critical = stats.critical_chance > 0.0
        && rng.gen_bool(stats.critical_chance.clamp(0.0, 1.0));
    let destroyed = if critical {
        column.layers[slot].destroy();
        true
    } else {
        let damage = stats.power * drift_multiplier * super_bonus;
        let destroyed = column.layers[slot].apply_damage(damage);
        if !destroyed {
            events.push(DrillEvent::Damaged {
                index,
                damage,
                health_remaining: column.layers[slot].health,
                super_strike,
            });
            // An unbroken layer is a floor: the drill cannot tunnel through
            drill.target_y = drill.target_y.min(layer_top);
            effects.spawn(
                (0.0, tip),
                (0.0, -40.0),
                ParticleKind::Spark,
                (255, 210, 90),
                1.0,
                SPARK_LIFETIME_SECONDS,
            );
        }
        destroyed
    };

    if !destroyed {
        return events;
    }

    // ── 5. Destruction: reward, fall-through, bookkeeping ───────
    events.push(DrillEvent::Destroyed { index, critical });

    let amount = reward * stats.coin_multiplier * depth_multiplier(drill.depth);
    let doubled = rng.gen_bool(stats.double_coin_chance.clamp(0.0, 1.0));
    let amount = if doubled { amount * 2.0 } else { amount };
    economy.credit(amount);
    events.push(DrillEvent::Reward {
        index,
        amount,
        doubled,
    });

    if rng.gen_bool(stats.gem_chance.clamp(0.0, 1.0)) {
        economy.credit_gem();
        events.push(DrillEvent::GemFound { index });
    }

    column.advance_resolved(index);
    // The drill falls to rest atop the next unbroken layer, which keeps
    // descent uninterrupted through consecutive single-hit breaks
    drill.target_y = column.rest_top_after(index);

    for i in 0..DEBRIS_PER_DESTROY {
        let t = (i as f64 + 0.5) / DEBRIS_PER_DESTROY as f64;
        let dir = if i % 2 == 0 { 1.0 } else { -1.0 };
        effects.spawn(
            ((t - 0.5) * LAYER_WIDTH, layer_center),
            (dir * 60.0 * t, -80.0 * t),
            ParticleKind::Debris,
            (150, 110, 70),
            2.0,
            DEBRIS_LIFETIME_SECONDS,
        );
    }
    effects.spawn(
        (0.0, layer_center),
        (0.0, -60.0),
        ParticleKind::CoinBurst,
        (250, 200, 60),
        1.5,
        DEBRIS_LIFETIME_SECONDS,
    );

    events
}
