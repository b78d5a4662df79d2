//! Boss encounter phase transitions and victory rewards.

use crate::boss::types::{BossEncounter, BossInput, BossPhase};
use crate::core::constants::*;
use crate::modifiers::{ActiveBonuses, BonusKind};

/// A bonus granted by a boss victory, before it is armed with an expiry.
#[derive(Debug, Clone, PartialEq)]
pub struct BonusGrant {
    pub kind: BonusKind,
    pub multiplier: f64,
    pub duration_seconds: f64,
}

/// The victory reward set. Each grant gets its own expiry and decays
/// independently of the others.
pub fn victory_grants() -> Vec<BonusGrant> {
    vec![
        BonusGrant {
            kind: BonusKind::CoinGain,
            multiplier: BOSS_BONUS_COIN.0,
            duration_seconds: BOSS_BONUS_COIN.1,
        },
        BonusGrant {
            kind: BonusKind::DrillPower,
            multiplier: BOSS_BONUS_POWER.0,
            duration_seconds: BOSS_BONUS_POWER.1,
        },
        BonusGrant {
            kind: BonusKind::DrillSpeed,
            multiplier: BOSS_BONUS_SPEED.0,
            duration_seconds: BOSS_BONUS_SPEED.1,
        },
    ]
}

/// What happened inside the encounter this step.
#[derive(Debug, Clone, PartialEq)]
pub enum BossEvent {
    /// Entry animation finished; waiting on the player.
    ReadyToStart,
    /// Combat began.
    FightStarted { tap_health: u32, seconds: f64 },
    /// Won: bonuses granted.
    Victory { grants: Vec<BonusGrant> },
    /// Lost within the countdown.
    Defeated { continuation_available: bool },
    /// The one-shot continuation was accepted; combat resumed.
    ContinuationUsed { seconds: f64 },
    /// Encounter fully resolved; layers restored, drilling resumes.
    Returned,
}

/// Advances the encounter by one step. Only called while the encounter is
/// active; the normal drill/world branch is frozen for the duration.
pub fn boss_tick(
    boss: &mut BossEncounter,
    bonuses: &mut ActiveBonuses,
    input: &BossInput,
    dt: f64,
    now: f64,
) -> Vec<BossEvent> {
    let mut events = Vec::new();

    match &mut boss.phase {
        BossPhase::Dormant => {}

        BossPhase::Spawning { elapsed } => {
            *elapsed += dt;
            if *elapsed >= BOSS_SPAWN_SECONDS {
                boss.phase = BossPhase::AwaitingStart;
                events.push(BossEvent::ReadyToStart);
            }
        }

        BossPhase::AwaitingStart => {
            if input.acknowledge {
                let tap_health = boss.next_tap_health();
                boss.phase = BossPhase::InCombat {
                    health: tap_health,
                    max_health: tap_health,
                    time_remaining: BOSS_COMBAT_SECONDS,
                    continuation_used: false,
                };
                events.push(BossEvent::FightStarted {
                    tap_health,
                    seconds: BOSS_COMBAT_SECONDS,
                });
            }
        }

        BossPhase::InCombat {
            health,
            max_health,
            time_remaining,
            continuation_used,
        } => {
            // Taps land before the countdown is checked
            *health = health.saturating_sub(input.taps);
            if *health == 0 {
                boss.encounters_won += 1;
                let grants = victory_grants();
                for grant in &grants {
                    bonuses.grant(grant.kind, grant.multiplier, now + grant.duration_seconds);
                }
                boss.phase = BossPhase::Victory { elapsed: 0.0 };
                events.push(BossEvent::Victory { grants });
            } else {
                *time_remaining -= dt;
                if *time_remaining <= 0.0 {
                    let continuation_available = !*continuation_used;
                    boss.phase = BossPhase::Defeat {
                        elapsed: 0.0,
                        continuation_available,
                        health_remaining: *health,
                        max_health: *max_health,
                    };
                    events.push(BossEvent::Defeated {
                        continuation_available,
                    });
                }
            }
        }

        BossPhase::Victory { elapsed } => {
            *elapsed += dt;
            if *elapsed >= BOSS_EXIT_SECONDS {
                boss.phase = BossPhase::Dormant;
                events.push(BossEvent::Returned);
            }
        }

        BossPhase::Defeat {
            elapsed,
            continuation_available,
            health_remaining,
            max_health,
        } => {
            if input.use_continuation && *continuation_available {
                boss.phase = BossPhase::InCombat {
                    health: *health_remaining,
                    max_health: *max_health,
                    time_remaining: BOSS_CONTINUE_SECONDS,
                    continuation_used: true,
                };
                events.push(BossEvent::ContinuationUsed {
                    seconds: BOSS_CONTINUE_SECONDS,
                });
            } else {
                *elapsed += dt;
                if *elapsed >= BOSS_EXIT_SECONDS {
                    boss.phase = BossPhase::Dormant;
                    events.push(BossEvent::Returned);
                }
            }
        }
    }

    events
}
