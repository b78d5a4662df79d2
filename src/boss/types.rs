//! Boss encounter state.

use serde::{Deserialize, Serialize};

use crate::core::constants::*;

/// The encounter state machine. Exactly one phase is live at a time, and
/// taps only register in `InCombat`; every exit path leaves that arm, so
/// stale input can never reach a finished fight.
#[derive(Debug, Clone, PartialEq)]
pub enum BossPhase {
    /// Normal drilling; no encounter.
    Dormant,
    /// Non-interactive entry animation. Drill and layers are frozen.
    Spawning { elapsed: f64 },
    /// Waiting for the player to start the fight.
    AwaitingStart,
    /// Timed tap combat.
    InCombat {
        health: u32,
        max_health: u32,
        time_remaining: f64,
        continuation_used: bool,
    },
    /// Won: brief exit animation before returning to drilling.
    Victory { elapsed: f64 },
    /// Lost: a one-shot continuation may be offered before the return.
    Defeat {
        elapsed: f64,
        continuation_available: bool,
        health_remaining: u32,
        max_health: u32,
    },
}

impl Default for BossPhase {
    fn default() -> Self {
        BossPhase::Dormant
    }
}

/// Player input routed to the encounter for one step.
#[derive(Debug, Clone, Copy, Default)]
pub struct BossInput {
    /// Qualifying taps this step (combat only).
    pub taps: u32,
    /// Acknowledge the fight start.
    pub acknowledge: bool,
    /// Accept the defeat continuation.
    pub use_continuation: bool,
}

/// The boss encounter entity. Only the depth boundary and win counters
/// persist; a save taken mid-encounter reloads as dormant with the
/// boundary already advanced.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BossEncounter {
    #[serde(skip)]
    pub phase: BossPhase,

    /// Depth of the last triggered boundary; advances exactly one interval
    /// per trigger.
    pub last_boss_depth: f64,

    pub encounters_won: u32,
    pub encounters_total: u32,
}

impl BossEncounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// While any phase other than `Dormant` is live, normal drill/world
    /// simulation is suspended.
    pub fn is_active(&self) -> bool {
        self.phase != BossPhase::Dormant
    }

    /// Taps register only mid-combat.
    pub fn accepts_taps(&self) -> bool {
        matches!(self.phase, BossPhase::InCombat { .. })
    }

    /// Tap health for the next fight, growing with each win.
    pub fn next_tap_health(&self) -> u32 {
        BOSS_BASE_TAP_HEALTH + BOSS_TAP_HEALTH_PER_WIN * self.encounters_won
    }

    /// Fires the encounter when `depth` crosses the next boundary.
    ///
    /// The check uses `>=`, so a large single-step depth jump past the
    /// boundary still triggers. The stored boundary advances by exactly one
    /// interval, atomically with the transition: no double-spawn at the same
    /// boundary, and at most one encounter per check.
    pub fn try_trigger(&mut self, depth: f64) -> bool {
        if self.phase != BossPhase::Dormant {
            return false;
        }
        if depth < self.last_boss_depth + BOSS_DEPTH_INTERVAL {
            return false;
        }
        self.last_boss_depth += BOSS_DEPTH_INTERVAL;
        self.encounters_total += 1;
        self.phase = BossPhase::Spawning { elapsed: 0.0 };
        true
    }

    pub fn reset_for_prestige(&mut self) {
        *self = Self::default();
    }
}
