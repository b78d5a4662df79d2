//! Depth-gated boss encounters: a mutually exclusive mode that suspends
//! normal drilling and runs a timed tap-combat state machine.

pub mod logic;
pub mod types;

pub use logic::{boss_tick, victory_grants, BonusGrant, BossEvent};
pub use types::{BossEncounter, BossInput, BossPhase};
