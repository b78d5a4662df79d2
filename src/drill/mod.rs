//! The player-controlled drill: motion state and the damage pipeline.

pub mod logic;
pub mod types;

pub use logic::{effective_stats, DrillEvent, EffectiveStats};
pub use types::Drill;
