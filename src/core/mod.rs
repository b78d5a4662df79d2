//! Core simulation state and the per-frame tick.

pub mod constants;
pub mod game_state;
pub mod offline;
pub mod tick;

pub use constants::*;
pub use game_state::GameState;
pub use tick::{sim_tick, TickEvent, TickInput, TickResult};
