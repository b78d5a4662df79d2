//! Input handling for the game screen.
//!
//! Maps key events onto the pending [`TickInput`] through a priority chain:
//! modal overlays first, then game keys. The debounce on engage events is
//! enforced by the simulation core, not here.

use crossterm::event::{KeyCode, KeyEvent};

use crate::boss::BossPhase;
use crate::core::game_state::GameState;
use crate::core::offline::OfflineReport;
use crate::core::tick::TickInput;
use crate::prestige::{can_prestige, perform_prestige};

/// Game-screen overlay state. At most one is active at a time.
pub enum GameOverlay {
    None,
    /// Shown once after a load with offline progress.
    OfflineWelcome { report: OfflineReport },
    /// Prestige confirmation dialog.
    PrestigeConfirm,
}

/// Result of handling a game input event.
pub enum InputResult {
    /// Continue the game loop normally.
    Continue,
    /// Player quit. State should be saved first.
    Quit,
    /// State was modified (prestige) and should be saved.
    NeedsSave,
}

/// Main dispatcher for game-screen input. Handles the priority chain.
pub fn handle_game_input(
    key: KeyEvent,
    state: &mut GameState,
    overlay: &mut GameOverlay,
    pending: &mut TickInput,
) -> InputResult {
    // 1. Offline welcome overlay (any key dismisses)
    if matches!(overlay, GameOverlay::OfflineWelcome { .. }) {
        *overlay = GameOverlay::None;
        return InputResult::Continue;
    }

    // 2. Prestige confirmation overlay
    if matches!(overlay, GameOverlay::PrestigeConfirm) {
        match key.code {
            KeyCode::Enter => {
                *overlay = GameOverlay::None;
                perform_prestige(state);
                return InputResult::NeedsSave;
            }
            _ => {
                *overlay = GameOverlay::None;
                return InputResult::Continue;
            }
        }
    }

    // 3. Game keys
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => InputResult::Quit,

        KeyCode::Char('p') => {
            state.paused = !state.paused;
            InputResult::Continue
        }

        KeyCode::Char('r') => {
            if can_prestige(state) {
                *overlay = GameOverlay::PrestigeConfirm;
            }
            InputResult::Continue
        }

        KeyCode::Char(' ') => {
            // Space drives whichever mode is live: boss taps mid-combat,
            // drill engagement otherwise
            if state.boss.accepts_taps() {
                pending.boss_taps += 1;
            } else if !state.is_boss_active() {
                pending.engage = true;
            }
            InputResult::Continue
        }

        KeyCode::Enter => {
            match state.boss.phase {
                BossPhase::AwaitingStart => pending.acknowledge_boss = true,
                BossPhase::Defeat {
                    continuation_available: true,
                    ..
                } => pending.use_continuation = true,
                _ => {}
            }
            InputResult::Continue
        }

        _ => InputResult::Continue,
    }
}
