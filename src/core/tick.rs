//! The per-frame simulation tick: the central orchestration function.
//!
//! `sim_tick()` sequences input, drill, world, camera, boss, and effect
//! updates for one measured frame interval and returns a [`TickResult`]
//! describing what happened, so the presentation layer (main.rs) can update
//! the terminal without game logic depending on any UI types.

use rand::Rng;

use crate::boss::{boss_tick, BonusGrant, BossEvent, BossInput};
use crate::core::constants::*;
use crate::core::game_state::GameState;
use crate::drill::logic::{effective_stats, engage_action, DrillEvent};
use crate::effects::ParticleKind;
use crate::modifiers::BonusKind;
use crate::prestige::{can_prestige, get_next_prestige_tier};

/// Input gathered by the presentation layer for a single tick.
///
/// Engage events are discrete (one per frame at most), optionally carrying
/// a screen-space coordinate. The core enforces the debounce spacing.
#[derive(Debug, Clone)]
pub struct TickInput {
    /// One engage event arrived this frame.
    pub engage: bool,
    /// Optional screen-space coordinate of the engage event.
    pub engage_at: Option<(f64, f64)>,
    /// Qualifying boss-combat taps this frame.
    pub boss_taps: u32,
    /// Player acknowledged the boss fight start.
    pub acknowledge_boss: bool,
    /// Player accepted the defeat continuation.
    pub use_continuation: bool,
    /// External drift collaborator's multiplier (1.0 = neutral).
    pub drift_multiplier: f64,
}

impl Default for TickInput {
    fn default() -> Self {
        Self {
            engage: false,
            engage_at: None,
            boss_taps: 0,
            acknowledge_boss: false,
            use_continuation: false,
            drift_multiplier: 1.0,
        }
    }
}

/// A single event produced by a simulation tick.
///
/// The presentation layer maps these to log entries and visual effects;
/// the simulation never touches UI types directly.
#[derive(Debug, Clone)]
pub enum TickEvent {
    // ── Drilling ────────────────────────────────────────────────
    /// A layer took damage but survived.
    LayerDamaged {
        index: u64,
        damage: f64,
        health_remaining: f64,
        super_strike: bool,
    },

    /// A layer was destroyed.
    LayerDestroyed { index: u64, critical: bool },

    /// Coins credited for a destruction.
    CoinsEarned { amount: f64, doubled: bool },

    /// A gem (secondary resource) dropped.
    GemFound { total_gems: u64 },

    // ── Boss encounter ──────────────────────────────────────────
    /// An encounter began spawning at a depth boundary.
    BossSpawning { encounter_number: u32 },

    /// Entry animation finished; waiting for the player.
    BossReady,

    /// Tap combat began.
    BossFightStarted { tap_health: u32, seconds: f64 },

    /// The fight was won; bonuses granted.
    BossVictory { grants: Vec<BonusGrant> },

    /// The countdown expired first.
    BossDefeated { continuation_available: bool },

    /// The one-shot continuation was accepted.
    BossContinuationUsed { seconds: f64 },

    /// The encounter resolved; layers restored, drilling resumes.
    BossReturned,

    // ── Bonuses / progression ───────────────────────────────────
    /// A timed bonus reverted to 1x.
    BonusExpired { kind: BonusKind },

    /// The next prestige tier is within reach.
    PrestigeAvailable { tier_name: &'static str },
}

/// Result of processing a single simulation tick.
#[derive(Debug, Clone, Default)]
pub struct TickResult {
    /// Events produced during this tick, in chronological order.
    pub events: Vec<TickEvent>,

    /// The frame interval failed the sanity check and nothing was
    /// integrated (tab backgrounded, debugger pause).
    pub skipped: bool,

    /// The drill sat idle this step; the drift collaborator uses this.
    pub drill_idle: bool,
}

/// Processes one simulation step of measured length `dt` seconds.
///
/// A `dt` beyond [`MAX_FRAME_SECONDS`] is discarded outright so a single
/// huge elapsed interval can never teleport the drill through many layers.
/// While paused, entity updates are skipped entirely (the caller keeps
/// rendering). Boss encounters and normal drilling are mutually exclusive
/// by construction: only one branch runs per step.
pub fn sim_tick<R: Rng>(
    state: &mut GameState,
    input: &TickInput,
    dt: f64,
    rng: &mut R,
) -> TickResult {
    let mut result = TickResult::default();

    // ── 1. Frame sanity guard ───────────────────────────────────
    if dt <= 0.0 || dt > MAX_FRAME_SECONDS {
        result.skipped = true;
        result.drill_idle = true;
        return result;
    }

    if state.paused {
        result.drill_idle = true;
        return result;
    }

    state.sim_time += dt;
    state.play_time_seconds += dt;
    let now = state.sim_time;

    // ── 2. Timed-bonus expiry (clock comparison, every step) ────
    for kind in state.bonuses.expire(now) {
        result.events.push(TickEvent::BonusExpired { kind });
    }

    // ── 3. Boss branch: preempts drill/world entirely ───────────
    if state.boss.is_active() {
        let boss_input = BossInput {
            taps: input.boss_taps,
            acknowledge: input.acknowledge_boss,
            use_continuation: input.use_continuation,
        };
        if state.boss.accepts_taps() && input.boss_taps > 0 {
            if let Some((x, y)) = input.engage_at {
                state.effects.spawn(
                    (x, y),
                    (0.0, -30.0),
                    ParticleKind::Spark,
                    (255, 120, 90),
                    1.0,
                    SPARK_LIFETIME_SECONDS,
                );
            }
        }
        for event in boss_tick(&mut state.boss, &mut state.bonuses, &boss_input, dt, now) {
            result.events.push(match event {
                BossEvent::ReadyToStart => TickEvent::BossReady,
                BossEvent::FightStarted { tap_health, seconds } => {
                    TickEvent::BossFightStarted { tap_health, seconds }
                }
                BossEvent::Victory { grants } => TickEvent::BossVictory { grants },
                BossEvent::Defeated {
                    continuation_available,
                } => TickEvent::BossDefeated {
                    continuation_available,
                },
                BossEvent::ContinuationUsed { seconds } => {
                    TickEvent::BossContinuationUsed { seconds }
                }
                BossEvent::Returned => TickEvent::BossReturned,
            });
        }
        state.effects.update(dt);
        result.drill_idle = true;
        return result;
    }

    // ── 4. World: keep the column alive ahead of the camera ─────
    state.column.ensure_generated(state.camera.view_bottom());

    // ── 5. Input: debounced engage action ───────────────────────
    let engaged = input.engage && now - state.last_engage_time >= INPUT_DEBOUNCE_SECONDS;
    if engaged {
        state.last_engage_time = now;
        let stats = effective_stats(
            &state.drill,
            &state.upgrades,
            state.prestige_rank,
            &state.bonuses,
            now,
        );
        let view = (state.camera.view_top(), state.camera.view_bottom());
        let drill_events = engage_action(
            &mut state.drill,
            &mut state.column,
            &mut state.economy,
            &mut state.effects,
            &stats,
            input.drift_multiplier,
            view,
            now,
            rng,
        );
        for event in drill_events {
            result.events.push(match event {
                DrillEvent::Damaged {
                    index,
                    damage,
                    health_remaining,
                    super_strike,
                } => TickEvent::LayerDamaged {
                    index,
                    damage,
                    health_remaining,
                    super_strike,
                },
                DrillEvent::Destroyed { index, critical } => {
                    state.session_layers_broken += 1;
                    TickEvent::LayerDestroyed { index, critical }
                }
                DrillEvent::Reward { amount, doubled, .. } => {
                    TickEvent::CoinsEarned { amount, doubled }
                }
                DrillEvent::GemFound { .. } => TickEvent::GemFound {
                    total_gems: state.economy.gems,
                },
            });
        }
    } else {
        // Idle: heat decays linearly toward zero
        let cooling = HEAT_DECAY_PER_SECOND * state.upgrades.cooling_multiplier();
        state.drill.cool(dt, cooling);
        state.drill.engaged = false;
        result.drill_idle = true;
    }

    // ── 6. Drill motion integration (every step) ────────────────
    state.drill.integrate(dt);

    // The nearest unbroken layer is a hard floor: an impulse may aim the
    // target past it, but the bit cannot pass until the layer breaks
    let range = state
        .column
        .visible_range(state.camera.view_top(), state.camera.view_bottom());
    let mut floor = f64::INFINITY;
    for layer in state.column.layers.range(range) {
        if !layer.destroyed && layer.top() >= state.drill.position_y - 1e-6 {
            floor = floor.min(layer.top());
        }
    }
    if floor.is_finite() {
        state.drill.target_y = state.drill.target_y.min(floor);
        state.drill.position_y = state.drill.position_y.min(floor);
    }
    state.best_depth = state.best_depth.max(state.drill.depth);

    // ── 7. World maintenance: cull behind, decay fragments ──────
    state.column.cull(state.camera.view_top());
    state.column.update_fragments(dt);

    // ── 8. Camera follows the drill ─────────────────────────────
    state.camera.update(state.drill.position_y, dt);

    // ── 9. Particle feedback ────────────────────────────────────
    state.effects.update(dt);

    // ── 10. Boss trigger check ──────────────────────────────────
    if state.boss.try_trigger(state.drill.depth) {
        result.events.push(TickEvent::BossSpawning {
            encounter_number: state.boss.encounters_total,
        });
    }

    // ── 11. Prestige availability (announced once per run) ──────
    if !state.prestige_notified && can_prestige(state) {
        state.prestige_notified = true;
        result.events.push(TickEvent::PrestigeAvailable {
            tier_name: get_next_prestige_tier(state.prestige_rank).name,
        });
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    fn engage_input() -> TickInput {
        TickInput {
            engage: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_oversized_frame_is_discarded() {
        let mut state = GameState::new(0);
        let mut rng = test_rng();

        let result = sim_tick(&mut state, &TickInput::default(), 2.0, &mut rng);

        assert!(result.skipped);
        assert_eq!(state.sim_time, 0.0);
        assert_eq!(state.play_time_seconds, 0.0);
        assert!(state.column.layers.is_empty());
    }

    #[test]
    fn test_normal_frame_is_integrated() {
        let mut state = GameState::new(0);
        let mut rng = test_rng();

        let result = sim_tick(&mut state, &TickInput::default(), 0.016, &mut rng);

        assert!(!result.skipped);
        assert!((state.sim_time - 0.016).abs() < 1e-9);
        // The column was generated on the first tick
        assert!(!state.column.layers.is_empty());
    }

    #[test]
    fn test_paused_skips_entity_updates() {
        let mut state = GameState::new(0);
        let mut rng = test_rng();
        sim_tick(&mut state, &TickInput::default(), 0.016, &mut rng);

        state.paused = true;
        let sim_time = state.sim_time;
        let result = sim_tick(&mut state, &engage_input(), 0.016, &mut rng);

        assert!(!result.skipped);
        assert!(result.events.is_empty());
        assert_eq!(state.sim_time, sim_time);
        assert_eq!(state.drill.actions_taken, 0);
    }

    #[test]
    fn test_engage_breaks_the_first_layer() {
        let mut state = GameState::new(0);
        let mut rng = test_rng();
        // Build the column first
        sim_tick(&mut state, &TickInput::default(), 0.016, &mut rng);

        let result = sim_tick(&mut state, &engage_input(), 0.016, &mut rng);

        // Base power 10 vs tier-0 health 10: one action, one break
        assert!(result
            .events
            .iter()
            .any(|e| matches!(e, TickEvent::LayerDestroyed { index: 0, .. })));
        assert!(result
            .events
            .iter()
            .any(|e| matches!(e, TickEvent::CoinsEarned { .. })));
        assert!(state.economy.coins > 0.0);
        assert_eq!(state.session_layers_broken, 1);
    }

    #[test]
    fn test_engage_debounce_rejects_burst() {
        let mut state = GameState::new(0);
        let mut rng = test_rng();
        sim_tick(&mut state, &TickInput::default(), 0.016, &mut rng);

        // Two engage events 1ms apart: the second is inside the debounce
        sim_tick(&mut state, &engage_input(), 0.001, &mut rng);
        sim_tick(&mut state, &engage_input(), 0.001, &mut rng);

        assert_eq!(state.drill.actions_taken, 1);

        // A properly spaced event is accepted
        sim_tick(&mut state, &engage_input(), INPUT_DEBOUNCE_SECONDS + 0.001, &mut rng);
        assert_eq!(state.drill.actions_taken, 2);
    }

    #[test]
    fn test_idle_step_decays_heat() {
        let mut state = GameState::new(0);
        let mut rng = test_rng();
        sim_tick(&mut state, &TickInput::default(), 0.016, &mut rng);
        sim_tick(&mut state, &engage_input(), 0.016, &mut rng);
        let heated = state.drill.temperature;
        assert!(heated > 0.0);

        let result = sim_tick(&mut state, &TickInput::default(), 0.1, &mut rng);
        assert!(result.drill_idle);
        assert!(state.drill.temperature < heated);
    }

    #[test]
    fn test_boss_trigger_preempts_drilling() {
        let mut state = GameState::new(0);
        let mut rng = test_rng();
        sim_tick(&mut state, &TickInput::default(), 0.016, &mut rng);

        // Force depth past the first boundary
        state.drill.depth = BOSS_DEPTH_INTERVAL + 1.0;
        let result = sim_tick(&mut state, &TickInput::default(), 0.016, &mut rng);
        assert!(result
            .events
            .iter()
            .any(|e| matches!(e, TickEvent::BossSpawning { encounter_number: 1 })));
        assert!(state.is_boss_active());

        // While the encounter is live, engage events touch no layers
        let health_before: Vec<f64> = state.column.layers.iter().map(|l| l.health).collect();
        let actions_before = state.drill.actions_taken;
        let result = sim_tick(&mut state, &engage_input(), 0.016, &mut rng);
        assert!(result.drill_idle);
        assert_eq!(state.drill.actions_taken, actions_before);
        let health_after: Vec<f64> = state.column.layers.iter().map(|l| l.health).collect();
        assert_eq!(health_before, health_after);
    }

    #[test]
    fn test_boss_full_cycle_through_tick() {
        let mut state = GameState::new(0);
        let mut rng = test_rng();
        sim_tick(&mut state, &TickInput::default(), 0.016, &mut rng);
        state.drill.depth = BOSS_DEPTH_INTERVAL;
        sim_tick(&mut state, &TickInput::default(), 0.016, &mut rng);

        // Let the spawn animation finish
        let mut saw_ready = false;
        for _ in 0..200 {
            let result = sim_tick(&mut state, &TickInput::default(), 0.05, &mut rng);
            if result
                .events
                .iter()
                .any(|e| matches!(e, TickEvent::BossReady))
            {
                saw_ready = true;
                break;
            }
        }
        assert!(saw_ready);

        // Start the fight
        let result = sim_tick(
            &mut state,
            &TickInput {
                acknowledge_boss: true,
                ..Default::default()
            },
            0.016,
            &mut rng,
        );
        assert!(result
            .events
            .iter()
            .any(|e| matches!(e, TickEvent::BossFightStarted { .. })));

        // Win it with one burst of taps
        let taps = state.boss.next_tap_health();
        let result = sim_tick(
            &mut state,
            &TickInput {
                boss_taps: taps,
                ..Default::default()
            },
            0.016,
            &mut rng,
        );
        assert!(result
            .events
            .iter()
            .any(|e| matches!(e, TickEvent::BossVictory { .. })));

        // Wind down to dormant; drilling resumes
        let mut saw_returned = false;
        for _ in 0..200 {
            let result = sim_tick(&mut state, &TickInput::default(), 0.05, &mut rng);
            if result
                .events
                .iter()
                .any(|e| matches!(e, TickEvent::BossReturned))
            {
                saw_returned = true;
                break;
            }
        }
        assert!(saw_returned);
        assert!(!state.is_boss_active());
    }

    #[test]
    fn test_prestige_available_fires_once() {
        let mut state = GameState::new(0);
        let mut rng = test_rng();
        sim_tick(&mut state, &TickInput::default(), 0.016, &mut rng);

        state.drill.depth = 10_000.0;
        // Boss triggers too at this depth; ignore it and count prestige events
        let mut prestige_events = 0;
        for _ in 0..5 {
            let result = sim_tick(&mut state, &TickInput::default(), 0.016, &mut rng);
            prestige_events += result
                .events
                .iter()
                .filter(|e| matches!(e, TickEvent::PrestigeAvailable { .. }))
                .count();
        }
        assert_eq!(prestige_events, 1);
    }

    #[test]
    fn test_drill_never_tunnels_through_an_unbroken_layer() {
        let mut state = GameState::new(0);
        let mut rng = test_rng();
        sim_tick(&mut state, &TickInput::default(), 0.016, &mut rng);

        // Too weak to break anything: hammer away and keep integrating
        state.drill.base_power = 0.5;
        for i in 0..300 {
            let input = if i % 4 == 0 {
                engage_input()
            } else {
                TickInput::default()
            };
            sim_tick(&mut state, &input, 0.033, &mut rng);

            let first_live_top = state
                .column
                .layers
                .iter()
                .find(|l| !l.destroyed)
                .map(|l| l.top())
                .unwrap();
            assert!(
                state.drill.position_y <= first_live_top + 1e-6,
                "drill tunneled to {} past unbroken top {}",
                state.drill.position_y,
                first_live_top
            );
        }
    }

    #[test]
    fn test_depth_is_monotonic_across_engage_sequences() {
        let mut state = GameState::new(0);
        let mut rng = test_rng();

        let mut last_depth = 0.0;
        for i in 0..500 {
            let input = if i % 3 == 0 {
                engage_input()
            } else {
                TickInput::default()
            };
            sim_tick(&mut state, &input, 0.033, &mut rng);
            assert!(
                state.drill.depth >= last_depth,
                "depth regressed at step {}",
                i
            );
            last_depth = state.drill.depth;
        }
        assert!(last_depth > 0.0);
    }
}
