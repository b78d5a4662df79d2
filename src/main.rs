use std::io;
use std::time::{Duration, Instant};

use chrono::Utc;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::{backend::CrosstermBackend, Terminal};

use strata::core::constants::*;
use strata::core::offline::process_offline_progression;
use strata::core::tick::{sim_tick, TickEvent, TickInput};
use strata::input::{handle_game_input, GameOverlay, InputResult};
use strata::prestige::get_prestige_tier;
use strata::save_manager::SaveManager;
use strata::ui::shaft_scene::WORLD_UNITS_PER_ROW;
use strata::ui::draw_ui;
use strata::utils::persistence::DigRecords;
use strata::GameState;

fn main() -> io::Result<()> {
    // Handle CLI arguments
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "--version" | "-v" => {
                println!(
                    "strata {} ({})",
                    strata::build_info::BUILD_DATE,
                    strata::build_info::BUILD_COMMIT
                );
                return Ok(());
            }
            "--export" => {
                // Dump the current save as JSON for inspection
                let manager = SaveManager::new()?;
                match manager.load_or_none() {
                    Some(state) => match serde_json::to_string_pretty(&state) {
                        Ok(json) => println!("{}", json),
                        Err(e) => eprintln!("Export failed: {}", e),
                    },
                    None => eprintln!("No readable save found."),
                }
                return Ok(());
            }
            "--help" | "-h" => {
                println!("Strata - Terminal-Based Incremental Digging Game\n");
                println!("Usage: strata [command]\n");
                println!("Commands:");
                println!("  --export   Print the current save as JSON");
                println!("  --version  Show version information");
                println!("  --help     Show this help message");
                return Ok(());
            }
            other => {
                eprintln!("Unknown command: {}", other);
                eprintln!("Run 'strata --help' for usage.");
                std::process::exit(1);
            }
        }
    }

    // Load the save, or start fresh. A malformed save is treated as absent.
    let save_manager = SaveManager::new()?;
    let mut state = save_manager
        .load_or_none()
        .unwrap_or_else(|| GameState::new(Utc::now().timestamp()));

    // Offline catch-up before the first frame
    let offline_report = process_offline_progression(&mut state);
    let mut overlay = if offline_report.layers_broken > 0 {
        GameOverlay::OfflineWelcome {
            report: offline_report,
        }
    } else {
        GameOverlay::None
    };

    let mut records = DigRecords::load();

    // Terminal setup
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    terminal.clear()?;

    let result = run_game(
        &mut terminal,
        &mut state,
        &mut overlay,
        &save_manager,
        &mut records,
    );

    // Terminal teardown (always, even if the loop errored)
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;

    // Final save + records
    state.last_save_time = Utc::now().timestamp();
    let _ = save_manager.save(&state);
    records.absorb(
        state.best_depth,
        state.column.total_destroyed,
        state.total_prestige_count,
    );
    let _ = records.store();

    result
}

fn run_game(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut GameState,
    overlay: &mut GameOverlay,
    save_manager: &SaveManager,
    records: &mut DigRecords,
) -> io::Result<()> {
    let mut rng = rand::thread_rng();
    let mut log: Vec<String> = vec!["⛏ The rig is ready. [Space] to drill.".to_string()];
    let mut last_tick = Instant::now();
    let mut last_autosave = Instant::now();

    loop {
        // Match the camera window to the shaft viewport
        let size = terminal.size()?;
        let shaft_rows = size.height.saturating_sub(10) as f64;
        state.camera.viewport_height = (shaft_rows * WORLD_UNITS_PER_ROW).max(WORLD_UNITS_PER_ROW);

        terminal.draw(|frame| {
            draw_ui(frame, state, &log, overlay);
        })?;

        // Gather this frame's input
        let mut pending = TickInput::default();
        if event::poll(Duration::from_millis(TARGET_FRAME_MS))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match handle_game_input(key, state, overlay, &mut pending) {
                        InputResult::Continue => {}
                        InputResult::NeedsSave => {
                            state.last_save_time = Utc::now().timestamp();
                            let _ = save_manager.save(state);
                            log_push(&mut log, "✨ Prestige! The column resets around a stronger rig.");
                        }
                        InputResult::Quit => return Ok(()),
                    }
                }
            }
        }

        // Advance the simulation by the measured interval. Oversized
        // intervals are discarded inside sim_tick.
        let dt = last_tick.elapsed().as_secs_f64();
        last_tick = Instant::now();
        let result = sim_tick(state, &pending, dt, &mut rng);

        for event in &result.events {
            if let Some(entry) = format_event(event, state) {
                log_push(&mut log, &entry);
            }
        }

        // Autosave cadence
        if last_autosave.elapsed() >= Duration::from_secs(AUTOSAVE_INTERVAL_SECONDS) {
            state.last_save_time = Utc::now().timestamp();
            let _ = save_manager.save(state);
            if records.absorb(
                state.best_depth,
                state.column.total_destroyed,
                state.total_prestige_count,
            ) {
                let _ = records.store();
            }
            last_autosave = Instant::now();
        }
    }
}

fn log_push(log: &mut Vec<String>, entry: &str) {
    log.push(entry.to_string());
    let overflow = log.len().saturating_sub(EVENT_LOG_CAPACITY);
    if overflow > 0 {
        log.drain(..overflow);
    }
}

/// Maps a tick event onto a log line. Chatty events return None.
fn format_event(event: &TickEvent, state: &GameState) -> Option<String> {
    match event {
        TickEvent::LayerDamaged { super_strike, .. } => {
            super_strike.then(|| "⚡ Super strike!".to_string())
        }
        TickEvent::LayerDestroyed { index, critical } => Some(if *critical {
            format!("💥 Critical! Layer {} shattered", index)
        } else {
            format!("⛏ Layer {} broken", index)
        }),
        TickEvent::CoinsEarned { amount, doubled } => {
            doubled.then(|| format!("⛃ Double pay! +{:.0} coins", amount))
        }
        TickEvent::GemFound { total_gems } => {
            Some(format!("◆ A gem in the rubble ({} total)", total_gems))
        }
        TickEvent::BossSpawning { encounter_number } => Some(format!(
            "🪨 The rock groans... encounter #{}",
            encounter_number
        )),
        TickEvent::BossReady => Some("🪨 The Stone Warden blocks the shaft. [Enter]".to_string()),
        TickEvent::BossFightStarted { tap_health, seconds } => Some(format!(
            "⚔ {} taps in {:.0}s — go!",
            tap_health, seconds
        )),
        TickEvent::BossVictory { .. } => {
            Some("🏆 Warden down! Surges active.".to_string())
        }
        TickEvent::BossDefeated {
            continuation_available,
        } => Some(if *continuation_available {
            "💀 Too slow... [Enter] for one more chance".to_string()
        } else {
            "💀 The warden sinks back into the rock.".to_string()
        }),
        TickEvent::BossContinuationUsed { seconds } => {
            Some(format!("⏳ One more chance: {:.0}s!", seconds))
        }
        TickEvent::BossReturned => Some("⛏ The shaft is clear. Keep digging.".to_string()),
        TickEvent::BonusExpired { kind } => Some(format!("{} faded.", kind.name())),
        TickEvent::PrestigeAvailable { tier_name } => Some(format!(
            "✨ {} prestige within reach — [r] (rank {} now)",
            tier_name,
            get_prestige_tier(state.prestige_rank).rank
        )),
    }
}
