//! The shaft view: the visible slice of the layer column, the drill, and
//! the boss overlay when an encounter is live.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::boss::BossPhase;
use crate::core::constants::*;
use crate::core::game_state::GameState;

/// World units represented by one terminal row.
pub const WORLD_UNITS_PER_ROW: f64 = 16.0;

/// Tier palette, cycled for deep columns.
const TIER_COLORS: [Color; 8] = [
    Color::Rgb(168, 132, 88),
    Color::Rgb(140, 140, 140),
    Color::Rgb(90, 120, 160),
    Color::Rgb(160, 90, 90),
    Color::Rgb(110, 150, 100),
    Color::Rgb(150, 110, 160),
    Color::Rgb(180, 160, 90),
    Color::Rgb(100, 160, 160),
];

fn tier_color(tier: u32) -> Color {
    TIER_COLORS[(tier as usize) % TIER_COLORS.len()]
}

/// Draws the shaft view for the current frame.
pub fn draw_shaft(frame: &mut Frame, area: Rect, state: &GameState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Depth {:.0}m ", state.drill.depth));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if state.is_boss_active() {
        draw_boss_overlay(frame, inner, state);
        return;
    }

    let rows = inner.height as usize;
    let cols = inner.width as usize;
    if rows == 0 || cols == 0 {
        return;
    }

    let mut lines: Vec<Line> = Vec::with_capacity(rows);
    let range = state
        .column
        .visible_range(state.camera.view_top(), state.camera.view_bottom());
    let visible: Vec<_> = state.column.layers.range(range).collect();

    for row in 0..rows {
        let world_y = state.camera.view_top() + (row as f64 + 0.5) * WORLD_UNITS_PER_ROW;

        let layer = visible
            .iter()
            .find(|l| world_y >= l.top() && world_y < l.bottom());

        let line = match layer {
            Some(l) if !l.destroyed => {
                let damaged = l.health < l.max_health;
                let glyph = if damaged { '▓' } else { '█' };
                let mut spans = vec![Span::styled(
                    glyph.to_string().repeat(cols),
                    Style::default().fg(tier_color(l.hardness_tier())),
                )];
                // Label the layer on its middle row
                let label = format!(" {} {:.0}/{:.0} ", l.index, l.health, l.max_health);
                if (world_y - l.position_y).abs() < WORLD_UNITS_PER_ROW / 2.0
                    && cols > label.len() + 4
                {
                    let left = (cols - label.len()) / 2;
                    let right = cols - label.len() - left;
                    spans = vec![
                        Span::styled(
                            glyph.to_string().repeat(left),
                            Style::default().fg(tier_color(l.hardness_tier())),
                        ),
                        Span::styled(
                            label,
                            Style::default()
                                .fg(Color::Black)
                                .bg(tier_color(l.hardness_tier())),
                        ),
                        Span::styled(
                            glyph.to_string().repeat(right),
                            Style::default().fg(tier_color(l.hardness_tier())),
                        ),
                    ];
                }
                Line::from(spans)
            }
            Some(l) => {
                // Destroyed layer still decaying fragments
                let glyph = if l.fragments.is_empty() { ' ' } else { '░' };
                Line::from(Span::styled(
                    glyph.to_string().repeat(cols),
                    Style::default().fg(Color::DarkGray),
                ))
            }
            None => Line::from(" ".repeat(cols)),
        };
        lines.push(line);
    }

    // Drill glyph over the shaft
    let drill_row = ((state.camera.world_to_screen(state.drill.position_y)
        / WORLD_UNITS_PER_ROW) as usize)
        .min(rows.saturating_sub(1));
    let mid = cols / 2;
    let heat = state.drill.heat_fraction();
    let drill_color = if heat > 0.75 {
        Color::Red
    } else if heat > 0.4 {
        Color::Yellow
    } else {
        Color::White
    };
    // Rebuild the drill row as plain shaft with the bit in the middle
    let mut drill_spans: Vec<Span> = Vec::new();
    drill_spans.push(Span::raw(" ".repeat(mid.saturating_sub(1))));
    drill_spans.push(Span::styled(
        "▼",
        Style::default().fg(drill_color).add_modifier(Modifier::BOLD),
    ));
    drill_spans.push(Span::raw(" ".repeat(cols.saturating_sub(mid))));
    lines[drill_row] = Line::from(drill_spans);

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Draws the encounter overlay. Layer data persists underneath; only the
/// visuals are replaced.
fn draw_boss_overlay(frame: &mut Frame, area: Rect, state: &GameState) {
    let mut lines: Vec<Line> = vec![Line::from("")];

    match &state.boss.phase {
        BossPhase::Spawning { .. } => {
            lines.push(Line::from(Span::styled(
                "Something stirs in the rock...",
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            )));
        }
        BossPhase::AwaitingStart => {
            lines.push(Line::from(Span::styled(
                format!("STONE WARDEN  —  encounter #{}", state.boss.encounters_total),
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(""));
            lines.push(Line::from(format!(
                "{} taps, {:.0} seconds",
                state.boss.next_tap_health(),
                BOSS_COMBAT_SECONDS
            )));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "[Enter] begin",
                Style::default().fg(Color::Green),
            )));
        }
        BossPhase::InCombat {
            health,
            max_health,
            time_remaining,
            ..
        } => {
            lines.push(Line::from(Span::styled(
                "STONE WARDEN",
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(""));
            let width = (area.width as usize).saturating_sub(12).max(10);
            let filled = (width as f64 * *health as f64 / (*max_health).max(1) as f64) as usize;
            lines.push(Line::from(vec![
                Span::raw("HP "),
                Span::styled("█".repeat(filled), Style::default().fg(Color::Red)),
                Span::styled("░".repeat(width - filled), Style::default().fg(Color::DarkGray)),
                Span::raw(format!(" {}", health)),
            ]));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("{:.1}s  —  [Space] strike!", time_remaining.max(0.0)),
                Style::default().fg(Color::Yellow),
            )));
        }
        BossPhase::Victory { .. } => {
            lines.push(Line::from(Span::styled(
                "WARDEN SHATTERED!",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from("Coin, power, and speed surges active."));
        }
        BossPhase::Defeat {
            continuation_available,
            ..
        } => {
            lines.push(Line::from(Span::styled(
                "The warden holds...",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )));
            if *continuation_available {
                lines.push(Line::from(Span::styled(
                    "[Enter] one more chance",
                    Style::default().fg(Color::Green),
                )));
            }
        }
        BossPhase::Dormant => {}
    }

    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        area,
    );
}
