//! Right-hand stats panel: economy, depth, heat, bonuses, and controls.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::core::game_state::GameState;
use crate::modifiers::BonusKind;
use crate::prestige::{get_next_prestige_tier, get_prestige_tier};

/// Draws the stats panel.
pub fn draw_stats_panel(frame: &mut Frame, area: Rect, state: &GameState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Economy + depth
            Constraint::Length(4), // Heat gauge
            Constraint::Length(6), // Bonuses
            Constraint::Length(6), // Prestige
            Constraint::Min(3),    // Controls
        ])
        .split(area);

    draw_economy(frame, chunks[0], state);
    draw_heat(frame, chunks[1], state);
    draw_bonuses(frame, chunks[2], state);
    draw_prestige(frame, chunks[3], state);
    draw_controls(frame, chunks[4], state);
}

fn draw_economy(frame: &mut Frame, area: Rect, state: &GameState) {
    let lines = vec![
        Line::from(vec![
            Span::styled("⛃ ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("{:.0} coins", state.economy.coins),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("◆ ", Style::default().fg(Color::Cyan)),
            Span::styled(
                format!("{} gems", state.economy.gems),
                Style::default().fg(Color::Cyan),
            ),
        ]),
        Line::from(format!(
            "Depth {:.0}m  (best {:.0}m)",
            state.drill.depth, state.best_depth
        )),
        Line::from(format!(
            "Layers broken: {} this session",
            state.session_layers_broken
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Rig ")),
        area,
    );
}

fn draw_heat(frame: &mut Frame, area: Rect, state: &GameState) {
    let heat = state.drill.heat_fraction();
    let width = (area.width as usize).saturating_sub(4).max(4);
    let filled = (width as f64 * heat) as usize;
    let color = if heat > 0.75 {
        Color::Red
    } else if heat > 0.4 {
        Color::Yellow
    } else {
        Color::Green
    };

    let lines = vec![Line::from(vec![
        Span::styled("█".repeat(filled), Style::default().fg(color)),
        Span::styled(
            "░".repeat(width.saturating_sub(filled)),
            Style::default().fg(Color::DarkGray),
        ),
    ])];
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Heat ")),
        area,
    );
}

fn draw_bonuses(frame: &mut Frame, area: Rect, state: &GameState) {
    let now = state.sim_time;
    let mut lines: Vec<Line> = state
        .bonuses
        .iter()
        .filter(|b| b.expires_at > now)
        .map(|b| {
            let color = match b.kind {
                BonusKind::CoinGain => Color::Yellow,
                BonusKind::DrillPower => Color::Red,
                BonusKind::DrillSpeed => Color::Cyan,
            };
            Line::from(Span::styled(
                format!(
                    "{} x{:.2}  {:.0}s",
                    b.kind.name(),
                    b.multiplier,
                    b.expires_at - now
                ),
                Style::default().fg(color),
            ))
        })
        .collect();
    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "none active",
            Style::default().fg(Color::DarkGray),
        )));
    }
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Bonuses ")),
        area,
    );
}

fn draw_prestige(frame: &mut Frame, area: Rect, state: &GameState) {
    let tier = get_prestige_tier(state.prestige_rank);
    let next = get_next_prestige_tier(state.prestige_rank);
    let ready = state.drill.depth >= next.required_depth;

    let lines = vec![
        Line::from(format!("Rank {} — {}", tier.rank, tier.name)),
        Line::from(format!("Coin multiplier x{:.2}", tier.multiplier)),
        Line::from(if ready {
            Span::styled(
                format!("{} ready! [r]", next.name),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(
                format!("{} at {:.0}m", next.name, next.required_depth),
                Style::default().fg(Color::DarkGray),
            )
        }),
        Line::from(format!("Bosses beaten: {}", state.boss.encounters_won)),
    ];
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Prestige ")),
        area,
    );
}

fn draw_controls(frame: &mut Frame, area: Rect, state: &GameState) {
    let mut lines = vec![Line::from("[Space] drill  [p] pause  [q] quit")];
    if state.paused {
        lines.push(Line::from(Span::styled(
            "PAUSED",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));
    }
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Controls ")),
        area,
    );
}
