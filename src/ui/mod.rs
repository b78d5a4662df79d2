//! Terminal presentation. Maps simulation state and tick events onto
//! ratatui widgets; contains no game logic.

pub mod shaft_scene;
pub mod stats_panel;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::core::game_state::GameState;
use crate::core::offline::OfflineReport;
use crate::input::GameOverlay;
use crate::prestige::get_next_prestige_tier;

/// Top-level draw: shaft + stats panel + event log, then any overlay.
pub fn draw_ui(frame: &mut Frame, state: &GameState, log: &[String], overlay: &GameOverlay) {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(8)])
        .split(frame.size());

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(vertical[0]);

    shaft_scene::draw_shaft(frame, horizontal[0], state);
    stats_panel::draw_stats_panel(frame, horizontal[1], state);
    draw_log(frame, vertical[1], log);

    match overlay {
        GameOverlay::None => {}
        GameOverlay::OfflineWelcome { report } => draw_offline_welcome(frame, report),
        GameOverlay::PrestigeConfirm => draw_prestige_confirm(frame, state),
    }
}

fn draw_log(frame: &mut Frame, area: Rect, log: &[String]) {
    let visible = area.height.saturating_sub(2) as usize;
    let lines: Vec<Line> = log
        .iter()
        .rev()
        .take(visible)
        .rev()
        .map(|entry| Line::from(entry.as_str()))
        .collect();
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Log ")),
        area,
    );
}

/// Centered modal rect helper.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

fn draw_offline_welcome(frame: &mut Frame, report: &OfflineReport) {
    let area = centered_rect(46, 9, frame.size());
    frame.render_widget(Clear, area);

    let hours = report.elapsed_seconds as f64 / 3600.0;
    let lines = vec![
        Line::from(Span::styled(
            "Welcome back!",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Away for {:.1}h", hours)),
        Line::from(format!(
            "The rig kept digging: {} layers, +{:.0} coins",
            report.layers_broken, report.coins_gained
        )),
        Line::from(format!(
            "Depth {:.0}m → {:.0}m",
            report.depth_before, report.depth_after
        )),
        Line::from(""),
        Line::from(Span::styled(
            "press any key",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn draw_prestige_confirm(frame: &mut Frame, state: &GameState) {
    let area = centered_rect(48, 9, frame.size());
    frame.render_widget(Clear, area);

    let next = get_next_prestige_tier(state.prestige_rank);
    let lines = vec![
        Line::from(Span::styled(
            format!("Prestige to {}?", next.name),
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Permanent coin multiplier x{:.2}", next.multiplier)),
        Line::from("Coins, upgrades, and depth reset."),
        Line::from("Gems are kept."),
        Line::from(""),
        Line::from(Span::styled(
            "[Enter] confirm   [any] cancel",
            Style::default().fg(Color::Green),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
        area,
    );
}
