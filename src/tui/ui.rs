//! Board and chrome rendering for the room view.

use super::app::App;
use crate::game::Mark;
use crate::session::RoomState;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::Paragraph,
};

/// Draws the full room view.
pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(11),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    let title = Paragraph::new(format!("Tic Tac Toe - room {}", app.session().room()))
        .style(Style::default().add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    let share = Paragraph::new(app.share_line().to_string())
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(share, chunks[1]);

    render_board(f, chunks[3], app.session().state());

    if let Some(notice) = app.notice() {
        let notice = Paragraph::new(notice.to_string())
            .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center);
        f.render_widget(notice, chunks[4]);
    }

    let status = Paragraph::new(app.status().to_string()).alignment(Alignment::Center);
    f.render_widget(status, chunks[5]);
}

fn render_board(f: &mut Frame, area: Rect, state: &RoomState) {
    let board_area = center_rect(area, 23, 11);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(board_area);

    for row in 0..3 {
        render_row(f, rows[row * 2], state, row * 3);
        if row < 2 {
            render_separator(f, rows[row * 2 + 1]);
        }
    }
}

fn render_row(f: &mut Frame, area: Rect, state: &RoomState, start: usize) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(7),
            Constraint::Length(1),
            Constraint::Length(7),
            Constraint::Length(1),
            Constraint::Length(7),
        ])
        .split(area);

    for col in 0..3 {
        render_cell(f, cols[col * 2], state, start + col);
        if col < 2 {
            render_vertical_sep(f, cols[col * 2 + 1]);
        }
    }
}

fn render_cell(f: &mut Frame, area: Rect, state: &RoomState, cell: usize) {
    let (text, style) = match state.board.mark_at(cell) {
        Some(Mark::X) => (
            "X".to_string(),
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        ),
        Some(Mark::O) => (
            "O".to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        None => (
            format!("{}", cell + 1),
            Style::default().fg(Color::DarkGray),
        ),
    };
    let paragraph = Paragraph::new(text).style(style).alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}

fn render_separator(f: &mut Frame, area: Rect) {
    let sep = Paragraph::new("─".repeat(area.width as usize))
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(sep, area);
}

fn render_vertical_sep(f: &mut Frame, area: Rect) {
    let sep = Paragraph::new("│")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(sep, area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(area.width.saturating_sub(width) / 2),
            Constraint::Length(width),
            Constraint::Length(area.width.saturating_sub(width) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(area.height.saturating_sub(height) / 2),
            Constraint::Length(height),
            Constraint::Length(area.height.saturating_sub(height) / 2),
        ])
        .split(horizontal[1])[1]
}
