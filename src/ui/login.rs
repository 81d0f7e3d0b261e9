//! Login and registration screens.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::forms::{centered, render_form};
use super::theme::{COLOR_BORDER, COLOR_HEADER, COLOR_MUTED};
use crate::app::App;

const LOGO: &str = "\u{1f43e} Toe Beans";

pub fn render_login_screen(frame: &mut Frame, app: &App) {
    let area = centered(frame.area(), 56, 16);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(COLOR_BORDER));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(6),
        Constraint::Length(2),
        Constraint::Length(3),
    ])
    .split(inner);

    let title = Paragraph::new(format!("{}\nLogin", LOGO))
        .style(Style::default().fg(COLOR_HEADER))
        .alignment(Alignment::Center);
    frame.render_widget(title, rows[0]);

    render_form(frame, rows[1], &app.login_form);

    let waiting = if app.login_in_flight {
        "Logging in..."
    } else {
        ""
    };
    frame.render_widget(
        Paragraph::new(waiting).alignment(Alignment::Center),
        rows[2],
    );

    let hint = Paragraph::new(
        "[Enter] Login  [Ctrl+G] Guest login  [Ctrl+R] Sign up\n[Tab] Next field  [Ctrl+C] Quit",
    )
    .style(Style::default().fg(COLOR_MUTED))
    .alignment(Alignment::Center);
    frame.render_widget(hint, rows[3]);
}

pub fn render_register_screen(frame: &mut Frame, app: &App) {
    let area = centered(frame.area(), 56, 20);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(COLOR_BORDER));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(12),
        Constraint::Length(2),
    ])
    .split(inner);

    let title = Paragraph::new(format!("{}\nUser registration", LOGO))
        .style(Style::default().fg(COLOR_HEADER))
        .alignment(Alignment::Center);
    frame.render_widget(title, rows[0]);

    render_form(frame, rows[1], &app.register_form);

    let hint = Paragraph::new("[Tab] Next field  [Enter] Register  [Esc] Back to login")
        .style(Style::default().fg(COLOR_MUTED))
        .alignment(Alignment::Center);
    frame.render_widget(hint, rows[2]);
}
