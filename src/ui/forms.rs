//! Shared form rendering plus the compose and password screens.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_MUTED};
use crate::app::{App, Form};

/// Render a stack of labeled single-line fields, highlighting the
/// focused one. Masked fields echo bullets.
pub fn render_form(frame: &mut Frame, area: Rect, form: &Form) {
    let constraints: Vec<Constraint> = form.fields.iter().map(|_| Constraint::Length(3)).collect();
    let rows = Layout::vertical(constraints).split(area);

    for (i, field) in form.fields.iter().enumerate() {
        if i >= rows.len() {
            break;
        }
        let focused = i == form.focus;
        let border_color = if focused { COLOR_ACCENT } else { COLOR_BORDER };
        let shown = if field.masked {
            "\u{2022}".repeat(field.value.chars().count())
        } else {
            field.value.clone()
        };
        let text = if focused {
            format!("{}\u{2588}", shown)
        } else {
            shown
        };
        let widget = Paragraph::new(text).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(border_color))
                .title(field.label),
        );
        frame.render_widget(widget, rows[i]);
    }
}

/// Centered column of `width` x `height` inside `area`.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect::new(
        area.x + (area.width.saturating_sub(w)) / 2,
        area.y + (area.height.saturating_sub(h)) / 2,
        w,
        h,
    )
}

pub fn render_compose_screen(frame: &mut Frame, app: &App) {
    let area = centered(frame.area(), 60, 12);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title("New posting");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::vertical([Constraint::Length(6), Constraint::Length(2)]).split(inner);
    render_form(frame, rows[0], &app.compose_form);

    let hint = Paragraph::new("[Tab] Next field  [Enter] Post  [Esc] Cancel")
        .style(Style::default().fg(COLOR_MUTED))
        .alignment(Alignment::Center);
    frame.render_widget(hint, rows[1]);
}

pub fn render_password_screen(frame: &mut Frame, app: &App) {
    let area = centered(frame.area(), 60, 12);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title("Change password");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::vertical([Constraint::Length(6), Constraint::Length(2)]).split(inner);
    render_form(frame, rows[0], &app.password_form);

    let hint = Paragraph::new("[Tab] Next field  [Enter] Change  [Esc] Cancel")
        .style(Style::default().fg(COLOR_MUTED))
        .alignment(Alignment::Center);
    frame.render_widget(hint, rows[1]);
}
