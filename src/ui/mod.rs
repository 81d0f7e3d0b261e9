//! UI rendering. One render function per screen, dispatched here, plus
//! the shared status line.

mod feed;
mod forms;
mod login;
pub mod theme;

use ratatui::{
    prelude::*,
    widgets::Paragraph,
};

use crate::app::{App, Screen, StatusKind};
use theme::{COLOR_ERROR, COLOR_SUCCESS};

/// Render the whole frame for the current screen.
pub fn render(frame: &mut Frame, app: &App) {
    match app.screen.clone() {
        Screen::Login => login::render_login_screen(frame, app),
        Screen::Register => login::render_register_screen(frame, app),
        Screen::Feed => feed::render_feed_screen(frame, app),
        Screen::Profile { user_name } => feed::render_profile_screen(frame, app, &user_name),
        Screen::Compose => forms::render_compose_screen(frame, app),
        Screen::Password => forms::render_password_screen(frame, app),
    }
    render_status_line(frame, app);
}

/// Success banner or inline error at the very bottom of the frame.
fn render_status_line(frame: &mut Frame, app: &App) {
    let status = match app.status.as_ref() {
        Some(s) => s,
        None => return,
    };
    let area = frame.area();
    if area.height == 0 {
        return;
    }
    let line = Rect::new(area.x, area.y + area.height - 1, area.width, 1);
    let color = match status.kind {
        StatusKind::Info => COLOR_SUCCESS,
        StatusKind::Error => COLOR_ERROR,
    };
    frame.render_widget(
        Paragraph::new(status.text.clone()).style(Style::default().fg(color)),
        line,
    );
}
