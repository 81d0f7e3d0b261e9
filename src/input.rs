//! Keyboard handling, dispatched by screen.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Screen};

/// Apply one key press to the app.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    app.mark_dirty();

    // Global binding, always active.
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    match app.screen.clone() {
        Screen::Login => handle_login_key(app, key),
        Screen::Register => handle_register_key(app, key),
        Screen::Feed => handle_feed_key(app, key),
        Screen::Profile { .. } => handle_profile_key(app, key),
        Screen::Compose => handle_compose_key(app, key),
        Screen::Password => handle_password_key(app, key),
    }
}

fn handle_login_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.submit_login(),
        KeyCode::Tab => app.login_form.next_field(),
        KeyCode::Backspace => app.login_form.backspace(),
        // Guest login shortcut, mirroring the second button of the
        // original login screen.
        KeyCode::Char('g') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.submit_guest_login()
        }
        KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.navigate(Screen::Register)
        }
        KeyCode::Char(c) => app.login_form.insert_char(c),
        _ => {}
    }
}

fn handle_register_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.navigate(Screen::Login),
        KeyCode::Enter => app.submit_registration(),
        KeyCode::Tab => app.register_form.next_field(),
        KeyCode::Backspace => app.register_form.backspace(),
        KeyCode::Char(c) => app.register_form.insert_char(c),
        _ => {}
    }
}

fn handle_feed_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_prev(),
        KeyCode::Char('l') | KeyCode::Enter => app.toggle_selected_like(),
        KeyCode::Char('d') => app.delete_selected(),
        KeyCode::Char('o') => app.open_selected_author(),
        KeyCode::Char('n') => app.navigate(Screen::Compose),
        KeyCode::Char('p') => app.navigate(Screen::Password),
        KeyCode::Char('m') => {
            if let Some(me) = app.session.login_user_name() {
                let user_name = me.to_string();
                app.navigate(Screen::Profile { user_name });
            }
        }
        KeyCode::Char('x') => app.logout(),
        _ => {}
    }
}

fn handle_profile_key(app: &mut App, key: KeyEvent) {
    // Self-introduction edit captures all input until Enter/Esc.
    if app.intro_draft.is_some() {
        match key.code {
            KeyCode::Enter => app.save_intro_edit(),
            KeyCode::Esc => app.intro_draft = None,
            KeyCode::Backspace => {
                if let Some(draft) = app.intro_draft.as_mut() {
                    draft.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(draft) = app.intro_draft.as_mut() {
                    draft.push(c);
                }
            }
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Esc => app.navigate(Screen::Feed),
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_prev(),
        KeyCode::Char('l') | KeyCode::Enter => app.toggle_selected_like(),
        KeyCode::Char('d') => app.delete_selected(),
        KeyCode::Char('o') => app.open_selected_author(),
        KeyCode::Char('i') => app.start_intro_edit(),
        KeyCode::Char('f') => app.toggle_follow(),
        KeyCode::Char('D') => {
            if app.viewing_own_page() {
                app.delete_account();
            }
        }
        _ => {}
    }
}

fn handle_compose_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.navigate(Screen::Feed),
        KeyCode::Enter => app.submit_posting(),
        KeyCode::Tab => app.compose_form.next_field(),
        KeyCode::Backspace => app.compose_form.backspace(),
        KeyCode::Char(c) => app.compose_form.insert_char(c),
        _ => {}
    }
}

fn handle_password_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.navigate(Screen::Feed),
        KeyCode::Enter => app.submit_password_change(),
        KeyCode::Tab => app.password_form.next_field(),
        KeyCode::Backspace => app.password_form.backspace(),
        KeyCode::Char(c) => app.password_form.insert_char(c),
        _ => {}
    }
}
