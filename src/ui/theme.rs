//! Centralized colors for the UI.

use ratatui::style::Color;

pub const COLOR_BORDER: Color = Color::DarkGray;
pub const COLOR_HEADER: Color = Color::Magenta;
pub const COLOR_ACCENT: Color = Color::Cyan;
pub const COLOR_LIKED: Color = Color::Red;
pub const COLOR_MUTED: Color = Color::Gray;
pub const COLOR_ERROR: Color = Color::Red;
pub const COLOR_SUCCESS: Color = Color::Green;
pub const COLOR_SELECTION_BG: Color = Color::Rgb(40, 40, 60);
