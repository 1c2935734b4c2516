//! Theming system for Dojo

mod nord;
mod tokyo_night;

pub use nord::NORD;
pub use tokyo_night::TOKYO_NIGHT;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Expand a packed `0xrrggbb` literal into a ratatui color
const fn rgb(hex: u32) -> Color {
    Color::Rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

/// A color theme for the application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,

    // Backgrounds
    pub bg_primary: Color,
    pub bg_secondary: Color,
    pub bg_tertiary: Color,

    // Foregrounds
    pub fg_primary: Color,
    pub fg_secondary: Color,
    pub fg_muted: Color,

    // Accents
    pub accent_primary: Color,
    pub accent_secondary: Color,

    // Status
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,

    // Chrome
    pub border: Color,
    pub border_focused: Color,
    pub selection: Color,
    pub cursor: Color,
}

impl Theme {
    /// Look up a built-in theme by name, ignoring case
    pub fn by_name(name: &str) -> Option<Theme> {
        match name.trim().to_lowercase().as_str() {
            "tokyo night" => Some(Theme::tokyo_night()),
            "nord" => Some(Theme::nord()),
            _ => None,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::tokyo_night()
    }
}
