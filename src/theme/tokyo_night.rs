//! Tokyo Night, the default palette

use super::{Theme, rgb};

/// Tokyo Night (storm variant for the tertiary background)
pub const TOKYO_NIGHT: Theme = Theme {
    name: String::new(), // names need allocation; filled in by the constructor

    bg_primary: rgb(0x1a1b26),
    bg_secondary: rgb(0x24283b),
    bg_tertiary: rgb(0x414868),

    fg_primary: rgb(0xa9b1d6),
    fg_secondary: rgb(0xc0caf5),
    fg_muted: rgb(0x565f89),

    accent_primary: rgb(0x7aa2f7),
    accent_secondary: rgb(0xbb9af7),

    success: rgb(0x9ece6a),
    warning: rgb(0xe0af68),
    error: rgb(0xf7768e),
    info: rgb(0x7dcfff),

    border: rgb(0x414868),
    border_focused: rgb(0x7aa2f7),
    selection: rgb(0x283457),
    cursor: rgb(0xc0caf5),
};

impl Theme {
    pub fn tokyo_night() -> Self {
        Theme { name: "Tokyo Night".to_string(), ..TOKYO_NIGHT }
    }
}

#[cfg(test)]
mod tests {
    use ratatui::style::Color;

    use super::*;

    #[test]
    fn tokyo_night_has_correct_name() {
        let theme = Theme::tokyo_night();
        assert_eq!(theme.name, "Tokyo Night");
    }

    #[test]
    fn tokyo_night_keeps_the_published_values() {
        let theme = Theme::tokyo_night();
        assert_eq!(theme.bg_primary, Color::Rgb(26, 27, 38));
        assert_eq!(theme.accent_primary, Color::Rgb(122, 162, 247));
    }
}
