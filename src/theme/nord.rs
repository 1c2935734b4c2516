//! Nord, the alternate built-in palette

use super::{Theme, rgb};

/// Nord, mapped onto the same slots as the default theme
pub const NORD: Theme = Theme {
    name: String::new(), // names need allocation; filled in by the constructor

    bg_primary: rgb(0x2e3440),
    bg_secondary: rgb(0x3b4252),
    bg_tertiary: rgb(0x434c5e),

    fg_primary: rgb(0xd8dee9),
    fg_secondary: rgb(0xe5e9f0),
    fg_muted: rgb(0x4c566a),

    accent_primary: rgb(0x88c0d0),
    accent_secondary: rgb(0xb48ead),

    success: rgb(0xa3be8c),
    warning: rgb(0xebcb8b),
    error: rgb(0xbf616a),
    info: rgb(0x81a1c1),

    border: rgb(0x434c5e),
    border_focused: rgb(0x88c0d0),
    selection: rgb(0x434c5e),
    cursor: rgb(0xd8dee9),
};

impl Theme {
    pub fn nord() -> Self {
        Theme { name: "Nord".to_string(), ..NORD }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nord_has_correct_name() {
        let theme = Theme::nord();
        assert_eq!(theme.name, "Nord");
    }
}
