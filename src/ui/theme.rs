use crossterm::style::{Color, Stylize};

use crate::config::ColorMode;

use super::terminal::TerminalCapabilities;

/// Design tokens for the picker.
///
/// Design constraints:
/// - Only 5 semantic colors (`colors::*`)
/// - All glyphs must be sourced from this module
pub mod colors {
    use super::Color;

    /// #22C55E
    pub const SUCCESS: Color = Color::Green;
    /// #EF4444
    pub const ERROR: Color = Color::Red;
    /// #06B6D4
    pub const INFO: Color = Color::Cyan;
    /// #3B82F6
    pub const ACCENT: Color = Color::Blue;
    /// #6B7280
    pub const DIM: Color = Color::DarkGrey;
}

pub mod icons {
    pub const QUESTION: &str = "?";
    pub const POINTER: &str = "❯";
    pub const MARKER: &str = ">>";

    // Selection states (multi-select).
    pub const SELECTED: &str = "◉";
    pub const UNSELECTED: &str = "◯";

    // Tree expansion.
    pub const EXPAND: &str = "↓";
    pub const COLLAPSE: &str = "→";

    pub const LOOP_SEPARATOR: &str = "----------------";
}

pub mod icons_ascii {
    pub const QUESTION: &str = "?";
    pub const POINTER: &str = ">";
    pub const MARKER: &str = ">>";

    pub const SELECTED: &str = "[x]";
    pub const UNSELECTED: &str = "[ ]";

    pub const EXPAND: &str = "v";
    pub const COLLAPSE: &str = "+";

    pub const LOOP_SEPARATOR: &str = "----------------";
}

/// Resolved presentation settings: whether to emit ANSI styling and which glyph set to use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub color: bool,
    pub unicode: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self::plain()
    }
}

impl Theme {
    /// Unstyled unicode output; what tests and non-tty hosts see.
    pub fn plain() -> Self {
        Self {
            color: false,
            unicode: true,
        }
    }

    pub fn from_settings(caps: &TerminalCapabilities, color: ColorMode, unicode: bool) -> Self {
        let color = match color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => caps.supports_color,
        };
        Self {
            color,
            unicode: unicode && caps.supports_unicode,
        }
    }

    pub fn question(&self) -> &'static str {
        if self.unicode {
            icons::QUESTION
        } else {
            icons_ascii::QUESTION
        }
    }

    pub fn pointer(&self) -> &'static str {
        if self.unicode {
            icons::POINTER
        } else {
            icons_ascii::POINTER
        }
    }

    pub fn marker(&self) -> &'static str {
        if self.unicode {
            icons::MARKER
        } else {
            icons_ascii::MARKER
        }
    }

    pub fn expanded(&self) -> &'static str {
        if self.unicode {
            icons::EXPAND
        } else {
            icons_ascii::EXPAND
        }
    }

    pub fn collapsed(&self) -> &'static str {
        if self.unicode {
            icons::COLLAPSE
        } else {
            icons_ascii::COLLAPSE
        }
    }

    pub fn checkbox(&self, checked: bool) -> &'static str {
        match (self.unicode, checked) {
            (true, true) => icons::SELECTED,
            (true, false) => icons::UNSELECTED,
            (false, true) => icons_ascii::SELECTED,
            (false, false) => icons_ascii::UNSELECTED,
        }
    }

    pub fn loop_separator(&self) -> &'static str {
        if self.unicode {
            icons::LOOP_SEPARATOR
        } else {
            icons_ascii::LOOP_SEPARATOR
        }
    }

    pub fn paint(&self, text: &str, color: Color) -> String {
        if !self.color {
            return text.to_string();
        }
        format!("{}", text.with(color))
    }

    pub fn bold(&self, text: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        format!("{}", text.bold())
    }

    pub fn dim(&self, text: &str) -> String {
        self.paint(text, colors::DIM)
    }
}
