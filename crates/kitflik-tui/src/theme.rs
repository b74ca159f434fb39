//! Color themes

use ratatui::style::{Color, Modifier, Style};

/// Color palette for the UI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background color
    pub bg: Color,
    /// Primary text color
    pub fg: Color,
    /// Dimmed/secondary text
    pub dim: Color,
    /// Accent color (user messages, focused borders, spinner)
    pub accent: Color,
    /// Assistant reply color
    pub reply: Color,
    /// Error/fallback color
    pub error: Color,
    /// Border color
    pub border: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            bg: Color::Reset,
            fg: Color::White,
            dim: Color::DarkGray,
            accent: Color::Cyan,
            reply: Color::Green,
            error: Color::Red,
            border: Color::DarkGray,
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            bg: Color::White,
            fg: Color::Black,
            dim: Color::Gray,
            accent: Color::Blue,
            reply: Color::Rgb(0, 120, 0),
            error: Color::Red,
            border: Color::Gray,
        }
    }

    /// Base text style
    pub fn base_style(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    /// Dimmed text style
    pub fn dim_style(&self) -> Style {
        Style::default().fg(self.dim)
    }

    /// Accent style
    pub fn accent_style(&self) -> Style {
        Style::default().fg(self.accent)
    }

    /// Bold accent style
    pub fn accent_bold(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// Bold assistant-reply style
    pub fn reply_bold(&self) -> Style {
        Style::default().fg(self.reply).add_modifier(Modifier::BOLD)
    }

    /// Error style
    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    /// Border style
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }
}
