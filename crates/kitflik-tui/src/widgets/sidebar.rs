//! Collapsible sidebar panel

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Column width the sidebar occupies when open
pub const SIDEBAR_WIDTH: u16 = 26;

/// Sidebar with the app title, the new-conversation affordance, and the
/// keybinding reference. Purely informational; the bindings it describes are
/// handled by the event loop.
pub struct Sidebar<'a> {
    title: &'a str,
    theme: &'a Theme,
}

impl<'a> Sidebar<'a> {
    /// Create a sidebar
    pub fn new(title: &'a str, theme: &'a Theme) -> Self {
        Self { title, theme }
    }

    fn hint(&self, keys: &str, what: &str) -> Line<'static> {
        Line::from(vec![
            Span::styled(format!(" {:<9}", keys), self.theme.accent_style()),
            Span::styled(what.to_string(), self.theme.dim_style()),
        ])
    }
}

impl Widget for Sidebar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::RIGHT)
            .border_style(self.theme.border_style());
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!(" ◆ {}", self.title),
                self.theme.accent_bold(),
            )),
            Line::from(""),
            self.hint("Ctrl+N", "New conversation"),
            Line::from(""),
            self.hint("Enter", "Send message"),
            self.hint("PgUp/Dn", "Scroll history"),
            self.hint("Ctrl+B", "Hide sidebar"),
            self.hint("Ctrl+C", "Quit"),
        ];

        Paragraph::new(lines).render(inner, buf);
    }
}
