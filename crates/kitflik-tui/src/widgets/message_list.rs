//! Scrolling message list

use crate::theme::Theme;
use crate::widgets::spinner::frame_since;
use kitflik_chat::{FALLBACK_REPLY, Message, Role};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use std::time::Instant;

/// Widget rendering the conversation log, oldest first.
///
/// While a request is pending an animated assistant placeholder row is drawn
/// after the last message, mirroring the reply that will eventually arrive.
pub struct MessageList<'a> {
    messages: &'a [Message],
    theme: &'a Theme,
    scroll: usize,
    pending: Option<Instant>,
}

impl<'a> MessageList<'a> {
    /// Create a list over the conversation messages
    pub fn new(messages: &'a [Message], theme: &'a Theme) -> Self {
        Self {
            messages,
            theme,
            scroll: 0,
            pending: None,
        }
    }

    /// Set the scroll offset in lines
    pub fn scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll;
        self
    }

    /// Show the loading placeholder, animated from the given start time
    pub fn pending_since(mut self, start: Option<Instant>) -> Self {
        self.pending = start;
        self
    }

    fn header_line(&self, role: Role) -> Line<'static> {
        let (prefix, style) = match role {
            Role::User => ("▶ ", self.theme.accent_bold()),
            Role::Assistant => ("◀ ", self.theme.reply_bold()),
        };
        Line::from(Span::styled(
            format!("{}{}", prefix, role.label()),
            style,
        ))
    }

    fn message_lines(&self, msg: &Message, width: usize) -> Vec<Line<'static>> {
        let mut lines = vec![self.header_line(msg.role)];

        // The fixed fallback reply draws in the error color.
        let content_style = if msg.role == Role::Assistant && msg.content == FALLBACK_REPLY {
            self.theme.error_style()
        } else {
            self.theme.base_style()
        };

        let content_width = width.saturating_sub(2).max(1);
        for wrapped in textwrap::wrap(&msg.content, content_width) {
            lines.push(Line::from(Span::styled(
                format!("  {}", wrapped),
                content_style,
            )));
        }

        // Blank separator between messages
        lines.push(Line::from(""));
        lines
    }

    fn placeholder_lines(&self, start: Instant) -> Vec<Line<'static>> {
        vec![
            self.header_line(Role::Assistant),
            Line::from(Span::styled(
                format!("  {} ...", frame_since(start)),
                self.theme.dim_style(),
            )),
            Line::from(""),
        ]
    }
}

impl Widget for MessageList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let width = area.width as usize;
        let mut all_lines: Vec<Line<'_>> = Vec::new();
        for msg in self.messages {
            all_lines.extend(self.message_lines(msg, width));
        }
        if let Some(start) = self.pending {
            all_lines.extend(self.placeholder_lines(start));
        }

        let visible: Vec<Line<'_>> = all_lines
            .into_iter()
            .skip(self.scroll)
            .take(area.height as usize)
            .collect();

        Paragraph::new(visible)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}

/// Total rendered height of the list in lines, for scroll clamping.
/// Must stay in step with the rendering above.
pub fn content_height(messages: &[Message], pending: bool, width: usize) -> usize {
    let content_width = width.saturating_sub(2).max(1);
    let mut total = 0;
    for msg in messages {
        // Header + wrapped content + separator
        total += 1 + textwrap::wrap(&msg.content, content_width).len() + 1;
    }
    if pending {
        total += 3;
    }
    total
}
