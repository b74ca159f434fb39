//! Single-line draft editor

use crate::input::Action;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthChar;

fn char_width(c: char) -> usize {
    UnicodeWidthChar::width(c).unwrap_or(0)
}

/// Single-line text editor bound to the draft buffer.
///
/// The cursor is tracked as a character index; conversion to byte offsets
/// happens only at the edit points, so multi-byte input behaves correctly.
#[derive(Debug, Default)]
pub struct InputBox {
    text: String,
    /// Cursor position as a character index
    cursor: usize,
    /// Display columns scrolled off the left edge
    scroll: usize,
    placeholder: String,
}

impl InputBox {
    /// Create an empty input box
    pub fn new() -> Self {
        Self::default()
    }

    /// Set placeholder text shown while empty
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Current draft text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Clear the draft
    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
        self.scroll = 0;
    }

    /// Byte offset of the given character index
    fn byte_at(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    /// Display width of the text left of the cursor
    fn cursor_column(&self) -> usize {
        self.text.chars().take(self.cursor).map(char_width).sum()
    }

    fn insert(&mut self, c: char) {
        let at = self.byte_at(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
    }

    /// Remove the character at `char_idx` without moving the cursor
    fn remove(&mut self, char_idx: usize) {
        let start = self.byte_at(char_idx);
        let end = self.byte_at(char_idx + 1);
        self.text.drain(start..end);
    }

    /// Apply an editing action. `width` is the width of the box including
    /// borders, used to keep the cursor in view. Returns false for actions
    /// the editor does not consume.
    pub fn handle_action(&mut self, action: &Action, width: u16) -> bool {
        let char_count = self.text.chars().count();

        let handled = match action {
            Action::Char(c) => {
                self.insert(*c);
                true
            }
            Action::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    self.remove(self.cursor);
                    true
                } else {
                    false
                }
            }
            Action::Delete => {
                if self.cursor < char_count {
                    self.remove(self.cursor);
                    true
                } else {
                    false
                }
            }
            Action::Left => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    true
                } else {
                    false
                }
            }
            Action::Right => {
                if self.cursor < char_count {
                    self.cursor += 1;
                    true
                } else {
                    false
                }
            }
            Action::Home => {
                self.cursor = 0;
                true
            }
            Action::End => {
                self.cursor = char_count;
                true
            }
            Action::ClearLine => {
                self.clear();
                true
            }
            Action::DeleteWord => {
                let chars: Vec<char> = self.text.chars().collect();
                let mut target = self.cursor;
                while target > 0 && chars[target - 1] == ' ' {
                    target -= 1;
                }
                while target > 0 && chars[target - 1] != ' ' {
                    target -= 1;
                }
                let start = self.byte_at(target);
                let end = self.byte_at(self.cursor);
                self.text.drain(start..end);
                self.cursor = target;
                true
            }
            Action::Paste(pasted) => {
                // Single-line input: newlines collapse to a single space.
                for c in pasted.chars() {
                    if c == '\n' || c == '\r' {
                        if self.cursor > 0 && !self.text.ends_with(' ') {
                            self.insert(' ');
                        }
                    } else {
                        self.insert(c);
                    }
                }
                true
            }
            _ => false,
        };

        if handled {
            self.keep_cursor_visible(width as usize);
        }
        handled
    }

    /// Adjust horizontal scroll so the cursor column stays inside the box
    fn keep_cursor_visible(&mut self, width: usize) {
        let visible = width.saturating_sub(3).max(1);
        let column = self.cursor_column();
        if column < self.scroll {
            self.scroll = column;
        } else if column >= self.scroll + visible {
            self.scroll = column - visible + 1;
        }
    }

    /// Render the bordered input box with the cursor cell highlighted
    pub fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.accent_style());
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let (display, style) = if self.text.is_empty() {
            (self.placeholder.clone(), theme.dim_style())
        } else {
            (
                self.visible_window(inner.width as usize),
                theme.base_style(),
            )
        };

        Paragraph::new(display).style(style).render(inner, buf);

        let cursor_x = self.cursor_column().saturating_sub(self.scroll);
        if cursor_x < inner.width as usize {
            let pos = (inner.x + cursor_x as u16, inner.y);
            if let Some(cell) = buf.cell_mut(pos) {
                cell.set_style(Style::default().bg(theme.accent));
            }
        }
    }

    /// The slice of the text visible after horizontal scrolling
    fn visible_window(&self, width: usize) -> String {
        let mut window = String::new();
        let mut column = 0;
        for c in self.text.chars() {
            let w = char_width(c);
            if column + w <= self.scroll {
                column += w;
                continue;
            }
            if column + w > self.scroll + width {
                break;
            }
            window.push(c);
            column += w;
        }
        window
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: u16 = 40;

    fn typed(s: &str) -> InputBox {
        let mut input = InputBox::new();
        for c in s.chars() {
            input.handle_action(&Action::Char(c), W);
        }
        input
    }

    #[test]
    fn test_typing_appends() {
        let input = typed("hello");
        assert_eq!(input.text(), "hello");
    }

    #[test]
    fn test_backspace_middle_multibyte() {
        let mut input = typed("héllo");
        input.handle_action(&Action::Left, W);
        input.handle_action(&Action::Left, W);
        input.handle_action(&Action::Left, W);
        input.handle_action(&Action::Backspace, W);
        assert_eq!(input.text(), "hllo");
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let mut input = typed("ab");
        input.handle_action(&Action::Home, W);
        assert!(!input.handle_action(&Action::Backspace, W));
        assert_eq!(input.text(), "ab");
    }

    #[test]
    fn test_delete_forward() {
        let mut input = typed("日本語");
        input.handle_action(&Action::Home, W);
        input.handle_action(&Action::Delete, W);
        assert_eq!(input.text(), "本語");
    }

    #[test]
    fn test_insert_in_middle() {
        let mut input = typed("ac");
        input.handle_action(&Action::Left, W);
        input.handle_action(&Action::Char('b'), W);
        assert_eq!(input.text(), "abc");
    }

    #[test]
    fn test_delete_word() {
        let mut input = typed("one two  ");
        input.handle_action(&Action::DeleteWord, W);
        assert_eq!(input.text(), "one ");
        input.handle_action(&Action::DeleteWord, W);
        assert_eq!(input.text(), "");
    }

    #[test]
    fn test_clear_line() {
        let mut input = typed("scratch that");
        input.handle_action(&Action::ClearLine, W);
        assert_eq!(input.text(), "");
    }

    #[test]
    fn test_paste_collapses_newlines() {
        let mut input = InputBox::new();
        input.handle_action(&Action::Paste("one\r\ntwo\nthree".to_string()), W);
        assert_eq!(input.text(), "one two three");
    }

    #[test]
    fn test_scroll_follows_cursor() {
        let mut input = InputBox::new();
        for c in "a".repeat(60).chars() {
            input.handle_action(&Action::Char(c), 10);
        }
        // Cursor column 60 must be inside the visible window.
        assert!(input.scroll > 0);
        assert!(input.cursor_column() < input.scroll + 10);
    }

    #[test]
    fn test_visible_window_skips_scrolled_prefix() {
        let mut input = typed("abcdefgh");
        input.scroll = 3;
        assert_eq!(input.visible_window(4), "defg");
    }
}
