//! Animated spinner

use crate::theme::Theme;
use ratatui::{buffer::Buffer, layout::Rect, text::Span, widgets::Widget};
use std::time::Instant;

const FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const FRAME_MS: u128 = 80;

/// Pick the spinner frame for the time elapsed since `start`.
pub fn frame_since(start: Instant) -> &'static str {
    let ticks = (start.elapsed().as_millis() / FRAME_MS) as usize;
    FRAMES[ticks % FRAMES.len()]
}

/// One-line animated spinner with a label, used in the status bar while a
/// request is in flight.
pub struct Spinner<'a> {
    label: &'a str,
    theme: &'a Theme,
    start: Instant,
}

impl<'a> Spinner<'a> {
    /// Create a new spinner
    pub fn new(label: &'a str, theme: &'a Theme) -> Self {
        Self {
            label,
            theme,
            start: Instant::now(),
        }
    }

    /// Anchor the animation to a fixed start time so frames advance smoothly
    /// across redraws.
    pub fn started_at(mut self, start: Instant) -> Self {
        self.start = start;
        self
    }
}

impl Widget for Spinner<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 3 {
            return;
        }
        let text = format!("{} {}", frame_since(self.start), self.label);
        let span = Span::styled(&text, self.theme.accent_style());
        buf.set_span(area.x, area.y, &span, area.width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    // Anchoring mid-frame leaves half a frame period of slack before a
    // scheduling delay could shift the expected frame.
    fn mid_frame(ticks: u64) -> Instant {
        Instant::now() - Duration::from_millis(ticks * FRAME_MS as u64 + FRAME_MS as u64 / 2)
    }

    #[test]
    fn test_frame_advances_with_time() {
        assert_eq!(frame_since(mid_frame(3)), FRAMES[3]);
    }

    #[test]
    fn test_frame_wraps_around() {
        assert_eq!(frame_since(mid_frame(FRAMES.len() as u64 + 1)), FRAMES[1]);
    }
}
