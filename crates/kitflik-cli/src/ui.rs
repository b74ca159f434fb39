//! TUI implementation for kitflik

use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::EventStream;
use futures::StreamExt;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
};
use tokio::sync::mpsc;

use kitflik_chat::{Conversation, Result as ChatResult, Transport};
use kitflik_tui::{
    Term, Theme,
    input::{Action, event_to_action},
    widgets::{InputBox, MessageList, SIDEBAR_WIDTH, Sidebar, Spinner, message_list},
};

/// Title shown in the sidebar and the message pane
pub const APP_TITLE: &str = "KITFLIK BOT";

const SCROLL_STEP: usize = 10;

/// What the event loop must do after an action has been applied
enum Effect {
    /// Nothing further; redraw and keep going
    Continue,
    /// Leave the TUI
    Quit,
    /// Spawn a transport task for this prompt
    Send(String),
}

/// TUI application state: the conversation plus presentation-only concerns
/// (editor, scroll position, sidebar visibility, spinner phase).
pub struct TuiState {
    conversation: Conversation,
    input: InputBox,
    scroll: usize,
    sidebar_open: bool,
    theme: Theme,
    spinner_start: Instant,
}

impl TuiState {
    pub fn new(theme: Theme) -> Self {
        Self {
            conversation: Conversation::new(),
            input: InputBox::new().with_placeholder("Ask anything..."),
            scroll: 0,
            sidebar_open: true,
            theme,
            spinner_start: Instant::now(),
        }
    }

    /// Width available to the message pane and input box
    fn main_width(&self, term_width: u16) -> u16 {
        if self.sidebar_open {
            term_width.saturating_sub(SIDEBAR_WIDTH)
        } else {
            term_width
        }
    }

    fn scroll_to_bottom(&mut self) {
        // Clamped to the real bottom during render.
        self.scroll = usize::MAX;
    }

    /// Feed a completed transport outcome into the conversation
    fn resolve(&mut self, outcome: ChatResult<String>) {
        self.conversation.resolve(outcome);
        self.scroll_to_bottom();
    }

    /// Apply a keyboard action. `term_width` is the full terminal width.
    fn handle_action(&mut self, action: Action, term_width: u16) -> Effect {
        match action {
            Action::Submit => {
                let text = self.input.text().to_string();
                self.conversation.update_draft(text.as_str());
                match self.conversation.submit(&text) {
                    Some(prompt) => {
                        self.input.clear();
                        self.spinner_start = Instant::now();
                        self.scroll_to_bottom();
                        Effect::Send(prompt)
                    }
                    // Blank draft or a request already in flight.
                    None => Effect::Continue,
                }
            }
            Action::NewConversation => {
                self.conversation.reset();
                self.scroll = 0;
                Effect::Continue
            }
            Action::ToggleSidebar => {
                self.sidebar_open = !self.sidebar_open;
                Effect::Continue
            }
            Action::PageUp => {
                self.scroll = self.scroll.saturating_sub(SCROLL_STEP);
                Effect::Continue
            }
            Action::PageDown => {
                self.scroll = self.scroll.saturating_add(SCROLL_STEP);
                Effect::Continue
            }
            Action::Quit | Action::Interrupt | Action::Eof => Effect::Quit,
            other => {
                let width = self.main_width(term_width);
                if self.input.handle_action(&other, width) {
                    self.conversation.update_draft(self.input.text());
                }
                Effect::Continue
            }
        }
    }

    /// Render the UI
    pub fn render(&mut self, frame: &mut Frame<'_>) {
        let area = frame.area();

        let main = if self.sidebar_open && area.width > SIDEBAR_WIDTH {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(1)])
                .split(area);
            frame.render_widget(Sidebar::new(APP_TITLE, &self.theme), columns[0]);
            columns[1]
        } else {
            area
        };

        // Layout: messages (flex), status bar (1), input (3)
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),
                Constraint::Length(1),
                Constraint::Length(3),
            ])
            .split(main);

        self.render_messages(frame, rows[0]);
        self.render_status(frame, rows[1]);
        self.input.render(rows[2], frame.buffer_mut(), &self.theme);
    }

    fn render_messages(&mut self, frame: &mut Frame<'_>, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style())
            .title(format!(" {} ", APP_TITLE));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let pending = self.conversation.is_pending();
        if self.conversation.messages().is_empty() && !pending {
            self.render_welcome(frame, inner);
            return;
        }

        let height = message_list::content_height(
            self.conversation.messages(),
            pending,
            inner.width as usize,
        );
        let max_scroll = height.saturating_sub(inner.height as usize);
        self.scroll = self.scroll.min(max_scroll);

        let pending_since = pending.then_some(self.spinner_start);
        let list = MessageList::new(self.conversation.messages(), &self.theme)
            .scroll(self.scroll)
            .pending_since(pending_since);
        frame.render_widget(list, inner);

        if height > inner.height as usize {
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("↑"))
                .end_symbol(Some("↓"))
                .track_symbol(Some("│"))
                .thumb_symbol("█");
            let mut scrollbar_state = ScrollbarState::new(height)
                .position(self.scroll)
                .viewport_content_length(inner.height as usize);
            frame.render_stateful_widget(scrollbar, inner, &mut scrollbar_state);
        }
    }

    fn render_welcome(&self, frame: &mut Frame<'_>, area: Rect) {
        let welcome = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("  Welcome to {}", APP_TITLE),
                self.theme.accent_bold(),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "  Your intelligent assistant. Ask anything!",
                self.theme.dim_style(),
            )),
            Line::from(""),
            Line::from(""),
            Line::from(vec![
                Span::styled("    Enter     ", self.theme.accent_style()),
                Span::styled("Send message", self.theme.base_style()),
            ]),
            Line::from(vec![
                Span::styled("    Ctrl+N    ", self.theme.accent_style()),
                Span::styled("New conversation", self.theme.base_style()),
            ]),
            Line::from(vec![
                Span::styled("    Ctrl+B    ", self.theme.accent_style()),
                Span::styled("Toggle sidebar", self.theme.base_style()),
            ]),
            Line::from(vec![
                Span::styled("    Ctrl+C    ", self.theme.accent_style()),
                Span::styled("Quit", self.theme.base_style()),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "  Type a message to get started...",
                self.theme.dim_style(),
            )),
        ]);
        frame.render_widget(welcome, area);
    }

    fn render_status(&self, frame: &mut Frame<'_>, area: Rect) {
        if self.conversation.is_pending() {
            let spinner =
                Spinner::new("Thinking...", &self.theme).started_at(self.spinner_start);
            frame.render_widget(spinner, area);
        } else {
            let hints = "Enter: send │ Ctrl+N: new │ Ctrl+B: sidebar │ Ctrl+C: quit";
            let status = Paragraph::new(Line::from(Span::styled(hints, self.theme.dim_style())));
            frame.render_widget(status, area);
        }
    }
}

/// Run the TUI event loop.
///
/// All state mutation happens here: terminal events and transport
/// completions are multiplexed onto this one task, so the conversation never
/// needs locking. A submit spawns the transport call as a detached task whose
/// outcome comes back over `reply_rx`.
pub async fn run_tui(transport: Arc<dyn Transport>, theme: Theme) -> anyhow::Result<()> {
    let mut term = Term::new()?;
    let mut state = TuiState::new(theme);

    let (reply_tx, mut reply_rx) = mpsc::channel::<ChatResult<String>>(1);
    let mut events = EventStream::new();

    // Tick for the spinner animation (80ms keeps it smooth)
    let mut tick = tokio::time::interval(Duration::from_millis(80));

    loop {
        term.draw(|frame| state.render(frame))?;
        let term_width = term.width();

        tokio::select! {
            maybe_event = events.next() => {
                match maybe_event {
                    Some(Ok(event)) => {
                        if let Some(action) = event_to_action(event) {
                            match state.handle_action(action, term_width) {
                                Effect::Quit => break,
                                Effect::Send(prompt) => {
                                    spawn_send(&transport, prompt, reply_tx.clone());
                                }
                                Effect::Continue => {}
                            }
                        }
                    }
                    Some(Err(e)) => return Err(e.into()),
                    None => break,
                }
            }
            Some(outcome) = reply_rx.recv() => {
                state.resolve(outcome);
            }
            _ = tick.tick() => {}
        }
    }

    Ok(())
}

/// Fire the transport call for one prompt; the outcome lands on the channel.
fn spawn_send(
    transport: &Arc<dyn Transport>,
    prompt: String,
    tx: mpsc::Sender<ChatResult<String>>,
) {
    let transport = Arc::clone(transport);
    tokio::spawn(async move {
        let outcome = transport.send(&prompt).await;
        // The receiver is gone only when the UI is shutting down.
        let _ = tx.send(outcome).await;
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use kitflik_chat::{Error, FALLBACK_REPLY, Role};

    const W: u16 = 80;

    fn state() -> TuiState {
        TuiState::new(Theme::dark())
    }

    fn type_text(state: &mut TuiState, text: &str) {
        for c in text.chars() {
            state.handle_action(Action::Char(c), W);
        }
    }

    /// Transport answering every prompt with a fixed reply.
    struct EchoTransport {
        reply: String,
    }

    #[async_trait]
    impl Transport for EchoTransport {
        async fn send(&self, _prompt: &str) -> ChatResult<String> {
            Ok(self.reply.clone())
        }
    }

    #[test]
    fn test_typing_mirrors_draft_into_conversation() {
        let mut state = state();
        type_text(&mut state, "Hi");
        assert_eq!(state.conversation.draft(), "Hi");
    }

    #[test]
    fn test_submit_sends_prompt_and_appends_user_message() {
        let mut state = state();
        type_text(&mut state, "Hi");
        let effect = state.handle_action(Action::Submit, W);
        assert!(matches!(effect, Effect::Send(prompt) if prompt == "Hi"));
        assert_eq!(state.conversation.messages().len(), 1);
        assert_eq!(state.conversation.messages()[0].role, Role::User);
        assert!(state.conversation.is_pending());
        assert_eq!(state.input.text(), "");
    }

    #[test]
    fn test_submit_blank_is_noop() {
        let mut state = state();
        type_text(&mut state, "   ");
        let effect = state.handle_action(Action::Submit, W);
        assert!(matches!(effect, Effect::Continue));
        assert!(state.conversation.messages().is_empty());
        assert!(!state.conversation.is_pending());
    }

    #[test]
    fn test_submit_while_pending_is_noop() {
        let mut state = state();
        type_text(&mut state, "first");
        state.handle_action(Action::Submit, W);
        type_text(&mut state, "second");
        let effect = state.handle_action(Action::Submit, W);
        assert!(matches!(effect, Effect::Continue));
        assert_eq!(state.conversation.messages().len(), 1);
        // The second draft is kept for when the request resolves.
        assert_eq!(state.input.text(), "second");
    }

    #[test]
    fn test_resolve_success_appends_reply() {
        let mut state = state();
        type_text(&mut state, "Hi");
        state.handle_action(Action::Submit, W);
        state.resolve(Ok("Hello".to_string()));
        let messages = state.conversation.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].role, Role::Assistant);
        assert_eq!(messages[1].content, "Hello");
        assert!(!state.conversation.is_pending());
    }

    #[test]
    fn test_resolve_failure_appends_fallback() {
        let mut state = state();
        type_text(&mut state, "Hi");
        state.handle_action(Action::Submit, W);
        state.resolve(Err(Error::Status { code: 500 }));
        assert_eq!(state.conversation.messages()[1].content, FALLBACK_REPLY);
        assert!(!state.conversation.is_pending());
    }

    #[test]
    fn test_new_conversation_resets_log() {
        let mut state = state();
        type_text(&mut state, "Hi");
        state.handle_action(Action::Submit, W);
        state.resolve(Ok("Hello".to_string()));
        state.handle_action(Action::NewConversation, W);
        assert!(state.conversation.messages().is_empty());
    }

    #[test]
    fn test_new_conversation_during_pending_keeps_request() {
        let mut state = state();
        type_text(&mut state, "Hi");
        state.handle_action(Action::Submit, W);
        state.handle_action(Action::NewConversation, W);
        assert!(state.conversation.is_pending());
        // The late reply lands in the fresh log (accepted race).
        state.resolve(Ok("late".to_string()));
        assert_eq!(state.conversation.messages().len(), 1);
    }

    #[test]
    fn test_sidebar_toggle() {
        let mut state = state();
        assert!(state.sidebar_open);
        state.handle_action(Action::ToggleSidebar, W);
        assert!(!state.sidebar_open);
        state.handle_action(Action::ToggleSidebar, W);
        assert!(state.sidebar_open);
    }

    #[test]
    fn test_quit_actions() {
        let mut state = state();
        assert!(matches!(state.handle_action(Action::Quit, W), Effect::Quit));
        assert!(matches!(
            state.handle_action(Action::Interrupt, W),
            Effect::Quit
        ));
        assert!(matches!(state.handle_action(Action::Eof, W), Effect::Quit));
    }

    #[tokio::test]
    async fn test_spawned_send_delivers_outcome() {
        let transport: Arc<dyn Transport> = Arc::new(EchoTransport {
            reply: "Hello!".to_string(),
        });
        let (tx, mut rx) = mpsc::channel(1);

        let mut state = state();
        type_text(&mut state, "Hi");
        let Effect::Send(prompt) = state.handle_action(Action::Submit, W) else {
            panic!("expected a send effect");
        };
        spawn_send(&transport, prompt, tx);

        let outcome = rx.recv().await.expect("transport outcome");
        state.resolve(outcome);
        assert_eq!(state.conversation.messages()[1].content, "Hello!");
        assert!(!state.conversation.is_pending());
    }
}
