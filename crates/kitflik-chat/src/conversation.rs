//! Conversation state: the message log, pending flag, and draft buffer.

use crate::error::Error;

/// Reply appended when the transport fails, whatever the cause.
pub const FALLBACK_REPLY: &str = "⚠️ Something went wrong. Try again.";

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Display label for the message list
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "You",
            Role::Assistant => "Assistant",
        }
    }
}

/// A single exchanged message. Immutable once appended; insertion order is
/// display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Conversation state driven through a unidirectional update cycle.
///
/// All mutation happens through [`submit`](Self::submit),
/// [`resolve`](Self::resolve), [`reset`](Self::reset), and
/// [`update_draft`](Self::update_draft), called from the single event loop
/// that owns this value. The async transport call lives outside: `submit`
/// hands back the prompt to send, and the loop feeds the outcome to
/// `resolve` when the task completes. At most one request is outstanding;
/// `submit` refuses while `pending` is set.
#[derive(Debug, Default)]
pub struct Conversation {
    messages: Vec<Message>,
    pending: bool,
    draft: String,
}

impl Conversation {
    /// Create an empty conversation
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages in display order
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Whether a request is outstanding
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// The uncommitted input buffer
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Replace the draft buffer verbatim
    pub fn update_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Begin a request/response cycle.
    ///
    /// Appends a user message with the raw `text`, clears the draft, and
    /// marks the conversation pending, returning the prompt the caller must
    /// hand to the transport. Returns `None` without any effect when `text`
    /// trims to empty or a request is already outstanding.
    pub fn submit(&mut self, text: &str) -> Option<String> {
        if self.pending || text.trim().is_empty() {
            return None;
        }

        self.messages.push(Message::user(text));
        self.draft.clear();
        self.pending = true;
        Some(text.to_string())
    }

    /// Finish the outstanding request/response cycle.
    ///
    /// On success the response body becomes the assistant reply verbatim; on
    /// failure the fixed [`FALLBACK_REPLY`] is appended instead. Either way
    /// the pending flag is cleared and the conversation is ready again.
    pub fn resolve(&mut self, outcome: Result<String, Error>) {
        let reply = match outcome {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("transport failed: {}", e);
                FALLBACK_REPLY.to_string()
            }
        };
        self.messages.push(Message::assistant(reply));
        self.pending = false;
    }

    /// Start a new conversation: clear the log.
    ///
    /// Does not touch the pending flag. A request that is still in flight is
    /// not cancelled, and its late reply will be appended to the emptied log.
    pub fn reset(&mut self) {
        self.messages.clear();
    }
}
