//! kitflik-chat: conversation state and prompt transport
//!
//! This crate owns the message log, the pending-request flag, and the draft
//! buffer, and defines the transport contract for sending a prompt to the
//! backend and receiving a plaintext reply.

pub mod conversation;
pub mod error;
pub mod transport;

pub use conversation::{Conversation, FALLBACK_REPLY, Message, Role};
pub use error::{Error, Result};
pub use transport::{HttpTransport, Transport};
