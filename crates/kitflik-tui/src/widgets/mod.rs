//! Custom widgets for the TUI

pub mod input_box;
pub mod message_list;
pub mod sidebar;
pub mod spinner;

pub use input_box::InputBox;
pub use message_list::MessageList;
pub use sidebar::{SIDEBAR_WIDTH, Sidebar};
pub use spinner::Spinner;
