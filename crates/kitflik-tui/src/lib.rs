//! kitflik-tui: terminal UI components
//!
//! Presentation widgets built on ratatui and crossterm. This crate renders
//! state and maps raw terminal events to semantic actions; it never mutates
//! conversation state itself.

pub mod input;
pub mod term;
pub mod theme;
pub mod widgets;

pub use term::Term;
pub use theme::Theme;
