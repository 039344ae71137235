//! Dialog modules for the TUI
//!
//! Contains modal dialogs drawn over the active view

pub mod confirm;
pub mod filter;
pub mod help;
