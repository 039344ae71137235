//! Terminal User Interface module
//!
//! Interactive dashboard built on ratatui: monthly figures, the spending
//! chart, the filterable transaction list and budget usage. Data is loaded
//! in the background and refreshed as the filter changes.

pub mod app;
pub mod event;
pub mod handler;
pub mod terminal;

// Views
pub mod views;

// Widgets
pub mod widgets;

// Dialogs
pub mod dialogs;

// Layout
pub mod layout;

pub use app::App;
pub use terminal::run_tui;
