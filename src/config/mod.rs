//! Configuration module for Nexora
//!
//! This module provides configuration management including:
//! - Platform-aware path resolution (durable and session-scoped directories)
//! - User settings persistence
//! - API connection preferences

pub mod paths;
pub mod settings;

pub use paths::NexoraPaths;
pub use settings::{Locale, Settings};
