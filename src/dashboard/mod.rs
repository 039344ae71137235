//! Dashboard data
//!
//! Loading everything the dashboard shows in one round of concurrent
//! requests, and the debounce machinery that keeps filter-driven reloads
//! from racing each other.

pub mod debounce;
pub mod loader;

pub use debounce::{Debouncer, Generation};
pub use loader::{load, load_failure_notice, DashboardData, DashboardQuery, DEFAULT_USER_NAME};
