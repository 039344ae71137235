//! Session handling: token persistence, lifecycle state and route gating

pub mod context;
pub mod route;
pub mod state;
pub mod token_store;

pub use context::SessionContext;
pub use route::{LoginReason, Route, Verification};
pub use state::{SessionEvent, SessionState};
pub use token_store::{StorageMode, TokenStore};
