//! Nexora - terminal client for a personal budgeting service
//!
//! Nexora tracks income and expenses across wallets, sorts them into
//! categories and checks spending against monthly budgets. All data lives
//! on the server; this crate is the client side of that REST API.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Local error types
//! - `storage`: Small key-value stores backing the session tokens
//! - `session`: Token persistence, session state and route gating
//! - `client`: HTTP client with bearer auth and a single refresh-and-retry
//! - `models`: API resources (transactions, categories, wallets, budgets, profile)
//! - `services`: Validation and name resolution on top of the client
//! - `reports`: Monthly insights and the spending chart series
//! - `dashboard`: Concurrent dashboard load and debounced reloads
//! - `display`: Terminal formatting and localized notices
//! - `cli`: Command handlers
//! - `tui`: Interactive dashboard
//!
//! # Example
//!
//! ```rust,ignore
//! use nexora_cli::client::ApiClient;
//! use nexora_cli::config::{NexoraPaths, Settings};
//! use nexora_cli::session::SessionContext;
//!
//! let paths = NexoraPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let client = ApiClient::from_settings(&settings, SessionContext::from_paths(&paths))?;
//! let wallets = client.list_wallets().await?;
//! ```

pub mod cli;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod session;
pub mod storage;
pub mod tui;

pub use error::{NexoraError, NexoraResult};
