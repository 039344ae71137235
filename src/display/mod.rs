//! Display formatting for terminal output
//!
//! Provides utilities for formatting API resources for terminal display,
//! plus the catalogue of localized notices.

pub mod budget;
pub mod category;
pub mod dashboard;
pub mod messages;
pub mod profile;
pub mod transaction;
pub mod wallet;

pub use budget::{format_budget_list, format_budget_status};
pub use category::{format_category_details, format_category_list};
pub use dashboard::{format_chart, format_dashboard};
pub use messages::{Action, Notice, Resource};
pub use profile::format_profile;
pub use transaction::{format_summary, format_transaction_details, format_transaction_list};
pub use wallet::format_wallet_list;
