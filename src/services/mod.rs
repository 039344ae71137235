//! Service layer for Nexora
//!
//! The service layer sits between the views and the API client, handling
//! form validation and resolving the names users type into ids.

pub mod budget;
pub mod category;
pub mod import;
pub mod transaction;
pub mod wallet;

pub use budget::BudgetService;
pub use category::CategoryService;
pub use import::{ImportPreviewEntry, ImportPreviewSummary, ImportService, ImportStatus};
pub use transaction::{CreateTransactionInput, TransactionService, UpdateTransactionInput};
pub use wallet::WalletService;
