//! Data models for Nexora
//!
//! Plain records mirroring the API resources: categories, wallets,
//! transactions, budgets and the user profile. The server is the authority;
//! the `*Input` types carry client-side form validation.

pub mod budget;
pub mod category;
pub mod ids;
pub mod money;
pub mod period;
pub mod profile;
pub mod transaction;
pub mod wallet;

pub use budget::{Budget, BudgetInput, BudgetStatus, StatusLevel};
pub use category::{Category, CategoryInput, CategoryType};
pub use ids::{BudgetId, CategoryId, TransactionId, UserId, WalletId};
pub use money::Money;
pub use period::Month;
pub use profile::{Preferences, PreferencesUpdate, Profile, ProfileUpdate};
pub use transaction::{
    ImportResult, Transaction, TransactionFilter, TransactionInput, TransactionKind,
    TransactionSummary,
};
pub use wallet::{Wallet, WalletInput};
