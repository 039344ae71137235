//! Budget model
//!
//! A budget caps spending for one category in one month, optionally scoped
//! to a single wallet. The server computes how much of each limit is used.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BudgetId, CategoryId, WalletId};
use super::money::Money;
use super::period::Month;

/// Wallet label the server uses for budgets that cover every wallet
pub const ALL_WALLETS_LABEL: &str = "Tous";

/// A budget definition as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: BudgetId,

    pub category: CategoryId,

    #[serde(default)]
    pub category_name: Option<String>,

    pub wallet: Option<WalletId>,

    #[serde(default)]
    pub wallet_name: Option<String>,

    /// Always the first day of the month
    pub month: NaiveDate,

    pub limit_amount: Money,
}

impl Budget {
    pub fn period(&self) -> Month {
        Month::of(self.month)
    }

    pub fn wallet_label(&self) -> &str {
        self.wallet_name.as_deref().unwrap_or(ALL_WALLETS_LABEL)
    }
}

/// Payload for creating or replacing a budget
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetInput {
    pub category: CategoryId,

    /// `None` covers every wallet
    pub wallet: Option<WalletId>,

    pub month: NaiveDate,

    pub limit_amount: Money,
}

impl BudgetInput {
    /// Build a payload; any day in the month is normalized to day 1
    pub fn new(category: CategoryId, month: NaiveDate, limit_amount: Money) -> Self {
        Self {
            category,
            wallet: None,
            month: Month::of(month).first_day(),
            limit_amount,
        }
    }

    /// Scope the budget to one wallet, or to all of them with `None`
    pub fn with_wallet(mut self, wallet: Option<WalletId>) -> Self {
        self.wallet = wallet;
        self
    }

    /// Start an edit from an existing budget
    pub fn from_budget(budget: &Budget) -> Self {
        Self {
            category: budget.category,
            wallet: budget.wallet,
            month: budget.period().first_day(),
            limit_amount: budget.limit_amount,
        }
    }

    /// Validate the form before sending it
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if !self.limit_amount.is_positive() {
            return Err(BudgetValidationError::NonPositiveLimit);
        }
        Ok(())
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    NonPositiveLimit,
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveLimit => write!(f, "Budget limit must be greater than zero"),
        }
    }
}

impl std::error::Error for BudgetValidationError {}

/// How close a budget is to its limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusLevel {
    /// Below 80% of the limit
    Ok,
    /// At least 80% of the limit
    Warning,
    /// Limit reached or exceeded
    Danger,
}

impl StatusLevel {
    /// Level for a usage ratio in percent
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= 100.0 {
            Self::Danger
        } else if ratio >= 80.0 {
            Self::Warning
        } else {
            Self::Ok
        }
    }
}

impl fmt::Display for StatusLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "ok"),
            Self::Warning => write!(f, "warning"),
            Self::Danger => write!(f, "danger"),
        }
    }
}

/// Spend-vs-limit for one budget, computed by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetStatus {
    pub id: BudgetId,
    pub category_name: String,
    pub wallet_name: String,
    pub limit_amount: Money,
    pub spent_amount: Money,
    /// Percent of the limit already spent
    pub ratio: f64,
    pub status: StatusLevel,
}

impl BudgetStatus {
    /// Amount left before the limit (negative when over)
    pub fn remaining(&self) -> Money {
        self.limit_amount - self.spent_amount
    }

    /// Ratio clamped to 0..=100 for progress bars
    pub fn gauge_percent(&self) -> u16 {
        self.ratio.clamp(0.0, 100.0).round() as u16
    }
}
