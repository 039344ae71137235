//! Transaction model
//!
//! Amounts are signed: negative for expenses, positive for income. The API
//! adds read-only display fields (category name/icon/color, wallet
//! name/color) to every transaction it returns.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{CategoryId, TransactionId, WalletId};
use super::money::Money;

/// Label used for transactions without a category
pub const UNCATEGORIZED_LABEL: &str = "Sans categorie";

/// Direction of a transaction as entered in a form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TransactionKind {
    #[default]
    #[serde(rename = "EXP")]
    Expense,
    #[serde(rename = "INC")]
    Income,
}

impl TransactionKind {
    /// Kind implied by a signed amount
    pub fn of(amount: Money) -> Self {
        if amount.is_negative() {
            Self::Expense
        } else {
            Self::Income
        }
    }

    /// Sign an absolute amount for this kind
    pub fn sign(&self, amount: Money) -> Money {
        match self {
            Self::Expense => -amount.abs(),
            Self::Income => amount.abs(),
        }
    }

    /// Filter code ("EXP" / "INC")
    pub fn code(&self) -> &'static str {
        match self {
            Self::Expense => "EXP",
            Self::Income => "INC",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expense => write!(f, "Expense"),
            Self::Income => write!(f, "Income"),
        }
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "exp" | "expense" => Ok(Self::Expense),
            "inc" | "income" => Ok(Self::Income),
            other => Err(format!("Unknown transaction type: {}", other)),
        }
    }
}

/// A transaction as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,

    /// Signed amount (negative = expense)
    pub amount: Money,

    #[serde(default)]
    pub description: String,

    pub date: NaiveDate,

    pub category: Option<CategoryId>,

    #[serde(default)]
    pub category_name: Option<String>,

    #[serde(default)]
    pub category_icon: Option<String>,

    #[serde(default)]
    pub category_color: Option<String>,

    pub wallet: Option<WalletId>,

    #[serde(default)]
    pub wallet_name: Option<String>,

    #[serde(default)]
    pub wallet_color: Option<String>,
}

impl Transaction {
    pub fn is_expense(&self) -> bool {
        self.amount.is_negative()
    }

    pub fn is_income(&self) -> bool {
        self.amount.is_positive()
    }

    pub fn kind(&self) -> TransactionKind {
        TransactionKind::of(self.amount)
    }

    /// Category name, or the placeholder when uncategorized
    pub fn category_label(&self) -> &str {
        match self.category_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => UNCATEGORIZED_LABEL,
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.description,
            self.amount
        )
    }
}

/// Payload for creating or replacing a transaction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionInput {
    /// Signed amount
    pub amount: Money,

    pub description: String,

    pub category: Option<CategoryId>,

    /// `None` lets the server pick the default wallet
    pub wallet: Option<WalletId>,

    /// `None` lets the server use today
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl TransactionInput {
    /// Build a payload from an absolute amount and a kind
    pub fn from_form(amount: Money, kind: TransactionKind, description: impl Into<String>) -> Self {
        Self {
            amount: kind.sign(amount),
            description: description.into(),
            category: None,
            wallet: None,
            date: None,
        }
    }

    /// Start an edit from an existing transaction
    pub fn from_transaction(txn: &Transaction) -> Self {
        Self {
            amount: txn.amount,
            description: txn.description.clone(),
            category: txn.category,
            wallet: txn.wallet,
            date: Some(txn.date),
        }
    }

    /// Validate the form before sending it
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.amount.is_zero() {
            return Err(TransactionValidationError::ZeroAmount);
        }
        if self.description.chars().count() > 255 {
            return Err(TransactionValidationError::DescriptionTooLong(
                self.description.chars().count(),
            ));
        }
        Ok(())
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    ZeroAmount,
    DescriptionTooLong(usize),
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroAmount => write!(f, "Amount must be greater than zero"),
            Self::DescriptionTooLong(len) => {
                write!(f, "Description too long ({} chars, max 255)", len)
            }
        }
    }
}

impl std::error::Error for TransactionValidationError {}

/// Server-side filter for the transaction list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    /// Text search over description and category name
    pub q: Option<String>,
    pub category: Option<CategoryId>,
    pub wallet: Option<WalletId>,
    pub kind: Option<TransactionKind>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub min_amount: Option<Money>,
    pub max_amount: Option<Money>,
}

impl TransactionFilter {
    /// Query pairs for the non-empty fields, in a stable order
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        let mut push = |key: &str, value: String| query.push((key.to_string(), value));

        if let Some(q) = self.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            push("q", q.to_string());
        }
        if let Some(category) = self.category {
            push("category", category.to_string());
        }
        if let Some(wallet) = self.wallet {
            push("wallet", wallet.to_string());
        }
        if let Some(kind) = self.kind {
            push("type", kind.code().to_string());
        }
        if let Some(date) = self.date_from {
            push("date_from", date.format("%Y-%m-%d").to_string());
        }
        if let Some(date) = self.date_to {
            push("date_to", date.format("%Y-%m-%d").to_string());
        }
        if let Some(amount) = self.min_amount {
            push("min_amount", amount.to_decimal_string());
        }
        if let Some(amount) = self.max_amount {
            push("max_amount", amount.to_decimal_string());
        }

        query
    }

    pub fn is_empty(&self) -> bool {
        self.to_query().is_empty()
    }
}

/// Totals for a filtered transaction list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionSummary {
    pub income: Money,
    /// Absolute value of the spending
    pub expenses: Money,
    pub balance: Money,
    pub count: u64,
}

/// Response of the CSV import endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ImportResult {
    pub created: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_api_payload() {
        let json = r##"{
            "id": 9, "amount": "-40.00", "description": "Marche", "date": "2025-03-02",
            "category": 2, "category_name": "Courses", "category_icon": "🛒",
            "category_color": "#F37BA4", "wallet": 1, "wallet_name": "Principal",
            "wallet_color": "#24C289", "user": 3
        }"##;
        let txn: Transaction = serde_json::from_str(json).unwrap();

        assert!(txn.is_expense());
        assert_eq!(txn.kind(), TransactionKind::Expense);
        assert_eq!(txn.amount, Money::from_cents(-4000));
        assert_eq!(txn.category_label(), "Courses");
    }

    #[test]
    fn test_uncategorized_label() {
        let json = r#"{"id": 1, "amount": "5.00", "date": "2025-03-02", "category": null, "category_name": null, "wallet": null}"#;
        let txn: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(txn.category_label(), UNCATEGORIZED_LABEL);
    }

    #[test]
    fn test_form_signs_amount() {
        let expense =
            TransactionInput::from_form(Money::from_cents(1500), TransactionKind::Expense, "Taxi");
        assert_eq!(expense.amount.cents(), -1500);

        let income =
            TransactionInput::from_form(Money::from_cents(-1500), TransactionKind::Income, "Vente");
        assert_eq!(income.amount.cents(), 1500);

        let value = serde_json::to_value(&expense).unwrap();
        assert_eq!(value["amount"], "-15.00");
        assert!(value["wallet"].is_null());
        assert!(value.get("date").is_none());
    }

    #[test]
    fn test_validation() {
        let input = TransactionInput::from_form(Money::zero(), TransactionKind::Expense, "");
        assert_eq!(input.validate(), Err(TransactionValidationError::ZeroAmount));
    }

    #[test]
    fn test_filter_query_skips_empty_fields() {
        let filter = TransactionFilter {
            q: Some("  ".into()),
            wallet: Some(WalletId::new(2)),
            kind: Some(TransactionKind::Income),
            date_from: NaiveDate::from_ymd_opt(2025, 3, 1),
            ..Default::default()
        };

        let query = filter.to_query();
        assert_eq!(
            query,
            vec![
                ("wallet".to_string(), "2".to_string()),
                ("type".to_string(), "INC".to_string()),
                ("date_from".to_string(), "2025-03-01".to_string()),
            ]
        );
        assert!(TransactionFilter::default().is_empty());
    }
}
