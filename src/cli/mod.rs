//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod auth;
pub mod budget;
pub mod category;
pub mod dashboard;
pub mod profile;
pub mod transaction;
pub mod wallet;

pub use auth::{handle_auth_command, AuthCommands};
pub use budget::{handle_budget_command, BudgetCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use dashboard::{handle_dashboard_command, DashboardArgs};
pub use profile::{handle_profile_command, ProfileCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};
pub use wallet::{handle_wallet_command, WalletCommands};

use std::io::{self, Write};

use chrono::NaiveDate;
use clap::Args;

use crate::client::ApiClient;
use crate::config::Locale;
use crate::display::messages::{failure, Action, Notice, Resource};
use crate::error::{NexoraError, NexoraResult};
use crate::models::{Money, Month, TransactionFilter, TransactionKind};
use crate::services;

/// Parse an amount such as "12.50" or "12,50"
pub fn parse_money(value: &str, what: &str) -> NexoraResult<Money> {
    Money::parse(value).map_err(|e| NexoraError::Validation(format!("Invalid {}: {}", what, e)))
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(value: &str) -> NexoraResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        NexoraError::Validation(format!("Invalid date '{}', expected YYYY-MM-DD", value))
    })
}

/// Parse a month, defaulting to the current one
pub fn parse_month(value: Option<&str>) -> NexoraResult<Month> {
    match value {
        Some(value) => Month::parse(value).map_err(|e| NexoraError::Validation(e.to_string())),
        None => Ok(Month::current()),
    }
}

pub fn parse_kind(value: &str) -> NexoraResult<TransactionKind> {
    value.parse().map_err(NexoraError::Validation)
}

/// Print the success notice for an action, or its failure notice
pub fn report<T>(
    result: NexoraResult<T>,
    resource: Resource,
    action: Action,
    locale: Locale,
) -> NexoraResult<T> {
    match result {
        Ok(value) => {
            println!("{}", Notice::Done(resource, action).text(locale));
            Ok(value)
        }
        Err(err) => {
            if !err.is_session_expired() && !err.is_validation() {
                eprintln!("{}", failure(resource, action).text(locale));
            }
            Err(err)
        }
    }
}

/// Ask for a yes/no confirmation on stdin
pub fn confirm(prompt: &str) -> NexoraResult<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes" | "o" | "oui"))
}

/// Transaction list filters shared by several commands
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Text search over description and category
    #[arg(short = 'q', long = "search")]
    pub search: Option<String>,
    /// Category name or ID
    #[arg(short, long)]
    pub category: Option<String>,
    /// Wallet name or ID
    #[arg(short, long)]
    pub wallet: Option<String>,
    /// Transaction type (expense or income)
    #[arg(short = 't', long = "type")]
    pub kind: Option<String>,
    /// Earliest date (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,
    /// Latest date (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,
    /// Minimum amount
    #[arg(long)]
    pub min: Option<String>,
    /// Maximum amount
    #[arg(long)]
    pub max: Option<String>,
}

impl FilterArgs {
    /// Build the server filter, resolving category and wallet names
    pub async fn resolve(&self, client: &ApiClient) -> NexoraResult<TransactionFilter> {
        let mut filter = TransactionFilter {
            q: self.search.clone(),
            kind: self.kind.as_deref().map(parse_kind).transpose()?,
            date_from: self.from.as_deref().map(parse_date).transpose()?,
            date_to: self.to.as_deref().map(parse_date).transpose()?,
            min_amount: self
                .min
                .as_deref()
                .map(|v| parse_money(v, "minimum amount"))
                .transpose()?,
            max_amount: self
                .max
                .as_deref()
                .map(|v| parse_money(v, "maximum amount"))
                .transpose()?,
            ..TransactionFilter::default()
        };

        if let Some(name) = &self.category {
            let categories = services::category::CategoryService::new(client).list().await?;
            filter.category = services::transaction::resolve_category(&categories, Some(name))?;
        }
        if let Some(name) = &self.wallet {
            let wallets = services::wallet::WalletService::new(client).list().await?;
            filter.wallet = services::transaction::resolve_wallet(&wallets, Some(name))?;
        }

        Ok(filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parsers() {
        assert_eq!(parse_money("12,5", "amount").unwrap(), Money::from_cents(1250));
        assert!(parse_money("abc", "amount").unwrap_err().is_validation());
        assert!(parse_money("99999999999999999", "amount").unwrap_err().is_validation());
        assert!(parse_money("--5", "amount").unwrap_err().is_validation());
        assert_eq!(
            parse_date("2025-03-09").unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 9).unwrap()
        );
        assert!(parse_date("09/03/2025").is_err());
        assert_eq!(parse_month(Some("2025-03")).unwrap().month(), 3);
        assert_eq!(parse_kind("income").unwrap(), TransactionKind::Income);
    }
}
