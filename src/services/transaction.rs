//! Transaction service
//!
//! Resolves the category and wallet names typed on the command line,
//! signs amounts entered as absolute values, and validates payloads before
//! they reach the API.

use chrono::NaiveDate;

use crate::client::{ApiClient, ClientError, ExportFile, ExportFormat};
use crate::error::{NexoraError, NexoraResult};
use crate::models::{
    Category, Money, Transaction, TransactionFilter, TransactionId, TransactionInput,
    TransactionKind, TransactionSummary, Wallet,
};
use crate::services::{category, wallet};

/// Options for creating a transaction
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    /// Absolute amount as entered
    pub amount: Money,
    pub kind: TransactionKind,
    pub description: String,
    /// Category name or id
    pub category: Option<String>,
    /// Wallet name or id; `None` uses the default wallet
    pub wallet: Option<String>,
    pub date: Option<NaiveDate>,
}

/// Options for editing a transaction; `None` keeps the current value
#[derive(Debug, Clone, Default)]
pub struct UpdateTransactionInput {
    pub amount: Option<Money>,
    pub kind: Option<TransactionKind>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub wallet: Option<String>,
    pub date: Option<NaiveDate>,
}

/// Service for transaction management
pub struct TransactionService<'a> {
    client: &'a ApiClient,
}

impl<'a> TransactionService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// List transactions matching a filter, newest first
    pub async fn list(&self, filter: &TransactionFilter) -> NexoraResult<Vec<Transaction>> {
        Ok(self.client.list_transactions(filter).await?)
    }

    pub async fn get(&self, id: TransactionId) -> NexoraResult<Transaction> {
        match self.client.get_transaction(id).await {
            Ok(txn) => Ok(txn),
            Err(ClientError::NotFound(_)) => {
                Err(NexoraError::transaction_not_found(id.label()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Totals for a filter
    pub async fn summary(&self, filter: &TransactionFilter) -> NexoraResult<TransactionSummary> {
        Ok(self.client.transaction_summary(filter).await?)
    }

    /// Create a transaction from an absolute amount and a kind
    pub async fn create(&self, input: CreateTransactionInput) -> NexoraResult<Transaction> {
        let mut payload =
            TransactionInput::from_form(input.amount.abs(), input.kind, input.description.trim());
        payload.date = input.date;

        if input.category.is_some() || input.wallet.is_some() {
            let (categories, wallets) = self.lookups(&input.category, &input.wallet).await?;
            payload.category = resolve_category(&categories, input.category.as_deref())?;
            payload.wallet = resolve_wallet(&wallets, input.wallet.as_deref())?;
        }

        payload
            .validate()
            .map_err(|e| NexoraError::Validation(e.to_string()))?;

        let txn = self.client.create_transaction(&payload).await?;
        tracing::info!(id = %txn.id, amount = %txn.amount, "transaction created");
        Ok(txn)
    }

    /// Edit a transaction, keeping fields that are not given
    pub async fn update(
        &self,
        id: TransactionId,
        changes: UpdateTransactionInput,
    ) -> NexoraResult<Transaction> {
        let current = self.get(id).await?;
        let mut payload = TransactionInput::from_transaction(&current);

        let kind = changes.kind.unwrap_or_else(|| current.kind());
        let amount = changes.amount.unwrap_or(current.amount).abs();
        payload.amount = kind.sign(amount);

        if let Some(description) = changes.description {
            payload.description = description.trim().to_string();
        }
        if changes.date.is_some() {
            payload.date = changes.date;
        }
        if changes.category.is_some() || changes.wallet.is_some() {
            let (categories, wallets) = self.lookups(&changes.category, &changes.wallet).await?;
            if changes.category.is_some() {
                payload.category = resolve_category(&categories, changes.category.as_deref())?;
            }
            if changes.wallet.is_some() {
                payload.wallet = resolve_wallet(&wallets, changes.wallet.as_deref())?;
            }
        }

        payload
            .validate()
            .map_err(|e| NexoraError::Validation(e.to_string()))?;
        Ok(self.client.update_transaction(id, &payload).await?)
    }

    pub async fn delete(&self, id: TransactionId) -> NexoraResult<()> {
        self.client.delete_transaction(id).await?;
        tracing::info!(%id, "transaction deleted");
        Ok(())
    }

    /// Download a report for the filter
    pub async fn export(
        &self,
        filter: &TransactionFilter,
        format: ExportFormat,
    ) -> NexoraResult<ExportFile> {
        Ok(self.client.export_transactions(filter, format).await?)
    }

    /// Only fetch the lists a form actually refers to
    async fn lookups(
        &self,
        category: &Option<String>,
        wallet: &Option<String>,
    ) -> NexoraResult<(Vec<Category>, Vec<Wallet>)> {
        let categories = async {
            match category {
                Some(_) => self.client.list_categories().await,
                None => Ok(Vec::new()),
            }
        };
        let wallets = async {
            match wallet {
                Some(_) => self.client.list_wallets().await,
                None => Ok(Vec::new()),
            }
        };
        let (categories, wallets) = tokio::try_join!(categories, wallets)?;
        Ok((categories, wallets))
    }
}

/// Resolve an optional category reference; an empty string clears it
pub fn resolve_category(
    categories: &[Category],
    identifier: Option<&str>,
) -> NexoraResult<Option<crate::models::CategoryId>> {
    match identifier.map(str::trim) {
        None | Some("") => Ok(None),
        Some(name) => category::find_in(categories, name)
            .map(|c| Some(c.id))
            .ok_or_else(|| NexoraError::category_not_found(name)),
    }
}

/// Resolve an optional wallet reference; an empty string means the default
pub fn resolve_wallet(
    wallets: &[Wallet],
    identifier: Option<&str>,
) -> NexoraResult<Option<crate::models::WalletId>> {
    match identifier.map(str::trim) {
        None | Some("") => Ok(None),
        Some(name) => wallet::find_in(wallets, name)
            .map(|w| Some(w.id))
            .ok_or_else(|| NexoraError::wallet_not_found(name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryId, CategoryType, WalletId};

    fn wallets() -> Vec<Wallet> {
        vec![Wallet {
            id: WalletId::new(4),
            name: "Principal".into(),
            color: String::new(),
            is_default: true,
            created_at: None,
        }]
    }

    #[test]
    fn test_resolve_category() {
        let categories = vec![Category {
            id: CategoryId::new(2),
            name: "Courses".into(),
            category_type: CategoryType::Expense,
            icon: String::new(),
            color: String::new(),
        }];

        assert_eq!(resolve_category(&categories, None).unwrap(), None);
        assert_eq!(resolve_category(&categories, Some("  ")).unwrap(), None);
        assert_eq!(
            resolve_category(&categories, Some("COURSES")).unwrap(),
            Some(CategoryId::new(2))
        );
        assert!(resolve_category(&categories, Some("Voyage"))
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_resolve_wallet() {
        assert_eq!(
            resolve_wallet(&wallets(), Some("wal-4")).unwrap(),
            Some(WalletId::new(4))
        );
        assert!(resolve_wallet(&wallets(), Some("Epargne")).is_err());
    }
}
