//! Budget service

use crate::client::ApiClient;
use crate::error::{NexoraError, NexoraResult};
use crate::models::{Budget, BudgetId, BudgetInput, BudgetStatus, Month, WalletId};

/// Service for budget management
pub struct BudgetService<'a> {
    client: &'a ApiClient,
}

impl<'a> BudgetService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Budget definitions for a month
    pub async fn list(&self, month: Month, wallet: Option<WalletId>) -> NexoraResult<Vec<Budget>> {
        Ok(self.client.list_budgets(month, wallet).await?)
    }

    /// Server-computed spending against each budget of a month
    pub async fn status(
        &self,
        month: Month,
        wallet: Option<WalletId>,
    ) -> NexoraResult<Vec<BudgetStatus>> {
        Ok(self.client.budget_status(month, wallet).await?)
    }

    /// Find a budget of `month` by id
    pub async fn get(&self, month: Month, id: BudgetId) -> NexoraResult<Budget> {
        self.list(month, None)
            .await?
            .into_iter()
            .find(|b| b.id == id)
            .ok_or_else(|| NexoraError::budget_not_found(id.to_string()))
    }

    pub async fn create(&self, input: BudgetInput) -> NexoraResult<Budget> {
        let input = BudgetInput::new(input.category, input.month, input.limit_amount)
            .with_wallet(input.wallet);
        input
            .validate()
            .map_err(|e| NexoraError::Validation(e.to_string()))?;

        let budget = self.client.create_budget(&input).await?;
        tracing::info!(id = %budget.id, month = %budget.period(), "budget created");
        Ok(budget)
    }

    pub async fn update(&self, id: BudgetId, input: BudgetInput) -> NexoraResult<Budget> {
        let input = BudgetInput::new(input.category, input.month, input.limit_amount)
            .with_wallet(input.wallet);
        input
            .validate()
            .map_err(|e| NexoraError::Validation(e.to_string()))?;
        Ok(self.client.update_budget(id, &input).await?)
    }

    pub async fn delete(&self, id: BudgetId) -> NexoraResult<()> {
        self.client.delete_budget(id).await?;
        tracing::info!(%id, "budget deleted");
        Ok(())
    }
}
