//! Budget API client methods

use super::{ApiClient, ApiRequest, ClientError};
use crate::models::{Budget, BudgetId, BudgetInput, BudgetStatus, Month, WalletId};

fn month_query(month: Month, wallet: Option<WalletId>) -> Vec<(String, String)> {
    let mut query = vec![(
        "month".to_string(),
        month.first_day().format("%Y-%m-%d").to_string(),
    )];
    if let Some(wallet) = wallet {
        query.push(("wallet".to_string(), wallet.to_string()));
    }
    query
}

impl ApiClient {
    /// Budget definitions for a month, optionally for one wallet
    pub async fn list_budgets(
        &self,
        month: Month,
        wallet: Option<WalletId>,
    ) -> Result<Vec<Budget>, ClientError> {
        self.execute(ApiRequest::get("budgets/").query(month_query(month, wallet)))
            .await
    }

    /// Spend-vs-limit for every budget of a month
    pub async fn budget_status(
        &self,
        month: Month,
        wallet: Option<WalletId>,
    ) -> Result<Vec<BudgetStatus>, ClientError> {
        self.execute(ApiRequest::get("budgets/status/").query(month_query(month, wallet)))
            .await
    }

    /// Create a budget
    pub async fn create_budget(&self, input: &BudgetInput) -> Result<Budget, ClientError> {
        self.execute(ApiRequest::post("budgets/").json(input)?).await
    }

    /// Replace a budget
    pub async fn update_budget(
        &self,
        id: BudgetId,
        input: &BudgetInput,
    ) -> Result<Budget, ClientError> {
        self.execute(ApiRequest::put(format!("budgets/{id}/")).json(input)?)
            .await
    }

    /// Delete a budget
    pub async fn delete_budget(&self, id: BudgetId) -> Result<(), ClientError> {
        self.execute_empty(ApiRequest::delete(format!("budgets/{id}/")))
            .await
    }
}
