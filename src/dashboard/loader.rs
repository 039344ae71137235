//! Bulk dashboard load

use chrono::NaiveDate;

use crate::client::ApiClient;
use crate::display::messages::Notice;
use crate::error::{NexoraError, NexoraResult};
use crate::models::{
    Budget, BudgetStatus, Category, Month, Profile, Transaction, TransactionFilter, Wallet,
    WalletId,
};
use crate::reports::{spending_by_category, ChartSlice, MonthlyInsights};

/// Greeting name when the profile has neither a first name nor a username
pub const DEFAULT_USER_NAME: &str = "Utilisateur";

/// What to load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardQuery {
    pub filter: TransactionFilter,
    /// Month of the budget panel
    pub month: Month,
    /// Wallet of the budget panel; `None` for all wallets
    pub wallet: Option<WalletId>,
}

impl DashboardQuery {
    pub fn new(month: Month) -> Self {
        Self {
            filter: TransactionFilter::default(),
            month,
            wallet: None,
        }
    }
}

/// Everything the dashboard shows
#[derive(Debug, Clone)]
pub struct DashboardData {
    pub profile: Profile,
    pub categories: Vec<Category>,
    pub wallets: Vec<Wallet>,
    pub transactions: Vec<Transaction>,
    pub budget_status: Vec<BudgetStatus>,
    pub budgets: Vec<Budget>,
}

impl DashboardData {
    /// Figures for the month of `today` over the loaded transactions
    pub fn insights(&self, today: NaiveDate) -> MonthlyInsights {
        MonthlyInsights::compute(&self.transactions, today)
    }

    pub fn chart(&self) -> Vec<ChartSlice> {
        spending_by_category(&self.categories, &self.transactions)
    }

    pub fn currency(&self) -> &str {
        &self.profile.preferences.currency
    }

    /// First name, else username, else a placeholder
    pub fn user_name(&self) -> &str {
        [&self.profile.first_name, &self.profile.username]
            .into_iter()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
            .unwrap_or(DEFAULT_USER_NAME)
    }

    pub fn default_wallet(&self) -> Option<&Wallet> {
        self.wallets.iter().find(|w| w.is_default)
    }
}

/// Fetch all dashboard data concurrently
///
/// The first failing request fails the whole load.
pub async fn load(client: &ApiClient, query: &DashboardQuery) -> NexoraResult<DashboardData> {
    let (profile, categories, wallets, transactions, budget_status, budgets) = tokio::try_join!(
        client.get_profile(),
        client.list_categories(),
        client.list_wallets(),
        client.list_transactions(&query.filter),
        client.budget_status(query.month, query.wallet),
        client.list_budgets(query.month, query.wallet),
    )?;

    tracing::debug!(
        transactions = transactions.len(),
        budgets = budgets.len(),
        month = %query.month,
        "dashboard loaded"
    );

    Ok(DashboardData {
        profile,
        categories,
        wallets,
        transactions,
        budget_status,
        budgets,
    })
}

/// Notice for a failed load; `None` when the session ended and the caller
/// must redirect to login instead
pub fn load_failure_notice(err: &NexoraError) -> Option<Notice> {
    if err.is_session_expired() {
        None
    } else {
        tracing::warn!(error = %err, "dashboard load failed");
        Some(Notice::LoadFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientError;
    use crate::models::{Preferences, UserId};
    use crate::session::Route;

    fn data(first_name: &str, username: &str) -> DashboardData {
        DashboardData {
            profile: Profile {
                id: UserId::new(1),
                username: username.into(),
                email: String::new(),
                first_name: first_name.into(),
                last_name: String::new(),
                date_joined: None,
                last_login: None,
                preferences: Preferences::default(),
            },
            categories: Vec::new(),
            wallets: Vec::new(),
            transactions: Vec::new(),
            budget_status: Vec::new(),
            budgets: Vec::new(),
        }
    }

    #[test]
    fn test_user_name_fallbacks() {
        assert_eq!(data("Awa", "awa99").user_name(), "Awa");
        assert_eq!(data(" ", "awa99").user_name(), "awa99");
        assert_eq!(data("", "").user_name(), DEFAULT_USER_NAME);
    }

    #[test]
    fn test_load_failure_notice() {
        let failed: NexoraError = ClientError::ServerError {
            status: 500,
            message: "boom".into(),
        }
        .into();
        assert_eq!(load_failure_notice(&failed), Some(Notice::LoadFailed));

        let expired: NexoraError = ClientError::SessionExpired {
            redirect: Route::login_expired(),
        }
        .into();
        assert_eq!(load_failure_notice(&expired), None);
    }
}
