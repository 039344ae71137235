//! Budget CLI commands

use clap::Subcommand;

use crate::client::ApiClient;
use crate::config::Settings;
use crate::display::budget::{format_budget_list, format_budget_status};
use crate::display::messages::{Action, Resource};
use crate::error::NexoraResult;
use crate::models::{BudgetId, BudgetInput, WalletId};
use crate::services::{BudgetService, CategoryService, WalletService};

use super::{parse_money, parse_month, report};

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// List budget definitions for a month
    List {
        /// Month (YYYY-MM, default: current)
        #[arg(short, long)]
        month: Option<String>,
        /// Only budgets of this wallet (name or ID)
        #[arg(short, long)]
        wallet: Option<String>,
    },

    /// Show spending against each budget
    Status {
        /// Month (YYYY-MM, default: current)
        #[arg(short, long)]
        month: Option<String>,
        /// Only budgets of this wallet (name or ID)
        #[arg(short, long)]
        wallet: Option<String>,
    },

    /// Create a budget
    Add {
        /// Category name or ID
        category: String,
        /// Monthly limit
        limit: String,
        /// Month (YYYY-MM or any date in it, default: current)
        #[arg(short, long)]
        month: Option<String>,
        /// Limit the budget to one wallet (name or ID)
        #[arg(short, long)]
        wallet: Option<String>,
    },

    /// Edit a budget
    Edit {
        /// Budget ID
        id: BudgetId,
        /// Month the budget belongs to (default: current)
        #[arg(short, long)]
        month: Option<String>,
        /// New limit
        #[arg(short, long)]
        limit: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New wallet; "all" covers every wallet
        #[arg(short, long)]
        wallet: Option<String>,
        /// Move the budget to another month
        #[arg(long)]
        to_month: Option<String>,
    },

    /// Delete a budget
    Delete {
        /// Budget ID
        id: BudgetId,
    },
}

/// Resolve an optional wallet argument; "all" means every wallet
async fn wallet_scope(client: &ApiClient, wallet: Option<&str>) -> NexoraResult<Option<WalletId>> {
    match wallet.map(str::trim) {
        None => Ok(None),
        Some(w) if w.eq_ignore_ascii_case("all") => Ok(None),
        Some(w) => Ok(Some(WalletService::new(client).find(w).await?.id)),
    }
}

/// Handle a budget command
pub async fn handle_budget_command(
    client: &ApiClient,
    settings: &Settings,
    cmd: BudgetCommands,
) -> NexoraResult<()> {
    let service = BudgetService::new(client);
    let locale = settings.locale;
    let currency = &settings.fallback_currency;

    match cmd {
        BudgetCommands::List { month, wallet } => {
            let month = parse_month(month.as_deref())?;
            let wallet = wallet_scope(client, wallet.as_deref()).await?;
            let budgets = service.list(month, wallet).await?;
            print!("{}", format_budget_list(&budgets, month, currency));
        }

        BudgetCommands::Status { month, wallet } => {
            let month = parse_month(month.as_deref())?;
            let wallet = wallet_scope(client, wallet.as_deref()).await?;
            let statuses = service.status(month, wallet).await?;
            print!("{}", format_budget_status(&statuses, month, currency));
        }

        BudgetCommands::Add {
            category,
            limit,
            month,
            wallet,
        } => {
            let month = parse_month(month.as_deref())?;
            let category = CategoryService::new(client).find(&category).await?;
            let wallet = wallet_scope(client, wallet.as_deref()).await?;
            let limit = parse_money(&limit, "limit")?;

            let input = BudgetInput::new(category.id, month.first_day(), limit).with_wallet(wallet);
            let budget = report(
                service.create(input).await,
                Resource::Budget,
                Action::Created,
                locale,
            )?;
            println!(
                "  {} for {}: {}",
                category.name,
                budget.period(),
                budget.limit_amount.format_with_currency(currency)
            );
        }

        BudgetCommands::Edit {
            id,
            month,
            limit,
            category,
            wallet,
            to_month,
        } => {
            let month = parse_month(month.as_deref())?;
            let budget = service.get(month, id).await?;
            let mut input = BudgetInput::from_budget(&budget);

            if let Some(limit) = limit {
                input.limit_amount = parse_money(&limit, "limit")?;
            }
            if let Some(category) = category {
                input.category = CategoryService::new(client).find(&category).await?.id;
            }
            if wallet.is_some() {
                input.wallet = wallet_scope(client, wallet.as_deref()).await?;
            }
            if let Some(to_month) = to_month {
                input.month = parse_month(Some(&to_month))?.first_day();
            }

            let updated = report(
                service.update(id, input).await,
                Resource::Budget,
                Action::Updated,
                locale,
            )?;
            println!(
                "  {}: {}",
                updated.period(),
                updated.limit_amount.format_with_currency(currency)
            );
        }

        BudgetCommands::Delete { id } => {
            report(
                service.delete(id).await,
                Resource::Budget,
                Action::Deleted,
                locale,
            )?;
        }
    }

    Ok(())
}
