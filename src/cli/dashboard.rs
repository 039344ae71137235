//! Dashboard CLI command

use chrono::Local;
use clap::Args;

use crate::client::ApiClient;
use crate::config::Settings;
use crate::dashboard::{load, load_failure_notice, DashboardQuery};
use crate::display::dashboard::format_dashboard;
use crate::error::NexoraResult;
use crate::services::WalletService;

use super::{parse_month, FilterArgs};

/// Dashboard options
#[derive(Args, Debug, Clone, Default)]
pub struct DashboardArgs {
    #[command(flatten)]
    pub filter: FilterArgs,
    /// Budget month (YYYY-MM, default: current)
    #[arg(short, long)]
    pub month: Option<String>,
    /// Budget wallet (name or ID, default: all)
    #[arg(long)]
    pub budget_wallet: Option<String>,
}

/// Print the dashboard once
pub async fn handle_dashboard_command(
    client: &ApiClient,
    settings: &Settings,
    args: DashboardArgs,
) -> NexoraResult<()> {
    let month = parse_month(args.month.as_deref())?;
    let mut query = DashboardQuery::new(month);
    query.filter = args.filter.resolve(client).await?;
    if let Some(wallet) = &args.budget_wallet {
        query.wallet = Some(WalletService::new(client).find(wallet).await?.id);
    }

    match load(client, &query).await {
        Ok(data) => {
            let today = Local::now().date_naive();
            print!("{}", format_dashboard(&data, month, today));
            Ok(())
        }
        Err(err) => {
            if let Some(notice) = load_failure_notice(&err) {
                eprintln!("{}", notice.text(settings.locale));
            }
            Err(err)
        }
    }
}
