//! Wallet display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::Wallet;

#[derive(Tabled)]
struct WalletRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Wallet")]
    name: String,
    #[tabled(rename = "Color")]
    color: String,
    #[tabled(rename = "Default")]
    default: &'static str,
}

/// Format wallets as a table
pub fn format_wallet_list(wallets: &[Wallet]) -> String {
    if wallets.is_empty() {
        return "No wallets found.\n".to_string();
    }

    let rows = wallets.iter().map(|w| WalletRow {
        id: w.id.to_string(),
        name: w.name.clone(),
        color: w.color.clone(),
        default: if w.is_default { "*" } else { "" },
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    format!("{}\n", table)
}
