//! Wallet CLI commands

use clap::Subcommand;

use crate::client::ApiClient;
use crate::config::Settings;
use crate::display::messages::{Action, Resource};
use crate::display::wallet::format_wallet_list;
use crate::error::NexoraResult;
use crate::models::WalletInput;
use crate::services::WalletService;

use super::report;

/// Wallet subcommands
#[derive(Subcommand)]
pub enum WalletCommands {
    /// List all wallets
    List,

    /// Create a new wallet
    Add {
        /// Wallet name
        name: String,
        /// Hex color (e.g. "#24C289")
        #[arg(long)]
        color: Option<String>,
    },

    /// Edit a wallet
    Edit {
        /// Wallet name or ID
        wallet: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New color
        #[arg(long)]
        color: Option<String>,
    },

    /// Delete a wallet
    Delete {
        /// Wallet name or ID
        wallet: String,
    },

    /// Use a wallet when a transaction names none
    #[command(name = "make-default")]
    MakeDefault {
        /// Wallet name or ID
        wallet: String,
    },
}

/// Handle a wallet command
pub async fn handle_wallet_command(
    client: &ApiClient,
    settings: &Settings,
    cmd: WalletCommands,
) -> NexoraResult<()> {
    let service = WalletService::new(client);
    let locale = settings.locale;

    match cmd {
        WalletCommands::List => {
            let wallets = service.list().await?;
            print!("{}", format_wallet_list(&wallets));
        }

        WalletCommands::Add { name, color } => {
            let mut input = WalletInput::new(name);
            if let Some(color) = color {
                input.color = color;
            }
            let wallet = report(
                service.create(input).await,
                Resource::Wallet,
                Action::Created,
                locale,
            )?;
            println!("  {} (ID: {})", wallet.name, wallet.id);
        }

        WalletCommands::Edit {
            wallet,
            name,
            color,
        } => {
            let wallet = service.find(&wallet).await?;
            if name.is_none() && color.is_none() {
                println!("No changes specified. Use --name or --color.");
                return Ok(());
            }

            let input = WalletInput {
                name: name.map(|n| n.trim().to_string()).unwrap_or(wallet.name),
                color: color.unwrap_or(wallet.color),
            };
            let updated = report(
                service.update(wallet.id, input).await,
                Resource::Wallet,
                Action::Updated,
                locale,
            )?;
            println!("  {}", updated);
        }

        WalletCommands::Delete { wallet } => {
            let wallet = service.find(&wallet).await?;
            report(
                service.delete(wallet.id).await,
                Resource::Wallet,
                Action::Deleted,
                locale,
            )?;
            println!("  {}", wallet.name);
        }

        WalletCommands::MakeDefault { wallet } => {
            let wallet = service.find(&wallet).await?;
            let wallets = report(
                service.make_default(wallet.id).await,
                Resource::Wallet,
                Action::Updated,
                locale,
            )?;
            print!("{}", format_wallet_list(&wallets));
        }
    }

    Ok(())
}
