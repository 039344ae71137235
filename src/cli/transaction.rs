//! Transaction CLI commands

use std::path::PathBuf;

use clap::Subcommand;

use crate::client::{ApiClient, ClientError, ExportFormat};
use crate::config::Settings;
use crate::display::messages::{Action, Notice, Resource};
use crate::display::transaction::{
    format_summary, format_transaction_details, format_transaction_list,
};
use crate::error::{NexoraError, NexoraResult};
use crate::models::TransactionId;
use crate::services::import::ImportPreviewSummary;
use crate::services::{
    CreateTransactionInput, ImportService, ImportStatus, TransactionService,
    UpdateTransactionInput,
};

use super::{confirm, parse_date, parse_kind, parse_money, report, FilterArgs};

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// List transactions, newest first
    List {
        #[command(flatten)]
        filter: FilterArgs,
        /// Number of transactions to show
        #[arg(short = 'n', long, default_value = "50")]
        limit: usize,
    },

    /// Show transaction details
    Show {
        /// Transaction ID
        id: TransactionId,
    },

    /// Add a transaction
    Add {
        /// Amount, always positive; the type gives the sign
        amount: String,
        /// Transaction type (expense or income)
        #[arg(short = 't', long = "type", default_value = "expense")]
        kind: String,
        /// Description
        #[arg(short, long, default_value = "")]
        description: String,
        /// Category name or ID
        #[arg(short, long)]
        category: Option<String>,
        /// Wallet name or ID (default wallet when omitted)
        #[arg(short, long)]
        wallet: Option<String>,
        /// Date (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Edit a transaction
    Edit {
        /// Transaction ID
        id: TransactionId,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New type
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
        /// New description
        #[arg(short, long)]
        description: Option<String>,
        /// New category; empty string clears it
        #[arg(short, long)]
        category: Option<String>,
        /// New wallet
        #[arg(short, long)]
        wallet: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },

    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: TransactionId,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Totals for the filtered transactions
    Summary {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Download a report for the filtered transactions
    Export {
        #[command(flatten)]
        filter: FilterArgs,
        /// Report format (pdf, csv, excel)
        #[arg(short, long, default_value = "pdf")]
        format: String,
        /// Output file (default: the name suggested by the server)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import transactions from a CSV file (date,description,category,amount)
    Import {
        /// Path to CSV file
        file: PathBuf,
        /// Only check the file
        #[arg(long)]
        dry_run: bool,
        /// Upload without asking
        #[arg(short, long)]
        yes: bool,
    },
}

/// Handle a transaction command
pub async fn handle_transaction_command(
    client: &ApiClient,
    settings: &Settings,
    cmd: TransactionCommands,
) -> NexoraResult<()> {
    let service = TransactionService::new(client);
    let locale = settings.locale;

    match cmd {
        TransactionCommands::List { filter, limit } => {
            let filter = filter.resolve(client).await?;
            let (transactions, profile) = tokio::try_join!(
                service.list(&filter),
                async { client.get_profile().await.map_err(NexoraError::from) }
            )?;
            let shown = &transactions[..transactions.len().min(limit)];
            print!("{}", format_transaction_list(shown, &profile.preferences));
            if transactions.len() > shown.len() {
                println!("({} of {} shown)", shown.len(), transactions.len());
            }
        }

        TransactionCommands::Show { id } => {
            let txn = service.get(id).await?;
            let profile = client.get_profile().await?;
            print!("{}", format_transaction_details(&txn, &profile.preferences));
        }

        TransactionCommands::Add {
            amount,
            kind,
            description,
            category,
            wallet,
            date,
        } => {
            let input = CreateTransactionInput {
                amount: parse_money(&amount, "amount")?,
                kind: parse_kind(&kind)?,
                description,
                category,
                wallet,
                date: date.as_deref().map(parse_date).transpose()?,
            };
            let txn = report(
                service.create(input).await,
                Resource::Transaction,
                Action::Created,
                locale,
            )?;
            println!("  {} (ID: {})", txn, txn.id);
        }

        TransactionCommands::Edit {
            id,
            amount,
            kind,
            description,
            category,
            wallet,
            date,
        } => {
            let changes = UpdateTransactionInput {
                amount: amount
                    .as_deref()
                    .map(|a| parse_money(a, "amount"))
                    .transpose()?,
                kind: kind.as_deref().map(parse_kind).transpose()?,
                description,
                category,
                wallet,
                date: date.as_deref().map(parse_date).transpose()?,
            };
            let txn = report(
                service.update(id, changes).await,
                Resource::Transaction,
                Action::Updated,
                locale,
            )?;
            println!("  {}", txn);
        }

        TransactionCommands::Delete { id, yes } => {
            if !yes && !confirm(&format!("Delete transaction {}?", id))? {
                println!("Cancelled.");
                return Ok(());
            }
            report(
                service.delete(id).await,
                Resource::Transaction,
                Action::Deleted,
                locale,
            )?;
        }

        TransactionCommands::Summary { filter } => {
            let filter = filter.resolve(client).await?;
            let (summary, profile) = tokio::try_join!(
                service.summary(&filter),
                async { client.get_profile().await.map_err(NexoraError::from) }
            )?;
            print!("{}", format_summary(&summary, &profile.preferences.currency));
        }

        TransactionCommands::Export {
            filter,
            format,
            output,
        } => {
            let format: ExportFormat = format.parse().map_err(NexoraError::Validation)?;
            let filter = filter.resolve(client).await?;

            let file = match service.export(&filter, format).await {
                Ok(file) => file,
                Err(NexoraError::Api(ClientError::Export(message))) => {
                    eprintln!("{}", message);
                    return Err(NexoraError::Api(ClientError::Export(message)));
                }
                Err(err) => return Err(err),
            };

            let path = output.unwrap_or_else(|| PathBuf::from(&file.file_name));
            std::fs::write(&path, &file.bytes)?;
            println!(
                "{}: {} ({} bytes)",
                Notice::ExportSaved.text(locale),
                path.display(),
                file.bytes.len()
            );
        }

        TransactionCommands::Import { file, dry_run, yes } => {
            let contents = std::fs::read(&file)?;
            let importer = ImportService::new(client);
            let entries = importer.preview(&contents).await?;
            let summary = ImportPreviewSummary::of(&entries);

            for entry in &entries {
                match &entry.status {
                    ImportStatus::Error(message) => {
                        println!("  row {}: skipped ({})", entry.row_number, message)
                    }
                    ImportStatus::Uncategorized => {
                        let category = entry
                            .row
                            .as_ref()
                            .and_then(|r| r.category.as_deref())
                            .unwrap_or("-");
                        println!(
                            "  row {}: unknown category '{}', imported uncategorized",
                            entry.row_number, category
                        )
                    }
                    ImportStatus::Ready => {}
                }
            }
            println!(
                "{} row(s) ready, {} uncategorized, {} skipped",
                summary.ready, summary.uncategorized, summary.errors
            );

            if dry_run || summary.importable() == 0 {
                return Ok(());
            }
            if !yes && !confirm(&format!("Import {} transaction(s)?", summary.importable()))? {
                println!("Cancelled.");
                return Ok(());
            }

            let file_name = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "import.csv".to_string());
            let result = importer.upload(&file_name, contents).await?;
            println!("Imported {} transaction(s).", result.created);
        }
    }

    Ok(())
}
