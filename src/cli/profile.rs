//! Profile CLI commands

use clap::Subcommand;

use crate::client::profile::RESET_CONFIRMATION;
use crate::client::ApiClient;
use crate::config::Settings;
use crate::display::messages::Notice;
use crate::display::profile::format_profile;
use crate::error::{NexoraError, NexoraResult};
use crate::models::{PreferencesUpdate, ProfileUpdate};

/// Profile subcommands
#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Show the profile and preferences
    Show,

    /// Update the profile; only the given fields change
    Set {
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// Display currency (e.g. FCFA, EUR)
        #[arg(long)]
        currency: Option<String>,
        #[arg(long)]
        timezone: Option<String>,
        /// DD/MM/YYYY, MM/DD/YYYY or YYYY-MM-DD
        #[arg(long)]
        date_format: Option<String>,
        #[arg(long)]
        avatar_url: Option<String>,
    },

    /// Delete every transaction, budget, wallet and custom category
    #[command(name = "reset-data")]
    ResetData {
        /// Confirmation word; prompted when omitted
        #[arg(long)]
        confirm: Option<String>,
    },
}

/// Handle a profile command
pub async fn handle_profile_command(
    client: &ApiClient,
    settings: &Settings,
    cmd: ProfileCommands,
) -> NexoraResult<()> {
    let locale = settings.locale;

    match cmd {
        ProfileCommands::Show => {
            let profile = client.get_profile().await?;
            print!("{}", format_profile(&profile));
        }

        ProfileCommands::Set {
            first_name,
            last_name,
            email,
            currency,
            timezone,
            date_format,
            avatar_url,
        } => {
            let preferences = PreferencesUpdate {
                avatar_url,
                currency: currency.map(|c| c.trim().to_uppercase()),
                timezone,
                date_format,
            };
            preferences.validate().map_err(NexoraError::Validation)?;

            let update = ProfileUpdate {
                first_name,
                last_name,
                email,
                preferences: (!preferences.is_empty()).then_some(preferences),
            };
            if update == ProfileUpdate::default() {
                println!("No changes specified.");
                return Ok(());
            }

            match client.update_profile(&update).await {
                Ok(profile) => {
                    println!("{}", Notice::ProfileSaved.text(locale));
                    print!("{}", format_profile(&profile));
                }
                Err(err) => {
                    if !err.is_session_expired() {
                        eprintln!("{}", Notice::ProfileSaveFailed.text(locale));
                    }
                    return Err(err.into());
                }
            }
        }

        ProfileCommands::ResetData { confirm } => {
            let word = match confirm {
                Some(word) => word,
                None => {
                    println!(
                        "This deletes all your financial data. Type {} to confirm:",
                        RESET_CONFIRMATION
                    );
                    let mut line = String::new();
                    std::io::stdin().read_line(&mut line)?;
                    line
                }
            };
            if word.trim() != RESET_CONFIRMATION {
                return Err(NexoraError::Validation(format!(
                    "Type {} to confirm the reset",
                    RESET_CONFIRMATION
                )));
            }

            match client.reset_data().await {
                Ok(detail) => {
                    tracing::info!(%detail, "data reset");
                    println!("{}", Notice::ResetDone.text(locale));
                }
                Err(err) => {
                    if !err.is_session_expired() {
                        eprintln!("{}", Notice::ResetFailed.text(locale));
                    }
                    return Err(err.into());
                }
            }
        }
    }

    Ok(())
}
