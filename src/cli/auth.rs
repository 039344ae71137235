//! Authentication CLI commands

use clap::Subcommand;
use zeroize::Zeroizing;

use crate::client::auth::RegisterRequest;
use crate::client::ApiClient;
use crate::config::Settings;
use crate::display::messages::Notice;
use crate::error::{NexoraError, NexoraResult};
use crate::session::{Route, StorageMode};

/// Authentication subcommands
#[derive(Subcommand)]
pub enum AuthCommands {
    /// Log in and store the session tokens
    Login {
        /// Username (prompted when omitted)
        username: Option<String>,
        /// Password; prompted without echo when omitted
        #[arg(long, env = "NEXORA_PASSWORD", hide_env_values = true)]
        password: Option<String>,
        /// Keep the session across restarts
        #[arg(long, conflicts_with = "no_remember")]
        remember: bool,
        /// Forget the session when this machine restarts
        #[arg(long)]
        no_remember: bool,
    },

    /// Create an account
    Signup {
        /// Username
        username: String,
        /// Email address used for verification
        #[arg(short, long)]
        email: String,
    },

    /// Revoke the session and clear the stored tokens
    Logout,

    /// Show the session state
    Status,
}

fn prompt_secret(prompt: &str) -> NexoraResult<Zeroizing<String>> {
    let value = rpassword::prompt_password(prompt)?;
    Ok(Zeroizing::new(value))
}

fn prompt_line(prompt: &str) -> NexoraResult<String> {
    use std::io::Write;
    print!("{}", prompt);
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Handle an authentication command
pub async fn handle_auth_command(
    client: &ApiClient,
    settings: &Settings,
    cmd: AuthCommands,
) -> NexoraResult<()> {
    let session = client.session();
    let locale = settings.locale;

    match cmd {
        AuthCommands::Login {
            username,
            password,
            remember,
            no_remember,
        } => {
            if Route::login().resolve(session.is_authenticated()) == Route::Dashboard {
                println!("Already logged in. Run 'nexora logout' to switch accounts.");
                return Ok(());
            }

            let username = match username {
                Some(name) => name,
                None => prompt_line("Username: ")?,
            };
            if username.is_empty() {
                return Err(NexoraError::Validation("Username is required".into()));
            }
            let password = match password {
                Some(p) => Zeroizing::new(p),
                None => prompt_secret("Password: ")?,
            };

            let remember = if remember {
                true
            } else if no_remember {
                false
            } else {
                settings.remember_me
            };

            client.login(&username, &password, remember).await?;
            let mode = match StorageMode::from_remember(remember) {
                StorageMode::Durable => "kept across restarts",
                StorageMode::Ephemeral => "kept until this machine restarts",
            };
            println!("Logged in as {} (session {}).", username, mode);
        }

        AuthCommands::Signup { username, email } => {
            let password = prompt_secret("Password: ")?;
            let confirmation = prompt_secret("Confirm password: ")?;
            if *password != *confirmation {
                return Err(NexoraError::Validation("Passwords do not match".into()));
            }

            let request = RegisterRequest {
                username: &username,
                password: password.as_str(),
                email: &email,
            };
            match client.register(&request).await {
                Ok(user) => {
                    println!("Account created for {}.", user.username);
                    for notice in Route::login_pending_verification().notices(locale) {
                        println!("{}", notice);
                    }
                }
                Err(err) => {
                    eprintln!("{}", Notice::SignupFailed.text(locale));
                    return Err(err.into());
                }
            }
        }

        AuthCommands::Logout => {
            let revoked = client.logout().await?;
            if !revoked {
                tracing::debug!("session cleared locally only");
            }
            println!("{}", Notice::LoggedOut.text(locale));
        }

        AuthCommands::Status => {
            println!("API:     {}", client.base_url());
            println!("State:   {}", session.state());
            if session.is_authenticated() {
                println!("Storage: {}", session.storage_mode()?);
            }
        }
    }

    Ok(())
}
