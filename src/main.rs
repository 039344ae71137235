use anyhow::{bail, Result};
use clap::{Parser, Subcommand};

use nexora_cli::cli::{
    handle_auth_command, handle_budget_command, handle_category_command,
    handle_dashboard_command, handle_profile_command, handle_transaction_command,
    handle_wallet_command, AuthCommands, BudgetCommands, CategoryCommands, DashboardArgs,
    ProfileCommands, TransactionCommands, WalletCommands,
};
use nexora_cli::client::ApiClient;
use nexora_cli::config::{Locale, NexoraPaths, Settings};
use nexora_cli::error::NexoraResult;
use nexora_cli::logging;
use nexora_cli::session::{Route, SessionContext};

#[derive(Parser)]
#[command(
    name = "nexora",
    version,
    about = "Terminal client for the Nexora budgeting service",
    long_about = "Nexora tracks income, expenses, wallets and monthly budgets. \
                  This client talks to the Nexora API from the command line \
                  and offers an interactive dashboard."
)]
struct Cli {
    /// Base URL of the API, e.g. https://nexora.example/api/
    #[arg(long, global = true, env = "NEXORA_API_URL")]
    api_url: Option<String>,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Auth(AuthCommands),

    /// Print the monthly dashboard
    Dashboard(DashboardArgs),

    /// Launch the interactive dashboard
    #[command(alias = "ui")]
    Tui,

    /// Transaction commands
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// Category commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Wallet commands
    #[command(subcommand)]
    Wallet(WalletCommands),

    /// Budget commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Profile and preferences
    #[command(subcommand)]
    Profile(ProfileCommands),

    /// Show or change local settings
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show paths and settings
    Show,
    /// Change one setting
    Set {
        /// Setting name, e.g. api_base_url, locale, remember_me
        key: String,
        value: String,
    },
}

impl Commands {
    /// Screen this command stands for, for session gating
    fn route(&self) -> Option<Route> {
        match self {
            Self::Auth(_) | Self::Config { .. } => None,
            Self::Profile(_) => Some(Route::Profile),
            _ => Some(Route::Dashboard),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = NexoraPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;
    if let Some(url) = cli.api_url.as_deref().filter(|u| !u.trim().is_empty()) {
        settings.api_base_url = url.to_string();
    }

    let level = logging::default_level(cli.verbose);
    if matches!(cli.command, Some(Commands::Tui)) {
        logging::init_file_logging(level, &paths.log_file())?;
    } else {
        logging::init_stderr_logging(level)?;
    }

    let Some(command) = cli.command else {
        println!("Nexora - budgeting from the terminal");
        println!();
        println!("Run 'nexora --help' for usage information.");
        println!("Run 'nexora login' to sign in, then 'nexora tui' for the dashboard.");
        return Ok(());
    };

    if let Commands::Config { action } = command {
        return handle_config(&paths, &mut settings, action);
    }

    paths.ensure_directories()?;
    let session = SessionContext::from_paths(&paths);

    if let Some(route) = command.route() {
        let landing = session.guard(route);
        if landing != route {
            print_notices(&landing, settings.locale);
            bail!("Not logged in. Run 'nexora login' first.");
        }
    }

    let client = ApiClient::from_settings(&settings, session)?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    if let Commands::Tui = command {
        let redirect = nexora_cli::tui::run_tui(client, settings.clone(), runtime.handle().clone())?;
        if let Some(route) = redirect {
            print_notices(&route, settings.locale);
            if route != Route::login() {
                bail!("Session expired. Run 'nexora login' to continue.");
            }
        }
        return Ok(());
    }

    let result = runtime.block_on(dispatch(&client, &settings, command));
    match result {
        Err(err) if err.is_session_expired() => {
            if let Some(route) = err.redirect() {
                print_notices(&route, settings.locale);
            }
            bail!("Session expired. Run 'nexora login' to continue.");
        }
        other => Ok(other?),
    }
}

async fn dispatch(client: &ApiClient, settings: &Settings, command: Commands) -> NexoraResult<()> {
    match command {
        Commands::Auth(cmd) => handle_auth_command(client, settings, cmd).await,
        Commands::Dashboard(args) => handle_dashboard_command(client, settings, args).await,
        Commands::Transaction(cmd) => handle_transaction_command(client, settings, cmd).await,
        Commands::Category(cmd) => handle_category_command(client, settings, cmd).await,
        Commands::Wallet(cmd) => handle_wallet_command(client, settings, cmd).await,
        Commands::Budget(cmd) => handle_budget_command(client, settings, cmd).await,
        Commands::Profile(cmd) => handle_profile_command(client, settings, cmd).await,
        // Handled before the runtime starts
        Commands::Tui | Commands::Config { .. } => Ok(()),
    }
}

fn print_notices(route: &Route, locale: Locale) {
    for notice in route.notices(locale) {
        eprintln!("{}", notice);
    }
}

fn handle_config(
    paths: &NexoraPaths,
    settings: &mut Settings,
    action: Option<ConfigAction>,
) -> Result<()> {
    match action.unwrap_or(ConfigAction::Show) {
        ConfigAction::Show => {
            println!("Nexora Configuration");
            println!("====================");
            println!("Config directory:  {}", paths.config_dir().display());
            println!("Runtime directory: {}", paths.runtime_dir().display());
            println!("Log file:          {}", paths.log_file().display());
            println!();
            println!("Settings:");
            println!("  API base URL:     {}", settings.api_base_url);
            println!("  Request timeout:  {}s", settings.request_timeout_secs);
            println!("  Remember me:      {}", settings.remember_me);
            println!("  Filter debounce:  {}ms", settings.filter_debounce_ms);
            println!("  Toast duration:   {}ms", settings.toast_duration_ms);
            println!("  Locale:           {}", settings.locale);
            println!("  Currency:         {}", settings.fallback_currency);
        }
        ConfigAction::Set { key, value } => {
            settings.set_value(&key, &value)?;
            settings.save(paths)?;
            println!("Set {} = {}", key, value);
        }
    }
    Ok(())
}
