//! Category CLI commands

use clap::Subcommand;

use crate::client::ApiClient;
use crate::config::Settings;
use crate::display::category::{format_category_details, format_category_list};
use crate::display::messages::{Action, Resource};
use crate::error::{NexoraError, NexoraResult};
use crate::models::{CategoryInput, CategoryType};
use crate::services::CategoryService;

use super::report;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List all categories
    List,

    /// Create a new category
    Add {
        /// Category name
        name: String,
        /// Category type (expense or income)
        #[arg(short = 't', long = "type", default_value = "expense")]
        kind: String,
        /// Icon shown before the name
        #[arg(short, long)]
        icon: Option<String>,
        /// Hex color (e.g. "#2AA3FF")
        #[arg(long)]
        color: Option<String>,
    },

    /// Show category details
    Show {
        /// Category name or ID
        category: String,
    },

    /// Edit a category
    Edit {
        /// Category name or ID
        category: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New type
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
        /// New icon
        #[arg(short, long)]
        icon: Option<String>,
        /// New color
        #[arg(long)]
        color: Option<String>,
    },

    /// Delete a category
    Delete {
        /// Category name or ID
        category: String,
    },
}

fn parse_category_type(value: &str) -> NexoraResult<CategoryType> {
    value.parse().map_err(NexoraError::Validation)
}

/// Handle a category command
pub async fn handle_category_command(
    client: &ApiClient,
    settings: &Settings,
    cmd: CategoryCommands,
) -> NexoraResult<()> {
    let service = CategoryService::new(client);
    let locale = settings.locale;

    match cmd {
        CategoryCommands::List => {
            let categories = service.list().await?;
            print!("{}", format_category_list(&categories));
        }

        CategoryCommands::Add {
            name,
            kind,
            icon,
            color,
        } => {
            let mut input = CategoryInput::new(name);
            input.category_type = parse_category_type(&kind)?;
            if let Some(icon) = icon {
                input.icon = icon;
            }
            if let Some(color) = color {
                input.color = color;
            }

            let category = report(
                service.create(input).await,
                Resource::Category,
                Action::Created,
                locale,
            )?;
            println!("  {} (ID: {})", category.label(), category.id);
        }

        CategoryCommands::Show { category } => {
            let category = service.find(&category).await?;
            print!("{}", format_category_details(&category));
        }

        CategoryCommands::Edit {
            category,
            name,
            kind,
            icon,
            color,
        } => {
            let category = service.find(&category).await?;

            if name.is_none() && kind.is_none() && icon.is_none() && color.is_none() {
                println!("No changes specified. Use --name, --type, --icon, or --color.");
                return Ok(());
            }

            let mut input = CategoryInput::from_category(&category);
            if let Some(name) = name {
                input.name = name.trim().to_string();
            }
            if let Some(kind) = kind {
                input.category_type = parse_category_type(&kind)?;
            }
            if let Some(icon) = icon {
                input.icon = icon;
            }
            if let Some(color) = color {
                input.color = color;
            }

            let updated = report(
                service.update(category.id, input).await,
                Resource::Category,
                Action::Updated,
                locale,
            )?;
            println!("  {}", updated.label());
        }

        CategoryCommands::Delete { category } => {
            let category = service.find(&category).await?;
            report(
                service.delete(category.id).await,
                Resource::Category,
                Action::Deleted,
                locale,
            )?;
            println!("  {}", category.name);
        }
    }

    Ok(())
}
