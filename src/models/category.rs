//! Category model
//!
//! Categories are either expense (`EXP`) or income (`INC`) and carry an
//! emoji icon and a hex color for display.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::CategoryId;

/// Icon used when a category has none
pub const DEFAULT_CATEGORY_ICON: &str = "🏷️";

/// Color used when a category has none
pub const DEFAULT_CATEGORY_COLOR: &str = "#2AA3FF";

/// Whether a category tracks spending or earnings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CategoryType {
    #[default]
    #[serde(rename = "EXP")]
    Expense,
    #[serde(rename = "INC")]
    Income,
}

impl CategoryType {
    /// Wire code ("EXP" / "INC")
    pub fn code(&self) -> &'static str {
        match self {
            Self::Expense => "EXP",
            Self::Income => "INC",
        }
    }
}

impl fmt::Display for CategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expense => write!(f, "Expense"),
            Self::Income => write!(f, "Income"),
        }
    }
}

impl FromStr for CategoryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "exp" | "expense" | "depense" => Ok(Self::Expense),
            "inc" | "income" | "revenu" => Ok(Self::Income),
            other => Err(format!("Unknown category type: {}", other)),
        }
    }
}

/// A category as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,

    pub name: String,

    #[serde(rename = "type")]
    pub category_type: CategoryType,

    #[serde(default)]
    pub icon: String,

    #[serde(default)]
    pub color: String,
}

impl Category {
    /// Icon to display, falling back to the default tag
    pub fn display_icon(&self) -> &str {
        if self.icon.trim().is_empty() {
            DEFAULT_CATEGORY_ICON
        } else {
            &self.icon
        }
    }

    /// "<icon> <name>" label used in charts and pickers
    pub fn label(&self) -> String {
        format!("{} {}", self.display_icon(), self.name)
    }

    pub fn is_expense(&self) -> bool {
        self.category_type == CategoryType::Expense
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Payload for creating or replacing a category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryInput {
    pub name: String,

    #[serde(rename = "type")]
    pub category_type: CategoryType,

    pub icon: String,

    pub color: String,
}

impl CategoryInput {
    /// A new expense category with the default icon and color
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category_type: CategoryType::Expense,
            icon: DEFAULT_CATEGORY_ICON.to_string(),
            color: DEFAULT_CATEGORY_COLOR.to_string(),
        }
    }

    /// Start an edit from an existing category
    pub fn from_category(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            category_type: category.category_type,
            icon: category.display_icon().to_string(),
            color: if category.color.is_empty() {
                DEFAULT_CATEGORY_COLOR.to_string()
            } else {
                category.color.clone()
            },
        }
    }

    /// Validate the form before sending it
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        if name.chars().count() > 100 {
            return Err(CategoryValidationError::NameTooLong(name.chars().count()));
        }

        if !is_hex_color(&self.color) {
            return Err(CategoryValidationError::InvalidColor(self.color.clone()));
        }

        Ok(())
    }
}

/// Whether a string is a `#RRGGBB` color
pub fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
    InvalidColor(String),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max 100)", len)
            }
            Self::InvalidColor(color) => write!(f, "Invalid color '{}', expected #RRGGBB", color),
        }
    }
}

impl std::error::Error for CategoryValidationError {}
