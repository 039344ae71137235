//! User profile and display preferences

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::UserId;

/// Currencies offered by the preference form
pub const SUPPORTED_CURRENCIES: &[&str] = &[
    "FCFA", "EUR", "USD", "XOF", "XAF", "GBP", "CAD", "CHF", "JPY", "CNY", "NGN", "GHS", "MAD",
    "DZD",
];

/// Date formats offered by the preference form
pub const SUPPORTED_DATE_FORMATS: &[&str] = &["DD/MM/YYYY", "MM/DD/YYYY", "YYYY-MM-DD"];

fn default_currency() -> String {
    "FCFA".to_string()
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_date_format() -> String {
    "DD/MM/YYYY".to_string()
}

/// Display preferences stored server-side
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub avatar_url: String,

    #[serde(default = "default_currency")]
    pub currency: String,

    #[serde(default = "default_timezone")]
    pub timezone: String,

    #[serde(default = "default_date_format")]
    pub date_format: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            avatar_url: String::new(),
            currency: default_currency(),
            timezone: default_timezone(),
            date_format: default_date_format(),
        }
    }
}

impl Preferences {
    /// Render a date in the preferred format
    pub fn format_date(&self, date: NaiveDate) -> String {
        let pattern = match self.date_format.as_str() {
            "MM/DD/YYYY" => "%m/%d/%Y",
            "YYYY-MM-DD" => "%Y-%m-%d",
            _ => "%d/%m/%Y",
        };
        date.format(pattern).to_string()
    }
}

/// The signed-in user's profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: UserId,

    pub username: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub first_name: String,

    #[serde(default)]
    pub last_name: String,

    pub date_joined: Option<DateTime<Utc>>,

    pub last_login: Option<DateTime<Utc>>,

    #[serde(default)]
    pub preferences: Preferences,
}

impl Profile {
    /// Full name, or the username when no name is set
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Partial preference update; unset fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PreferencesUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_format: Option<String>,
}

impl PreferencesUpdate {
    pub fn is_empty(&self) -> bool {
        self.avatar_url.is_none()
            && self.currency.is_none()
            && self.timezone.is_none()
            && self.date_format.is_none()
    }

    /// Reject values the preference form would not offer
    pub fn validate(&self) -> Result<(), String> {
        if let Some(currency) = &self.currency {
            if !SUPPORTED_CURRENCIES.contains(&currency.as_str()) {
                return Err(format!("Unsupported currency: {}", currency));
            }
        }
        if let Some(format) = &self.date_format {
            if !SUPPORTED_DATE_FORMATS.contains(&format.as_str()) {
                return Err(format!("Unsupported date format: {}", format));
            }
        }
        if let Some(timezone) = &self.timezone {
            if timezone.trim().is_empty() {
                return Err("Timezone cannot be empty".into());
            }
        }
        Ok(())
    }
}

/// Body of `PATCH profile/`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences: Option<PreferencesUpdate>,
}
