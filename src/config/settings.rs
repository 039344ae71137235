//! User settings for Nexora
//!
//! Manages client preferences: which API to talk to, how long to wait for
//! it, whether logins are remembered by default, and how the dashboard
//! behaves.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::paths::NexoraPaths;
use crate::error::NexoraError;

/// Default API base URL
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000/api/";

/// Language used for notices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English (default)
    #[default]
    En,
    /// French
    Fr,
}

impl std::str::FromStr for Locale {
    type Err = NexoraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Self::En),
            "fr" | "french" | "francais" => Ok(Self::Fr),
            other => Err(NexoraError::Config(format!("Unknown locale: {}", other))),
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::En => write!(f, "en"),
            Self::Fr => write!(f, "fr"),
        }
    }
}

/// User settings for Nexora
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Base URL of the budgeting API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Whether `login` keeps tokens across restarts unless told otherwise
    #[serde(default = "default_remember_me")]
    pub remember_me: bool,

    /// Quiet period before a filter change triggers a reload
    #[serde(default = "default_filter_debounce_ms")]
    pub filter_debounce_ms: u64,

    /// How long toast notifications stay visible in the TUI
    #[serde(default = "default_toast_duration_ms")]
    pub toast_duration_ms: u64,

    /// Language for notices
    #[serde(default)]
    pub locale: Locale,

    /// Currency code shown until the profile preferences are loaded
    #[serde(default = "default_currency")]
    pub fallback_currency: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_remember_me() -> bool {
    true
}

fn default_filter_debounce_ms() -> u64 {
    280
}

fn default_toast_duration_ms() -> u64 {
    2600
}

fn default_currency() -> String {
    "FCFA".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            remember_me: default_remember_me(),
            filter_debounce_ms: default_filter_debounce_ms(),
            toast_duration_ms: default_toast_duration_ms(),
            locale: Locale::default(),
            fallback_currency: default_currency(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    ///
    /// `NEXORA_API_URL` overrides the stored base URL.
    pub fn load_or_create(paths: &NexoraPaths) -> Result<Self, NexoraError> {
        let settings_path = paths.settings_file();

        let mut settings = if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                NexoraError::Io(format!("Failed to read settings file: {}", e))
            })?;

            serde_json::from_str(&contents).map_err(|e| {
                NexoraError::Config(format!("Failed to parse settings file: {}", e))
            })?
        } else {
            // Don't save yet - let caller decide when to persist
            Settings::default()
        };

        if let Ok(url) = std::env::var("NEXORA_API_URL") {
            if !url.trim().is_empty() {
                settings.api_base_url = url;
            }
        }

        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &NexoraPaths) -> Result<(), NexoraError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            NexoraError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(&settings_path, contents).map_err(|e| {
            NexoraError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }

    /// Apply a `key=value` style update coming from `nexora config set`
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), NexoraError> {
        let invalid = |what: &str| NexoraError::Config(format!("Invalid {}: {}", what, value));

        match key {
            "api_base_url" | "api-url" => {
                if !(value.starts_with("http://") || value.starts_with("https://")) {
                    return Err(invalid("API URL"));
                }
                self.api_base_url = value.to_string();
            }
            "request_timeout_secs" | "timeout" => {
                self.request_timeout_secs = value.parse().map_err(|_| invalid("timeout"))?;
            }
            "remember_me" | "remember" => {
                self.remember_me = value.parse().map_err(|_| invalid("boolean"))?;
            }
            "filter_debounce_ms" | "debounce" => {
                self.filter_debounce_ms = value.parse().map_err(|_| invalid("debounce"))?;
            }
            "toast_duration_ms" => {
                self.toast_duration_ms = value.parse().map_err(|_| invalid("duration"))?;
            }
            "locale" => {
                self.locale = value.parse()?;
            }
            "fallback_currency" | "currency" => {
                let value = value.trim();
                if value.is_empty() || value.len() > 10 {
                    return Err(invalid("currency"));
                }
                self.fallback_currency = value.to_string();
            }
            other => {
                return Err(NexoraError::Config(format!("Unknown setting: {}", other)));
            }
        }

        Ok(())
    }

    /// Request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Filter debounce delay as a Duration
    pub fn filter_debounce(&self) -> Duration {
        Duration::from_millis(self.filter_debounce_ms)
    }

    /// Toast lifetime as a Duration
    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.api_base_url, DEFAULT_API_BASE_URL);
        assert!(settings.remember_me);
        assert_eq!(settings.filter_debounce_ms, 280);
        assert_eq!(settings.locale, Locale::En);
        assert_eq!(settings.fallback_currency, "FCFA");
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = NexoraPaths::with_dirs(
            temp_dir.path().join("config"),
            temp_dir.path().join("run"),
        );

        let mut settings = Settings::default();
        settings.locale = Locale::Fr;
        settings.remember_me = false;

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.locale, Locale::Fr);
        assert!(!loaded.remember_me);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"locale": "fr"}"#).unwrap();
        assert_eq!(settings.locale, Locale::Fr);
        assert_eq!(settings.request_timeout_secs, 30);
        assert_eq!(settings.toast_duration(), Duration::from_millis(2600));
    }

    #[test]
    fn test_set_value() {
        let mut settings = Settings::default();
        settings.set_value("api-url", "https://budget.example/api/").unwrap();
        settings.set_value("remember", "false").unwrap();
        settings.set_value("locale", "FR").unwrap();

        assert_eq!(settings.api_base_url, "https://budget.example/api/");
        assert!(!settings.remember_me);
        assert_eq!(settings.locale, Locale::Fr);

        assert!(settings.set_value("api-url", "ftp://nope").is_err());
        assert!(settings.set_value("timeout", "soon").is_err());
        assert!(settings.set_value("colour", "blue").is_err());
    }
}
