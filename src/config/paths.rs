//! Path management for Nexora
//!
//! Resolves where configuration, the durable session file, the ephemeral
//! session file and logs live.
//!
//! ## Path Resolution Order
//!
//! Base (durable) directory:
//! 1. `NEXORA_CLI_DATA_DIR` environment variable (if set)
//! 2. Platform config directory for `nexora-cli` (e.g. `~/.config/nexora-cli`)
//!
//! Runtime (ephemeral) directory:
//! 1. `NEXORA_CLI_RUNTIME_DIR` environment variable (if set)
//! 2. Platform runtime directory (`$XDG_RUNTIME_DIR/nexora-cli`), which the
//!    OS wipes when the user session ends
//! 3. `<tmp>/nexora-cli` as a fallback

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::NexoraError;

/// Manages all paths used by Nexora
#[derive(Debug, Clone)]
pub struct NexoraPaths {
    /// Base directory for durable data
    base_dir: PathBuf,
    /// Directory for session-scoped data
    runtime_dir: PathBuf,
}

impl NexoraPaths {
    /// Create a new NexoraPaths instance from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if no home/config directory can be determined.
    pub fn new() -> Result<Self, NexoraError> {
        let project_dirs = ProjectDirs::from("", "", "nexora-cli");

        let base_dir = match std::env::var("NEXORA_CLI_DATA_DIR") {
            Ok(custom) => PathBuf::from(custom),
            Err(_) => project_dirs
                .as_ref()
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    NexoraError::Config("Could not determine a configuration directory".into())
                })?,
        };

        let runtime_dir = match std::env::var("NEXORA_CLI_RUNTIME_DIR") {
            Ok(custom) => PathBuf::from(custom),
            Err(_) => project_dirs
                .as_ref()
                .and_then(|dirs| dirs.runtime_dir().map(|d| d.to_path_buf()))
                .unwrap_or_else(|| std::env::temp_dir().join("nexora-cli")),
        };

        Ok(Self {
            base_dir,
            runtime_dir,
        })
    }

    /// Create NexoraPaths with explicit directories (useful for testing)
    pub fn with_dirs(base_dir: PathBuf, runtime_dir: PathBuf) -> Self {
        Self {
            base_dir,
            runtime_dir,
        }
    }

    /// Get the base directory (~/.config/nexora-cli/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the runtime directory used for session-scoped tokens
    pub fn runtime_dir(&self) -> &PathBuf {
        &self.runtime_dir
    }

    /// Get the config directory (same as base for simplicity)
    pub fn config_dir(&self) -> PathBuf {
        self.base_dir.clone()
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the durable session store
    pub fn durable_session_file(&self) -> PathBuf {
        self.base_dir.join("session.json")
    }

    /// Get the path to the ephemeral session store
    pub fn ephemeral_session_file(&self) -> PathBuf {
        self.runtime_dir.join("session.json")
    }

    /// Get the path to the log file written by the TUI
    pub fn log_file(&self) -> PathBuf {
        self.base_dir.join("nexora.log")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), NexoraError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| NexoraError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(&self.runtime_dir)
            .map_err(|e| NexoraError::Io(format!("Failed to create runtime directory: {}", e)))?;

        Ok(())
    }

    /// Check if a settings file has been written
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_paths(temp_dir: &TempDir) -> NexoraPaths {
        NexoraPaths::with_dirs(
            temp_dir.path().join("config"),
            temp_dir.path().join("run"),
        )
    }

    #[test]
    fn test_custom_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let paths = temp_paths(&temp_dir);

        assert_eq!(paths.base_dir(), &temp_dir.path().join("config"));
        assert_eq!(paths.runtime_dir(), &temp_dir.path().join("run"));
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = temp_paths(&temp_dir);

        paths.ensure_directories().unwrap();

        assert!(paths.base_dir().exists());
        assert!(paths.runtime_dir().exists());
    }

    #[test]
    fn test_file_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = temp_paths(&temp_dir);

        assert_eq!(
            paths.settings_file(),
            temp_dir.path().join("config").join("config.json")
        );
        assert_eq!(
            paths.durable_session_file(),
            temp_dir.path().join("config").join("session.json")
        );
        assert_eq!(
            paths.ephemeral_session_file(),
            temp_dir.path().join("run").join("session.json")
        );
        assert!(!paths.is_initialized());
    }
}
