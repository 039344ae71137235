//! Token store
//!
//! Keeps the access/refresh token pair in one of two backends. The
//! `token_storage` flag, always kept in the durable backend, records which
//! backend currently holds the pair.

use std::fmt;
use std::sync::Arc;

use crate::config::NexoraPaths;
use crate::error::NexoraResult;
use crate::storage::{FileStore, KeyValueStore, MemoryStore};

/// Key holding the access token
pub const ACCESS_TOKEN_KEY: &str = "access_token";
/// Key holding the refresh token
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
/// Key holding the storage mode flag (durable backend only)
pub const TOKEN_STORAGE_KEY: &str = "token_storage";

/// Which backend holds the tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageMode {
    /// Survives restarts
    #[default]
    Durable,
    /// Cleared when the user session ends
    Ephemeral,
}

impl StorageMode {
    /// Pick the mode for a "remember me" choice
    pub fn from_remember(remember: bool) -> Self {
        if remember {
            Self::Durable
        } else {
            Self::Ephemeral
        }
    }

    /// Value written to the mode flag
    pub fn as_flag(&self) -> &'static str {
        match self {
            Self::Durable => "local",
            Self::Ephemeral => "session",
        }
    }

    /// Parse the mode flag; anything unknown means durable
    pub fn from_flag(flag: Option<&str>) -> Self {
        match flag {
            Some("session") => Self::Ephemeral,
            _ => Self::Durable,
        }
    }
}

impl fmt::Display for StorageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Durable => write!(f, "remembered"),
            Self::Ephemeral => write!(f, "this session only"),
        }
    }
}

/// Persists the token pair across two backends
#[derive(Clone)]
pub struct TokenStore {
    durable: Arc<dyn KeyValueStore>,
    ephemeral: Arc<dyn KeyValueStore>,
}

impl TokenStore {
    /// Create a token store over explicit backends
    pub fn new(durable: Arc<dyn KeyValueStore>, ephemeral: Arc<dyn KeyValueStore>) -> Self {
        Self { durable, ephemeral }
    }

    /// Token store backed by the session files under the configured paths
    pub fn from_paths(paths: &NexoraPaths) -> Self {
        Self::new(
            Arc::new(FileStore::new(paths.durable_session_file())),
            Arc::new(FileStore::new(paths.ephemeral_session_file())),
        )
    }

    /// Token store that never touches disk
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()), Arc::new(MemoryStore::new()))
    }

    /// Current storage mode, defaulting to durable when no flag is set
    pub fn storage_mode(&self) -> NexoraResult<StorageMode> {
        let flag = self.durable.get(TOKEN_STORAGE_KEY)?;
        Ok(StorageMode::from_flag(flag.as_deref()))
    }

    fn active(&self) -> NexoraResult<&Arc<dyn KeyValueStore>> {
        Ok(self.backend(self.storage_mode()?))
    }

    fn backend(&self, mode: StorageMode) -> &Arc<dyn KeyValueStore> {
        match mode {
            StorageMode::Durable => &self.durable,
            StorageMode::Ephemeral => &self.ephemeral,
        }
    }

    /// Read the access token from the active backend
    pub fn get_access_token(&self) -> NexoraResult<Option<String>> {
        self.active()?.get(ACCESS_TOKEN_KEY)
    }

    /// Read the refresh token from the active backend
    pub fn get_refresh_token(&self) -> NexoraResult<Option<String>> {
        self.active()?.get(REFRESH_TOKEN_KEY)
    }

    /// Store a fresh token pair, wiping whatever was there before
    pub fn set_tokens(&self, access: &str, refresh: &str, remember: bool) -> NexoraResult<()> {
        self.clear_tokens()?;

        let mode = StorageMode::from_remember(remember);
        self.durable.set(TOKEN_STORAGE_KEY, mode.as_flag())?;

        let backend = self.backend(mode);
        backend.set(ACCESS_TOKEN_KEY, access)?;
        backend.set(REFRESH_TOKEN_KEY, refresh)?;

        tracing::debug!(%mode, "stored session tokens");
        Ok(())
    }

    /// Swap in a refreshed access token, keeping refresh token and mode
    pub fn replace_access_token(&self, access: &str) -> NexoraResult<()> {
        self.active()?.set(ACCESS_TOKEN_KEY, access)
    }

    /// Remove tokens and the mode flag from both backends
    pub fn clear_tokens(&self) -> NexoraResult<()> {
        for backend in [&self.durable, &self.ephemeral] {
            backend.remove(ACCESS_TOKEN_KEY)?;
            backend.remove(REFRESH_TOKEN_KEY)?;
        }
        self.durable.remove(TOKEN_STORAGE_KEY)?;
        Ok(())
    }

    /// Whether an access token is present (no expiry check)
    pub fn is_authenticated(&self) -> bool {
        matches!(self.get_access_token(), Ok(Some(token)) if !token.is_empty())
    }
}

impl fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenStore")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
