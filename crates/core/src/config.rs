//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into [`crate::PromptService`].
//! Nothing in this crate reads environment variables while handling a request, so several
//! services with different storage roots can coexist in one process (tests rely on this).

use crate::constants::DEFAULT_STORAGE_DIR;
use crate::{PromptError, PromptResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    storage_dir: PathBuf,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `PromptError::InvalidConfig` if `storage_dir` is empty.
    pub fn new(storage_dir: PathBuf) -> PromptResult<Self> {
        if storage_dir.as_os_str().is_empty() {
            return Err(PromptError::InvalidConfig(
                "storage_dir cannot be empty".into(),
            ));
        }

        Ok(Self { storage_dir })
    }

    /// Build a `CoreConfig` from the raw value of the storage-directory environment variable.
    ///
    /// If `value` is `None` or empty/whitespace, the default `prompt_data` directory is used.
    pub fn from_env_value(value: Option<String>) -> PromptResult<Self> {
        let storage_dir = value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_STORAGE_DIR.to_string());

        Self::new(PathBuf::from(storage_dir))
    }

    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }
}
