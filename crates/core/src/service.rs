//! Request-layer entry points.
//!
//! [`PromptService`] is what a transport (HTTP handler, CLI, test harness) calls. Every method
//! takes the raw path a client sent after the `/prompts/` prefix and runs the same pipeline:
//!
//! 1. split the path into identifier and optional version ([`plp_types::resolve`])
//! 2. validate the identifier ([`plp_types::PromptId::parse`]), rejecting before any I/O
//! 3. call the storage engine
//!
//! Only reads accept a version selector. Writes, deletes and existence checks address the whole
//! identifier, so a raw path ending in a version-shaped segment is rejected for them with
//! [`PromptError::VersionNotAllowed`].

use crate::config::CoreConfig;
use crate::{PromptError, PromptResult};
use plp_files::{PromptStore, StoredPrompt};
use plp_types::{resolve, PromptEnvelope, PromptId, PromptInput};
use serde_json::Value;
use std::fs;
use std::sync::Arc;

/// Prompt operations addressed by raw request path.
#[derive(Clone, Debug)]
pub struct PromptService {
    cfg: Arc<CoreConfig>,
    store: Arc<PromptStore>,
}

impl PromptService {
    /// Opens the store described by `cfg`, creating the storage directory if needed.
    ///
    /// # Errors
    ///
    /// - `PromptError::StorageDirCreation` if the directory cannot be created
    /// - `PromptError::Store` if the directory cannot be opened as a store
    pub fn new(cfg: Arc<CoreConfig>) -> PromptResult<Self> {
        fs::create_dir_all(cfg.storage_dir()).map_err(PromptError::StorageDirCreation)?;
        let store = PromptStore::new(cfg.storage_dir())?;

        tracing::debug!(root = %store.root().display(), "prompt store opened");

        Ok(Self {
            cfg,
            store: Arc::new(store),
        })
    }

    pub fn config(&self) -> &CoreConfig {
        &self.cfg
    }

    pub fn store(&self) -> &PromptStore {
        &self.store
    }

    /// Reads the latest envelope, or a specific version when the path ends in one.
    ///
    /// Returns `Ok(None)` when nothing is stored at that address.
    pub fn get(&self, raw_path: &str) -> PromptResult<Option<PromptEnvelope>> {
        let (id, version) = resolve(raw_path).into_prompt_id()?;
        Ok(self.store.read(&id, version.as_deref())?)
    }

    /// Validates a raw JSON payload and creates or updates the prompt at `raw_path`.
    pub fn put(&self, raw_path: &str, payload: Value) -> PromptResult<StoredPrompt> {
        let id = whole_identifier(raw_path)?;
        let input = PromptInput::from_json(payload)?;
        Ok(self.store.write(&id, input)?)
    }

    /// Creates or updates the prompt at `raw_path` from an already-typed payload.
    pub fn put_input(&self, raw_path: &str, input: PromptInput) -> PromptResult<StoredPrompt> {
        let id = whole_identifier(raw_path)?;
        Ok(self.store.write(&id, input)?)
    }

    /// Deletes the prompt and all of its version snapshots.
    ///
    /// Returns `Ok(false)` when the prompt did not exist.
    pub fn delete(&self, raw_path: &str) -> PromptResult<bool> {
        let id = whole_identifier(raw_path)?;
        Ok(self.store.delete(&id)?)
    }

    pub fn exists(&self, raw_path: &str) -> PromptResult<bool> {
        let id = whole_identifier(raw_path)?;
        Ok(self.store.exists(&id)?)
    }

    /// Versions that currently have a snapshot for the prompt at `raw_path`.
    pub fn versions(&self, raw_path: &str) -> PromptResult<Vec<String>> {
        let id = whole_identifier(raw_path)?;
        Ok(self.store.versions(&id)?)
    }
}

fn whole_identifier(raw_path: &str) -> PromptResult<PromptId> {
    let (id, version) = resolve(raw_path).into_prompt_id()?;
    if version.is_some() {
        return Err(PromptError::VersionNotAllowed);
    }
    Ok(id)
}
