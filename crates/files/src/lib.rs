//! Prompt Library file storage
//!
//! This crate persists prompt envelopes as JSON objects in a single flat storage directory.
//!
//! ## Storage Layout
//!
//! Identifiers may contain `/`, so each one is flattened into a single file-name-safe token
//! before it touches the filesystem (see [`flatten_token`]). Every object lives directly under the
//! storage root:
//!
//! ```text
//! <storage_root>/
//! ├── marketing%2Fwelcome-email.json          # current envelope
//! ├── marketing%2Fwelcome-email@1.0.0.json    # version snapshot
//! └── marketing%2Fwelcome-email@1.1.0.json    # version snapshot
//! ```
//!
//! Tokens too long for a file name are replaced by `%23` and the hex SHA-256 of the token.
//!
//! ## Guarantees
//!
//! - Every path is built by [`Locator`], which refuses any location that is not a direct child of
//!   the canonical storage root
//! - Objects are replaced by write-then-rename, so a reader never sees a truncated envelope
//! - Writes and deletes of the same identifier are serialized in-process
//!
//! ## Example Usage
//!
//! ```no_run
//! use plp_files::PromptStore;
//! use plp_types::{Meta, PromptId, PromptInput};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = PromptStore::new(Path::new("prompt_data"))?;
//! let id = PromptId::parse("examples/greeting")?;
//!
//! let stored = store.write(&id, PromptInput::new("Hello {{name}}", Meta::new()))?;
//! assert!(stored.status.is_created());
//! assert!(store.read(&id, None)?.is_some());
//! # Ok(())
//! # }
//! ```

mod constants;
mod locator;
mod locks;
mod store;

pub use constants::{OBJECT_EXTENSION, VERSION_SEPARATOR};
pub use locator::{flatten_token, version_token, Locator};
pub use store::{PromptStore, StoredPrompt, WriteStatus};

/// Errors that can occur during storage operations
///
/// Absence is not an error: reads return `None` and deletes return `false`.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Storage root does not exist or is not a directory
    #[error("Invalid storage root: {0}")]
    InvalidRootDirectory(String),

    /// A constructed location would fall outside the storage root
    #[error("Path traversal rejected: {0}")]
    PathTraversal(String),

    /// A stored object exists but is not a valid envelope
    #[error("Corrupt object at {path}: {source}", path = path.display())]
    CorruptObject {
        path: std::path::PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// An envelope could not be serialized
    #[error("Failed to serialize envelope: {0}")]
    Serialization(#[source] serde_json::Error),

    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;
