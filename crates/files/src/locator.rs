//! Mapping identifiers to storage locations without escaping the storage root.
//!
//! Identifier validation is the first line of defence and already rejects `..`. The locator does
//! not rely on it: it flattens whatever it is given into a single file name and then checks the
//! resulting path is a direct child of the canonical root.
//!
//! File names stay under the platform name limit: a token longer than its budget is replaced by
//! [`HASHED_TOKEN_PREFIX`] followed by the hex SHA-256 of the token.

use crate::constants::{
    HASHED_TOKEN_PREFIX, MAX_ID_TOKEN_LEN, MAX_VERSION_TOKEN_LEN, OBJECT_EXTENSION,
    PARENT_PLACEHOLDER, PERCENT_PLACEHOLDER, SEPARATOR_PLACEHOLDER, VERSION_SEPARATOR,
};
use crate::{StoreError, StoreResult};
use sha2::{Digest, Sha256};
use std::path::{Component, Path, PathBuf};

/// Flattens an identifier (or version string) into a single storage-safe token.
///
/// Every `..` becomes `%2E%2E`, then every run of `/` or platform path separators becomes a
/// single `%2F`. For valid identifiers, which never contain `%`, `.` or `@`, distinct identifiers
/// produce distinct tokens. The transformation is not meant to be reversed.
pub fn flatten_token(raw: &str) -> String {
    let without_parents = raw.replace("..", PARENT_PLACEHOLDER);

    let mut token = String::with_capacity(without_parents.len());
    let mut in_separator_run = false;
    for c in without_parents.chars() {
        if c == '/' || std::path::is_separator(c) {
            if !in_separator_run {
                token.push_str(SEPARATOR_PLACEHOLDER);
            }
            in_separator_run = true;
        } else {
            token.push(c);
            in_separator_run = false;
        }
    }
    token
}

/// Encodes a version string for use in a snapshot file name.
///
/// Unlike [`flatten_token`] this is injective over all strings: `%` is escaped first, every
/// separator is escaped on its own and `..` pairs are escaped left to right. `"a/b"`, `"a//b"` and
/// `"a%2Fb"` therefore name different snapshots.
pub fn version_token(version: &str) -> String {
    let mut token = String::with_capacity(version.len());
    let mut chars = version.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '%' => token.push_str(PERCENT_PLACEHOLDER),
            '.' if chars.peek() == Some(&'.') => {
                chars.next();
                token.push_str(PARENT_PLACEHOLDER);
            }
            '/' => token.push_str(SEPARATOR_PLACEHOLDER),
            c if std::path::is_separator(c) => token.push_str(&format!("%{:02X}", c as u32)),
            c => token.push(c),
        }
    }
    token
}

/// Replaces `token` with a fixed-length digest when it is longer than `max_len` bytes.
fn bounded(token: String, max_len: usize) -> String {
    if token.len() <= max_len {
        return token;
    }

    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{HASHED_TOKEN_PREFIX}{}", hex::encode(hasher.finalize()))
}

/// Builds object paths inside one storage root.
#[derive(Debug, Clone)]
pub struct Locator {
    /// Canonical, absolute storage root
    root: PathBuf,
}

impl Locator {
    /// Creates a locator for `storage_root`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidRootDirectory` if the root does not exist, is not a directory,
    /// or cannot be canonicalised.
    pub fn new(storage_root: &Path) -> StoreResult<Self> {
        if !storage_root.exists() {
            return Err(StoreError::InvalidRootDirectory(format!(
                "Directory does not exist: {}",
                storage_root.display()
            )));
        }

        if !storage_root.is_dir() {
            return Err(StoreError::InvalidRootDirectory(format!(
                "Path is not a directory: {}",
                storage_root.display()
            )));
        }

        let root = storage_root.canonicalize().map_err(|e| {
            StoreError::InvalidRootDirectory(format!(
                "Cannot canonicalize path {}: {}",
                storage_root.display(),
                e
            ))
        })?;

        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the location of the current envelope (`version` is `None`) or of a version
    /// snapshot.
    ///
    /// The file name is `<token>.json` or `<token>@<version-token>.json`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::PathTraversal` if the location does not resolve to a direct child of
    /// the storage root.
    pub fn locate(&self, id: &str, version: Option<&str>) -> StoreResult<PathBuf> {
        let token = id_token(id);
        let file_name = match version {
            Some(version) => format!(
                "{token}{VERSION_SEPARATOR}{}.{OBJECT_EXTENSION}",
                bounded(version_token(version), MAX_VERSION_TOKEN_LEN)
            ),
            None => format!("{token}.{OBJECT_EXTENSION}"),
        };

        self.ensure_within_root(self.root.join(file_name))
    }

    /// File-name prefix shared by every version snapshot of `id`.
    pub fn snapshot_prefix(&self, id: &str) -> String {
        format!("{}{VERSION_SEPARATOR}", id_token(id))
    }

    /// Extracts the version token from a snapshot file name, if `file_name` belongs to `prefix`.
    ///
    /// Every name [`Locator::locate`] can produce for a version matches, including the empty one.
    pub(crate) fn snapshot_version<'a>(&self, prefix: &str, file_name: &'a str) -> Option<&'a str> {
        file_name
            .strip_prefix(prefix)?
            .strip_suffix(OBJECT_EXTENSION)?
            .strip_suffix('.')
    }

    /// Normalises `candidate` lexically and checks that it names an entry directly inside the
    /// root.
    fn ensure_within_root(&self, candidate: PathBuf) -> StoreResult<PathBuf> {
        let resolved = normalize_lexically(&candidate);

        if resolved.parent() != Some(self.root.as_path()) || !resolved.starts_with(&self.root) {
            return Err(StoreError::PathTraversal(format!(
                "location escapes storage root: {}",
                candidate
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default()
            )));
        }

        Ok(resolved)
    }
}

/// Name token of an identifier's objects.
fn id_token(id: &str) -> String {
    bounded(flatten_token(id), MAX_ID_TOKEN_LEN)
}

/// Resolves `.` and `..` components without touching the filesystem.
///
/// The target of a write usually does not exist yet, so `canonicalize` cannot be used on it.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
