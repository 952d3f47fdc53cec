//! Prompt storage engine
//!
//! [`PromptStore`] is the only component that reads or changes stored envelopes. It offers four
//! operations on validated identifiers: read, write, delete and exists.
//!
//! # Objects
//!
//! Each identifier has one *current* object holding the most recent envelope. A write whose
//! `meta.version` is a string also stores a byte-identical *snapshot* under that version. Writing
//! the same version again replaces its snapshot. Untagged writes keep no history.
//!
//! # Consistency
//!
//! - Objects are written to a hidden staging file, synced, then renamed into place. A reader sees
//!   either the previous envelope or the new one, never a partial file.
//! - For a version-tagged write both objects are staged before either is renamed. The snapshot is
//!   renamed first, then the current object. A crash between the two renames leaves a new snapshot
//!   beside the old current envelope.
//! - Writes and deletes of the same identifier are serialized by an in-process lock. Reads take no
//!   lock, so a read racing a write may see the new snapshot before the new current object.
//! - Delete removes the current object, then every snapshot present when the directory is
//!   scanned. Snapshot removal is best-effort: a failure is logged and the delete still succeeds.

use crate::constants::STAGING_SUFFIX;
use crate::locator::{flatten_token, Locator};
use crate::locks::KeyedLocks;
use crate::{StoreError, StoreResult};
use plp_types::{PromptEnvelope, PromptId, PromptInput};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Whether a write created the identifier or replaced an existing envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStatus {
    Created,
    Updated,
}

impl WriteStatus {
    pub fn is_created(self) -> bool {
        self == Self::Created
    }
}

/// Outcome of a successful write.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredPrompt {
    pub envelope: PromptEnvelope,
    pub status: WriteStatus,
}

/// Filesystem-backed prompt store bound to one storage root.
///
/// Several stores may exist in one process, each with its own root. Two stores sharing a root do
/// not share locks.
#[derive(Debug)]
pub struct PromptStore {
    locator: Locator,
    locks: KeyedLocks,
}

impl PromptStore {
    /// Opens the store rooted at `storage_root`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidRootDirectory` if the root does not exist, is not a directory,
    /// or cannot be canonicalised.
    pub fn new(storage_root: &Path) -> StoreResult<Self> {
        Ok(Self {
            locator: Locator::new(storage_root)?,
            locks: KeyedLocks::default(),
        })
    }

    /// Canonical storage root.
    pub fn root(&self) -> &Path {
        self.locator.root()
    }

    /// Reads the current envelope, or the snapshot for `version` when one is given.
    ///
    /// Returns `Ok(None)` when the object does not exist.
    ///
    /// # Errors
    ///
    /// - `StoreError::PathTraversal` if the location cannot be built safely
    /// - `StoreError::CorruptObject` if the stored bytes are not a valid envelope
    /// - `StoreError::Io` for any other read failure
    pub fn read(
        &self,
        id: &PromptId,
        version: Option<&str>,
    ) -> StoreResult<Option<PromptEnvelope>> {
        let path = self.locator.locate(id.as_str(), version)?;
        tracing::debug!(%id, ?version, "reading prompt");

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_context(e, "Failed to read prompt from", &path)),
        };

        let mut envelope: PromptEnvelope = serde_json::from_slice(&bytes)
            .map_err(|source| StoreError::CorruptObject {
                path: path.clone(),
                source,
            })?;

        if envelope.id != *id {
            tracing::warn!(
                %id,
                stored = %envelope.id,
                "stored envelope carries a different identifier; using the requested one"
            );
            envelope.id = id.clone();
        }

        Ok(Some(envelope))
    }

    /// Returns `true` when a current envelope exists for `id`.
    ///
    /// Only file metadata is inspected; the envelope is not parsed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` for failures other than absence.
    pub fn exists(&self, id: &PromptId) -> StoreResult<bool> {
        let path = self.locator.locate(id.as_str(), None)?;
        object_exists(&path)
    }

    /// Creates or replaces the current envelope for `id`.
    ///
    /// When `input.meta.version` is a string, the same envelope is also stored as the snapshot for
    /// that version. The returned status reports whether `id` had a current envelope before this
    /// write.
    ///
    /// # Errors
    ///
    /// - `StoreError::PathTraversal` if a location cannot be built safely
    /// - `StoreError::Serialization` if the envelope cannot be encoded
    /// - `StoreError::Io` if staging or renaming fails; the previous objects are left in place
    pub fn write(&self, id: &PromptId, input: PromptInput) -> StoreResult<StoredPrompt> {
        let current_path = self.locator.locate(id.as_str(), None)?;
        let snapshot_path = input
            .version()
            .map(|version| self.locator.locate(id.as_str(), Some(version)))
            .transpose()?;

        self.locks.with_lock(&flatten_token(id.as_str()), || {
            let status = if object_exists(&current_path)? {
                WriteStatus::Updated
            } else {
                WriteStatus::Created
            };

            let envelope = PromptEnvelope::new(id.clone(), input);
            let bytes = serde_json::to_vec_pretty(&envelope).map_err(StoreError::Serialization)?;

            let current = self.stage(&current_path, &bytes)?;
            let snapshot = snapshot_path
                .as_deref()
                .map(|path| self.stage(path, &bytes))
                .transpose()?;

            if let Some(snapshot) = snapshot {
                snapshot.commit()?;
            }
            current.commit()?;

            let version = envelope.version();
            match status {
                WriteStatus::Created => tracing::info!(%id, ?version, "prompt created"),
                WriteStatus::Updated => tracing::info!(%id, ?version, "prompt updated"),
            }

            Ok(StoredPrompt { envelope, status })
        })
    }

    /// Deletes the current envelope for `id` and every version snapshot found for it.
    ///
    /// Returns `Ok(false)` when there was no current envelope; nothing is removed in that case.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the current envelope exists but cannot be removed. Failures
    /// while removing snapshots are logged, not returned.
    pub fn delete(&self, id: &PromptId) -> StoreResult<bool> {
        let current_path = self.locator.locate(id.as_str(), None)?;

        self.locks.with_lock(&flatten_token(id.as_str()), || {
            match fs::remove_file(&current_path) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    tracing::debug!(%id, "delete of missing prompt");
                    return Ok(false);
                }
                Err(e) => return Err(io_context(e, "Failed to remove prompt", &current_path)),
            }

            let snapshots = match self.snapshot_files(id) {
                Ok(snapshots) => snapshots,
                Err(e) => {
                    tracing::warn!(%id, error = %e, "could not scan for version snapshots");
                    Vec::new()
                }
            };

            let mut removed = 0usize;
            for (version, path) in snapshots {
                match fs::remove_file(&path) {
                    Ok(()) => removed += 1,
                    Err(e) if e.kind() == ErrorKind::NotFound => {}
                    Err(e) => tracing::warn!(
                        %id,
                        %version,
                        error = %e,
                        "failed to remove version snapshot"
                    ),
                }
            }

            tracing::info!(%id, snapshots_removed = removed, "prompt deleted");
            Ok(true)
        })
    }

    /// Lists the versions that currently have a snapshot for `id`, sorted as strings.
    ///
    /// Versions are recovered from file names, so a version that had to be flattened (for
    /// example one containing `/`) is reported in its flattened form.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the storage root cannot be scanned.
    pub fn versions(&self, id: &PromptId) -> StoreResult<Vec<String>> {
        let mut versions: Vec<String> = self
            .snapshot_files(id)?
            .into_iter()
            .map(|(version, _)| version)
            .collect();
        versions.sort();
        Ok(versions)
    }

    /// Scans the storage root for snapshot objects of `id`.
    fn snapshot_files(&self, id: &PromptId) -> StoreResult<Vec<(String, PathBuf)>> {
        let prefix = self.locator.snapshot_prefix(id.as_str());
        let root = self.locator.root();

        let entries =
            fs::read_dir(root).map_err(|e| io_context(e, "Failed to scan storage root", root))?;

        let mut found = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| io_context(e, "Failed to scan storage root", root))?;
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            if let Some(version) = self.locator.snapshot_version(&prefix, name) {
                found.push((version.to_owned(), entry.path()));
            }
        }

        Ok(found)
    }

    /// Writes `bytes` to a uniquely named staging file next to `target` and syncs it.
    fn stage(&self, target: &Path, bytes: &[u8]) -> StoreResult<StagedObject> {
        let staging = self.locator.root().join(format!(
            ".{}.{STAGING_SUFFIX}",
            uuid::Uuid::new_v4().simple()
        ));

        // Constructed before the file exists so a failed write still cleans up.
        let staged = StagedObject {
            staging,
            target: target.to_path_buf(),
            committed: false,
        };

        let mut file = fs::File::create(&staged.staging)
            .map_err(|e| io_context(e, "Failed to create staging file", &staged.staging))?;
        file.write_all(bytes)
            .map_err(|e| io_context(e, "Failed to write staging file", &staged.staging))?;
        file.sync_all()
            .map_err(|e| io_context(e, "Failed to sync staging file", &staged.staging))?;

        Ok(staged)
    }
}

/// A fully written staging file waiting to be renamed onto its target.
///
/// Dropping it without committing removes the staging file.
#[derive(Debug)]
struct StagedObject {
    staging: PathBuf,
    target: PathBuf,
    committed: bool,
}

impl StagedObject {
    fn commit(mut self) -> StoreResult<()> {
        fs::rename(&self.staging, &self.target)
            .map_err(|e| io_context(e, "Failed to move prompt into place at", &self.target))?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for StagedObject {
    fn drop(&mut self) {
        if !self.committed {
            if let Err(e) = fs::remove_file(&self.staging) {
                if e.kind() != ErrorKind::NotFound {
                    tracing::warn!(
                        path = %self.staging.display(),
                        error = %e,
                        "failed to remove staging file"
                    );
                }
            }
        }
    }
}

fn object_exists(path: &Path) -> StoreResult<bool> {
    match fs::metadata(path) {
        Ok(metadata) => Ok(metadata.is_file()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(io_context(e, "Failed to inspect", path)),
    }
}

fn io_context(e: std::io::Error, action: &str, path: &Path) -> StoreError {
    StoreError::Io(std::io::Error::new(
        e.kind(),
        format!("{} {}: {}", action, path.display(), e),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use plp_types::{Meta, PromptContent};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use std::thread;
    use tempfile::TempDir;

    fn create_test_store() -> (TempDir, PromptStore) {
        let temp = TempDir::new().unwrap();
        let store = PromptStore::new(temp.path()).unwrap();
        (temp, store)
    }

    fn id(raw: &str) -> PromptId {
        PromptId::parse(raw).unwrap()
    }

    fn meta(value: Value) -> Meta {
        value.as_object().cloned().unwrap()
    }

    fn file_names(store: &PromptStore) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(store.root())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_read_missing_is_none() {
        let (_temp, store) = create_test_store();
        assert_eq!(store.read(&id("nope"), None).unwrap(), None);
        assert_eq!(store.read(&id("nope"), Some("1.0.0")).unwrap(), None);
        assert!(!store.exists(&id("nope")).unwrap());
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let (_temp, store) = create_test_store();
        let prompt = id("marketing/welcome-email");
        let m = meta(json!({ "author": "demo", "tags": ["a", "b"], "nested": { "k": 1 } }));

        store
            .write(&prompt, PromptInput::new("Hello {{name}}", m.clone()))
            .unwrap();

        let envelope = store.read(&prompt, None).unwrap().unwrap();
        assert_eq!(envelope.id, prompt);
        assert_eq!(envelope.content, PromptContent::from("Hello {{name}}"));
        assert_eq!(envelope.meta, m);
    }

    #[test]
    fn test_created_then_updated() {
        let (_temp, store) = create_test_store();
        let prompt = id("a/b");

        let first = store
            .write(&prompt, PromptInput::new("one", Meta::new()))
            .unwrap();
        assert_eq!(first.status, WriteStatus::Created);
        assert!(store.exists(&prompt).unwrap());

        let second = store
            .write(&prompt, PromptInput::new("two", Meta::new()))
            .unwrap();
        assert_eq!(second.status, WriteStatus::Updated);
        assert_eq!(second.envelope.content, PromptContent::from("two"));

        let envelope = store.read(&prompt, None).unwrap().unwrap();
        assert_eq!(envelope.content, PromptContent::from("two"));
    }

    #[test]
    fn test_untagged_write_keeps_no_history() {
        let (_temp, store) = create_test_store();
        let prompt = id("plain");

        store.write(&prompt, PromptInput::new("old", Meta::new())).unwrap();
        store.write(&prompt, PromptInput::new("new", Meta::new())).unwrap();

        assert_eq!(file_names(&store), vec!["plain.json".to_owned()]);
        assert!(store.versions(&prompt).unwrap().is_empty());
    }

    #[test]
    fn test_version_isolation() {
        let (_temp, store) = create_test_store();
        let prompt = id("ns/name");

        store
            .write(&prompt, PromptInput::new("c1", meta(json!({ "version": "1.0.0" }))))
            .unwrap();
        store
            .write(&prompt, PromptInput::new("c2", meta(json!({ "version": "2.0.0" }))))
            .unwrap();

        let v1 = store.read(&prompt, Some("1.0.0")).unwrap().unwrap();
        assert_eq!(v1.content, PromptContent::from("c1"));
        assert_eq!(v1.version(), Some("1.0.0"));

        let latest = store.read(&prompt, None).unwrap().unwrap();
        assert_eq!(latest.content, PromptContent::from("c2"));

        assert_eq!(
            store.versions(&prompt).unwrap(),
            vec!["1.0.0".to_owned(), "2.0.0".to_owned()]
        );
    }

    #[test]
    fn test_snapshot_is_byte_identical_to_current() {
        let (_temp, store) = create_test_store();
        let prompt = id("x");

        store
            .write(&prompt, PromptInput::new("body", meta(json!({ "version": "3.1.4" }))))
            .unwrap();

        let current = fs::read(store.root().join("x.json")).unwrap();
        let snapshot = fs::read(store.root().join("x@3.1.4.json")).unwrap();
        assert_eq!(current, snapshot);
    }

    #[test]
    fn test_rewriting_a_version_overwrites_its_snapshot() {
        let (_temp, store) = create_test_store();
        let prompt = id("x");
        let tagged = || meta(json!({ "version": "1.0.0" }));

        store.write(&prompt, PromptInput::new("first", tagged())).unwrap();
        store.write(&prompt, PromptInput::new("second", tagged())).unwrap();

        let snapshot = store.read(&prompt, Some("1.0.0")).unwrap().unwrap();
        assert_eq!(snapshot.content, PromptContent::from("second"));
        assert_eq!(store.versions(&prompt).unwrap(), vec!["1.0.0".to_owned()]);
    }

    #[test]
    fn test_non_string_version_creates_no_snapshot() {
        let (_temp, store) = create_test_store();
        let prompt = id("x");

        store
            .write(&prompt, PromptInput::new("body", meta(json!({ "version": 2 }))))
            .unwrap();

        assert_eq!(file_names(&store), vec!["x.json".to_owned()]);
    }

    #[test]
    fn test_delete_signals() {
        let (_temp, store) = create_test_store();
        let prompt = id("gone/soon");

        assert!(!store.delete(&prompt).unwrap());

        store.write(&prompt, PromptInput::new("x", Meta::new())).unwrap();
        assert!(store.delete(&prompt).unwrap());
        assert!(!store.delete(&prompt).unwrap());
        assert_eq!(store.read(&prompt, None).unwrap(), None);
    }

    #[test]
    fn test_delete_cascades_to_snapshots_only_of_that_identifier() {
        let (_temp, store) = create_test_store();
        let prompt = id("a/b");
        let child = id("a/b/c");
        let sibling = id("a/bc");

        for (target, version) in [
            (&prompt, "1.0.0"),
            (&prompt, "2.0.0"),
            (&child, "1.0.0"),
            (&sibling, "1.0.0"),
        ] {
            store
                .write(target, PromptInput::new("x", meta(json!({ "version": version }))))
                .unwrap();
        }

        assert!(store.delete(&prompt).unwrap());

        assert_eq!(store.read(&prompt, Some("1.0.0")).unwrap(), None);
        assert_eq!(store.read(&prompt, Some("2.0.0")).unwrap(), None);
        assert!(store.read(&child, Some("1.0.0")).unwrap().is_some());
        assert!(store.read(&sibling, Some("1.0.0")).unwrap().is_some());
        assert!(store.exists(&child).unwrap());
        assert!(store.exists(&sibling).unwrap());
    }

    #[test]
    fn test_delete_without_current_leaves_orphan_snapshots() {
        let (_temp, store) = create_test_store();
        let prompt = id("orphan");

        store
            .write(&prompt, PromptInput::new("x", meta(json!({ "version": "1.0.0" }))))
            .unwrap();
        fs::remove_file(store.root().join("orphan.json")).unwrap();

        assert!(!store.delete(&prompt).unwrap());
        assert!(store.read(&prompt, Some("1.0.0")).unwrap().is_some());
    }

    #[test]
    fn test_corrupt_object_is_an_error_not_absence() {
        let (_temp, store) = create_test_store();
        fs::write(store.root().join("broken.json"), b"{ not json").unwrap();

        let result = store.read(&id("broken"), None);
        assert!(matches!(result, Err(StoreError::CorruptObject { .. })));
        // Existence does not parse the object.
        assert!(store.exists(&id("broken")).unwrap());
    }

    #[test]
    fn test_read_forces_canonical_identifier() {
        let (_temp, store) = create_test_store();
        fs::write(
            store.root().join("real.json"),
            serde_json::to_vec(&json!({ "id": "other", "content": "x", "meta": {} })).unwrap(),
        )
        .unwrap();

        let envelope = store.read(&id("real"), None).unwrap().unwrap();
        assert_eq!(envelope.id.as_str(), "real");
    }

    #[test]
    fn test_hostile_version_stays_inside_root() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("store");
        fs::create_dir_all(&root).unwrap();
        let store = PromptStore::new(&root).unwrap();

        let prompt = id("x");
        store
            .write(
                &prompt,
                PromptInput::new("x", meta(json!({ "version": "../../escaped" }))),
            )
            .unwrap();

        assert!(!temp.path().join("escaped.json").exists());
        let names = file_names(&store);
        assert_eq!(names.len(), 2);
        assert!(names.iter().all(|n| n.starts_with("x")));
    }

    #[test]
    fn test_no_staging_files_left_behind() {
        let (_temp, store) = create_test_store();
        let prompt = id("clean");

        for i in 0..5 {
            store
                .write(
                    &prompt,
                    PromptInput::new(
                        format!("v{i}"),
                        meta(json!({ "version": format!("1.0.{i}") })),
                    ),
                )
                .unwrap();
        }

        assert!(file_names(&store).iter().all(|n| !n.starts_with('.')));
    }

    #[test]
    fn test_staged_object_dropped_without_commit_is_removed() {
        let (_temp, store) = create_test_store();
        let target = store.root().join("t.json");

        let staged = store.stage(&target, b"{}").unwrap();
        let staging = staged.staging.clone();
        assert!(staging.exists());

        drop(staged);
        assert!(!staging.exists());
        assert!(!target.exists());
    }

    #[test]
    fn test_multiple_stores_are_independent() {
        let (_temp1, store1) = create_test_store();
        let (_temp2, store2) = create_test_store();
        let prompt = id("shared/name");

        store1.write(&prompt, PromptInput::new("one", Meta::new())).unwrap();

        assert!(store1.exists(&prompt).unwrap());
        assert!(!store2.exists(&prompt).unwrap());
    }

    #[test]
    fn test_concurrent_writers_to_one_identifier() {
        let temp = TempDir::new().unwrap();
        let store = Arc::new(PromptStore::new(temp.path()).unwrap());
        let prompt = id("busy");

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                let prompt = prompt.clone();
                thread::spawn(move || {
                    store
                        .write(
                            &prompt,
                            PromptInput::new(
                                format!("c{i}"),
                                meta(json!({ "version": "1.0.0" })),
                            ),
                        )
                        .unwrap()
                        .status
                })
            })
            .collect();

        let statuses: Vec<WriteStatus> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(
            statuses.iter().filter(|s| s.is_created()).count(),
            1,
            "exactly one writer creates the prompt"
        );

        // The last writer renamed both objects while holding the lock, so they agree.
        let current = store.read(&prompt, None).unwrap().unwrap();
        let snapshot = store.read(&prompt, Some("1.0.0")).unwrap().unwrap();
        assert_eq!(current, snapshot);
        assert!(file_names(&store).iter().all(|n| !n.starts_with('.')));
    }

    #[test]
    fn test_identifiers_at_the_length_limit_round_trip() {
        let (_temp, store) = create_test_store();

        for raw in ["a".repeat(256), format!("{}aa", "a/".repeat(127))] {
            let prompt = id(&raw);

            let stored = store
                .write(&prompt, PromptInput::new("plain", Meta::new()))
                .unwrap();
            assert_eq!(stored.status, WriteStatus::Created);
            store
                .write(&prompt, PromptInput::new("tagged", meta(json!({ "version": "1.0.0" }))))
                .unwrap();

            let current = store.read(&prompt, None).unwrap().unwrap();
            assert_eq!(current.id, prompt);
            assert_eq!(current.content, PromptContent::from("tagged"));
            let snapshot = store.read(&prompt, Some("1.0.0")).unwrap().unwrap();
            assert_eq!(snapshot, current);
            assert_eq!(store.versions(&prompt).unwrap(), vec!["1.0.0".to_owned()]);

            assert!(store.delete(&prompt).unwrap());
            assert!(!store.exists(&prompt).unwrap());
            assert_eq!(store.read(&prompt, Some("1.0.0")).unwrap(), None);
        }

        assert!(file_names(&store).is_empty());
    }

    #[test]
    fn test_long_version_is_stored_and_deleted() {
        let (_temp, store) = create_test_store();
        let prompt = id("x");
        let version = format!("1.0.0-{}", "a".repeat(300));

        store
            .write(&prompt, PromptInput::new("body", meta(json!({ "version": version }))))
            .unwrap();
        assert!(store.read(&prompt, Some(&version)).unwrap().is_some());

        assert!(store.delete(&prompt).unwrap());
        assert!(file_names(&store).is_empty());
    }

    #[test]
    fn test_empty_version_snapshot_is_deleted_with_its_prompt() {
        let (_temp, store) = create_test_store();
        let prompt = id("x");

        store
            .write(&prompt, PromptInput::new("secret", meta(json!({ "version": "" }))))
            .unwrap();
        assert_eq!(file_names(&store), vec!["x.json".to_owned(), "x@.json".to_owned()]);
        assert_eq!(store.versions(&prompt).unwrap(), vec![String::new()]);

        assert!(store.delete(&prompt).unwrap());
        assert_eq!(store.read(&prompt, Some("")).unwrap(), None);
        assert!(file_names(&store).is_empty());
    }

    #[test]
    fn test_versions_differing_only_in_separators_do_not_collide() {
        let (_temp, store) = create_test_store();
        let prompt = id("x");

        for version in ["a/b", "a//b", "a%2Fb"] {
            store
                .write(&prompt, PromptInput::new(version, meta(json!({ "version": version }))))
                .unwrap();
        }

        for version in ["a/b", "a//b", "a%2Fb"] {
            let snapshot = store.read(&prompt, Some(version)).unwrap().unwrap();
            assert_eq!(snapshot.content, PromptContent::from(version));
        }
        assert_eq!(store.versions(&prompt).unwrap().len(), 3);
    }

    #[test]
    fn test_new_rejects_missing_root() {
        let temp = TempDir::new().unwrap();
        let result = PromptStore::new(&temp.path().join("missing"));
        assert!(matches!(result, Err(StoreError::InvalidRootDirectory(_))));
    }
}
