//! engine::edit
//!
//! The write path: adding and removing user aliases.
//!
//! # Architecture
//!
//! Every edit runs the same critical section under the exclusive store
//! lock:
//!
//! 1. Load and validate the current store
//! 2. Apply the mutation to the raw table
//! 3. Re-validate the result
//! 4. Persist the whole table
//!
//! Inputs are validated before the lock is taken, so a bad argument never
//! touches the file. The lock guard is dropped on every exit path.

use std::path::Path;

use tracing::debug;

use super::errors::AliasError;
use crate::core::lock::{AliasLock, LockMode};
use crate::core::naming::{parse_alias_value, validate_short_name};
use crate::core::paths::AliasPaths;
use crate::core::store::{AliasStore, RawStore};

/// Performs locked read-modify-write cycles on the user alias store.
#[derive(Debug, Clone)]
pub struct StoreEditor {
    paths: AliasPaths,
}

impl StoreEditor {
    pub fn new(paths: AliasPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &AliasPaths {
        &self.paths
    }

    /// Add `name -> value`, replacing any existing entry for `name`.
    ///
    /// The value is stored as given; it is normalized when read back.
    pub fn set_alias(&self, name: &str, value: &str) -> Result<(), AliasError> {
        let short_name = validate_short_name(name)?;
        let normalized = parse_alias_value(value)?;
        debug!(name = %short_name, value = %normalized, "setting user alias");

        self.edit(|raw, _| {
            raw.aliases
                .insert(short_name.to_string(), value.to_string());
            Ok(())
        })
    }

    /// Remove the entry for `name`.
    ///
    /// # Errors
    ///
    /// Returns [`AliasError::NotFound`] if the user store has no entry for
    /// `name`. The alias may still be defined in a registries.conf file,
    /// which this editor does not touch.
    pub fn remove_alias(&self, name: &str) -> Result<(), AliasError> {
        let short_name = validate_short_name(name)?;
        debug!(name = %short_name, "removing user alias");

        self.edit(|raw, conf_path| match raw.aliases.remove(short_name.as_str()) {
            Some(_) => Ok(()),
            None => Err(AliasError::NotFound {
                name: short_name.to_string(),
                path: conf_path.to_path_buf(),
            }),
        })
    }

    /// Run `mutate` against the raw table inside the exclusive lock.
    fn edit<F>(&self, mutate: F) -> Result<(), AliasError>
    where
        F: FnOnce(&mut RawStore, &Path) -> Result<(), AliasError>,
    {
        self.paths.ensure_parent_dir()?;
        let _lock = AliasLock::acquire(&self.paths.lock_path(), LockMode::Exclusive)?;

        let conf_path = self.paths.conf_path();
        let mut raw = AliasStore::load(conf_path)?.into_raw();
        mutate(&mut raw, conf_path)?;

        let updated = AliasStore::from_raw(conf_path.to_path_buf(), raw)?;
        updated.persist()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::errors::ErrorKind;
    use std::fs;
    use tempfile::TempDir;

    fn editor(temp: &TempDir) -> StoreEditor {
        StoreEditor::new(AliasPaths::new(
            temp.path().join("containers").join("short-name-aliases.conf"),
        ))
    }

    fn load(editor: &StoreEditor) -> AliasStore {
        AliasStore::load(editor.paths().conf_path()).expect("load")
    }

    #[test]
    fn set_creates_store_lazily() {
        let temp = TempDir::new().expect("create temp dir");
        let editor = editor(&temp);
        assert!(!editor.paths().conf_path().exists());

        editor.set_alias("c", "reg.io/c").expect("set");

        assert!(editor.paths().conf_path().exists());
        let store = load(&editor);
        assert_eq!(store.raw().aliases["c"], "reg.io/c");
    }

    #[test]
    fn set_overwrites_existing_entry() {
        let temp = TempDir::new().expect("create temp dir");
        let editor = editor(&temp);

        editor.set_alias("c", "reg.io/c").expect("first");
        editor.set_alias("c", "other.io/c").expect("second");

        assert_eq!(load(&editor).raw().aliases["c"], "other.io/c");
    }

    #[test]
    fn set_keeps_other_entries() {
        let temp = TempDir::new().expect("create temp dir");
        let editor = editor(&temp);

        editor.set_alias("a", "reg.io/a").expect("a");
        editor.set_alias("b", "reg.io/b").expect("b");

        assert_eq!(load(&editor).raw().aliases.len(), 2);
    }

    #[test]
    fn remove_deletes_entry() {
        let temp = TempDir::new().expect("create temp dir");
        let editor = editor(&temp);

        editor.set_alias("c", "reg.io/c").expect("set");
        editor.remove_alias("c").expect("remove");

        assert!(load(&editor).get("c").is_none());
    }

    #[test]
    fn remove_missing_is_not_found() {
        let temp = TempDir::new().expect("create temp dir");
        let editor = editor(&temp);

        let err = editor.remove_alias("c").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn remove_deletes_tombstones() {
        let temp = TempDir::new().expect("create temp dir");
        let editor = editor(&temp);
        editor.paths().ensure_parent_dir().expect("mkdir");
        fs::write(editor.paths().conf_path(), "[aliases]\nc = \"\"\n").expect("write");

        editor.remove_alias("c").expect("remove");
        assert!(load(&editor).raw().aliases.is_empty());
    }

    #[test]
    fn invalid_inputs_leave_file_untouched() {
        let temp = TempDir::new().expect("create temp dir");
        let editor = editor(&temp);

        let err = editor.set_alias("quay.io/c", "reg.io/c").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CallerInput);

        let err = editor.set_alias("c", "c:latest").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CallerInput);

        assert!(!editor.paths().conf_path().exists());
    }

    #[test]
    fn corrupt_store_blocks_edits() {
        let temp = TempDir::new().expect("create temp dir");
        let editor = editor(&temp);
        editor.paths().ensure_parent_dir().expect("mkdir");
        let corrupt = "[aliases]\nbad = \"bad\"\n";
        fs::write(editor.paths().conf_path(), corrupt).expect("write");

        let err = editor.set_alias("c", "reg.io/c").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigCorruption);

        let contents = fs::read_to_string(editor.paths().conf_path()).expect("read");
        assert_eq!(contents, corrupt);
    }

    #[test]
    fn lock_is_released_after_failure() {
        let temp = TempDir::new().expect("create temp dir");
        let editor = editor(&temp);

        assert!(editor.remove_alias("missing").is_err());

        let lock = AliasLock::try_acquire(&editor.paths().lock_path(), LockMode::Exclusive)
            .expect("try");
        assert!(lock.is_some());
    }
}
