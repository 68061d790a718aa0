//! core::lock
//!
//! Reader/writer lock for the user alias store.
//!
//! # Architecture
//!
//! The store is guarded by an advisory OS lock on a sibling file
//! (`<store>.lock`). Resolutions take the lock in shared mode so they can
//! run in parallel; edits take it in exclusive mode so load, mutate and
//! persist form a single critical section.
//!
//! Each acquisition opens its own file handle, so the lock also serializes
//! threads of the same process, not only separate processes.
//!
//! # Invariants
//!
//! - A shared lock excludes exclusive holders and vice versa
//! - Lock is automatically released on drop (RAII pattern)
//! - [`AliasLock::acquire`] blocks without a deadline
//!
//! # Example
//!
//! ```no_run
//! use shortname_aliases::core::lock::{AliasLock, LockMode};
//! use std::path::Path;
//!
//! let lock = AliasLock::acquire(Path::new("/tmp/aliases.conf.lock"), LockMode::Shared)?;
//! assert!(lock.is_held());
//! // Lock released when `lock` goes out of scope
//! # Ok::<(), shortname_aliases::core::lock::LockError>(())
//! ```

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use thiserror::Error;
use tracing::debug;

/// Errors from locking operations.
#[derive(Debug, Error)]
pub enum LockError {
    /// Failed to create or open the lock file.
    #[error("failed to create lock: {0}")]
    CreateFailed(String),

    /// Failed to acquire the OS lock.
    #[error("failed to acquire lock: {0}")]
    AcquireFailed(String),

    /// Failed to release the lock.
    #[error("failed to release lock: {0}")]
    ReleaseFailed(String),
}

/// Lock mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockMode {
    /// Reader lock, compatible with other shared holders.
    Shared,
    /// Writer lock, compatible with nobody.
    Exclusive,
}

/// A held lock on the alias store.
///
/// The lock is automatically released when this guard is dropped.
#[derive(Debug)]
pub struct AliasLock {
    /// Path to the lock file.
    path: PathBuf,
    mode: LockMode,
    /// The open file handle with the lock held.
    /// When this is Some, we hold the lock.
    file: Option<File>,
}

impl AliasLock {
    /// Acquire the lock, blocking until it is available.
    ///
    /// The lock file is created if missing; its directory must exist.
    ///
    /// # Errors
    ///
    /// - [`LockError::CreateFailed`] if the lock file cannot be opened
    /// - [`LockError::AcquireFailed`] if the OS lock cannot be acquired
    pub fn acquire(path: &Path, mode: LockMode) -> Result<Self, LockError> {
        let file = open_lock_file(path)?;

        let locked = match mode {
            LockMode::Shared => FileExt::lock_shared(&file),
            LockMode::Exclusive => FileExt::lock_exclusive(&file),
        };
        locked.map_err(|e| LockError::AcquireFailed(format!("{}: {}", path.display(), e)))?;

        debug!(path = %path.display(), ?mode, "acquired alias store lock");
        Ok(Self {
            path: path.to_path_buf(),
            mode,
            file: Some(file),
        })
    }

    /// Try to acquire the lock without blocking.
    ///
    /// Returns `Ok(None)` if a conflicting holder exists.
    pub fn try_acquire(path: &Path, mode: LockMode) -> Result<Option<Self>, LockError> {
        let file = open_lock_file(path)?;

        let locked = match mode {
            LockMode::Shared => FileExt::try_lock_shared(&file),
            LockMode::Exclusive => FileExt::try_lock_exclusive(&file),
        };
        match locked {
            Ok(()) => Ok(Some(Self {
                path: path.to_path_buf(),
                mode,
                file: Some(file),
            })),
            Err(e) if e.kind() == fs2::lock_contended_error().kind() => Ok(None),
            Err(e) => Err(LockError::AcquireFailed(format!(
                "{}: {}",
                path.display(),
                e
            ))),
        }
    }

    /// Check if the lock is currently held.
    pub fn is_held(&self) -> bool {
        self.file.is_some()
    }

    /// Get the path to the lock file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn mode(&self) -> LockMode {
        self.mode
    }

    /// Release the lock explicitly.
    ///
    /// Calling this more than once is a no-op.
    pub fn release(&mut self) -> Result<(), LockError> {
        if let Some(file) = self.file.take() {
            FileExt::unlock(&file).map_err(|e| LockError::ReleaseFailed(e.to_string()))?;
            debug!(path = %self.path.display(), "released alias store lock");
        }
        Ok(())
    }
}

impl Drop for AliasLock {
    fn drop(&mut self) {
        // Best-effort release on drop
        if let Some(file) = self.file.take() {
            let _ = FileExt::unlock(&file);
        }
    }
}

fn open_lock_file(path: &Path) -> Result<File, LockError> {
    OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)
        .map_err(|e| LockError::CreateFailed(format!("cannot open {}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn lock_path(temp: &TempDir) -> PathBuf {
        temp.path().join("aliases.conf.lock")
    }

    #[test]
    fn acquire_creates_lock_file() {
        let temp = TempDir::new().expect("create temp dir");
        let path = lock_path(&temp);

        let lock = AliasLock::acquire(&path, LockMode::Exclusive).expect("acquire");
        assert!(lock.is_held());
        assert!(path.exists());
        assert_eq!(lock.path(), path);
        assert_eq!(lock.mode(), LockMode::Exclusive);
    }

    #[test]
    fn shared_locks_coexist() {
        let temp = TempDir::new().expect("create temp dir");
        let path = lock_path(&temp);

        let _first = AliasLock::acquire(&path, LockMode::Shared).expect("first");
        let second = AliasLock::try_acquire(&path, LockMode::Shared).expect("try");
        assert!(second.is_some());
    }

    #[test]
    fn shared_lock_blocks_writer() {
        let temp = TempDir::new().expect("create temp dir");
        let path = lock_path(&temp);

        let _reader = AliasLock::acquire(&path, LockMode::Shared).expect("reader");
        let writer = AliasLock::try_acquire(&path, LockMode::Exclusive).expect("try");
        assert!(writer.is_none());
    }

    #[test]
    fn exclusive_lock_blocks_reader() {
        let temp = TempDir::new().expect("create temp dir");
        let path = lock_path(&temp);

        let _writer = AliasLock::acquire(&path, LockMode::Exclusive).expect("writer");
        let reader = AliasLock::try_acquire(&path, LockMode::Shared).expect("try");
        assert!(reader.is_none());
    }

    #[test]
    fn lock_released_on_drop() {
        let temp = TempDir::new().expect("create temp dir");
        let path = lock_path(&temp);

        {
            let lock = AliasLock::acquire(&path, LockMode::Exclusive).expect("first");
            assert!(lock.is_held());
        }

        let again = AliasLock::try_acquire(&path, LockMode::Exclusive).expect("try");
        assert!(again.is_some());
    }

    #[test]
    fn multiple_release_calls_are_safe() {
        let temp = TempDir::new().expect("create temp dir");
        let path = lock_path(&temp);

        let mut lock = AliasLock::acquire(&path, LockMode::Exclusive).expect("acquire");
        lock.release().expect("first release");
        lock.release().expect("second release should be ok");
        assert!(!lock.is_held());

        let again = AliasLock::try_acquire(&path, LockMode::Exclusive).expect("try");
        assert!(again.is_some());
    }

    #[test]
    fn missing_directory_is_a_create_error() {
        let temp = TempDir::new().expect("create temp dir");
        let path = temp.path().join("missing").join("aliases.conf.lock");

        let result = AliasLock::acquire(&path, LockMode::Shared);
        assert!(matches!(result, Err(LockError::CreateFailed(_))));
    }

    #[test]
    fn error_display_formatting() {
        assert!(LockError::CreateFailed("x".into()).to_string().contains("create"));
        assert!(LockError::AcquireFailed("x".into()).to_string().contains("acquire"));
        assert!(LockError::ReleaseFailed("x".into()).to_string().contains("release"));
    }
}
