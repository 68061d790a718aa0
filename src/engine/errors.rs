//! engine::errors
//!
//! Error type for alias operations.
//!
//! # Taxonomy
//!
//! Every [`AliasError`] falls into one [`ErrorKind`]:
//!
//! - `CallerInput` - malformed short name or alias value; fix the input
//! - `ConfigCorruption` - a config file is undecodable or holds malformed
//!   entries; every bad entry is listed
//! - `NotFound` - removal of a name the user store does not hold
//! - `Io` - filesystem, path or locking failure
//!
//! Nothing is retried automatically. Every operation can be safely
//! re-invoked.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::lock::LockError;
use crate::core::naming::NameError;
use crate::core::paths::PathError;
use crate::core::store::StoreError;
use crate::system::SystemConfigError;

/// Coarse classification of an [`AliasError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    CallerInput,
    ConfigCorruption,
    NotFound,
    Io,
}

/// Errors from resolving or editing aliases.
#[derive(Debug, Error)]
pub enum AliasError {
    #[error(transparent)]
    InvalidName(#[from] NameError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    System(#[from] SystemConfigError),

    #[error(
        "short-name alias {name:?} not found in '{}': please check registries.conf files",
        path.display()
    )]
    NotFound { name: String, path: PathBuf },

    #[error(transparent)]
    Lock(#[from] LockError),

    #[error(transparent)]
    Path(#[from] PathError),
}

impl AliasError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AliasError::InvalidName(_) => ErrorKind::CallerInput,
            AliasError::Store(e) if e.is_corruption() => ErrorKind::ConfigCorruption,
            AliasError::System(e) if e.is_corruption() => ErrorKind::ConfigCorruption,
            AliasError::NotFound { .. } => ErrorKind::NotFound,
            AliasError::Store(_)
            | AliasError::System(_)
            | AliasError::Lock(_)
            | AliasError::Path(_) => ErrorKind::Io,
        }
    }
}
