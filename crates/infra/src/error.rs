use std::path::PathBuf;

use thiserror::Error;

use idcard_core::CardError;

/// Storage failure of the persistence collaborator.
///
/// A store that simply does not exist yet is not an error; it loads as empty.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("storage unavailable at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("corrupt data under key {key:?}: {reason}")]
    Corrupt { key: String, reason: String },

    #[error("failed to encode {key:?}: {reason}")]
    Encode { key: String, reason: String },

    #[error("storage lock poisoned")]
    Poisoned,
}

impl PersistenceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn corrupt(key: &str, reason: impl ToString) -> Self {
        Self::Corrupt {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn encode(key: &str, reason: impl ToString) -> Self {
        Self::Encode {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Error of a desk operation: either a rejected mutation or a storage failure.
#[derive(Debug, Error)]
pub enum DeskError {
    #[error(transparent)]
    Card(#[from] CardError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

pub type DeskResult<T> = Result<T, DeskError>;

impl DeskError {
    /// The domain error, if this was a rejected mutation.
    pub fn as_card(&self) -> Option<&CardError> {
        match self {
            DeskError::Card(err) => Some(err),
            DeskError::Persistence(_) => None,
        }
    }
}
