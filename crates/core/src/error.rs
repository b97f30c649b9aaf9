//! Card error model.

use thiserror::Error;

use crate::id::{DomainCode, EmployeeId};

/// Result type used across the card domain.
pub type CardResult<T> = Result<T, CardError>;

/// Domain-level error for registry and record operations.
///
/// Every variant is recoverable: the operation that produced it left all state
/// untouched. Storage failures are not represented here; they belong to the
/// persistence layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CardError {
    /// A required field was missing or malformed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A domain name was empty or whitespace-only.
    #[error("enter a domain name")]
    InvalidName,

    /// A domain code was not a positive integer.
    #[error("enter a valid numeric ID: {0}")]
    InvalidCode(String),

    /// The domain name is already registered.
    #[error("domain already exists: {0}")]
    DuplicateName(String),

    /// The domain code is already assigned to another name.
    #[error("ID {code} already exists (assigned to {existing})")]
    DuplicateCode { code: DomainCode, existing: String },

    /// The referenced domain is not in the registry.
    #[error("unknown domain: {0}")]
    UnknownDomain(String),

    /// Another record already carries this derived employee id.
    #[error("another record already has the generated ID {0}")]
    DuplicateIdentity(EmployeeId),

    /// The requested entry does not exist.
    #[error("not found")]
    NotFound,
}

impl CardError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_code(msg: impl Into<String>) -> Self {
        Self::InvalidCode(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    /// Whether this is an input-validation failure.
    ///
    /// An unknown domain counts: it is rejected before any identity check runs.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::UnknownDomain(_))
    }
}
