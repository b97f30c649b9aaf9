//! Durable storage for issued cards and operator-added domains.

mod json_file;
mod memory;

use std::sync::Arc;

use indexmap::IndexMap;

use idcard_directory::EmployeeRecord;

use crate::error::PersistenceError;

pub use json_file::JsonFileRepository;
pub use memory::InMemoryCardRepository;

/// Storage key of the record collection.
pub const RECORDS_KEY: &str = "ids";

/// Storage key of the operator-added domains.
pub const DOMAINS_KEY: &str = "domains";

/// Operator-added domains as stored: name → raw code, in insertion order.
///
/// Codes stay raw so that a bad entry is re-validated (and reported) by the
/// registry on load.
pub type DomainAdditions = IndexMap<String, i64>;

/// Persistence collaborator: load at start, save after every mutation.
pub trait CardRepository: Send + Sync {
    /// The full record collection, most recent first. Missing storage is empty.
    fn load_records(&self) -> Result<Vec<EmployeeRecord>, PersistenceError>;

    /// Replace the stored collection.
    fn save_records(&self, records: &[EmployeeRecord]) -> Result<(), PersistenceError>;

    fn load_domains(&self) -> Result<DomainAdditions, PersistenceError>;

    fn save_domains(&self, domains: &DomainAdditions) -> Result<(), PersistenceError>;
}

impl<S> CardRepository for Arc<S>
where
    S: CardRepository + ?Sized,
{
    fn load_records(&self) -> Result<Vec<EmployeeRecord>, PersistenceError> {
        (**self).load_records()
    }

    fn save_records(&self, records: &[EmployeeRecord]) -> Result<(), PersistenceError> {
        (**self).save_records(records)
    }

    fn load_domains(&self) -> Result<DomainAdditions, PersistenceError> {
        (**self).load_domains()
    }

    fn save_domains(&self, domains: &DomainAdditions) -> Result<(), PersistenceError> {
        (**self).save_domains(domains)
    }
}
