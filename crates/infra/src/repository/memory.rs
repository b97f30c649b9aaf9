use std::sync::RwLock;

use idcard_directory::EmployeeRecord;

use super::{CardRepository, DomainAdditions};
use crate::error::PersistenceError;

/// In-memory repository for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryCardRepository {
    records: RwLock<Vec<EmployeeRecord>>,
    domains: RwLock<DomainAdditions>,
}

impl InMemoryCardRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CardRepository for InMemoryCardRepository {
    fn load_records(&self) -> Result<Vec<EmployeeRecord>, PersistenceError> {
        let records = self.records.read().map_err(|_| PersistenceError::Poisoned)?;
        Ok(records.clone())
    }

    fn save_records(&self, records: &[EmployeeRecord]) -> Result<(), PersistenceError> {
        let mut stored = self.records.write().map_err(|_| PersistenceError::Poisoned)?;
        *stored = records.to_vec();
        Ok(())
    }

    fn load_domains(&self) -> Result<DomainAdditions, PersistenceError> {
        let domains = self.domains.read().map_err(|_| PersistenceError::Poisoned)?;
        Ok(domains.clone())
    }

    fn save_domains(&self, domains: &DomainAdditions) -> Result<(), PersistenceError> {
        let mut stored = self.domains.write().map_err(|_| PersistenceError::Poisoned)?;
        *stored = domains.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty_and_keeps_what_was_saved() {
        let repo = InMemoryCardRepository::new();
        assert!(repo.load_records().unwrap().is_empty());
        assert!(repo.load_domains().unwrap().is_empty());

        let mut domains = DomainAdditions::new();
        domains.insert("Legal".to_string(), 40);
        repo.save_domains(&domains).unwrap();
        assert_eq!(repo.load_domains().unwrap(), domains);
    }
}
