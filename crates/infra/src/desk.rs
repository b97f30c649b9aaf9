//! The issuing desk: registry + record store bound to a repository.
//!
//! Loads everything once when opened and writes through after every
//! successful mutation. A mutation is applied to a copy first and only becomes
//! visible once the repository accepted it, so memory and storage never
//! disagree after a failed save.

use idcard_core::{CardError, DomainCode, EmployeeId, EmployeeType};
use idcard_directory::{
    DeleteOutcome, DomainRegistry, EmployeeRecord, IdentityPolicy, RecordFields, RecordStore,
};

use crate::error::{DeskError, DeskResult};
use crate::repository::{CardRepository, DomainAdditions};

#[derive(Debug)]
pub struct IdCardDesk<R: CardRepository> {
    repository: R,
    registry: DomainRegistry,
    additions: DomainAdditions,
    store: RecordStore,
}

impl<R: CardRepository> IdCardDesk<R> {
    /// Seed the registry with the defaults, re-apply persisted domain additions
    /// and load the record collection.
    ///
    /// A persisted addition that no longer validates (e.g. it clashes with a
    /// newer default) fails the open with that registry error.
    pub fn open(repository: R, policy: IdentityPolicy) -> DeskResult<Self> {
        let mut registry = DomainRegistry::seeded()?;
        let additions = repository.load_domains()?;
        for (name, code) in &additions {
            registry.add_domain(name, *code).map_err(|err| {
                tracing::error!(domain = %name, code, error = %err, "stored domain is invalid");
                err
            })?;
        }

        let records = repository.load_records()?;
        tracing::debug!(
            records = records.len(),
            domains = registry.len(),
            ?policy,
            "desk opened"
        );

        Ok(Self {
            repository,
            registry,
            additions,
            store: RecordStore::from_records(records, policy),
        })
    }

    pub fn registry(&self) -> &DomainRegistry {
        &self.registry
    }

    pub fn records(&self) -> &[EmployeeRecord] {
        self.store.records()
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn get(&self, id: &EmployeeId) -> Option<&EmployeeRecord> {
        self.store.get(id)
    }

    pub fn search(&self, query: &str) -> Vec<&EmployeeRecord> {
        self.store.search(query)
    }

    /// Live id preview for a form that is still being filled in.
    pub fn preview(
        &self,
        employee_type: EmployeeType,
        raw_year: &str,
        domain_name: &str,
    ) -> Option<EmployeeId> {
        idcard_directory::preview(employee_type, raw_year, domain_name, &self.registry)
    }

    /// Register a domain typed in by the operator and persist it.
    pub fn add_domain(&mut self, name: &str, raw_code: &str) -> DeskResult<DomainCode> {
        let mut registry = self.registry.clone();
        let code = registry
            .add_domain_raw(name, raw_code)
            .inspect_err(|err| tracing::warn!(domain = name, error = %err, "domain rejected"))?;

        let mut additions = self.additions.clone();
        additions.insert(name.trim().to_string(), i64::from(code.get()));
        self.repository.save_domains(&additions)?;

        self.registry = registry;
        self.additions = additions;
        tracing::info!(domain = name.trim(), %code, "domain added");
        Ok(code)
    }

    pub fn create(&mut self, fields: RecordFields) -> DeskResult<EmployeeRecord> {
        let mut store = self.store.clone();
        let created = store
            .create(fields, &self.registry)
            .map(EmployeeRecord::clone)
            .inspect_err(|err| tracing::warn!(error = %err, "create rejected"))?;

        self.commit(store)?;
        tracing::info!(employee_id = %created.employee_id(), "card created");
        Ok(created)
    }

    pub fn edit(&mut self, target: &EmployeeId, fields: RecordFields) -> DeskResult<EmployeeRecord> {
        let mut store = self.store.clone();
        let edited = store
            .edit(target, fields, &self.registry)
            .map(EmployeeRecord::clone)
            .inspect_err(|err| tracing::warn!(%target, error = %err, "edit rejected"))?;

        self.commit(store)?;
        tracing::info!(%target, employee_id = %edited.employee_id(), "card edited");
        Ok(edited)
    }

    /// Delete every record carrying `target`. Deleting an unknown id is a
    /// reported no-op and does not touch storage.
    pub fn delete(&mut self, target: &EmployeeId) -> DeskResult<DeleteOutcome> {
        let mut store = self.store.clone();
        let outcome = store.delete(target);
        match outcome {
            DeleteOutcome::Removed { count } => {
                self.commit(store)?;
                tracing::info!(%target, count, "card deleted");
            }
            DeleteOutcome::NotFound => {
                tracing::debug!(%target, "nothing to delete");
            }
        }
        Ok(outcome)
    }

    /// Edit fields of an existing card, starting from its current values.
    pub fn edit_with<F>(&mut self, target: &EmployeeId, change: F) -> DeskResult<EmployeeRecord>
    where
        F: FnOnce(&mut RecordFields),
    {
        let current = self.store.get(target).ok_or(CardError::NotFound)?;
        let mut fields = RecordFields::from_record(current);
        change(&mut fields);
        self.edit(target, fields)
    }

    fn commit(&mut self, store: RecordStore) -> Result<(), DeskError> {
        self.repository.save_records(store.records())?;
        self.store = store;
        Ok(())
    }
}
