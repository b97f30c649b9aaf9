use idcard_core::{CardError, CardResult, EmployeeId, Entity};

use crate::record::{EmployeeRecord, RecordFields};
use crate::registry::DomainRegistry;

/// How `create` treats a derived id that is already taken.
///
/// `edit` always rejects a collision with a different record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdentityPolicy {
    /// Accept the duplicate; both records carry the same id.
    #[default]
    Lenient,
    /// Reject the duplicate with `DuplicateIdentity`.
    Strict,
}

/// Result of a delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// `count` records carried the id and were removed.
    Removed { count: usize },
    /// No record carried the id; the collection is unchanged.
    NotFound,
}

impl DeleteOutcome {
    pub fn removed(self) -> bool {
        matches!(self, DeleteOutcome::Removed { .. })
    }
}

/// Ordered collection of issued cards, most recent first.
///
/// The store owns its records exclusively and only reads the registry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordStore {
    records: Vec<EmployeeRecord>,
    policy: IdentityPolicy,
}

impl RecordStore {
    pub fn new(policy: IdentityPolicy) -> Self {
        Self {
            records: Vec::new(),
            policy,
        }
    }

    /// Wrap a previously persisted collection, keeping its order.
    pub fn from_records(records: Vec<EmployeeRecord>, policy: IdentityPolicy) -> Self {
        Self { records, policy }
    }

    pub fn records(&self) -> &[EmployeeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First (most recent) record carrying `id`.
    pub fn get(&self, id: &EmployeeId) -> Option<&EmployeeRecord> {
        self.records.iter().find(|r| r.is(id))
    }

    /// Issue a new card and insert it at the head of the collection.
    pub fn create(
        &mut self,
        fields: RecordFields,
        registry: &DomainRegistry,
    ) -> CardResult<&EmployeeRecord> {
        let record = fields.into_record(registry)?;

        if self.policy == IdentityPolicy::Strict && self.get(record.id()).is_some() {
            return Err(CardError::DuplicateIdentity(record.id().clone()));
        }

        self.records.insert(0, record);
        Ok(&self.records[0])
    }

    /// Records whose id, name or domain contains `query`, ignoring case.
    ///
    /// A blank query returns every record in store order.
    pub fn search(&self, query: &str) -> Vec<&EmployeeRecord> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.records.iter().collect();
        }
        self.records.iter().filter(|r| r.matches(&needle)).collect()
    }

    /// Replace the fields of the record carrying `target`, recomputing its id.
    ///
    /// The record keeps its position. Fails with `NotFound` for an unknown
    /// target, with a validation error for bad fields, and with
    /// `DuplicateIdentity` when the new id belongs to a different record. On
    /// failure nothing changes.
    pub fn edit(
        &mut self,
        target: &EmployeeId,
        fields: RecordFields,
        registry: &DomainRegistry,
    ) -> CardResult<&EmployeeRecord> {
        let position = self
            .records
            .iter()
            .position(|r| r.is(target))
            .ok_or(CardError::NotFound)?;

        let updated = fields.into_record(registry)?;

        let candidate = updated.id();
        let collides = self
            .records
            .iter()
            .any(|r| !r.is(target) && r.is(candidate));
        if collides {
            return Err(CardError::DuplicateIdentity(candidate.clone()));
        }

        self.records[position] = updated;
        Ok(&self.records[position])
    }

    /// Remove every record carrying `target`.
    pub fn delete(&mut self, target: &EmployeeId) -> DeleteOutcome {
        let before = self.records.len();
        self.records.retain(|r| !r.is(target));
        match before - self.records.len() {
            0 => DeleteOutcome::NotFound,
            count => DeleteOutcome::Removed { count },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use idcard_core::EmployeeType;

    fn fields(name: &str, year: &str, employee_type: EmployeeType, domain: &str) -> RecordFields {
        RecordFields {
            name: name.to_string(),
            year_of_joining: year.to_string(),
            employee_type,
            domain_name: domain.to_string(),
            photo: None,
        }
    }

    fn id(raw: &str) -> EmployeeId {
        EmployeeId::from_raw(raw)
    }

    fn ids(records: &[&EmployeeRecord]) -> Vec<String> {
        records.iter().map(|r| r.employee_id().to_string()).collect()
    }

    fn sales_registry() -> DomainRegistry {
        let mut registry = DomainRegistry::new();
        registry.add_domain("Sales", 3).unwrap();
        registry
    }

    /// Store holding (newest first): Carol (CTO), Bob (Developers), Alice (Sales).
    fn populated() -> (RecordStore, DomainRegistry) {
        let registry = DomainRegistry::seeded().unwrap();
        let mut store = RecordStore::default();
        store
            .create(fields("Alice", "2021", EmployeeType::Permanent, "Sales"), &registry)
            .unwrap();
        store
            .create(fields("Bob", "2024", EmployeeType::Permanent, "Developers"), &registry)
            .unwrap();
        store
            .create(fields("Carol", "2019", EmployeeType::Temporary, "CTO"), &registry)
            .unwrap();
        (store, registry)
    }

    #[test]
    fn create_end_to_end_with_single_domain_registry() {
        let registry = sales_registry();
        let mut store = RecordStore::default();
        let record = store
            .create(fields("Alice", "2021", EmployeeType::Permanent, "Sales"), &registry)
            .unwrap();
        assert_eq!(record.employee_id().as_str(), "EMPP2021301");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn create_inserts_most_recent_first() {
        let (store, _) = populated();
        let all: Vec<&EmployeeRecord> = store.records().iter().collect();
        assert_eq!(
            ids(&all),
            vec!["EMPT20192001", "EMPP2024401", "EMPP2021301"]
        );
    }

    #[test]
    fn create_rejects_invalid_fields_without_mutation() {
        let (mut store, registry) = populated();
        let before = store.clone();

        let err = store
            .create(fields("", "2021", EmployeeType::Permanent, "Sales"), &registry)
            .unwrap_err();
        assert!(err.is_validation());

        let err = store
            .create(fields("Dan", "2021", EmployeeType::Permanent, "Astronauts"), &registry)
            .unwrap_err();
        assert_eq!(err, CardError::UnknownDomain("Astronauts".to_string()));

        assert_eq!(store, before);
    }

    #[test]
    fn lenient_create_accepts_identical_identity() {
        let registry = sales_registry();
        let mut store = RecordStore::new(IdentityPolicy::Lenient);
        store
            .create(fields("Alice", "2021", EmployeeType::Permanent, "Sales"), &registry)
            .unwrap();
        store
            .create(fields("Alicia", "2021", EmployeeType::Permanent, "Sales"), &registry)
            .unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(
            store.records()[0].employee_id(),
            store.records()[1].employee_id()
        );
    }

    #[test]
    fn strict_create_rejects_identical_identity() {
        let registry = sales_registry();
        let mut store = RecordStore::new(IdentityPolicy::Strict);
        store
            .create(fields("Alice", "2021", EmployeeType::Permanent, "Sales"), &registry)
            .unwrap();
        let err = store
            .create(fields("Alicia", "2021", EmployeeType::Permanent, "Sales"), &registry)
            .unwrap_err();

        assert_eq!(err, CardError::DuplicateIdentity(id("EMPP2021301")));
        assert_eq!(store.len(), 1);
        assert_eq!(store.records()[0].name(), "Alice");
    }

    #[test]
    fn empty_search_returns_everything_in_order() {
        let (store, _) = populated();
        let all: Vec<&EmployeeRecord> = store.records().iter().collect();
        assert_eq!(ids(&store.search("")), ids(&all));
        assert_eq!(ids(&store.search("   ")), ids(&all));
    }

    #[test]
    fn search_matches_domain_case_insensitively() {
        let (store, _) = populated();
        let hits = store.search("developERS");
        assert_eq!(ids(&hits), vec!["EMPP2024401"]);
    }

    #[test]
    fn search_matches_id_and_name() {
        let (store, _) = populated();
        assert_eq!(ids(&store.search("empt2019")), vec!["EMPT20192001"]);
        assert_eq!(ids(&store.search("ALI")), vec!["EMPP2021301"]);
    }

    #[test]
    fn search_without_hits_is_empty() {
        let (store, _) = populated();
        assert!(store.search("zzz").is_empty());
    }

    #[test]
    fn edit_recomputes_identity_in_place() {
        let (mut store, registry) = populated();
        let mut update = RecordFields::from_record(store.get(&id("EMPP2024401")).unwrap());
        update.domain_name = "Sales".to_string();
        update.year_of_joining = "2022".to_string();

        let edited = store.edit(&id("EMPP2024401"), update, &registry).unwrap();
        assert_eq!(edited.employee_id().as_str(), "EMPP2022301");
        assert_eq!(edited.domain_code().get(), 3);

        assert_eq!(store.records()[1].employee_id().as_str(), "EMPP2022301");
        assert!(store.get(&id("EMPP2024401")).is_none());
    }

    #[test]
    fn edit_trims_name() {
        let (mut store, registry) = populated();
        let mut update = RecordFields::from_record(store.get(&id("EMPP2021301")).unwrap());
        update.name = "  Alice Smith  ".to_string();

        let edited = store.edit(&id("EMPP2021301"), update, &registry).unwrap();
        assert_eq!(edited.name(), "Alice Smith");
        assert_eq!(edited.employee_id().as_str(), "EMPP2021301");
    }

    #[test]
    fn edit_keeping_own_identity_is_not_a_duplicate() {
        let (mut store, registry) = populated();
        let mut update = RecordFields::from_record(store.get(&id("EMPT20192001")).unwrap());
        update.photo = Some("data:image/png;base64,AAAA".to_string());

        let edited = store.edit(&id("EMPT20192001"), update, &registry).unwrap();
        assert_eq!(edited.photo(), Some("data:image/png;base64,AAAA"));
    }

    #[test]
    fn edit_into_another_records_identity_fails_and_changes_nothing() {
        let (mut store, registry) = populated();
        let before = store.clone();

        // Turn Bob (Developers, 2024) into Sales 2021 → Alice's id.
        let mut update = RecordFields::from_record(store.get(&id("EMPP2024401")).unwrap());
        update.domain_name = "Sales".to_string();
        update.year_of_joining = "2021".to_string();

        let err = store.edit(&id("EMPP2024401"), update, &registry).unwrap_err();
        assert_eq!(err, CardError::DuplicateIdentity(id("EMPP2021301")));
        assert_eq!(store, before);
    }

    #[test]
    fn edit_validates_before_duplicate_check() {
        let (mut store, registry) = populated();
        let before = store.clone();

        let mut update = RecordFields::from_record(store.get(&id("EMPP2024401")).unwrap());
        update.name = String::new();
        update.domain_name = "Sales".to_string();
        update.year_of_joining = "2021".to_string();

        let err = store.edit(&id("EMPP2024401"), update, &registry).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(store, before);
    }

    #[test]
    fn edit_with_unknown_domain_fails() {
        let (mut store, registry) = populated();
        let mut update = RecordFields::from_record(store.get(&id("EMPP2024401")).unwrap());
        update.domain_name = "Astronauts".to_string();

        let err = store.edit(&id("EMPP2024401"), update, &registry).unwrap_err();
        assert_eq!(err, CardError::UnknownDomain("Astronauts".to_string()));
    }

    #[test]
    fn edit_of_missing_target_is_not_found() {
        let (mut store, registry) = populated();
        let update = fields("Zed", "2020", EmployeeType::Permanent, "Sales");
        let err = store.edit(&id("EMPX"), update, &registry).unwrap_err();
        assert_eq!(err, CardError::NotFound);
    }

    #[test]
    fn edit_of_shared_identity_changes_only_the_most_recent_holder() {
        let registry = sales_registry();
        let mut store = RecordStore::new(IdentityPolicy::Lenient);
        store
            .create(fields("Alice", "2021", EmployeeType::Permanent, "Sales"), &registry)
            .unwrap();
        store
            .create(fields("Bea", "2021", EmployeeType::Permanent, "Sales"), &registry)
            .unwrap();

        let shared = id("EMPP2021301");
        let mut update = RecordFields::from_record(store.get(&shared).unwrap());
        assert_eq!(update.name, "Bea");
        update.year_of_joining = "2022".to_string();

        let edited = store.edit(&shared, update, &registry).unwrap();
        assert_eq!(edited.employee_id().as_str(), "EMPP2022301");

        let rows: Vec<(&str, &str, &str)> = store
            .records()
            .iter()
            .map(|r| (r.name(), r.year_of_joining().as_str(), r.employee_id().as_str()))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("Bea", "2022", "EMPP2022301"),
                ("Alice", "2021", "EMPP2021301"),
            ]
        );
    }

    #[test]
    fn edit_keeps_snapshot_code_until_re_derived() {
        let (mut store, _) = populated();
        // A registry where Sales now maps to a different code.
        let mut moved = DomainRegistry::new();
        moved.add_domain("Sales", 30).unwrap();

        assert_eq!(store.get(&id("EMPP2021301")).unwrap().domain_code().get(), 3);

        let update = RecordFields::from_record(store.get(&id("EMPP2021301")).unwrap());
        let edited = store.edit(&id("EMPP2021301"), update, &moved).unwrap();
        assert_eq!(edited.employee_id().as_str(), "EMPP20213001");
    }

    #[test]
    fn delete_removes_record() {
        let (mut store, _) = populated();
        let outcome = store.delete(&id("EMPP2024401"));
        assert_eq!(outcome, DeleteOutcome::Removed { count: 1 });
        assert!(outcome.removed());
        assert_eq!(store.len(), 2);
        assert!(store.get(&id("EMPP2024401")).is_none());
    }

    #[test]
    fn delete_of_missing_id_is_a_reported_no_op() {
        let (mut store, _) = populated();
        let before = store.clone();
        let outcome = store.delete(&id("EMPP1999101"));
        assert_eq!(outcome, DeleteOutcome::NotFound);
        assert!(!outcome.removed());
        assert_eq!(store, before);
    }

    #[test]
    fn delete_removes_every_holder_of_a_duplicated_id() {
        let registry = sales_registry();
        let mut store = RecordStore::default();
        for name in ["Alice", "Alicia"] {
            store
                .create(fields(name, "2021", EmployeeType::Permanent, "Sales"), &registry)
                .unwrap();
        }
        assert_eq!(
            store.delete(&id("EMPP2021301")),
            DeleteOutcome::Removed { count: 2 }
        );
        assert!(store.is_empty());
    }
}
