//! Employee ID card directory (domain registry, identity derivation, record store).
//!
//! This crate contains the business rules for issuing ID cards, implemented
//! purely as deterministic domain logic (no IO, no presentation, no storage).

pub mod identity;
pub mod record;
pub mod registry;
pub mod store;

pub use identity::{ID_PREFIX, derive, preview};
pub use record::{EmployeeRecord, RecordFields};
pub use registry::{DEFAULT_DOMAINS, DomainRegistry};
pub use store::{DeleteOutcome, IdentityPolicy, RecordStore};
