//! Infrastructure layer: storage, configuration and the issuing desk.

pub mod config;
pub mod desk;
pub mod error;
pub mod repository;

pub use config::{ConfigError, DeskConfig};
pub use desk::IdCardDesk;
pub use error::{DeskError, DeskResult, PersistenceError};
pub use repository::{
    CardRepository, DOMAINS_KEY, DomainAdditions, InMemoryCardRepository, JsonFileRepository,
    RECORDS_KEY,
};
