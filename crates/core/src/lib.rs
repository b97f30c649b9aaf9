//! `idcard-core`: value types and error taxonomy for employee ID cards.
//!
//! This crate contains **pure domain** primitives (no storage, no presentation).

pub mod entity;
pub mod error;
pub mod id;

pub use entity::Entity;
pub use error::{CardError, CardResult};
pub use id::{DomainCode, EmployeeId, EmployeeType, JoiningYear, Series};
