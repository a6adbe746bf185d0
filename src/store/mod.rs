//! # Store
//!
//! SQLite persistence for locations, departments, tiers, employees and the
//! API call history.
//!
//! Employees reference departments by free-text code and locations by a
//! plain integer id. Neither reference is a foreign key: readers must
//! expect both to dangle.

mod database;
mod errors;
pub mod record;
mod schema;

pub use database::{Database, Snapshot};
pub use errors::{StoreError, StoreResult};
pub use record::Record;
