//! orgstat - organization records and salary reports
//!
//! A small HTTP service over four relations (locations, departments, tiers,
//! employees) with a bulk sheet importer and three read-only salary reports.

pub mod cli;
pub mod http_server;
pub mod importer;
pub mod model;
pub mod observability;
pub mod report;
pub mod store;
