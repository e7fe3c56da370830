//! Ledgerbook Core - Domain entities, services, and traits.
//!
//! This crate contains the bookkeeping logic for Ledgerbook: sales and
//! expense records, the profit aggregation rules, and the sanitizer that turns
//! table selections into record identifiers. It is database-agnostic and
//! defines traits that are implemented by the `storage-sqlite` crate.

pub mod aggregator;
pub mod constants;
pub mod errors;
pub mod expenses;
pub mod ledger;
pub mod sales;
pub mod selection;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
