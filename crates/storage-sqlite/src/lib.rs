//! SQLite storage implementation for Ledgerbook.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `ledgerbook-core` and contains:
//! - Database connection pooling and the write handle
//! - Diesel migrations for the `vendas` and `despesas` tables
//! - Repository implementations for sales and expenses
//! - Snapshot rotation of the datastore file
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//! The `core` crate is database-agnostic and works with traits.
//!
//! ```text
//!        core (domain)
//!              │
//!              ▼
//!    storage-sqlite (this crate)
//!              │
//!              ▼
//!          SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod expenses;
pub mod sales;

// Re-export database utilities
pub use db::backup::{
    list_snapshots, rotate, BackupEvent, BackupEventSink, BackupStage, LogBackupEventSink,
    NoOpBackupEventSink, RotationOutcome,
};
pub use db::{
    create_pool, get_connection, init, init_schema, DbConnection, DbPool, LedgerDatabase,
    WriteHandle,
};

// Re-export repositories
pub use expenses::ExpenseRepository;
pub use sales::SaleRepository;

// Re-export error types
pub use errors::{IntoCore, StorageError};
