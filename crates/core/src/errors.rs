//! Error types shared by every Ledgerbook crate.
//!
//! Nothing here knows about Diesel or SQLite; the storage crate maps its own
//! failures onto [`DatabaseError`].

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Root error for ledger operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Ledger storage error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Rejected input: {0}")]
    Validation(#[from] ValidationError),

    #[error("Bad configuration: {0}")]
    InvalidConfigValue(String),
}

/// Datastore failures, carried as text.
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Cannot open datastore: {0}")]
    ConnectionFailed(String),

    #[error("Cannot build connection pool: {0}")]
    PoolCreationFailed(String),

    #[error("Statement failed: {0}")]
    QueryFailed(String),

    #[error("No such record: {0}")]
    NotFound(String),

    /// Unique, check or not-null constraint.
    #[error("Constraint rejected the write: {0}")]
    ConstraintViolation(String),

    #[error("Write transaction failed: {0}")]
    TransactionFailed(String),

    #[error("Schema setup failed: {0}")]
    MigrationFailed(String),

    /// Filesystem and other failures around the datastore file.
    #[error("Datastore error: {0}")]
    Internal(String),
}

/// Input that cannot become a ledger record.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Field '{0}' is required")]
    MissingField(String),
}

impl Error {
    /// True when the error came from the datastore rather than from the input.
    pub fn is_storage(&self) -> bool {
        matches!(self, Error::Database(_))
    }
}
