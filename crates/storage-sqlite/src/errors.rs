//! Errors raised inside the SQLite layer and their mapping onto the core
//! `Error`.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use ledgerbook_core::errors::{DatabaseError, Error};
use thiserror::Error;

/// Failures from Diesel, the pool, migrations, or the datastore file.
///
/// Never crosses the crate boundary; callers see `ledgerbook_core::Error`.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Cannot open SQLite file: {0}")]
    ConnectionFailed(#[from] diesel::ConnectionError),

    #[error("Pool checkout failed: {0}")]
    PoolError(#[from] r2d2::Error),

    #[error("Diesel error: {0}")]
    QueryFailed(#[from] DieselError),

    #[error("Embedded migrations failed: {0}")]
    MigrationFailed(String),

    #[error("Filesystem error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::ConnectionFailed(e) => {
                Error::Database(DatabaseError::ConnectionFailed(e.to_string()))
            }
            StorageError::PoolError(e) => {
                Error::Database(DatabaseError::PoolCreationFailed(e.to_string()))
            }
            StorageError::QueryFailed(DieselError::NotFound) => {
                Error::Database(DatabaseError::NotFound("no matching row".to_string()))
            }
            StorageError::QueryFailed(DieselError::DatabaseError(
                kind @ (DatabaseErrorKind::UniqueViolation
                | DatabaseErrorKind::CheckViolation
                | DatabaseErrorKind::NotNullViolation
                | DatabaseErrorKind::ForeignKeyViolation),
                info,
            )) => Error::Database(DatabaseError::ConstraintViolation(format!(
                "{:?}: {}",
                kind,
                info.message()
            ))),
            StorageError::QueryFailed(DieselError::RollbackTransaction) => Error::Database(
                DatabaseError::TransactionFailed("rolled back".to_string()),
            ),
            StorageError::QueryFailed(e) => {
                Error::Database(DatabaseError::QueryFailed(e.to_string()))
            }
            StorageError::MigrationFailed(e) => Error::Database(DatabaseError::MigrationFailed(e)),
            StorageError::Io(e) => Error::Database(DatabaseError::Internal(e.to_string())),
        }
    }
}

/// `.into_core()` for pool checkouts, mapping through [`StorageError`].
pub trait IntoCore<T> {
    fn into_core(self) -> ledgerbook_core::Result<T>;
}

impl<T> IntoCore<T> for std::result::Result<T, r2d2::Error> {
    fn into_core(self) -> ledgerbook_core::Result<T> {
        self.map_err(|e| StorageError::from(e).into())
    }
}
