use std::sync::Arc;

use diesel::SqliteConnection;
use ledgerbook_core::errors::Result;

use super::{get_connection, DbPool};
use crate::errors::StorageError;

/// Handle for running write jobs against the datastore.
///
/// Every job runs inside an `IMMEDIATE` transaction on a pooled connection and
/// is committed before `exec` returns. The connection goes back to the pool
/// when the job finishes, on success and on error alike.
#[derive(Clone)]
pub struct WriteHandle {
    pool: Arc<DbPool>,
}

impl WriteHandle {
    pub fn new(pool: Arc<DbPool>) -> Self {
        WriteHandle { pool }
    }

    /// Executes a database job in its own transaction.
    ///
    /// # Arguments
    /// * `job`: A closure that takes a mutable reference to `SqliteConnection`
    ///   and performs database operations. Returning an error rolls back.
    pub fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> std::result::Result<T, StorageError>,
    {
        let mut conn = get_connection(&self.pool)?;
        conn.immediate_transaction::<_, StorageError, _>(job)
            .map_err(Into::into)
    }
}
