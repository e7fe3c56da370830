use std::collections::BTreeSet;
use std::sync::Arc;

use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use log::warn;

use ledgerbook_core::expenses::{Expense, ExpenseRecord, ExpenseRepositoryTrait};
use ledgerbook_core::Result;

use super::model::{ExpenseDB, NewExpenseDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::despesas;
use crate::schema::despesas::dsl::*;
use crate::utils::id_batches;

pub struct ExpenseRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl ExpenseRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        ExpenseRepository { pool, writer }
    }
}

impl ExpenseRepositoryTrait for ExpenseRepository {
    fn insert_expense(&self, record: ExpenseRecord) -> Result<Expense> {
        let new_expense_db = NewExpenseDB::from(record);
        let inserted = self.writer.exec(move |conn: &mut SqliteConnection| {
            diesel::insert_into(despesas::table)
                .values(&new_expense_db)
                .returning(ExpenseDB::as_returning())
                .get_result::<ExpenseDB>(conn)
                .map_err(StorageError::from)
        })?;
        Ok(Expense::try_from(inserted)?)
    }

    fn load_expenses(&self) -> Result<Vec<Expense>> {
        let mut conn = get_connection(&self.pool)?;
        let expenses_db = despesas
            .order(id.asc())
            .select(ExpenseDB::as_select())
            .load::<ExpenseDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(expenses_db
            .into_iter()
            .filter_map(|row| {
                let row_id = row.id;
                Expense::try_from(row)
                    .map_err(|e| warn!("Skipping expense {}: {}", row_id, e))
                    .ok()
            })
            .collect())
    }

    fn delete_expenses(&self, ids: &BTreeSet<i64>) -> Result<usize> {
        let batches = id_batches(ids);
        self.writer.exec(move |conn: &mut SqliteConnection| {
            let mut deleted = 0;
            for batch in batches {
                deleted += diesel::delete(despesas.filter(id.eq_any(batch)))
                    .execute(conn)
                    .map_err(StorageError::from)?;
            }
            Ok(deleted)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::LedgerDatabase;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn create_test_repository() -> (ExpenseRepository, LedgerDatabase, tempfile::TempDir) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("ledger.db");
        let db = LedgerDatabase::open(&db_path.to_string_lossy(), 2)
            .expect("Failed to open database");
        let repo = ExpenseRepository::new(db.pool(), db.writer());
        (repo, db, temp_dir)
    }

    fn record(description: &str, amount: f64) -> ExpenseRecord {
        ExpenseRecord {
            expense_date: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
            category: "Embalagens".to_string(),
            description: description.to_string(),
            amount,
        }
    }

    #[test]
    fn test_insert_and_load_round_trip() {
        let (repo, _db, _dir) = create_test_repository();

        let created = repo.insert_expense(record("Caixas", 35.5)).unwrap();
        let loaded = repo.load_expenses().unwrap();

        assert_eq!(loaded, vec![created]);
        assert_eq!(loaded[0].description, "Caixas");
    }

    #[test]
    fn test_empty_description_is_kept() {
        let (repo, _db, _dir) = create_test_repository();

        let created = repo.insert_expense(record("", 12.0)).unwrap();

        assert_eq!(created.description, "");
    }

    #[test]
    fn test_delete_counts_only_existing_rows() {
        let (repo, _db, _dir) = create_test_repository();
        let kept = repo.insert_expense(record("Fita", 5.0)).unwrap();
        let gone = repo.insert_expense(record("Etiquetas", 7.0)).unwrap();

        let ids: BTreeSet<i64> = [gone.id, gone.id + 100].into_iter().collect();
        assert_eq!(repo.delete_expenses(&ids).unwrap(), 1);

        let remaining = repo.load_expenses().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, kept.id);
    }

    #[test]
    fn test_bulk_delete_spans_several_statements() {
        let (repo, _db, _dir) = create_test_repository();
        let mut ids = BTreeSet::new();
        for i in 0..3 {
            ids.insert(repo.insert_expense(record("Lote", i as f64)).unwrap().id);
        }
        // Pad the selection past one statement's worth of parameters.
        ids.extend(100_000..101_200);

        assert_eq!(repo.delete_expenses(&ids).unwrap(), 3);
        assert!(repo.load_expenses().unwrap().is_empty());
    }

    #[test]
    fn test_legacy_row_with_unreadable_date_is_skipped() {
        let (repo, db, _dir) = create_test_repository();
        repo.insert_expense(record("Fita", 5.0)).unwrap();

        let conn = rusqlite::Connection::open(db.db_path()).expect("raw connection");
        conn.execute(
            "INSERT INTO despesas (data_despesa, categoria_despesa) VALUES ('02/05/2024', 'Outros')",
            [],
        )
        .expect("raw insert");
        conn.execute("INSERT INTO despesas (valor_despesa) VALUES (9.0)", [])
            .expect("raw insert");

        let expenses = repo.load_expenses().unwrap();
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].description, "Fita");
    }
}
