use std::collections::BTreeSet;
use std::sync::Arc;

use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use log::warn;

use ledgerbook_core::sales::{Sale, SaleRecord, SaleRepositoryTrait};
use ledgerbook_core::Result;

use super::model::{NewSaleDB, SaleDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::vendas;
use crate::schema::vendas::dsl::*;
use crate::utils::id_batches;

pub struct SaleRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl SaleRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        SaleRepository { pool, writer }
    }
}

impl SaleRepositoryTrait for SaleRepository {
    fn insert_sale(&self, record: SaleRecord) -> Result<Sale> {
        let new_sale_db = NewSaleDB::from(record);
        let inserted = self.writer.exec(move |conn: &mut SqliteConnection| {
            diesel::insert_into(vendas::table)
                .values(&new_sale_db)
                .returning(SaleDB::as_returning())
                .get_result::<SaleDB>(conn)
                .map_err(StorageError::from)
        })?;
        Ok(Sale::try_from(inserted)?)
    }

    fn load_sales(&self) -> Result<Vec<Sale>> {
        let mut conn = get_connection(&self.pool)?;
        let sales_db = vendas
            .order(id.asc())
            .select(SaleDB::as_select())
            .load::<SaleDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(sales_db
            .into_iter()
            .filter_map(|row| {
                let row_id = row.id;
                match Sale::try_from(row) {
                    Ok(sale) => Some(sale),
                    Err(e) => {
                        warn!("Skipping sale {}: {}", row_id, e);
                        None
                    }
                }
            })
            .collect())
    }

    fn delete_sales(&self, ids: &BTreeSet<i64>) -> Result<usize> {
        let batches = id_batches(ids);
        self.writer.exec(move |conn: &mut SqliteConnection| {
            let mut deleted = 0;
            for batch in batches {
                deleted += diesel::delete(vendas.filter(id.eq_any(batch)))
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

    fn create_test_repository() -> (SaleRepository, LedgerDatabase, tempfile::TempDir) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("ledger.db");
        let db = LedgerDatabase::open(&db_path.to_string_lossy(), 2)
            .expect("Failed to open database");
        let repo = SaleRepository::new(db.pool(), db.writer());
        (repo, db, temp_dir)
    }

    fn record(channel: &str, total: f64) -> SaleRecord {
        let day = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        SaleRecord {
            sale_date: day,
            channel: channel.to_string(),
            category: "Kit".to_string(),
            quantity: 2,
            total_amount: total,
            product_cost: 40.0,
            platform_fee: 10.0,
            gross_profit: total - 50.0,
            receipt_date: day,
        }
    }

    fn seed_raw(db: &LedgerDatabase, sale_date: Option<&str>, receipt: Option<&str>) {
        let conn = rusqlite::Connection::open(db.db_path()).expect("raw connection");
        conn.execute(
            "INSERT INTO vendas (data_venda, plataforma, valor_total_venda, data_recebimento) \
             VALUES (?1, 'Loja', 10.0, ?2)",
            rusqlite::params![sale_date, receipt],
        )
        .expect("raw insert");
    }

    #[test]
    fn test_insert_assigns_increasing_ids() {
        let (repo, _db, _dir) = create_test_repository();

        let first = repo.insert_sale(record("Loja", 100.0)).unwrap();
        let second = repo.insert_sale(record("Loja", 80.0)).unwrap();

        assert!(second.id > first.id);
        assert_eq!(first.gross_profit, 50.0);
        assert_eq!(first.receipt_date, NaiveDate::from_ymd_opt(2024, 3, 10));
    }

    #[test]
    fn test_load_returns_rows_in_id_order() {
        let (repo, _db, _dir) = create_test_repository();
        for total in [100.0, 200.0, 300.0] {
            repo.insert_sale(record("Loja", total)).unwrap();
        }

        let sales = repo.load_sales().unwrap();
        let totals: Vec<f64> = sales.iter().map(|s| s.total_amount).collect();
        assert_eq!(totals, vec![100.0, 200.0, 300.0]);
    }

    #[test]
    fn test_quote_characters_are_stored_verbatim() {
        let (repo, _db, _dir) = create_test_repository();
        let hostile = "x'); DROP TABLE vendas; --";

        repo.insert_sale(record(hostile, 100.0)).unwrap();

        let sales = repo.load_sales().unwrap();
        assert_eq!(sales.len(), 1);
        assert_eq!(sales[0].channel, hostile);
    }

    #[test]
    fn test_delete_removes_only_selected_ids() {
        let (repo, _db, _dir) = create_test_repository();
        let a = repo.insert_sale(record("Loja", 1.0)).unwrap();
        let b = repo.insert_sale(record("Loja", 2.0)).unwrap();
        let c = repo.insert_sale(record("Loja", 3.0)).unwrap();

        let ids: BTreeSet<i64> = [a.id, c.id, 9_999].into_iter().collect();
        let deleted = repo.delete_sales(&ids).unwrap();

        assert_eq!(deleted, 2);
        let remaining: Vec<i64> = repo.load_sales().unwrap().iter().map(|s| s.id).collect();
        assert_eq!(remaining, vec![b.id]);
    }

    #[test]
    fn test_delete_with_no_ids_changes_nothing() {
        let (repo, _db, _dir) = create_test_repository();
        repo.insert_sale(record("Loja", 1.0)).unwrap();

        assert_eq!(repo.delete_sales(&BTreeSet::new()).unwrap(), 0);
        assert_eq!(repo.load_sales().unwrap().len(), 1);
    }

    #[test]
    fn test_legacy_rows_with_bad_sale_date_are_skipped() {
        let (repo, db, _dir) = create_test_repository();
        repo.insert_sale(record("Loja", 100.0)).unwrap();
        seed_raw(&db, Some("not a date"), Some("2024-01-01"));
        seed_raw(&db, None, None);

        let sales = repo.load_sales().unwrap();
        assert_eq!(sales.len(), 1);
        assert_eq!(sales[0].total_amount, 100.0);
    }

    #[test]
    fn test_legacy_row_with_missing_columns_reads_as_defaults() {
        let (repo, db, _dir) = create_test_repository();
        seed_raw(&db, Some("2023-12-01 14:30:00"), Some("garbage"));

        let sales = repo.load_sales().unwrap();
        assert_eq!(sales.len(), 1);
        let sale = &sales[0];
        assert_eq!(sale.sale_date, NaiveDate::from_ymd_opt(2023, 12, 1).unwrap());
        assert_eq!(sale.category, "");
        assert_eq!(sale.quantity, 0);
        assert_eq!(sale.product_cost, 0.0);
        assert_eq!(sale.receipt_date, None);
    }

    #[test]
    fn test_reopening_keeps_existing_rows() {
        let (repo, db, _dir) = create_test_repository();
        repo.insert_sale(record("Loja", 100.0)).unwrap();

        let reopened = LedgerDatabase::open(db.db_path(), 1).unwrap();
        let repo_again = SaleRepository::new(reopened.pool(), reopened.writer());

        assert_eq!(repo_again.load_sales().unwrap().len(), 1);
    }
}
