use std::collections::BTreeSet;

use crate::errors::Result;
use crate::ledger::DeleteOutcome;
use crate::sales::sales_model::{NewSale, Sale, SaleRecord};

/// Trait for sale repository operations
pub trait SaleRepositoryTrait: Send + Sync {
    fn insert_sale(&self, record: SaleRecord) -> Result<Sale>;
    /// All readable sales, ordered by id. Rows with a malformed sale date are left out.
    fn load_sales(&self) -> Result<Vec<Sale>>;
    /// Removes the given ids and returns how many rows went away.
    fn delete_sales(&self, ids: &BTreeSet<i64>) -> Result<usize>;
}

/// Trait for sale service operations
pub trait SaleServiceTrait: Send + Sync {
    fn create_sale(&self, new_sale: NewSale) -> Result<Sale>;
    fn get_sales(&self) -> Result<Vec<Sale>>;
    fn delete_sales(&self, ids: &BTreeSet<i64>) -> Result<DeleteOutcome>;
}
