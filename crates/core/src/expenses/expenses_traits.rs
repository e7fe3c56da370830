use std::collections::BTreeSet;

use crate::errors::Result;
use crate::expenses::expenses_model::{Expense, ExpenseRecord, NewExpense};
use crate::ledger::DeleteOutcome;

/// Trait for expense repository operations
pub trait ExpenseRepositoryTrait: Send + Sync {
    fn insert_expense(&self, record: ExpenseRecord) -> Result<Expense>;
    fn load_expenses(&self) -> Result<Vec<Expense>>;
    fn delete_expenses(&self, ids: &BTreeSet<i64>) -> Result<usize>;
}

/// Trait for expense service operations
pub trait ExpenseServiceTrait: Send + Sync {
    fn create_expense(&self, new_expense: NewExpense) -> Result<Expense>;
    fn get_expenses(&self) -> Result<Vec<Expense>>;
    fn delete_expenses(&self, ids: &BTreeSet<i64>) -> Result<DeleteOutcome>;
}
