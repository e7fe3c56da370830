use std::collections::BTreeSet;
use std::sync::Arc;

use log::{debug, info};

use super::expenses_model::{Expense, NewExpense};
use super::expenses_traits::{ExpenseRepositoryTrait, ExpenseServiceTrait};
use crate::errors::Result;
use crate::ledger::DeleteOutcome;

pub struct ExpenseService {
    repository: Arc<dyn ExpenseRepositoryTrait>,
}

impl ExpenseService {
    pub fn new(repository: Arc<dyn ExpenseRepositoryTrait>) -> Self {
        ExpenseService { repository }
    }
}

impl ExpenseServiceTrait for ExpenseService {
    fn create_expense(&self, new_expense: NewExpense) -> Result<Expense> {
        let record = new_expense.into_record()?;
        let expense = self.repository.insert_expense(record)?;
        info!("Expense {} recorded", expense.id);
        Ok(expense)
    }

    fn get_expenses(&self) -> Result<Vec<Expense>> {
        self.repository.load_expenses()
    }

    fn delete_expenses(&self, ids: &BTreeSet<i64>) -> Result<DeleteOutcome> {
        if ids.is_empty() {
            debug!("Expense delete requested with nothing selected");
            return Ok(DeleteOutcome::NothingSelected);
        }
        let deleted = self.repository.delete_expenses(ids)?;
        info!("Deleted {} of {} selected expenses", deleted, ids.len());
        Ok(DeleteOutcome::Deleted(deleted))
    }
}
