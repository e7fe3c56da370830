use std::sync::Arc;

use log::debug;

use super::ledger_model::{Dashboard, DeleteOutcome};
use crate::aggregator::{compute_summary, KpiSet};
use crate::errors::Result;
use crate::expenses::{ExpenseRow, ExpenseServiceTrait};
use crate::sales::{SaleRow, SaleServiceTrait};
use crate::selection::{extract_valid_ids, SelectionPayload};

/// Trait for the combined ledger operations the dashboard needs
pub trait LedgerServiceTrait: Send + Sync {
    fn summary(&self) -> Result<KpiSet>;
    fn dashboard(&self) -> Result<Dashboard>;
    fn delete_selected_sales(&self, selection: &SelectionPayload) -> Result<DeleteOutcome>;
    fn delete_selected_expenses(&self, selection: &SelectionPayload) -> Result<DeleteOutcome>;
}

pub struct LedgerService {
    sale_service: Arc<dyn SaleServiceTrait>,
    expense_service: Arc<dyn ExpenseServiceTrait>,
}

impl LedgerService {
    pub fn new(
        sale_service: Arc<dyn SaleServiceTrait>,
        expense_service: Arc<dyn ExpenseServiceTrait>,
    ) -> Self {
        LedgerService {
            sale_service,
            expense_service,
        }
    }
}

impl LedgerServiceTrait for LedgerService {
    fn summary(&self) -> Result<KpiSet> {
        let sales = self.sale_service.get_sales()?;
        let expenses = self.expense_service.get_expenses()?;
        Ok(compute_summary(&sales, &expenses))
    }

    fn dashboard(&self) -> Result<Dashboard> {
        let sales = self.sale_service.get_sales()?;
        let expenses = self.expense_service.get_expenses()?;
        debug!(
            "Building dashboard over {} sales and {} expenses",
            sales.len(),
            expenses.len()
        );

        Ok(Dashboard {
            summary: compute_summary(&sales, &expenses),
            sales: sales.iter().map(SaleRow::from).collect(),
            expenses: expenses.iter().map(ExpenseRow::from).collect(),
        })
    }

    fn delete_selected_sales(&self, selection: &SelectionPayload) -> Result<DeleteOutcome> {
        let ids = extract_valid_ids(selection);
        self.sale_service.delete_sales(&ids)
    }

    fn delete_selected_expenses(&self, selection: &SelectionPayload) -> Result<DeleteOutcome> {
        let ids = extract_valid_ids(selection);
        self.expense_service.delete_expenses(&ids)
    }
}
