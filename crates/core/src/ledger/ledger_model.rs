use serde::{Deserialize, Serialize};

use crate::aggregator::KpiSet;
use crate::expenses::ExpenseRow;
use crate::sales::SaleRow;

/// Result of a bulk delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "status", content = "count")]
pub enum DeleteOutcome {
    /// The request carried no ids; storage was not touched.
    NothingSelected,
    /// Rows removed. Ids that did not exist count for nothing.
    Deleted(usize),
}

impl DeleteOutcome {
    pub fn deleted(&self) -> usize {
        match self {
            DeleteOutcome::NothingSelected => 0,
            DeleteOutcome::Deleted(n) => *n,
        }
    }
}

/// Everything the dashboard shows in one read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub summary: KpiSet,
    pub sales: Vec<SaleRow>,
    pub expenses: Vec<ExpenseRow>,
}
