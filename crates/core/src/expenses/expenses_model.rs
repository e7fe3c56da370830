//! Expense domain models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};

/// Domain model representing a recorded expense
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: i64,
    pub expense_date: NaiveDate,
    pub category: String,
    pub description: String,
    pub amount: f64,
}

/// Input model for recording a new expense
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewExpense {
    pub expense_date: NaiveDate,
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub amount: Option<f64>,
}

/// A validated expense, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseRecord {
    pub expense_date: NaiveDate,
    pub category: String,
    pub description: String,
    pub amount: f64,
}

/// Display projection of an expense for the expenses table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRow {
    pub id: i64,
    pub expense_date: NaiveDate,
    pub category: String,
    pub description: String,
    pub amount: f64,
}

impl NewExpense {
    pub fn validate(&self) -> Result<()> {
        if let Some(amount) = self.amount {
            if !amount.is_finite() {
                return Err(ValidationError::InvalidInput(
                    "Expense amount must be a finite number".to_string(),
                )
                .into());
            }
        }
        Ok(())
    }

    pub fn into_record(self) -> Result<ExpenseRecord> {
        self.validate()?;
        Ok(ExpenseRecord {
            expense_date: self.expense_date,
            category: self.category,
            description: self.description,
            amount: self.amount.unwrap_or(0.0),
        })
    }
}

impl From<&Expense> for ExpenseRow {
    fn from(expense: &Expense) -> Self {
        Self {
            id: expense.id,
            expense_date: expense.expense_date,
            category: expense.category.clone(),
            description: expense.description.clone(),
            amount: expense.amount,
        }
    }
}
