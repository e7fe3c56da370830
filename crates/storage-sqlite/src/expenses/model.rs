//! Database models for expenses.

use diesel::prelude::*;
use ledgerbook_core::errors::ValidationError;
use ledgerbook_core::expenses::{Expense, ExpenseRecord};
use ledgerbook_core::utils::{parse_ledger_date, LEDGER_DATE_FORMAT};

/// Database model for expenses (`despesas` table)
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::despesas)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ExpenseDB {
    pub id: i64,
    #[diesel(column_name = data_despesa)]
    pub expense_date: Option<String>,
    #[diesel(column_name = categoria_despesa)]
    pub category: Option<String>,
    #[diesel(column_name = descricao)]
    pub description: Option<String>,
    #[diesel(column_name = valor_despesa)]
    pub amount: Option<f64>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::despesas)]
pub struct NewExpenseDB {
    #[diesel(column_name = data_despesa)]
    pub expense_date: String,
    #[diesel(column_name = categoria_despesa)]
    pub category: String,
    #[diesel(column_name = descricao)]
    pub description: String,
    #[diesel(column_name = valor_despesa)]
    pub amount: f64,
}

impl From<ExpenseRecord> for NewExpenseDB {
    fn from(record: ExpenseRecord) -> Self {
        Self {
            expense_date: record.expense_date.format(LEDGER_DATE_FORMAT).to_string(),
            category: record.category,
            description: record.description,
            amount: record.amount,
        }
    }
}

impl TryFrom<ExpenseDB> for Expense {
    type Error = ValidationError;

    fn try_from(db: ExpenseDB) -> Result<Self, Self::Error> {
        let raw_date = db
            .expense_date
            .ok_or_else(|| ValidationError::MissingField("data_despesa".to_string()))?;
        let expense_date = parse_ledger_date(&raw_date).ok_or_else(|| {
            ValidationError::InvalidInput(format!("Unreadable expense date '{}'", raw_date))
        })?;

        Ok(Self {
            id: db.id,
            expense_date,
            category: db.category.unwrap_or_default(),
            description: db.description.unwrap_or_default(),
            amount: db.amount.unwrap_or_default(),
        })
    }
}
