use serde::{Deserialize, Serialize};

use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::expenses::Expense;
use crate::sales::Sale;

/// Dashboard totals over every sale and expense in the ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiSet {
    pub total_sales: f64,
    pub total_product_cost: f64,
    pub total_platform_fees: f64,
    pub total_expenses: f64,
    pub net_profit: f64,
}

impl KpiSet {
    /// Money coming in (gross sale amounts).
    pub fn inflows(&self) -> f64 {
        self.total_sales
    }

    /// Money going out through recorded expenses.
    pub fn outflows(&self) -> f64 {
        self.total_expenses
    }
}

/// Sums the ledger into a [`KpiSet`].
///
/// Empty inputs produce zeros.
pub fn compute_summary(sales: &[Sale], expenses: &[Expense]) -> KpiSet {
    let total_sales = total(sales.iter().map(|s| s.total_amount));
    let total_product_cost = total(sales.iter().map(|s| s.product_cost));
    let total_platform_fees = total(sales.iter().map(|s| s.platform_fee));
    let total_expenses = total(expenses.iter().map(|e| e.amount));

    KpiSet {
        total_sales,
        total_product_cost,
        total_platform_fees,
        total_expenses,
        net_profit: total_sales - total_product_cost - total_platform_fees - total_expenses,
    }
}

// `Sum for f64` starts from -0.0, which would surface as `-0.0` in JSON.
fn total(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(0.0, |acc, v| acc + v)
}

/// Formats an amount with the display precision, e.g. `1234.5` -> `"1234.50"`.
pub fn format_amount(value: f64) -> String {
    let formatted = format!("{:.*}", DISPLAY_DECIMAL_PRECISION, value);
    // -0.00 reads badly on a dashboard
    match formatted.strip_prefix('-') {
        Some(magnitude) if magnitude.chars().all(|c| c == '0' || c == '.') => {
            magnitude.to_string()
        }
        _ => formatted,
    }
}
