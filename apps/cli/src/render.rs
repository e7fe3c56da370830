//! Plain-text output for the terminal.

use std::fmt::Write;
use std::path::PathBuf;

use ledgerbook_core::aggregator::{format_amount, KpiSet};
use ledgerbook_core::expenses::{Expense, ExpenseRow};
use ledgerbook_core::ledger::DeleteOutcome;
use ledgerbook_core::sales::{Sale, SaleRow};
use ledgerbook_core::utils::LEDGER_DATE_FORMAT;

use crate::commands::Choices;

pub fn sale_created(sale: &Sale) -> String {
    let receipt = sale
        .receipt_date
        .map(|d| d.format(LEDGER_DATE_FORMAT).to_string())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "Sale #{} recorded: gross profit {}, expected receipt {}",
        sale.id,
        format_amount(sale.gross_profit),
        receipt
    )
}

pub fn expense_created(expense: &Expense) -> String {
    format!(
        "Expense #{} recorded: {} {}",
        expense.id,
        expense.category,
        format_amount(expense.amount)
    )
}

pub fn sales_table(rows: &[SaleRow]) -> String {
    if rows.is_empty() {
        return "No sales recorded.".to_string();
    }
    let mut out = format!(
        "{:>6}  {:<10}  {:<16}  {:<16}  {:>4}  {:>12}  {:>12}",
        "ID", "DATE", "CHANNEL", "CATEGORY", "QTY", "TOTAL", "PROFIT"
    );
    for row in rows {
        let _ = write!(
            out,
            "\n{:>6}  {:<10}  {:<16}  {:<16}  {:>4}  {:>12}  {:>12}",
            row.id,
            row.sale_date.format(LEDGER_DATE_FORMAT),
            row.channel,
            row.category,
            row.quantity,
            format_amount(row.total_amount),
            format_amount(row.gross_profit)
        );
    }
    out
}

pub fn expenses_table(rows: &[ExpenseRow]) -> String {
    if rows.is_empty() {
        return "No expenses recorded.".to_string();
    }
    let mut out = format!(
        "{:>6}  {:<10}  {:<16}  {:<30}  {:>12}",
        "ID", "DATE", "CATEGORY", "DESCRIPTION", "AMOUNT"
    );
    for row in rows {
        let _ = write!(
            out,
            "\n{:>6}  {:<10}  {:<16}  {:<30}  {:>12}",
            row.id,
            row.expense_date.format(LEDGER_DATE_FORMAT),
            row.category,
            row.description,
            format_amount(row.amount)
        );
    }
    out
}

pub fn summary(kpis: &KpiSet) -> String {
    [
        ("Gross sales", kpis.total_sales),
        ("Product cost", kpis.total_product_cost),
        ("Platform fees", kpis.total_platform_fees),
        ("Expenses", kpis.total_expenses),
        ("Net profit", kpis.net_profit),
    ]
    .iter()
    .map(|(label, value)| format!("{:<14} {:>14}", label, format_amount(*value)))
    .collect::<Vec<_>>()
    .join("\n")
}

pub fn delete_outcome(outcome: DeleteOutcome, what: &str) -> String {
    match outcome {
        DeleteOutcome::NothingSelected => format!("Nothing selected; no {} deleted.", what),
        DeleteOutcome::Deleted(n) => format!("Deleted {} {}.", n, what),
    }
}

pub fn snapshots(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "No snapshots.".to_string();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn choices(choices: &Choices) -> String {
    format!(
        "Channels:           {}\nSale categories:    {}\nExpense categories: {}",
        choices.channels.join(", "),
        choices.sale_categories.join(", "),
        choices.expense_categories.join(", ")
    )
}
