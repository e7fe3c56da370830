use std::collections::BTreeSet;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use ledgerbook_core::constants::{
    SUGGESTED_CHANNELS, SUGGESTED_EXPENSE_CATEGORIES, SUGGESTED_SALE_CATEGORIES,
};
use ledgerbook_core::expenses::{ExpenseRow, NewExpense};
use ledgerbook_core::ledger::DeleteOutcome;
use ledgerbook_core::sales::{NewSale, SaleRow};
use ledgerbook_core::selection::SelectionPayload;
use ledgerbook_core::utils::today;
use ledgerbook_storage_sqlite::list_snapshots;
use serde::Serialize;

use crate::config::Config;
use crate::main_lib::AppState;
use crate::render;

#[derive(Parser, Debug)]
#[command(name = "ledgerbook", version, about = "Sales and expense ledger for a small shop")]
pub struct Cli {
    /// SQLite datastore file. Overrides LEDGERBOOK_DB_PATH.
    #[arg(long, global = true)]
    pub db_path: Option<String>,

    /// Directory that receives startup snapshots. Overrides LEDGERBOOK_BACKUP_DIR.
    #[arg(long, global = true)]
    pub backup_dir: Option<PathBuf>,

    /// Snapshots kept after each rotation. Overrides LEDGERBOOK_BACKUP_KEEP.
    #[arg(long, global = true)]
    pub backup_keep: Option<usize>,

    /// Print JSON instead of text tables.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Record a sale.
    AddSale(AddSaleArgs),
    /// Record an expense.
    AddExpense(AddExpenseArgs),
    /// List sales.
    Sales,
    /// List expenses.
    Expenses,
    /// Show the dashboard totals.
    Summary,
    /// Delete the selected sales.
    DeleteSales(SelectionArgs),
    /// Delete the selected expenses.
    DeleteExpenses(SelectionArgs),
    /// List the datastore snapshots, oldest first.
    Backups,
    /// Show the suggested channels and categories for the entry forms.
    Choices,
}

#[derive(Args, Debug)]
pub struct AddSaleArgs {
    /// Sale date (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub date: Option<NaiveDate>,
    #[arg(long)]
    pub channel: String,
    #[arg(long)]
    pub category: String,
    #[arg(long, default_value_t = 1)]
    pub quantity: i32,
    /// Gross amount received from the customer.
    #[arg(long)]
    pub total: Option<f64>,
    /// Cost of the goods sold.
    #[arg(long)]
    pub cost: Option<f64>,
    /// Fee charged by the sales channel.
    #[arg(long)]
    pub fee: Option<f64>,
}

#[derive(Args, Debug)]
pub struct AddExpenseArgs {
    /// Expense date (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub date: Option<NaiveDate>,
    #[arg(long)]
    pub category: String,
    #[arg(long, default_value = "")]
    pub description: String,
    #[arg(long)]
    pub amount: Option<f64>,
}

#[derive(Args, Debug)]
pub struct SelectionArgs {
    /// Comma separated record ids.
    #[arg(long, value_delimiter = ',', conflicts_with = "selection")]
    pub ids: Vec<i64>,
    /// Selected rows as returned by a table widget (JSON).
    #[arg(long)]
    pub selection: Option<String>,
}

impl SelectionArgs {
    fn payload(&self) -> SelectionPayload {
        match &self.selection {
            Some(raw) => SelectionPayload::parse(raw),
            None => {
                let ids: BTreeSet<i64> = self.ids.iter().copied().collect();
                SelectionPayload::Records(
                    ids.into_iter()
                        .map(|id| serde_json::json!({ "id": id }))
                        .collect(),
                )
            }
        }
    }
}

impl Cli {
    /// Reads the `LEDGERBOOK_*` keys through `lookup`, then applies the flags.
    pub fn resolve_config<F>(&self, lookup: F) -> ledgerbook_core::Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::from_vars(lookup)?;
        self.apply_overrides(&mut config);
        Ok(config)
    }

    /// Applies the datastore flags on top of the environment config.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(db_path) = &self.db_path {
            config.db_path = db_path.clone();
            if self.backup_dir.is_none() {
                config.backup_dir = crate::config::default_backup_dir(db_path);
            }
        }
        if let Some(dir) = &self.backup_dir {
            config.backup_dir = dir.clone();
        }
        if let Some(keep) = self.backup_keep {
            config.backups_kept = keep;
        }
    }
}

pub fn run(cli: &Cli, config: &Config, state: &AppState) -> anyhow::Result<()> {
    match &cli.command {
        Command::AddSale(args) => {
            let sale = state.sale_service.create_sale(NewSale {
                sale_date: args.date.unwrap_or_else(today),
                channel: args.channel.clone(),
                category: args.category.clone(),
                quantity: args.quantity,
                total_amount: args.total,
                product_cost: args.cost,
                platform_fee: args.fee,
            })?;
            emit(cli.json, &sale, || render::sale_created(&sale))
        }
        Command::AddExpense(args) => {
            let expense = state.expense_service.create_expense(NewExpense {
                expense_date: args.date.unwrap_or_else(today),
                category: args.category.clone(),
                description: args.description.clone(),
                amount: args.amount,
            })?;
            emit(cli.json, &expense, || render::expense_created(&expense))
        }
        Command::Sales => {
            let rows: Vec<SaleRow> = state
                .sale_service
                .get_sales()?
                .iter()
                .map(SaleRow::from)
                .collect();
            emit(cli.json, &rows, || render::sales_table(&rows))
        }
        Command::Expenses => {
            let rows: Vec<ExpenseRow> = state
                .expense_service
                .get_expenses()?
                .iter()
                .map(ExpenseRow::from)
                .collect();
            emit(cli.json, &rows, || render::expenses_table(&rows))
        }
        Command::Summary => {
            let kpis = state.ledger_service.summary()?;
            emit(cli.json, &kpis, || render::summary(&kpis))
        }
        Command::DeleteSales(args) => {
            let outcome = state
                .ledger_service
                .delete_selected_sales(&args.payload())?;
            report_delete(cli.json, outcome, "sales")
        }
        Command::DeleteExpenses(args) => {
            let outcome = state
                .ledger_service
                .delete_selected_expenses(&args.payload())?;
            report_delete(cli.json, outcome, "expenses")
        }
        Command::Backups => {
            let snapshots = list_snapshots(&config.backup_dir)?;
            emit(cli.json, &snapshots, || render::snapshots(&snapshots))
        }
        Command::Choices => {
            let choices = Choices {
                channels: &SUGGESTED_CHANNELS,
                sale_categories: &SUGGESTED_SALE_CATEGORIES,
                expense_categories: &SUGGESTED_EXPENSE_CATEGORIES,
            };
            emit(cli.json, &choices, || render::choices(&choices))
        }
    }
}

/// Suggested values for the entry forms. Any other value is accepted too.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Choices {
    pub channels: &'static [&'static str],
    pub sale_categories: &'static [&'static str],
    pub expense_categories: &'static [&'static str],
}

fn report_delete(json: bool, outcome: DeleteOutcome, what: &str) -> anyhow::Result<()> {
    if outcome == DeleteOutcome::NothingSelected {
        tracing::warn!("No {} selected; nothing deleted", what);
    }
    emit(json, &outcome, || render::delete_outcome(outcome, what))
}

fn emit<T, F>(json: bool, value: &T, text: F) -> anyhow::Result<()>
where
    T: Serialize + ?Sized,
    F: FnOnce() -> String,
{
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", text());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_flag_becomes_record_selection() {
        let cli = Cli::try_parse_from(["ledgerbook", "delete-sales", "--ids", "3,1,3"]).unwrap();
        let Command::DeleteSales(args) = cli.command else {
            panic!("expected delete-sales");
        };
        let ids = ledgerbook_core::selection::extract_valid_ids(&args.payload());
        assert_eq!(ids.into_iter().collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn test_missing_selection_is_empty() {
        let cli = Cli::try_parse_from(["ledgerbook", "delete-expenses"]).unwrap();
        let Command::DeleteExpenses(args) = cli.command else {
            panic!("expected delete-expenses");
        };
        assert!(ledgerbook_core::selection::extract_valid_ids(&args.payload()).is_empty());
    }

    #[test]
    fn test_ids_and_selection_conflict() {
        let parsed = Cli::try_parse_from([
            "ledgerbook",
            "delete-sales",
            "--ids",
            "1",
            "--selection",
            "[]",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_db_path_flag_moves_default_backup_dir() {
        let cli = Cli::try_parse_from(["ledgerbook", "--db-path", "/srv/shop.db", "summary"]).unwrap();
        let mut config = Config::from_vars(|_| None).unwrap();
        cli.apply_overrides(&mut config);

        assert_eq!(config.db_path, "/srv/shop.db");
        assert_eq!(config.backup_dir, PathBuf::from("/srv/backups"));
    }

    #[test]
    fn test_environment_is_read_once_after_parsing() {
        let vars = |key: &str| match key {
            "LEDGERBOOK_BACKUP_KEEP" => Some(" 10 ".to_string()),
            _ => None,
        };

        let cli = Cli::try_parse_from(["ledgerbook", "summary"]).unwrap();
        assert_eq!(cli.resolve_config(vars).unwrap().backups_kept, 10);

        let cli = Cli::try_parse_from(["ledgerbook", "--backup-keep", "5", "summary"]).unwrap();
        assert_eq!(cli.resolve_config(vars).unwrap().backups_kept, 5);
    }

    #[test]
    fn test_bad_environment_fails_config_not_parsing() {
        let vars = |key: &str| match key {
            "LEDGERBOOK_POOL_SIZE" => Some("many".to_string()),
            _ => None,
        };

        let cli = Cli::try_parse_from(["ledgerbook", "sales"]).unwrap();
        assert!(cli.resolve_config(vars).is_err());
    }

    #[test]
    fn test_add_sale_parses_amounts() {
        let cli = Cli::try_parse_from([
            "ledgerbook",
            "add-sale",
            "--date",
            "2024-03-01",
            "--channel",
            "Shopee",
            "--category",
            "Outros",
            "--total",
            "120.5",
        ])
        .unwrap();
        let Command::AddSale(args) = cli.command else {
            panic!("expected add-sale");
        };
        assert_eq!(args.date, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(args.quantity, 1);
        assert_eq!(args.total, Some(120.5));
        assert_eq!(args.fee, None);
    }
}
