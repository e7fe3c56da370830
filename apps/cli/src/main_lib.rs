use std::path::Path;
use std::sync::Arc;

use ledgerbook_core::aggregator::SettlementPolicy;
use ledgerbook_core::expenses::{ExpenseService, ExpenseServiceTrait};
use ledgerbook_core::ledger::{LedgerService, LedgerServiceTrait};
use ledgerbook_core::sales::{SaleService, SaleServiceTrait};
use ledgerbook_storage_sqlite::{
    rotate, ExpenseRepository, LedgerDatabase, LogBackupEventSink, RotationOutcome,
    SaleRepository,
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::Config;

pub struct AppState {
    pub sale_service: Arc<dyn SaleServiceTrait>,
    pub expense_service: Arc<dyn ExpenseServiceTrait>,
    pub ledger_service: Arc<dyn LedgerServiceTrait>,
}

pub fn init_tracing() {
    let log_format = std::env::var("LEDGERBOOK_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false).with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

/// Rotates snapshots of the datastore, then opens it and wires the services.
///
/// Rotation runs before the first connection so the copied file is complete.
pub fn build_state(config: &Config) -> anyhow::Result<AppState> {
    let outcome = rotate(
        Path::new(&config.db_path),
        &config.backup_dir,
        config.backups_kept,
        &LogBackupEventSink,
    );
    if let RotationOutcome::Failed { .. } = outcome {
        tracing::warn!("Continuing startup without a fresh snapshot");
    }

    let db = LedgerDatabase::open(&config.db_path, config.pool_size)?;
    tracing::info!("Ledger ready at {}", db.db_path());

    let sale_repository = Arc::new(SaleRepository::new(db.pool(), db.writer()));
    let expense_repository = Arc::new(ExpenseRepository::new(db.pool(), db.writer()));

    let sale_service: Arc<dyn SaleServiceTrait> = Arc::new(SaleService::new(
        sale_repository,
        SettlementPolicy::default(),
    ));
    let expense_service: Arc<dyn ExpenseServiceTrait> =
        Arc::new(ExpenseService::new(expense_repository));
    let ledger_service: Arc<dyn LedgerServiceTrait> = Arc::new(LedgerService::new(
        sale_service.clone(),
        expense_service.clone(),
    ));

    Ok(AppState {
        sale_service,
        expense_service,
        ledger_service,
    })
}
