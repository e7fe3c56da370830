//! Ledger module - the combined sales and expense view used by the dashboard.

mod ledger_model;
mod ledger_service;


pub use ledger_model::{Dashboard, DeleteOutcome};
pub use ledger_service::{LedgerService, LedgerServiceTrait};
