//! Financial aggregation - derived sale fields and dashboard KPIs.

mod settlement;
mod summary;


pub use settlement::{compute_sale_derived, SaleDerived, SettlementPolicy};
pub use summary::{compute_summary, format_amount, KpiSet};
