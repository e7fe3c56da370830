pub mod time_utils;

pub use time_utils::{parse_ledger_date, today, LEDGER_DATE_FORMAT};
