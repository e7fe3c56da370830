//! SQLite storage implementation for sales.

mod model;
mod repository;

pub use model::{NewSaleDB, SaleDB};
pub use repository::SaleRepository;
