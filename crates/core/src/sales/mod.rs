//! Sales module - domain models, services, and traits.

mod sales_model;
mod sales_service;
mod sales_traits;


pub use sales_model::{NewSale, Sale, SaleRecord, SaleRow};
pub use sales_service::SaleService;
pub use sales_traits::{SaleRepositoryTrait, SaleServiceTrait};
