use std::collections::BTreeSet;
use std::sync::Arc;

use log::{debug, info};

use super::sales_model::{NewSale, Sale};
use super::sales_traits::{SaleRepositoryTrait, SaleServiceTrait};
use crate::aggregator::SettlementPolicy;
use crate::errors::Result;
use crate::ledger::DeleteOutcome;

pub struct SaleService {
    repository: Arc<dyn SaleRepositoryTrait>,
    settlement: SettlementPolicy,
}

impl SaleService {
    pub fn new(repository: Arc<dyn SaleRepositoryTrait>, settlement: SettlementPolicy) -> Self {
        SaleService {
            repository,
            settlement,
        }
    }

    pub fn settlement_policy(&self) -> &SettlementPolicy {
        &self.settlement
    }
}

impl SaleServiceTrait for SaleService {
    fn create_sale(&self, new_sale: NewSale) -> Result<Sale> {
        let record = new_sale.into_record(&self.settlement)?;
        debug!(
            "Recording sale on {} via '{}' (gross profit {}, receipt {})",
            record.sale_date, record.channel, record.gross_profit, record.receipt_date
        );
        let sale = self.repository.insert_sale(record)?;
        info!("Sale {} recorded", sale.id);
        Ok(sale)
    }

    fn get_sales(&self) -> Result<Vec<Sale>> {
        self.repository.load_sales()
    }

    fn delete_sales(&self, ids: &BTreeSet<i64>) -> Result<DeleteOutcome> {
        if ids.is_empty() {
            debug!("Sale delete requested with nothing selected");
            return Ok(DeleteOutcome::NothingSelected);
        }
        let deleted = self.repository.delete_sales(ids)?;
        info!("Deleted {} of {} selected sales", deleted, ids.len());
        Ok(DeleteOutcome::Deleted(deleted))
    }
}
