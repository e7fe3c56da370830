//! Sales domain models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::aggregator::{compute_sale_derived, SettlementPolicy};
use crate::errors::{Result, ValidationError};

/// Domain model representing a recorded sale
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: i64,
    pub sale_date: NaiveDate,
    pub channel: String,
    pub category: String,
    pub quantity: i32,
    pub total_amount: f64,
    pub product_cost: f64,
    pub platform_fee: f64,
    pub gross_profit: f64,
    /// `None` only for legacy rows whose stored receipt date is unreadable.
    pub receipt_date: Option<NaiveDate>,
}

/// Input model for recording a new sale, as collected by the entry form.
///
/// Amounts left out are recorded as zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewSale {
    pub sale_date: NaiveDate,
    pub channel: String,
    pub category: String,
    pub quantity: i32,
    #[serde(default)]
    pub total_amount: Option<f64>,
    #[serde(default)]
    pub product_cost: Option<f64>,
    #[serde(default)]
    pub platform_fee: Option<f64>,
}

/// A validated sale with its derived fields, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleRecord {
    pub sale_date: NaiveDate,
    pub channel: String,
    pub category: String,
    pub quantity: i32,
    pub total_amount: f64,
    pub product_cost: f64,
    pub platform_fee: f64,
    pub gross_profit: f64,
    pub receipt_date: NaiveDate,
}

/// Display projection of a sale for the sales table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SaleRow {
    pub id: i64,
    pub sale_date: NaiveDate,
    pub channel: String,
    pub category: String,
    pub quantity: i32,
    pub total_amount: f64,
    pub gross_profit: f64,
}

impl NewSale {
    pub fn validate(&self) -> Result<()> {
        if self.quantity < 1 {
            return Err(ValidationError::InvalidInput(format!(
                "Sale quantity must be at least 1, got {}",
                self.quantity
            ))
            .into());
        }
        for (field, value) in [
            ("totalAmount", self.total_amount),
            ("productCost", self.product_cost),
            ("platformFee", self.platform_fee),
        ] {
            if let Some(v) = value {
                if !v.is_finite() {
                    return Err(ValidationError::InvalidInput(format!(
                        "Sale {} must be a finite number",
                        field
                    ))
                    .into());
                }
            }
        }
        Ok(())
    }

    /// Validates the input and computes gross profit and receipt date.
    pub fn into_record(self, policy: &SettlementPolicy) -> Result<SaleRecord> {
        self.validate()?;

        let total_amount = self.total_amount.unwrap_or(0.0);
        let product_cost = self.product_cost.unwrap_or(0.0);
        let platform_fee = self.platform_fee.unwrap_or(0.0);
        let derived = compute_sale_derived(
            policy,
            self.sale_date,
            &self.channel,
            total_amount,
            product_cost,
            platform_fee,
        );

        Ok(SaleRecord {
            sale_date: self.sale_date,
            channel: self.channel,
            category: self.category,
            quantity: self.quantity,
            total_amount,
            product_cost,
            platform_fee,
            gross_profit: derived.gross_profit,
            receipt_date: derived.receipt_date,
        })
    }
}

impl From<&Sale> for SaleRow {
    fn from(sale: &Sale) -> Self {
        Self {
            id: sale.id,
            sale_date: sale.sale_date,
            channel: sale.channel.clone(),
            category: sale.category.clone(),
            quantity: sale.quantity,
            total_amount: sale.total_amount,
            gross_profit: sale.gross_profit,
        }
    }
}
