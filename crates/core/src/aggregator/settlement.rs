use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::constants::{MARKETPLACE_SETTLEMENT_DAYS, MARKETPLACE_SETTLEMENT_MARKER};

/// Rule mapping a sales channel to the days until its payout arrives.
///
/// A channel whose name contains `marker` settles after `delay_days`; every
/// other channel settles on the sale date. The match is a substring match, so
/// "Shopee Brasil" and "Loja Shopee" both get the delay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementPolicy {
    pub marker: String,
    pub delay_days: u32,
}

impl Default for SettlementPolicy {
    fn default() -> Self {
        Self {
            marker: MARKETPLACE_SETTLEMENT_MARKER.to_string(),
            delay_days: MARKETPLACE_SETTLEMENT_DAYS,
        }
    }
}

impl SettlementPolicy {
    pub fn new(marker: impl Into<String>, delay_days: u32) -> Self {
        Self {
            marker: marker.into(),
            delay_days,
        }
    }

    /// Settlement delay for `channel`, in days.
    pub fn delay_for(&self, channel: &str) -> u32 {
        if !self.marker.is_empty() && channel.contains(&self.marker) {
            self.delay_days
        } else {
            0
        }
    }

    /// Expected receipt date for a sale made on `sale_date` through `channel`.
    ///
    /// Saturates at the sale date itself if the offset leaves chrono's range.
    pub fn receipt_date(&self, sale_date: NaiveDate, channel: &str) -> NaiveDate {
        sale_date
            .checked_add_days(Days::new(u64::from(self.delay_for(channel))))
            .unwrap_or(sale_date)
    }
}

/// Fields of a sale that are computed, never entered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleDerived {
    pub gross_profit: f64,
    pub receipt_date: NaiveDate,
}

/// Computes gross profit and expected receipt date for a sale.
///
/// `gross_profit = total_amount - product_cost - platform_fee`, evaluated left
/// to right with no rounding.
pub fn compute_sale_derived(
    policy: &SettlementPolicy,
    sale_date: NaiveDate,
    channel: &str,
    total_amount: f64,
    product_cost: f64,
    platform_fee: f64,
) -> SaleDerived {
    SaleDerived {
        gross_profit: total_amount - product_cost - platform_fee,
        receipt_date: policy.receipt_date(sale_date, channel),
    }
}
