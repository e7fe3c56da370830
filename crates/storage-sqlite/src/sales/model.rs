//! Database models for sales.

use diesel::prelude::*;
use ledgerbook_core::errors::ValidationError;
use ledgerbook_core::sales::{Sale, SaleRecord};
use ledgerbook_core::utils::{parse_ledger_date, LEDGER_DATE_FORMAT};

/// Database model for sales (`vendas` table)
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::vendas)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SaleDB {
    pub id: i64,
    #[diesel(column_name = data_venda)]
    pub sale_date: Option<String>,
    #[diesel(column_name = plataforma)]
    pub channel: Option<String>,
    #[diesel(column_name = categoria)]
    pub category: Option<String>,
    #[diesel(column_name = qtd_itens)]
    pub quantity: Option<i32>,
    #[diesel(column_name = valor_total_venda)]
    pub total_amount: Option<f64>,
    #[diesel(column_name = custo_total_produtos)]
    pub product_cost: Option<f64>,
    #[diesel(column_name = taxa_plataforma_total)]
    pub platform_fee: Option<f64>,
    #[diesel(column_name = lucro_bruto)]
    pub gross_profit: Option<f64>,
    #[diesel(column_name = data_recebimento)]
    pub receipt_date: Option<String>,
}

/// Database model for inserting a sale; the id is assigned by SQLite.
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::vendas)]
pub struct NewSaleDB {
    #[diesel(column_name = data_venda)]
    pub sale_date: String,
    #[diesel(column_name = plataforma)]
    pub channel: String,
    #[diesel(column_name = categoria)]
    pub category: String,
    #[diesel(column_name = qtd_itens)]
    pub quantity: i32,
    #[diesel(column_name = valor_total_venda)]
    pub total_amount: f64,
    #[diesel(column_name = custo_total_produtos)]
    pub product_cost: f64,
    #[diesel(column_name = taxa_plataforma_total)]
    pub platform_fee: f64,
    #[diesel(column_name = lucro_bruto)]
    pub gross_profit: f64,
    #[diesel(column_name = data_recebimento)]
    pub receipt_date: String,
}

impl From<SaleRecord> for NewSaleDB {
    fn from(record: SaleRecord) -> Self {
        Self {
            sale_date: record.sale_date.format(LEDGER_DATE_FORMAT).to_string(),
            channel: record.channel,
            category: record.category,
            quantity: record.quantity,
            total_amount: record.total_amount,
            product_cost: record.product_cost,
            platform_fee: record.platform_fee,
            gross_profit: record.gross_profit,
            receipt_date: record.receipt_date.format(LEDGER_DATE_FORMAT).to_string(),
        }
    }
}

// Conversion to domain model. Fails only when the sale date is unreadable.
impl TryFrom<SaleDB> for Sale {
    type Error = ValidationError;

    fn try_from(db: SaleDB) -> Result<Self, Self::Error> {
        let raw_date = db
            .sale_date
            .ok_or_else(|| ValidationError::MissingField("data_venda".to_string()))?;
        let sale_date = parse_ledger_date(&raw_date).ok_or_else(|| {
            ValidationError::InvalidInput(format!("Unreadable sale date '{}'", raw_date))
        })?;

        Ok(Self {
            id: db.id,
            sale_date,
            channel: db.channel.unwrap_or_default(),
            category: db.category.unwrap_or_default(),
            quantity: db.quantity.unwrap_or_default(),
            total_amount: db.total_amount.unwrap_or_default(),
            product_cost: db.product_cost.unwrap_or_default(),
            platform_fee: db.platform_fee.unwrap_or_default(),
            gross_profit: db.gross_profit.unwrap_or_default(),
            receipt_date: db.receipt_date.as_deref().and_then(parse_ledger_date),
        })
    }
}
