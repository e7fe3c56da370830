/// Channel marker that triggers the marketplace settlement delay
pub const MARKETPLACE_SETTLEMENT_MARKER: &str = "Shopee";

/// Days between a marketplace sale and its payout
pub const MARKETPLACE_SETTLEMENT_DAYS: u32 = 7;

/// Number of datastore snapshots kept after a rotation
pub const DEFAULT_BACKUPS_KEPT: usize = 3;

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: usize = 2;

/// Sales channels offered by the entry form
pub const SUGGESTED_CHANNELS: [&str; 4] = ["Shopee", "Mercado Livre", "Venda Direta", "WhatsApp"];

/// Sale categories offered by the entry form
pub const SUGGESTED_SALE_CATEGORIES: [&str; 4] =
    ["Tênis Infantil", "Tênis Bebê", "Tênis Adulto", "Outros"];

/// Expense categories offered by the entry form
pub const SUGGESTED_EXPENSE_CATEGORIES: [&str; 4] = ["Logística", "Ads", "Embalagem", "Outros"];
