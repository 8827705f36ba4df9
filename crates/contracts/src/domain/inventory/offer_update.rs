use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Остаток по одному предложению маркетплейса
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockUpdate {
    pub offer_id: String,
    pub quantity: i64,
    /// Момент формирования пакета остатков (один на весь расчёт)
    pub updated_at: DateTime<Utc>,
}

impl StockUpdate {
    pub fn is_in_stock(&self) -> bool {
        self.quantity != 0
    }
}

/// Цена по одному предложению маркетплейса, в целых рублях
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceUpdate {
    pub offer_id: String,
    pub value: i64,
}
