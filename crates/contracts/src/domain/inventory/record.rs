use serde::{Deserialize, Serialize};

/// Строка файла остатков поставщика.
///
/// Значения хранятся так, как они записаны в таблице: `"Код"`, `"Количество"`, `"Цена"`.
/// Нормализация выполняется при построении обновлений для маркетплейса.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub code: String,
    pub quantity_raw: String,
    pub price_raw: String,
}

impl InventoryRecord {
    pub fn new(
        code: impl Into<String>,
        quantity_raw: impl Into<String>,
        price_raw: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            quantity_raw: quantity_raw.into(),
            price_raw: price_raw.into(),
        }
    }
}
