use serde::{Deserialize, Serialize};

/// Схема работы кампании Яндекс Маркета
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FulfillmentMode {
    /// Склад продавца, доставка маркетплейсом
    Fbs,
    /// Склад и доставка продавца
    Dbs,
}

impl FulfillmentMode {
    pub fn code(&self) -> &'static str {
        match self {
            FulfillmentMode::Fbs => "FBS",
            FulfillmentMode::Dbs => "DBS",
        }
    }
}
