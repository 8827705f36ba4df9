use serde::{Deserialize, Serialize};

/// Типы маркетплейсов
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketplaceType {
    Ozon,
    YandexMarket,
}

impl MarketplaceType {
    /// Получить человекочитаемое название
    pub fn display_name(&self) -> &'static str {
        match self {
            MarketplaceType::Ozon => "Ozon",
            MarketplaceType::YandexMarket => "Яндекс Маркет",
        }
    }

    /// Код валюты, который маркетплейс ожидает в обновлении цен
    pub fn currency_code(&self) -> &'static str {
        match self {
            MarketplaceType::Ozon => "RUB",
            MarketplaceType::YandexMarket => "RUR",
        }
    }

    pub fn all() -> Vec<MarketplaceType> {
        vec![MarketplaceType::Ozon, MarketplaceType::YandexMarket]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_in_processing_order() {
        assert_eq!(
            MarketplaceType::all(),
            vec![MarketplaceType::Ozon, MarketplaceType::YandexMarket]
        );
        assert_eq!(MarketplaceType::YandexMarket.display_name(), "Яндекс Маркет");
    }

    #[test]
    fn test_currency_codes() {
        assert_eq!(MarketplaceType::Ozon.currency_code(), "RUB");
        assert_eq!(MarketplaceType::YandexMarket.currency_code(), "RUR");
    }
}
