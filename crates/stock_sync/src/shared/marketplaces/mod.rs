use async_trait::async_trait;
use contracts::domain::inventory::{PriceUpdate, StockUpdate};
use contracts::enums::marketplace_type::MarketplaceType;

use super::error::SyncResult;

/// Аккаунт (кампания) маркетплейса, в который выгружаются остатки и цены
#[async_trait]
pub trait MarketplaceAccount: Send + Sync {
    fn marketplace(&self) -> MarketplaceType;

    /// Название для логов и отчёта
    fn label(&self) -> String;

    fn stock_batch_size(&self) -> usize;

    fn price_batch_size(&self) -> usize;

    /// Все артикулы (offer_id), известные маркетплейсу, в порядке каталога
    async fn fetch_offer_ids(&self) -> SyncResult<Vec<String>>;

    /// Один вызов API на пакет остатков
    async fn push_stocks(&self, batch: &[StockUpdate]) -> SyncResult<()>;

    /// Один вызов API на пакет цен
    async fn push_prices(&self, batch: &[PriceUpdate]) -> SyncResult<()>;
}
