use async_trait::async_trait;
use contracts::domain::inventory::{PriceUpdate, StockUpdate};
use contracts::enums::marketplace_type::MarketplaceType;

use super::ozon_api_client::OzonApiClient;
use crate::shared::error::SyncResult;
use crate::shared::marketplaces::MarketplaceAccount;

#[async_trait]
impl MarketplaceAccount for OzonApiClient {
    fn marketplace(&self) -> MarketplaceType {
        MarketplaceType::Ozon
    }

    fn label(&self) -> String {
        "Ozon".to_string()
    }

    fn stock_batch_size(&self) -> usize {
        self.endpoint.stock_batch_size
    }

    fn price_batch_size(&self) -> usize {
        self.endpoint.price_batch_size
    }

    /// Обход каталога по last_id, пока не набрано `total` позиций.
    /// Пустая страница или пустой курсор тоже завершают обход.
    async fn fetch_offer_ids(&self) -> SyncResult<Vec<String>> {
        let mut last_id = String::new();
        let mut offer_ids: Vec<String> = Vec::new();

        loop {
            let page = self.fetch_product_list(&last_id).await?.result;
            let received = page.items.len();
            offer_ids.extend(page.items.into_iter().map(|item| item.offer_id));

            if offer_ids.len() >= page.total || received == 0 || page.last_id.is_empty() {
                break;
            }
            last_id = page.last_id;
        }

        tracing::info!("OZON catalog: {} offers", offer_ids.len());
        Ok(offer_ids)
    }

    async fn push_stocks(&self, batch: &[StockUpdate]) -> SyncResult<()> {
        self.update_stocks(batch).await.map(|_| ())
    }

    async fn push_prices(&self, batch: &[PriceUpdate]) -> SyncResult<()> {
        self.update_prices(batch).await.map(|_| ())
    }
}
