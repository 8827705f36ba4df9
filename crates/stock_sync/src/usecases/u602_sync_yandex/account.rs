use std::sync::Arc;

use async_trait::async_trait;
use contracts::domain::inventory::{PriceUpdate, StockUpdate};
use contracts::enums::marketplace_type::MarketplaceType;

use super::yandex_api_client::YandexApiClient;
use crate::shared::config::{
    HttpConfig, MarketplaceEndpointConfig, YandexCampaign, YandexCredentials,
};
use crate::shared::error::SyncResult;
use crate::shared::marketplaces::MarketplaceAccount;

/// Кампания Яндекс Маркета (FBS или DBS) со своим складом
pub struct YandexCampaignAccount {
    api: Arc<YandexApiClient>,
    campaign: YandexCampaign,
}

impl YandexCampaignAccount {
    pub fn new(api: Arc<YandexApiClient>, campaign: YandexCampaign) -> Self {
        Self { api, campaign }
    }

    /// Аккаунты обеих кампаний поверх одного клиента, в порядке FBS, DBS
    pub fn for_credentials(
        credentials: &YandexCredentials,
        endpoint: MarketplaceEndpointConfig,
        http: &HttpConfig,
    ) -> SyncResult<Vec<Self>> {
        let api = Arc::new(YandexApiClient::new(
            credentials.token.clone(),
            endpoint,
            http,
        )?);
        Ok(credentials
            .campaigns()
            .into_iter()
            .map(|campaign| Self::new(Arc::clone(&api), campaign.clone()))
            .collect())
    }
}

#[async_trait]
impl MarketplaceAccount for YandexCampaignAccount {
    fn marketplace(&self) -> MarketplaceType {
        MarketplaceType::YandexMarket
    }

    fn label(&self) -> String {
        format!(
            "Yandex {} (campaign {})",
            self.campaign.mode.code(),
            self.campaign.campaign_id
        )
    }

    fn stock_batch_size(&self) -> usize {
        self.api.endpoint.stock_batch_size
    }

    fn price_batch_size(&self) -> usize {
        self.api.endpoint.price_batch_size
    }

    /// Обход каталога по page_token, пока сервер возвращает следующий токен
    async fn fetch_offer_ids(&self) -> SyncResult<Vec<String>> {
        let mut page_token: Option<String> = None;
        let mut offer_ids: Vec<String> = Vec::new();

        loop {
            let page = self
                .api
                .fetch_offer_mapping_entries(&self.campaign.campaign_id, page_token.as_deref())
                .await?
                .result;
            offer_ids.extend(
                page.offer_mapping_entries
                    .into_iter()
                    .filter_map(|entry| entry.offer.shop_sku),
            );

            match page.paging.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        tracing::info!("{} catalog: {} offers", self.label(), offer_ids.len());
        Ok(offer_ids)
    }

    async fn push_stocks(&self, batch: &[StockUpdate]) -> SyncResult<()> {
        self.api.update_stocks(&self.campaign, batch).await.map(|_| ())
    }

    async fn push_prices(&self, batch: &[PriceUpdate]) -> SyncResult<()> {
        self.api
            .update_prices(&self.campaign.campaign_id, batch)
            .await
            .map(|_| ())
    }
}
