use chrono::{DateTime, Utc};
use contracts::domain::inventory::{PriceUpdate, StockUpdate};
use contracts::enums::marketplace_type::MarketplaceType;
use serde::{Deserialize, Serialize};

use crate::shared::config::{HttpConfig, MarketplaceEndpointConfig, YandexCampaign};
use crate::shared::error::SyncResult;
use crate::shared::http::{build_client, parse_json, read_body};
use crate::shared::request_log::RequestLog;

/// HTTP-клиент для работы с Yandex Market Partner API.
/// Один клиент обслуживает обе кампании (FBS и DBS).
pub struct YandexApiClient {
    client: reqwest::Client,
    token: String,
    pub(super) endpoint: MarketplaceEndpointConfig,
    log: RequestLog,
}

impl YandexApiClient {
    pub fn new(
        token: String,
        endpoint: MarketplaceEndpointConfig,
        http: &HttpConfig,
    ) -> SyncResult<Self> {
        Ok(Self {
            client: build_client(http.timeout())?,
            token,
            endpoint,
            log: RequestLog::new(http.request_log_dir().as_deref(), "yandex_api_requests.log"),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint.base_url.trim_end_matches('/'), path)
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("Authorization", format!("Bearer {}", &self.token))
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
    }

    /// Получить страницу каталога кампании
    /// Endpoint: GET /campaigns/{campaignId}/offer-mapping-entries
    pub async fn fetch_offer_mapping_entries(
        &self,
        campaign_id: &str,
        page_token: Option<&str>,
    ) -> SyncResult<YandexOfferMappingResponse> {
        let url = self.url(&format!("/campaigns/{}/offer-mapping-entries", campaign_id));

        #[derive(Serialize)]
        struct YandexListQueryParams<'a> {
            limit: usize,
            #[serde(skip_serializing_if = "Option::is_none")]
            page_token: Option<&'a str>,
        }

        let query = YandexListQueryParams {
            limit: self.endpoint.page_limit,
            page_token,
        };

        self.log.write(&format!(
            "=== REQUEST ===\nGET {}\nAuthorization: Bearer ****\nQuery: limit={}, page_token={:?}",
            url, query.limit, query.page_token
        ));

        let response = self
            .authorized(self.client.get(&url))
            .query(&query)
            .send()
            .await?;

        let body = read_body(response, &self.log).await.inspect_err(|e| {
            tracing::error!("Yandex Market API request failed: {}", e);
        })?;
        let data: YandexOfferMappingResponse = parse_json(&body, "Yandex Market API", &self.log)?;
        tracing::debug!(
            "Yandex API response: {} items, nextPageToken: {:?}",
            data.result.offer_mapping_entries.len(),
            data.result.paging.next_page_token
        );
        Ok(data)
    }

    /// Обновить остатки на складе кампании
    /// Endpoint: PUT /campaigns/{campaignId}/offers/stocks
    pub async fn update_stocks(
        &self,
        campaign: &YandexCampaign,
        stocks: &[StockUpdate],
    ) -> SyncResult<YandexStatusResponse> {
        let url = self.url(&format!("/campaigns/{}/offers/stocks", campaign.campaign_id));
        let request_body = YandexStocksRequest {
            skus: stocks
                .iter()
                .map(|s| YandexSkuStock::new(s, campaign.warehouse_id))
                .collect(),
        };
        let body = serde_json::to_string(&request_body)?;
        self.log.write(&format!(
            "=== REQUEST ===\nPUT {}\nAuthorization: Bearer ****\nBody: {}",
            url, body
        ));

        let response = self
            .authorized(self.client.put(&url))
            .body(body)
            .send()
            .await?;
        self.finish_update(response, "stocks").await
    }

    /// Обновить цены кампании
    /// Endpoint: POST /campaigns/{campaignId}/offer-prices/updates
    pub async fn update_prices(
        &self,
        campaign_id: &str,
        prices: &[PriceUpdate],
    ) -> SyncResult<YandexStatusResponse> {
        let url = self.url(&format!("/campaigns/{}/offer-prices/updates", campaign_id));
        let request_body = YandexPricesRequest {
            offers: prices.iter().map(YandexOfferPrice::from).collect(),
        };
        let body = serde_json::to_string(&request_body)?;
        self.log.write(&format!(
            "=== REQUEST ===\nPOST {}\nAuthorization: Bearer ****\nBody: {}",
            url, body
        ));

        let response = self
            .authorized(self.client.post(&url))
            .body(body)
            .send()
            .await?;
        self.finish_update(response, "prices").await
    }

    async fn finish_update(
        &self,
        response: reqwest::Response,
        what: &str,
    ) -> SyncResult<YandexStatusResponse> {
        let body = read_body(response, &self.log).await.inspect_err(|e| {
            tracing::error!("Yandex Market {} update failed: {}", what, e);
        })?;
        if body.trim().is_empty() {
            return Ok(YandexStatusResponse::default());
        }
        let data: YandexStatusResponse = parse_json(&body, "Yandex Market API", &self.log)?;
        if let Some(status) = data.status.as_deref().filter(|s| *s != "OK") {
            tracing::warn!("Yandex Market {} update returned status {}", what, status);
        }
        Ok(data)
    }
}

/// Формат updatedAt: UTC с точностью до секунды
pub fn format_updated_at(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

// ============================================================================
// Offer mapping entries structures
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YandexOfferMappingResponse {
    pub result: YandexOfferMappingResult,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YandexOfferMappingResult {
    #[serde(default)]
    pub paging: YandexPaging,
    #[serde(default)]
    pub offer_mapping_entries: Vec<YandexOfferMappingEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YandexPaging {
    #[serde(default)]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YandexOfferMappingEntry {
    pub offer: YandexOffer,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YandexOffer {
    #[serde(default)]
    pub shop_sku: Option<String>,
}

// ============================================================================
// Stock / price update structures
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YandexStocksRequest {
    pub skus: Vec<YandexSkuStock>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YandexSkuStock {
    pub sku: String,
    pub warehouse_id: i64,
    pub items: Vec<YandexStockItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YandexStockItem {
    pub count: i64,
    #[serde(rename = "type")]
    pub stock_type: String,
    pub updated_at: String,
}

impl YandexSkuStock {
    pub fn new(update: &StockUpdate, warehouse_id: i64) -> Self {
        Self {
            sku: update.offer_id.clone(),
            warehouse_id,
            items: vec![YandexStockItem {
                count: update.quantity,
                stock_type: "FIT".to_string(),
                updated_at: format_updated_at(update.updated_at),
            }],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YandexPricesRequest {
    pub offers: Vec<YandexOfferPrice>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YandexOfferPrice {
    pub id: String,
    pub price: YandexPrice,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YandexPrice {
    pub value: i64,
    pub currency_id: String,
}

impl From<&PriceUpdate> for YandexOfferPrice {
    fn from(update: &PriceUpdate) -> Self {
        Self {
            id: update.offer_id.clone(),
            price: YandexPrice {
                value: update.value,
                currency_id: MarketplaceType::YandexMarket.currency_code().to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct YandexStatusResponse {
    #[serde(default)]
    pub status: Option<String>,
}
