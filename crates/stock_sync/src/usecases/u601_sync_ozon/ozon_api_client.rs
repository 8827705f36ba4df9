use contracts::domain::inventory::{PriceUpdate, StockUpdate};
use contracts::enums::marketplace_type::MarketplaceType;
use serde::{Deserialize, Serialize};

use crate::shared::config::{HttpConfig, MarketplaceEndpointConfig, OzonCredentials};
use crate::shared::error::SyncResult;
use crate::shared::http::{build_client, parse_json, read_body};
use crate::shared::request_log::RequestLog;

/// HTTP-клиент для работы с OZON Seller API
pub struct OzonApiClient {
    client: reqwest::Client,
    credentials: OzonCredentials,
    pub(super) endpoint: MarketplaceEndpointConfig,
    log: RequestLog,
}

impl OzonApiClient {
    pub fn new(
        credentials: OzonCredentials,
        endpoint: MarketplaceEndpointConfig,
        http: &HttpConfig,
    ) -> SyncResult<Self> {
        Ok(Self {
            client: build_client(http.timeout())?,
            credentials,
            endpoint,
            log: RequestLog::new(http.request_log_dir().as_deref(), "ozon_api_requests.log"),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint.base_url.trim_end_matches('/'), path)
    }

    /// POST с JSON-телом и заголовками Client-Id / Api-Key
    async fn post<B: Serialize>(&self, path: &str, request_body: &B) -> SyncResult<String> {
        let url = self.url(path);
        let body = serde_json::to_string(request_body)?;
        self.log.write(&format!(
            "=== REQUEST ===\nPOST {}\nClient-Id: {}\nApi-Key: ****\nBody: {}",
            url, self.credentials.client_id, body
        ));

        let response = self
            .client
            .post(&url)
            .header("Client-Id", &self.credentials.client_id)
            .header("Api-Key", &self.credentials.api_key)
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await?;

        read_body(response, &self.log).await.inspect_err(|e| {
            tracing::error!("OZON API request {} failed: {}", path, e);
        })
    }

    /// Получить страницу каталога через POST /v2/product/list
    /// Курсорная пагинация через last_id
    pub async fn fetch_product_list(&self, last_id: &str) -> SyncResult<OzonProductListResponse> {
        let request_body = OzonProductListRequest {
            filter: OzonProductListFilter {
                visibility: "ALL".to_string(),
            },
            last_id: last_id.to_string(),
            limit: self.endpoint.page_limit,
        };

        let body = self.post("/v2/product/list", &request_body).await?;
        let data: OzonProductListResponse = parse_json(&body, "OZON API", &self.log)?;
        tracing::debug!(
            "OZON product list: {} items, total: {}, last_id: {}",
            data.result.items.len(),
            data.result.total,
            data.result.last_id
        );
        Ok(data)
    }

    /// Обновить остатки через POST /v1/product/import/stocks
    pub async fn update_stocks(&self, stocks: &[StockUpdate]) -> SyncResult<OzonImportResponse> {
        let request_body = OzonStocksRequest {
            stocks: stocks.iter().map(OzonStockItem::from).collect(),
        };
        let body = self.post("/v1/product/import/stocks", &request_body).await?;
        let data: OzonImportResponse = parse_json(&body, "OZON API", &self.log)?;
        data.warn_rejected("stocks");
        Ok(data)
    }

    /// Обновить цены через POST /v1/product/import/prices
    pub async fn update_prices(&self, prices: &[PriceUpdate]) -> SyncResult<OzonImportResponse> {
        let request_body = OzonPricesRequest {
            prices: prices.iter().map(OzonPriceItem::from).collect(),
        };
        let body = self.post("/v1/product/import/prices", &request_body).await?;
        let data: OzonImportResponse = parse_json(&body, "OZON API", &self.log)?;
        data.warn_rejected("prices");
        Ok(data)
    }
}

// ============================================================================
// Product list v2 structures
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OzonProductListRequest {
    pub filter: OzonProductListFilter,
    pub last_id: String,
    pub limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OzonProductListFilter {
    pub visibility: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OzonProductListResponse {
    pub result: OzonProductListResult,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OzonProductListResult {
    #[serde(default)]
    pub items: Vec<OzonProductListItem>,
    #[serde(default)]
    pub total: usize,
    #[serde(default)]
    pub last_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OzonProductListItem {
    #[serde(default)]
    pub product_id: Option<i64>,
    pub offer_id: String,
}

// ============================================================================
// Import structures (stocks / prices)
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OzonStocksRequest {
    pub stocks: Vec<OzonStockItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OzonStockItem {
    pub offer_id: String,
    pub stock: i64,
}

impl From<&StockUpdate> for OzonStockItem {
    fn from(update: &StockUpdate) -> Self {
        Self {
            offer_id: update.offer_id.clone(),
            stock: update.quantity,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OzonPricesRequest {
    pub prices: Vec<OzonPriceItem>,
}

/// Цены в Seller API передаются строками
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OzonPriceItem {
    pub auto_action_enabled: String,
    pub currency_code: String,
    pub offer_id: String,
    pub old_price: String,
    pub price: String,
}

impl From<&PriceUpdate> for OzonPriceItem {
    fn from(update: &PriceUpdate) -> Self {
        Self {
            auto_action_enabled: "UNKNOWN".to_string(),
            currency_code: MarketplaceType::Ozon.currency_code().to_string(),
            offer_id: update.offer_id.clone(),
            old_price: "0".to_string(),
            price: update.value.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OzonImportResponse {
    #[serde(default)]
    pub result: Vec<OzonImportResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OzonImportResult {
    #[serde(default)]
    pub offer_id: String,
    #[serde(default)]
    pub product_id: Option<i64>,
    #[serde(default)]
    pub updated: bool,
    #[serde(default)]
    pub errors: Vec<OzonImportError>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OzonImportError {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

impl OzonImportResponse {
    /// Отклонённые позиции не прерывают выгрузку, только пишутся в лог
    fn warn_rejected(&self, what: &str) {
        for item in self.result.iter().filter(|r| !r.updated) {
            let reasons: Vec<&str> = item
                .errors
                .iter()
                .map(|e| {
                    if e.message.is_empty() {
                        e.code.as_str()
                    } else {
                        e.message.as_str()
                    }
                })
                .collect();
            tracing::warn!(
                "OZON rejected {} for {}: {}",
                what,
                item.offer_id,
                reasons.join("; ")
            );
        }
    }
}
