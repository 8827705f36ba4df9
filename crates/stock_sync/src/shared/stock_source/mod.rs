//! Файл остатков поставщика: загрузка архива, извлечение и разбор таблицы

pub mod archive;
pub mod spreadsheet;

use async_trait::async_trait;
use contracts::domain::inventory::InventoryRecord;

use super::config::{HttpConfig, StockSourceConfig};
use super::error::{SyncError, SyncResult};
use super::http::build_client;
use super::request_log::{preview, RequestLog};

/// Источник строк остатков
#[async_trait]
pub trait InventorySource: Send + Sync {
    async fn load_inventory(&self) -> SyncResult<Vec<InventoryRecord>>;
}

/// Загрузка архива остатков по HTTP
pub struct StockSourceClient {
    client: reqwest::Client,
    config: StockSourceConfig,
    log: RequestLog,
}

impl StockSourceClient {
    pub fn new(config: StockSourceConfig, http: &HttpConfig) -> SyncResult<Self> {
        Ok(Self {
            client: build_client(http.timeout())?,
            log: RequestLog::new(http.request_log_dir().as_deref(), "stock_source_requests.log"),
            config,
        })
    }

    /// Скачать архив целиком
    pub async fn download_archive(&self) -> SyncResult<Vec<u8>> {
        self.log.write(&format!("=== REQUEST ===\nGET {}", self.config.url));

        let response = self.client.get(&self.config.url).send().await?;
        let status = response.status();
        self.log.write(&format!("Response status: {}", status));

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Stock archive download failed: {}", status);
            return Err(SyncError::Http {
                status: status.as_u16(),
                body: preview(&body),
            });
        }

        let bytes = response.bytes().await?;
        self.log.write(&format!("Downloaded {} bytes", bytes.len()));
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl InventorySource for StockSourceClient {
    async fn load_inventory(&self) -> SyncResult<Vec<InventoryRecord>> {
        let archive_bytes = self.download_archive().await?;
        let (file_name, spreadsheet) =
            archive::extract_spreadsheet(&archive_bytes, &self.config.spreadsheet_name)?;
        tracing::info!(
            "Extracted '{}' ({} bytes) from stock archive",
            file_name,
            spreadsheet.len()
        );

        let records = spreadsheet::parse_inventory(spreadsheet, self.config.header_row)?;
        tracing::info!("Stock file: {} inventory rows", records.len());
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, timeout_ms: u64) -> StockSourceClient {
        let config = StockSourceConfig {
            url: format!("{}/upload/files/ostatki.zip", server.uri()),
            spreadsheet_name: "ostatki.xls".into(),
            header_row: 17,
        };
        let http = HttpConfig {
            timeout_secs: 30,
            request_log_dir: String::new(),
        };
        let mut client = StockSourceClient::new(config, &http).unwrap();
        client.client = build_client(std::time::Duration::from_millis(timeout_ms)).unwrap();
        client
    }

    #[tokio::test]
    async fn test_download_archive_returns_bytes() {
        let server = MockServer::start().await;
        let zip_bytes = archive::tests::zip_with(&[("ostatki.xls", b"payload")]);
        Mock::given(method("GET"))
            .and(path("/upload/files/ostatki.zip"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(zip_bytes.clone()))
            .mount(&server)
            .await;

        let client = client_for(&server, 5_000);
        assert_eq!(client.download_archive().await.unwrap(), zip_bytes);
    }

    #[tokio::test]
    async fn test_download_not_found_is_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("missing"))
            .mount(&server)
            .await;

        let err = client_for(&server, 5_000).load_inventory().await.unwrap_err();
        match err {
            SyncError::Http { status, body } => {
                assert_eq!(status, 404);
                assert_eq!(body, "missing");
            }
            other => panic!("Expected SyncError::Http, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_slow_download_is_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_delay(std::time::Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let err = client_for(&server, 50).download_archive().await.unwrap_err();
        assert!(matches!(err, SyncError::Timeout(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_load_inventory_from_real_workbook() {
        let server = MockServer::start().await;
        let workbook = include_bytes!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/tests/fixtures/ostatki.xlsx"
        ));
        let zip_bytes = archive::tests::zip_with(&[("ostatki.xlsx", workbook.as_slice())]);
        Mock::given(method("GET"))
            .and(path("/upload/files/ostatki.zip"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(zip_bytes))
            .mount(&server)
            .await;

        let records = client_for(&server, 5_000).load_inventory().await.unwrap();
        let codes: Vec<&str> = records.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, vec!["12345", "B-1", "C-1"]);
    }

    #[tokio::test]
    async fn test_archive_without_spreadsheet_is_data_error() {
        let server = MockServer::start().await;
        let zip_bytes = archive::tests::zip_with(&[("readme.txt", b"hello")]);
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(zip_bytes))
            .mount(&server)
            .await;

        let err = client_for(&server, 5_000).load_inventory().await.unwrap_err();
        assert!(matches!(err, SyncError::Data(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_refused_connection_is_connection_failure() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let config = StockSourceConfig {
            url: format!("http://127.0.0.1:{}/ostatki.zip", port),
            spreadsheet_name: "ostatki.xls".into(),
            header_row: 17,
        };
        let http = HttpConfig {
            timeout_secs: 5,
            request_log_dir: String::new(),
        };
        let client = StockSourceClient::new(config, &http).unwrap();

        let err = client.download_archive().await.unwrap_err();
        assert!(matches!(err, SyncError::ConnectionFailure(_)), "got {err:?}");
    }
}
