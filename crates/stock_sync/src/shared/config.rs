use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use contracts::enums::fulfillment_mode::FulfillmentMode;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub stock_source: StockSourceConfig,
    pub http: HttpConfig,
    pub ozon: MarketplaceEndpointConfig,
    pub yandex: MarketplaceEndpointConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StockSourceConfig {
    pub url: String,
    /// Имя файла таблицы внутри архива
    pub spreadsheet_name: String,
    /// Номер строки заголовка (с нуля)
    pub header_row: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    /// Каталог для журналов запросов к API; пустая строка отключает журналы
    #[serde(default)]
    pub request_log_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MarketplaceEndpointConfig {
    pub base_url: String,
    pub page_limit: usize,
    pub stock_batch_size: usize,
    pub price_batch_size: usize,
}

/// Default configuration embedded in the binary
pub const DEFAULT_CONFIG: &str = r#"
[stock_source]
url = "https://timeworld.ru/upload/files/ostatki.zip"
spreadsheet_name = "ostatki.xls"
header_row = 17

[http]
timeout_secs = 30
request_log_dir = "target/logs"

[ozon]
base_url = "https://api-seller.ozon.ru"
page_limit = 1000
stock_batch_size = 100
price_batch_size = 900

[yandex]
base_url = "https://api.partner.market.yandex.ru"
page_limit = 200
stock_batch_size = 2000
price_batch_size = 500
"#;

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn request_log_dir(&self) -> Option<PathBuf> {
        let dir = self.request_log_dir.trim();
        if dir.is_empty() {
            None
        } else {
            Some(PathBuf::from(dir))
        }
    }
}

impl Config {
    pub fn parse(contents: &str) -> anyhow::Result<Config> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        for (section, endpoint) in [("ozon", &self.ozon), ("yandex", &self.yandex)] {
            if endpoint.page_limit == 0 {
                anyhow::bail!("[{}] page_limit must be greater than zero", section);
            }
            if endpoint.stock_batch_size == 0 || endpoint.price_batch_size == 0 {
                anyhow::bail!("[{}] batch sizes must be greater than zero", section);
            }
        }
        Ok(())
    }
}

/// Load configuration
///
/// Search order:
/// 1. Explicit path (from the command line)
/// 2. `config.toml` next to the executable
/// 3. Falls back to embedded default config
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    if let Some(path) = explicit {
        tracing::info!("Loading config from: {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        return Config::parse(&contents);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                return Config::parse(&contents);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    Config::parse(DEFAULT_CONFIG)
}

// ============================================================================
// Credentials (environment)
// ============================================================================

/// Ключи Seller API
#[derive(Debug, Clone)]
pub struct OzonCredentials {
    pub client_id: String,
    pub api_key: String,
}

/// Кампания Яндекс Маркета
#[derive(Debug, Clone)]
pub struct YandexCampaign {
    pub mode: FulfillmentMode,
    pub campaign_id: String,
    pub warehouse_id: i64,
}

/// Ключи Partner API и обе кампании
#[derive(Debug, Clone)]
pub struct YandexCredentials {
    pub token: String,
    pub fbs: YandexCampaign,
    pub dbs: YandexCampaign,
}

impl OzonCredentials {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        Ok(Self {
            client_id: required(&lookup, "CLIENT_ID")?,
            api_key: required(&lookup, "SELLER_TOKEN")?,
        })
    }
}

impl YandexCredentials {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        Ok(Self {
            token: required(&lookup, "MARKET_TOKEN")?,
            fbs: YandexCampaign {
                mode: FulfillmentMode::Fbs,
                campaign_id: required(&lookup, "FBS_ID")?,
                warehouse_id: warehouse(&lookup, "WAREHOUSE_FBS_ID")?,
            },
            dbs: YandexCampaign {
                mode: FulfillmentMode::Dbs,
                campaign_id: required(&lookup, "DBS_ID")?,
                warehouse_id: warehouse(&lookup, "WAREHOUSE_DBS_ID")?,
            },
        })
    }

    /// Кампании в порядке обработки: сначала FBS, затем DBS
    pub fn campaigns(&self) -> [&YandexCampaign; 2] {
        [&self.fbs, &self.dbs]
    }
}

fn required(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> anyhow::Result<String> {
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => anyhow::bail!("environment variable {} is not set", key),
    }
}

fn warehouse(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> anyhow::Result<i64> {
    let value = required(lookup, key)?;
    value
        .parse::<i64>()
        .map_err(|_| anyhow::anyhow!("{} must be an integer, got '{}'", key, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config_loads() {
        let config = Config::parse(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.stock_source.header_row, 17);
        assert_eq!(config.stock_source.spreadsheet_name, "ostatki.xls");
        assert_eq!(config.ozon.stock_batch_size, 100);
        assert_eq!(config.ozon.price_batch_size, 900);
        assert_eq!(config.yandex.stock_batch_size, 2000);
        assert_eq!(config.yandex.price_batch_size, 500);
        assert_eq!(config.http.timeout(), Duration::from_secs(30));
        assert_eq!(
            config.http.request_log_dir(),
            Some(PathBuf::from("target/logs"))
        );
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let broken = DEFAULT_CONFIG.replace("stock_batch_size = 100", "stock_batch_size = 0");
        let err = Config::parse(&broken).unwrap_err();
        assert!(err.to_string().contains("[ozon]"));
    }

    #[test]
    fn test_empty_request_log_dir_disables_logging() {
        let config = Config::parse(
            &DEFAULT_CONFIG.replace("request_log_dir = \"target/logs\"", "request_log_dir = \"\""),
        )
        .unwrap();
        assert_eq!(config.http.request_log_dir(), None);
    }

    #[test]
    fn test_load_config_from_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(
            &mut file,
            DEFAULT_CONFIG.replace("page_limit = 200", "page_limit = 50").as_bytes(),
        )
        .unwrap();
        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.yandex.page_limit, 50);
    }

    #[test]
    fn test_ozon_credentials() {
        let creds =
            OzonCredentials::from_lookup(env(&[("CLIENT_ID", "123"), ("SELLER_TOKEN", " key ")]))
                .unwrap();
        assert_eq!(creds.client_id, "123");
        assert_eq!(creds.api_key, "key");

        let err = OzonCredentials::from_lookup(env(&[("CLIENT_ID", "123")])).unwrap_err();
        assert!(err.to_string().contains("SELLER_TOKEN"));
    }

    #[test]
    fn test_yandex_credentials() {
        let vars = [
            ("MARKET_TOKEN", "t"),
            ("FBS_ID", "11"),
            ("DBS_ID", "22"),
            ("WAREHOUSE_FBS_ID", "101"),
            ("WAREHOUSE_DBS_ID", "202"),
        ];
        let creds = YandexCredentials::from_lookup(env(&vars)).unwrap();
        let [first, second] = creds.campaigns();
        assert_eq!(first.mode, FulfillmentMode::Fbs);
        assert_eq!(first.campaign_id, "11");
        assert_eq!(first.warehouse_id, 101);
        assert_eq!(second.mode, FulfillmentMode::Dbs);
        assert_eq!(second.warehouse_id, 202);
    }

    #[test]
    fn test_non_numeric_warehouse_rejected() {
        let vars = [
            ("MARKET_TOKEN", "t"),
            ("FBS_ID", "11"),
            ("DBS_ID", "22"),
            ("WAREHOUSE_FBS_ID", "main"),
            ("WAREHOUSE_DBS_ID", "202"),
        ];
        let err = YandexCredentials::from_lookup(env(&vars)).unwrap_err();
        assert!(err.to_string().contains("WAREHOUSE_FBS_ID"));
    }
}
