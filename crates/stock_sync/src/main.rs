use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use contracts::enums::marketplace_type::MarketplaceType;
use stock_sync::shared::config::{load_config, Config, OzonCredentials, YandexCredentials};
use stock_sync::shared::logging::{init_tracing, LOG_DIR};
use stock_sync::shared::marketplaces::MarketplaceAccount;
use stock_sync::shared::stock_source::StockSourceClient;
use stock_sync::usecases::u600_sync_stocks::{MarketplaceRun, SyncExecutor};
use stock_sync::usecases::u601_sync_ozon::OzonApiClient;
use stock_sync::usecases::u602_sync_yandex::YandexCampaignAccount;

/// Синхронизация остатков и цен с маркетплейсами
#[derive(Parser, Debug)]
#[command(name = "stock_sync")]
#[command(version, about, long_about = None)]
struct Args {
    /// Какие маркетплейсы обновлять
    #[arg(value_enum, default_value_t = Target::All)]
    target: Target,

    /// Путь к config.toml (по умолчанию рядом с исполняемым файлом)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Посчитать остатки и цены, но ничего не отправлять
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// Записать отчёт о запуске в JSON-файл
    #[arg(long)]
    report: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Target {
    Ozon,
    Yandex,
    All,
}

impl Target {
    fn marketplaces(self) -> Vec<MarketplaceType> {
        match self {
            Target::Ozon => vec![MarketplaceType::Ozon],
            Target::Yandex => vec![MarketplaceType::YandexMarket],
            Target::All => MarketplaceType::all(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();
    init_tracing(Path::new(LOG_DIR));

    let config = load_config(args.config.as_deref())?;
    let runs = build_runs(args.target, &config, |key| std::env::var(key).ok())?;
    let source = StockSourceClient::new(config.stock_source.clone(), &config.http)?;

    let mut executor = SyncExecutor::new(source, args.dry_run);
    let report = executor.run(&runs).await;

    for account in &report.accounts {
        tracing::info!(
            "{}: {} offers, {} in stock, {} zeroed, {} prices",
            account.account,
            account.known_offers,
            account.in_stock,
            account.zero_filled,
            account.price_updates
        );
    }

    if let Some(path) = args.report {
        std::fs::write(&path, serde_json::to_string_pretty(&report)?)?;
        tracing::info!("Report written to {}", path.display());
    }

    Ok(())
}

/// Аккаунты для выбранных маркетплейсов; ключи берутся только для них
fn build_runs(
    target: Target,
    config: &Config,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Vec<MarketplaceRun>> {
    let mut runs = Vec::new();

    for marketplace in target.marketplaces() {
        let accounts: Vec<Box<dyn MarketplaceAccount>> = match marketplace {
            MarketplaceType::Ozon => {
                let credentials = OzonCredentials::from_lookup(&lookup)?;
                let client = OzonApiClient::new(credentials, config.ozon.clone(), &config.http)?;
                vec![Box::new(client)]
            }
            MarketplaceType::YandexMarket => {
                let credentials = YandexCredentials::from_lookup(&lookup)?;
                YandexCampaignAccount::for_credentials(
                    &credentials,
                    config.yandex.clone(),
                    &config.http,
                )?
                .into_iter()
                .map(|account| Box::new(account) as Box<dyn MarketplaceAccount>)
                .collect()
            }
        };
        runs.push(MarketplaceRun {
            marketplace,
            accounts,
        });
    }

    Ok(runs)
}
