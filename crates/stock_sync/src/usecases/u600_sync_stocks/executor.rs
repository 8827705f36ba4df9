use chrono::Utc;
use contracts::domain::inventory::InventoryRecord;
use contracts::enums::marketplace_type::MarketplaceType;
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u600_sync_stocks::{AccountReport, SyncReport, SyncStocks};
use uuid::Uuid;

use crate::shared::batching::{chunk_count, split_into_chunks};
use crate::shared::error::{SyncError, SyncResult};
use crate::shared::marketplaces::MarketplaceAccount;
use crate::shared::stock_rules::{build_price_updates, build_stock_updates};
use crate::shared::stock_source::InventorySource;

/// Аккаунты одного маркетплейса. Ошибка прерывает обработку оставшихся аккаунтов
/// этого маркетплейса, но не других.
pub struct MarketplaceRun {
    pub marketplace: MarketplaceType,
    pub accounts: Vec<Box<dyn MarketplaceAccount>>,
}

/// Executor для UseCase выгрузки остатков и цен
pub struct SyncExecutor<S: InventorySource> {
    source: S,
    dry_run: bool,
    /// Файл остатков скачивается один раз на запуск
    inventory: Option<Vec<InventoryRecord>>,
}

impl<S: InventorySource> SyncExecutor<S> {
    pub fn new(source: S, dry_run: bool) -> Self {
        Self {
            source,
            dry_run,
            inventory: None,
        }
    }

    /// Выполнить все прогоны по очереди и собрать отчёт
    pub async fn run(&mut self, runs: &[MarketplaceRun]) -> SyncReport {
        let mut report = SyncReport::new(Uuid::new_v4().to_string(), self.dry_run);
        tracing::info!(
            "{} ({}) session {} started{}",
            SyncStocks::display_name(),
            SyncStocks::full_name(),
            report.session_id,
            if self.dry_run { ", dry run" } else { "" }
        );

        for run in runs {
            if let Err(e) = self.sync_marketplace(run, &mut report).await {
                log_failure(run.marketplace, &e);
                report.add_error(format!("{}: {}", run.marketplace.display_name(), e));
            }
        }

        report.complete();
        tracing::info!(
            "Session {} finished: {:?}, {} account(s) synced",
            report.session_id,
            report.status,
            report.accounts.len()
        );
        report
    }

    async fn sync_marketplace(
        &mut self,
        run: &MarketplaceRun,
        report: &mut SyncReport,
    ) -> SyncResult<()> {
        for account in &run.accounts {
            let account_report = self.sync_account(account.as_ref()).await?;
            report.accounts.push(account_report);
        }
        Ok(())
    }

    /// Каталог -> файл остатков -> остатки -> цены для одного аккаунта
    pub async fn sync_account(
        &mut self,
        account: &dyn MarketplaceAccount,
    ) -> SyncResult<AccountReport> {
        let label = account.label();
        let dry_run = self.dry_run;

        let offer_ids = account.fetch_offer_ids().await?;
        let records = self.inventory().await?;

        // Остатки
        let stocks = build_stock_updates(records, &offer_ids, Utc::now())?;
        let stock_batch_size = account.stock_batch_size();
        let stock_batches = chunk_count(stocks.items.len(), stock_batch_size);
        tracing::info!(
            "{}: {} stock updates ({} from stock file, {} zeroed), {} batch(es)",
            label,
            stocks.items.len(),
            stocks.matched,
            stocks.zero_filled(),
            stock_batches
        );
        for (index, batch) in split_into_chunks(&stocks.items, stock_batch_size).enumerate() {
            if dry_run {
                tracing::debug!("{}: [dry run] stocks batch {:?}", label, batch);
                continue;
            }
            tracing::debug!(
                "{}: stocks batch {}/{} ({} items)",
                label,
                index + 1,
                stock_batches,
                batch.len()
            );
            account.push_stocks(batch).await?;
        }

        // Цены
        let prices = build_price_updates(records, &offer_ids)?;
        let price_batch_size = account.price_batch_size();
        let price_batches = chunk_count(prices.len(), price_batch_size);
        tracing::info!(
            "{}: {} price updates, {} batch(es)",
            label,
            prices.len(),
            price_batches
        );
        for (index, batch) in split_into_chunks(&prices, price_batch_size).enumerate() {
            if dry_run {
                tracing::debug!("{}: [dry run] prices batch {:?}", label, batch);
                continue;
            }
            tracing::debug!(
                "{}: prices batch {}/{} ({} items)",
                label,
                index + 1,
                price_batches,
                batch.len()
            );
            account.push_prices(batch).await?;
        }

        Ok(AccountReport {
            marketplace: account.marketplace(),
            account: label,
            known_offers: offer_ids.len(),
            stock_updates: stocks.items.len(),
            in_stock: stocks.in_stock(),
            zero_filled: stocks.zero_filled(),
            price_updates: prices.len(),
            stock_batches,
            price_batches,
        })
    }

    async fn inventory(&mut self) -> SyncResult<&[InventoryRecord]> {
        if self.inventory.is_none() {
            let records = self.source.load_inventory().await?;
            self.inventory = Some(records);
        }
        Ok(self.inventory.as_deref().unwrap_or_default())
    }
}

/// Сообщение об ошибке прогона по её виду
fn log_failure(marketplace: MarketplaceType, err: &SyncError) {
    let name = marketplace.display_name();
    match err {
        SyncError::Timeout(cause) => {
            tracing::error!("{}: превышено время ожидания ({})", name, cause)
        }
        SyncError::ConnectionFailure(cause) => {
            tracing::error!("{}: ошибка соединения: {}", name, cause)
        }
        SyncError::Http { .. } if err.is_unauthorized() => {
            tracing::error!("{}: ключи доступа отклонены: {}", name, err)
        }
        SyncError::Http { .. } | SyncError::Data(_) => {
            tracing::error!("{}: синхронизация прервана: {}", name, err)
        }
    }
}
