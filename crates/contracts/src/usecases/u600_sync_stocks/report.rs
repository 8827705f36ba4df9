use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::marketplace_type::MarketplaceType;

/// Итог одного запуска синхронизации
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncReport {
    pub session_id: String,
    pub status: SyncStatus,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub dry_run: bool,

    /// Итоги по каждому обработанному аккаунту, в порядке обработки
    pub accounts: Vec<AccountReport>,

    /// Ошибки прерванных прогонов по маркетплейсам
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStatus {
    Running,
    Completed,
    /// Хотя бы один маркетплейс прерван ошибкой
    CompletedWithErrors,
    Failed,
}

/// Итог по одному аккаунту (кампании) маркетплейса
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountReport {
    pub marketplace: MarketplaceType,
    pub account: String,
    pub known_offers: usize,
    pub stock_updates: usize,
    /// Предложения с ненулевым остатком
    pub in_stock: usize,
    /// Предложения, отсутствующие в файле и обнулённые
    pub zero_filled: usize,
    pub price_updates: usize,
    pub stock_batches: usize,
    pub price_batches: usize,
}

impl SyncReport {
    pub fn new(session_id: String, dry_run: bool) -> Self {
        Self {
            session_id,
            status: SyncStatus::Running,
            started_at: Utc::now(),
            completed_at: None,
            dry_run,
            accounts: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// Завершить отчёт: статус выводится из накопленных ошибок
    pub fn complete(&mut self) {
        self.status = if self.errors.is_empty() {
            SyncStatus::Completed
        } else if self.accounts.is_empty() {
            SyncStatus::Failed
        } else {
            SyncStatus::CompletedWithErrors
        };
        self.completed_at = Some(Utc::now());
    }
}
