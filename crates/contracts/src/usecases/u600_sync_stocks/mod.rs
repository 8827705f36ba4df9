pub mod report;

pub use report::{AccountReport, SyncReport, SyncStatus};

use crate::usecases::common::UseCaseMetadata;

pub struct SyncStocks;

impl UseCaseMetadata for SyncStocks {
    fn usecase_index() -> &'static str {
        "u600"
    }

    fn usecase_name() -> &'static str {
        "sync_stocks"
    }

    fn display_name() -> &'static str {
        "Выгрузка остатков и цен"
    }

    fn description() -> &'static str {
        "Загрузка файла остатков поставщика и обновление остатков и цен на маркетплейсах"
    }
}
