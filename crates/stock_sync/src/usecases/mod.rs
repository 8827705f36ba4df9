pub mod u600_sync_stocks;
pub mod u601_sync_ozon;
pub mod u602_sync_yandex;
