pub mod common;
pub mod u600_sync_stocks;
