pub mod batching;
pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod marketplaces;
pub mod request_log;
pub mod stock_rules;
pub mod stock_source;
