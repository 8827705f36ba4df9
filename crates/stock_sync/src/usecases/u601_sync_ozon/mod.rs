pub mod account;
pub mod ozon_api_client;

pub use ozon_api_client::OzonApiClient;
