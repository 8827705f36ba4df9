pub mod account;
pub mod yandex_api_client;

pub use account::YandexCampaignAccount;
pub use yandex_api_client::YandexApiClient;
