pub mod executor;

pub use executor::{MarketplaceRun, SyncExecutor};
