pub mod offer_update;
pub mod record;

pub use offer_update::{PriceUpdate, StockUpdate};
pub use record::InventoryRecord;
