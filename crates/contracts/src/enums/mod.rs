pub mod fulfillment_mode;
pub mod marketplace_type;
