// Business logic services
// Meter billing state and payment message parsing

pub mod meter_store;
pub mod payment_parser;

pub use meter_store::MeterStore;
pub use payment_parser::{parse_payment_amount, PaymentParseError};
