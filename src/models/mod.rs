// Data models and DTOs

pub mod meter;

pub use meter::{MeterMode, MeterState, UnknownMeterMode};
