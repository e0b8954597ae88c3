pub mod dashboard;
pub mod device;
pub mod health;
pub mod metrics;
pub mod payments;
pub mod response;
