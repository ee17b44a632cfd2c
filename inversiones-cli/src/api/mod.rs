//! Client for the MEF public investment report service
//!
//! Builds the report export request for a department, retries transient
//! failures and stores the returned workbook on disk.

pub mod client;
pub mod constants;
pub mod models;
pub mod resilience;

pub use client::MefClient;
pub use resilience::ResilienceConfig;
