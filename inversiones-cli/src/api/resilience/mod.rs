//! Retry and timeout handling for report downloads

pub mod config;
pub mod retry;

pub use config::ResilienceConfig;
pub use retry::{RetryConfig, RetryPolicy, RetryableError};
