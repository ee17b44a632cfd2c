//! Request body and error types for the report endpoint

use serde::Serialize;

use super::constants::GOVERNMENT_TYPE_REGIONAL;
use super::resilience::RetryableError;

/// JSON body of a report export request
///
/// Province and district are zero to select every one of them; the sector
/// is empty to select all sectors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRequest {
    /// Sector filter
    pub sect: String,
    /// Department selector
    pub plie: String,
    pub dpto: u32,
    pub prov: u32,
    pub dist: u32,
    /// Government level
    pub tipo: String,
}

impl ReportRequest {
    /// Request every regional-government investment of one department
    pub fn for_department(department: &str) -> Self {
        Self {
            sect: String::new(),
            plie: department.to_string(),
            dpto: 0,
            prov: 0,
            dist: 0,
            tipo: GOVERNMENT_TYPE_REGIONAL.to_string(),
        }
    }
}

/// Failure of a report download
#[derive(Debug)]
pub enum FetchError {
    /// The attempt exceeded the per-attempt timeout
    Timeout { seconds: u64 },
    /// The server answered with a non-success status
    Status { code: u16 },
    /// Connection, TLS or body transfer failure
    Network(String),
    /// Local filesystem failure while storing the report
    Io { path: String, message: String },
    /// Anything else; never retried
    Unexpected(String),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Timeout { seconds } => {
                write!(f, "request timed out after {} seconds", seconds)
            }
            FetchError::Status { code } => write!(f, "server responded with HTTP {}", code),
            FetchError::Network(message) => write!(f, "network error: {}", message),
            FetchError::Io { path, message } => write!(f, "failed to write '{}': {}", path, message),
            FetchError::Unexpected(message) => write!(f, "unexpected error: {}", message),
        }
    }
}

impl std::error::Error for FetchError {}

impl RetryableError for FetchError {
    fn is_retryable(&self) -> bool {
        matches!(
            self,
            FetchError::Timeout { .. } | FetchError::Status { .. } | FetchError::Network(_)
        )
    }
}
