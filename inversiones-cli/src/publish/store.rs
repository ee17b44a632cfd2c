//! Remote hierarchical store abstraction

use async_trait::async_trait;
use serde_json::Value;

/// Error writing a node of the remote store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store rejected the write
    Rejected { path: String, status: u16, body: String },
    /// The request never got an answer
    Transport { path: String, message: String },
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Rejected { path, status, body } => {
                write!(f, "write to '{}' rejected with HTTP {}: {}", path, status, body)
            }
            StoreError::Transport { path, message } => {
                write!(f, "write to '{}' failed: {}", path, message)
            }
        }
    }
}

impl std::error::Error for StoreError {}

/// A tree of JSON nodes addressed by slash-separated paths
#[async_trait]
pub trait HierarchicalStore: Send + Sync {
    /// Replace the node at `path` with `value`, discarding what was there
    async fn set(&self, path: &str, value: &Value) -> Result<(), StoreError>;
}
