//! Firebase Realtime Database over its REST API
//!
//! `PUT <database_url>/<path>.json` replaces the node at `path`.

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use serde_json::Value;

use crate::config::PublishConfig;

use super::store::{HierarchicalStore, StoreError};

#[derive(Debug, Clone)]
pub struct FirebaseStore {
    client: reqwest::Client,
    database_url: String,
    auth_token: Option<String>,
}

impl FirebaseStore {
    pub fn new(database_url: &str, auth_token: Option<String>) -> Result<Self> {
        let database_url = database_url.trim().trim_end_matches('/').to_string();
        if !(database_url.starts_with("https://") || database_url.starts_with("http://")) {
            bail!("Database URL must start with http:// or https://: {}", database_url);
        }

        let client = reqwest::Client::builder()
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            database_url,
            auth_token,
        })
    }

    pub fn from_config(config: &PublishConfig) -> Result<Self> {
        let url = config.database_url.as_deref().context(
            "No database URL configured. Set FIREBASE_DATABASE_URL, [publish].database_url or pass --database-url",
        )?;
        Self::new(url, config.auth_token.clone())
    }

    /// REST URL of the node at `path`
    pub fn node_url(&self, path: &str) -> String {
        format!("{}/{}.json", self.database_url, path.trim_matches('/'))
    }
}

#[async_trait]
impl HierarchicalStore for FirebaseStore {
    async fn set(&self, path: &str, value: &Value) -> Result<(), StoreError> {
        let url = self.node_url(path);
        log::debug!("PUT {}", url);

        let mut request = self.client.put(&url).json(value);
        if let Some(token) = &self.auth_token {
            request = request.query(&[("auth", token)]);
        }

        let response = request.send().await.map_err(|e| StoreError::Transport {
            path: path.to_string(),
            message: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Rejected {
                path: path.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}
