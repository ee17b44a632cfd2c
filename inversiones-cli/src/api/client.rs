//! MEF report client
//!
//! [`MefClient`] owns the retry loop and file handling. The network call
//! itself sits behind [`ReportTransport`] so it can be replaced in tests.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{error, info, warn};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use super::constants::{REPORT_HEADERS, report_file_name};
use super::models::{FetchError, ReportRequest};
use super::resilience::{ResilienceConfig, RetryConfig, RetryPolicy};

/// One attempt at retrieving report bytes
#[async_trait]
pub trait ReportTransport: Send + Sync {
    async fn fetch(&self, request: &ReportRequest) -> Result<Vec<u8>, FetchError>;
}

/// reqwest-backed transport posting to the MEF endpoint
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        for &(name, value) in REPORT_HEADERS {
            let name = HeaderName::from_bytes(name.as_bytes())
                .with_context(|| format!("Invalid header name: {}", name))?;
            headers.insert(name, HeaderValue::from_static(value));
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            timeout,
        })
    }

    fn classify(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout {
                seconds: self.timeout.as_secs(),
            }
        } else if let Some(status) = err.status() {
            FetchError::Status {
                code: status.as_u16(),
            }
        } else {
            FetchError::Network(err.to_string())
        }
    }
}

#[async_trait]
impl ReportTransport for HttpTransport {
    async fn fetch(&self, request: &ReportRequest) -> Result<Vec<u8>, FetchError> {
        // Serialized by hand so the fixed Content-Type header is kept as is
        let body =
            serde_json::to_vec(request).map_err(|e| FetchError::Unexpected(e.to_string()))?;

        let response = self
            .client
            .post(&self.endpoint)
            .body(body)
            .send()
            .await
            .map_err(|e| self.classify(e))?
            .error_for_status()
            .map_err(|e| self.classify(e))?;

        let bytes = response.bytes().await.map_err(|e| self.classify(e))?;
        Ok(bytes.to_vec())
    }
}

/// Downloads department reports with retries
pub struct MefClient<T = HttpTransport> {
    transport: T,
    retry: RetryPolicy,
    timeout: Duration,
}

impl MefClient<HttpTransport> {
    pub fn from_config(endpoint: &str, resilience: &ResilienceConfig) -> Result<Self> {
        let transport = HttpTransport::new(endpoint, resilience.request_timeout)?;
        Ok(Self::with_transport(
            transport,
            resilience.retry.clone(),
            resilience.request_timeout,
        ))
    }
}

impl<T: ReportTransport> MefClient<T> {
    pub fn with_transport(transport: T, retry: RetryConfig, timeout: Duration) -> Self {
        Self {
            transport,
            retry: RetryPolicy::new(retry),
            timeout,
        }
    }

    /// Fetch the raw report for one department, retrying transient failures
    pub async fn fetch_report(&self, department: &str) -> Result<Vec<u8>, FetchError> {
        let request = ReportRequest::for_department(department);
        let request = &request;
        let max_attempts = self.retry.max_attempts();

        let result = self
            .retry
            .execute(|attempt| async move {
                if attempt > 1 {
                    info!("Retry {}/{} for department {}", attempt, max_attempts, department);
                }
                info!("Downloading report for department {} (this can take 30-60 seconds)", department);

                let outcome = self.transport.fetch(request).await;
                if let Err(ref err) = outcome {
                    match err {
                        FetchError::Timeout { seconds } => warn!(
                            "Timed out after {} seconds (attempt {}/{})",
                            seconds, attempt, max_attempts
                        ),
                        FetchError::Status { .. } | FetchError::Network(_) => warn!(
                            "Network error (attempt {}/{}): {}",
                            attempt, max_attempts, err
                        ),
                        _ => error!("Unexpected error: {}", err),
                    }
                }
                outcome
            })
            .await;

        if let Err(ref err) = result {
            match err {
                FetchError::Timeout { .. } => {
                    error!(
                        "Server took longer than {} seconds to respond after {} attempts",
                        self.timeout.as_secs(),
                        max_attempts
                    );
                    warn!("The MEF server may be overloaded; try again later");
                }
                FetchError::Status { .. } | FetchError::Network(_) => {
                    error!("Failed to download department {}: {}", department, err);
                }
                _ => {}
            }
        }

        result
    }

    /// Download the department report into `output_dir`
    ///
    /// The file is written verbatim as `inversiones_<department>.xlsx`; the
    /// content is not checked to be a workbook.
    pub async fn download(&self, department: &str, output_dir: &Path) -> Result<PathBuf, FetchError> {
        std::fs::create_dir_all(output_dir).map_err(|e| FetchError::Io {
            path: output_dir.display().to_string(),
            message: e.to_string(),
        })?;

        let bytes = self.fetch_report(department).await?;

        let output_path = output_dir.join(report_file_name(department));
        if let Err(e) = std::fs::write(&output_path, &bytes) {
            let err = FetchError::Io {
                path: output_path.display().to_string(),
                message: e.to_string(),
            };
            error!("Unexpected error: {}", err);
            return Err(err);
        }

        info!(
            "Download complete: {} ({:.2} KB)",
            output_path.display(),
            bytes.len() as f64 / 1024.0
        );
        Ok(output_path)
    }
}
