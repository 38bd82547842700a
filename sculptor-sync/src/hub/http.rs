//! HTTP dataset hub client.
//!
//! Talks to a dataset hub over a small REST surface:
//! `GET /datasets/{repo}` returns the current snapshot (404 when the
//! repository does not exist yet), `PUT /datasets/{repo}` replaces it.
//! Requests carry the configured credential as a bearer token.

use super::DatasetHub;
use crate::dataset::DatasetSnapshot;
use crate::error::{SyncError, SyncResult};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// Configuration for the HTTP hub client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpHubConfig {
    /// Base URL of the hub API (e.g. `https://hub.sculptor.dev`).
    pub api_base_url: String,
    /// Access credential sent as a bearer token, if available.
    pub credential: Option<String>,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for HttpHubConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://hub.sculptor.dev".to_string(),
            credential: None,
            request_timeout_secs: 60,
        }
    }
}

/// HTTP implementation of [`DatasetHub`].
pub struct HttpHub {
    config: HttpHubConfig,
    client: Client,
}

impl HttpHub {
    /// Creates a new HTTP hub client.
    pub fn new(config: HttpHubConfig) -> SyncResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| SyncError::Network(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { config, client })
    }

    fn dataset_url(&self, repository: &str) -> String {
        format!(
            "{}/datasets/{repository}",
            self.config.api_base_url.trim_end_matches('/')
        )
    }

    fn with_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.credential {
            Some(credential) => request.bearer_auth(credential),
            None => request,
        }
    }
}

#[async_trait]
impl DatasetHub for HttpHub {
    fn provider_name(&self) -> &'static str {
        "http"
    }

    async fn fetch(&self, repository: &str) -> SyncResult<Option<DatasetSnapshot>> {
        let url = self.dataset_url(repository);
        debug!(%repository, %url, "fetching dataset");

        let response = self.with_auth(self.client.get(&url)).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let snapshot = response.json::<DatasetSnapshot>().await?;
                Ok(Some(snapshot))
            }
            status => Err(SyncError::Remote {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            }),
        }
    }

    async fn replace(&self, repository: &str, snapshot: &DatasetSnapshot) -> SyncResult<()> {
        let url = self.dataset_url(repository);
        debug!(%repository, %url, "replacing dataset");

        let response = self
            .with_auth(self.client.put(&url))
            .json(snapshot)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::Remote {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }
        info!(%repository, "dataset replaced on hub");
        Ok(())
    }
}
