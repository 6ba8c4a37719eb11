//! HTTP client for the assistant server's REST endpoints.

use std::time::Duration;

use pulse_core::{AlertNotification, AutoTradeConfig};
use pulse_voice::{AutoTradeApi, BoxFuture, VoiceError, VoiceResult};
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{ApiError, ApiResult};

/// Default timeout for API requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Body for the auto-trade toggle endpoint.
#[derive(Debug, Serialize)]
struct ToggleRequest {
    enabled: bool,
}

/// Client for the assistant server's REST API.
pub struct AssistantClient {
    client: Client,
    /// Server origin without a trailing slash.
    base_url: String,
}

impl AssistantClient {
    /// Create a new client.
    ///
    /// # Arguments
    /// * `base_url` - Server origin (e.g., "http://localhost:5000")
    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| ApiError::HttpClient(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the historical notification list.
    ///
    /// `GET /api/alert-notifications` -> JSON array. A non-2xx response
    /// is a fetch failure.
    pub async fn fetch_notifications(&self) -> ApiResult<Vec<AlertNotification>> {
        let url = format!("{}/api/alert-notifications", self.base_url);
        debug!(%url, "Fetching alert notifications");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::HttpClient(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let notifications: Vec<AlertNotification> = response
            .json()
            .await
            .map_err(|e| ApiError::HttpClient(format!("Failed to parse notifications: {e}")))?;

        info!(count = notifications.len(), "Fetched alert notifications");
        Ok(notifications)
    }

    /// List the user's auto-trade configurations.
    ///
    /// `GET /api/auto-trade/configs` -> JSON array, at least `id` per
    /// element.
    pub async fn list_configs(&self) -> ApiResult<Vec<AutoTradeConfig>> {
        let url = format!("{}/api/auto-trade/configs", self.base_url);
        debug!(%url, "Listing auto-trade configs");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::HttpClient(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::HttpClient(format!("Failed to parse configs: {e}")))
    }

    /// Toggle one configuration's enabled flag.
    ///
    /// `PATCH /api/auto-trade/configs/{id}/toggle` with body
    /// `{"enabled": <bool>}`.
    pub async fn toggle_config(&self, id: i64, enabled: bool) -> ApiResult<()> {
        let url = format!("{}/api/auto-trade/configs/{id}/toggle", self.base_url);
        debug!(%url, enabled, "Toggling auto-trade config");

        let response = self
            .client
            .patch(&url)
            .json(&ToggleRequest { enabled })
            .send()
            .await
            .map_err(|e| ApiError::HttpClient(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        info!(config_id = id, enabled, "Auto-trade config toggled");
        Ok(())
    }
}

impl AutoTradeApi for AssistantClient {
    fn list_configs(&self) -> BoxFuture<'_, VoiceResult<Vec<AutoTradeConfig>>> {
        Box::pin(async move {
            AssistantClient::list_configs(self)
                .await
                .map_err(|e| VoiceError::Api(e.to_string()))
        })
    }

    fn toggle_config(&self, id: i64, enabled: bool) -> BoxFuture<'_, VoiceResult<()>> {
        Box::pin(async move {
            AssistantClient::toggle_config(self, id, enabled)
                .await
                .map_err(|e| VoiceError::Api(e.to_string()))
        })
    }
}
