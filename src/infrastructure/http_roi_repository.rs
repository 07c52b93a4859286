// HTTP repository implementation for the ROI data API
use crate::application::roi_repository::{AppFilterOptions, FilterOptions, RoiRepository};
use crate::domain::horizon::RoiRecord;
use crate::infrastructure::config::UpstreamSettings;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

const SUCCESS_CODE: i64 = 200;

#[derive(Debug, Clone)]
pub struct HttpRoiRepository {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
    retry_count: u32,
}

/// `{ code, data, message }` wrapper around every upstream payload
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    code: i64,
    data: Option<T>,
    #[serde(default)]
    message: String,
}

impl<T> Envelope<T> {
    fn into_data(self) -> Result<T> {
        if self.code != SUCCESS_CODE {
            let message = if self.message.is_empty() {
                "request failed".to_string()
            } else {
                self.message
            };
            anyhow::bail!("ROI API error {}: {}", self.code, message);
        }
        self.data.context("ROI API response has no data")
    }
}

impl HttpRoiRepository {
    pub fn new(settings: &UpstreamSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(settings.timeout_ms))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            token: settings.token.clone().filter(|t| !t.is_empty()),
            retry_count: settings.retry_count,
        })
    }

    fn build_url(&self, path: &str, params: &[(&str, &str)]) -> String {
        let query = params
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");

        if query.is_empty() {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}{}?{}", self.base_url, path, query)
        }
    }

    async fn send(&self, url: &str) -> reqwest::Result<reqwest::Response> {
        let mut request = self
            .client
            .get(url)
            .header("Accept", "application/json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        request.send().await
    }

    /// GET with retries on transport failures only
    async fn get<T: DeserializeOwned>(&self, path: &str, params: &[(&str, &str)]) -> Result<T> {
        let url = self.build_url(path, params);
        tracing::debug!("Requesting {}", url);

        let mut attempt = 0;
        let response = loop {
            match self.send(&url).await {
                Ok(response) => break response,
                Err(e) if attempt < self.retry_count && (e.is_connect() || e.is_timeout()) => {
                    attempt += 1;
                    tracing::warn!("Request to {} failed (attempt {}): {}", url, attempt, e);
                }
                Err(e) => {
                    return Err(e).with_context(|| {
                        format!("Failed to send request to ROI API after {} attempt(s)", attempt + 1)
                    });
                }
            }
        };

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("ROI API request failed with status {}: {}", status, body);
        }

        let envelope = response
            .json::<Envelope<T>>()
            .await
            .context("Failed to parse ROI API response")?;
        envelope.into_data()
    }
}

#[async_trait]
impl RoiRepository for HttpRoiRepository {
    async fn list_filters(&self) -> Result<FilterOptions> {
        self.get("/filters", &[]).await
    }

    async fn filters_for_app(&self, app_name: &str) -> Result<AppFilterOptions> {
        self.get("/filters/by-app", &[("appname", app_name)]).await
    }

    async fn fetch_dates(&self, app_name: &str, country: &str) -> Result<Vec<String>> {
        self.get("/dates", &[("appname", app_name), ("country", country)])
            .await
    }

    async fn fetch_records(&self, app_name: &str, country: &str) -> Result<Vec<RoiRecord>> {
        self.get("/data", &[("appname", app_name), ("country", country)])
            .await
    }
}
