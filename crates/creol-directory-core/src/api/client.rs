//! HTTP client for the CREOL People web service.

use std::time::Duration;

use reqwest::{header, Client, StatusCode};
use serde_json::Value;
use tracing::warn;

use crate::models::RawRecord;

use super::query::{encode_query, QueryParam};
use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// Fixed endpoint serving both the people and alumni data sets
pub const API_BASE_URL: &str = "https://api.creol.ucf.edu/People.asmx/GetData";

/// HTTP request timeout in seconds.
/// Bounds the worst-case latency of a render on cache miss.
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Client for the directory API.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the production endpoint
    pub fn new() -> Result<Self, ApiError> {
        Self::with_base_url(API_BASE_URL)
    }

    /// Create a client for another endpoint (staging, local mock).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The fully-resolved URL for a parameter list. Also the input of the cache key.
    pub fn request_url(&self, params: &[QueryParam]) -> String {
        if params.is_empty() {
            self.base_url.clone()
        } else {
            format!("{}?{}", self.base_url, encode_query(params))
        }
    }

    /// Fetch the record array for `params`.
    ///
    /// Every failure is logged here, once, with the request URL. An empty
    /// array is reported as [`ApiError::NoData`].
    pub async fn fetch(&self, params: &[QueryParam]) -> Result<Vec<RawRecord>, ApiError> {
        let url = self.request_url(params);
        let result = self.fetch_url(&url).await;

        if let Err(e) = &result {
            warn!(url = %url, error = %e, "Directory API request failed");
        }
        result
    }

    async fn fetch_url(&self, url: &str) -> Result<Vec<RawRecord>, ApiError> {
        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_status(status, &body));
        }

        let body = response.text().await?;
        Self::decode(&body)
    }

    /// Decode the `{"response": [...]}` envelope.
    fn decode(body: &str) -> Result<Vec<RawRecord>, ApiError> {
        let envelope: Value = serde_json::from_str(body).map_err(|e| {
            ApiError::Parse(format!(
                "{} (body: {})",
                e,
                ApiError::truncate_body(body)
            ))
        })?;

        // Only a top-level object carries the envelope; arrays are rejected too
        let response = match envelope {
            Value::Object(mut fields) => fields.remove("response"),
            _ => None,
        };

        let records = match response {
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(ApiError::Parse(format!(
                    "`response` is not an array: {}",
                    ApiError::truncate_body(&other.to_string())
                )))
            }
            None => return Err(ApiError::Parse("missing `response` field".to_string())),
        };

        if records.is_empty() {
            return Err(ApiError::NoData);
        }

        Ok(records.into_iter().map(RawRecord::new).collect())
    }
}
