use std::sync::Arc;

use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::api::{ApiClient, ApiError, QueryParam};
use crate::models::RawRecord;

use super::store::CacheStore;

/// Prefix shared by every cache key this crate writes, so all entries can be
/// found and deleted without knowing the request shapes that produced them.
pub const CACHE_KEY_PREFIX: &str = "creol_";

/// Cache key for a fully-resolved request URL.
pub fn cache_key(url: &str) -> String {
    let digest = Sha256::digest(url.as_bytes());
    format!("{}{}", CACHE_KEY_PREFIX, hex::encode(digest))
}

/// [`ApiClient`] fronted by a TTL cache.
///
/// Concurrent misses for the same key may each reach the network; the last
/// write wins. Failures are never cached.
#[derive(Clone)]
pub struct CachedClient {
    api: ApiClient,
    store: Arc<dyn CacheStore>,
}

impl CachedClient {
    pub fn new(api: ApiClient, store: Arc<dyn CacheStore>) -> Self {
        Self { api, store }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn store(&self) -> &Arc<dyn CacheStore> {
        &self.store
    }

    pub fn request_url(&self, params: &[QueryParam]) -> String {
        self.api.request_url(params)
    }

    /// Serve `params` from cache when fresh, else fetch and store for `ttl_seconds`.
    pub async fn get_or_fetch(
        &self,
        params: &[QueryParam],
        ttl_seconds: u64,
    ) -> Result<Vec<RawRecord>, ApiError> {
        let url = self.api.request_url(params);
        let key = cache_key(&url);

        if let Some(records) = self.lookup(&key, &url) {
            return Ok(records);
        }

        let records = self.api.fetch(params).await?;

        if ttl_seconds > 0 {
            self.store_records(&key, &url, &records, ttl_seconds);
        }
        Ok(records)
    }

    /// Cached records for `key`. Unreadable or malformed entries count as a miss.
    fn lookup(&self, key: &str, url: &str) -> Option<Vec<RawRecord>> {
        let value = match self.store.get(key) {
            Ok(Some(value)) => value,
            Ok(None) => {
                debug!(url = %url, key = key, "Cache miss");
                return None;
            }
            Err(e) => {
                warn!(url = %url, key = key, error = %e, "Failed to read cache entry");
                return None;
            }
        };

        match serde_json::from_value::<Vec<RawRecord>>(value) {
            Ok(records) if !records.is_empty() => {
                debug!(url = %url, key = key, count = records.len(), "Cache hit");
                Some(records)
            }
            Ok(_) => {
                debug!(url = %url, key = key, "Ignoring empty cache entry");
                None
            }
            Err(e) => {
                warn!(url = %url, key = key, error = %e, "Discarding malformed cache entry");
                None
            }
        }
    }

    fn store_records(&self, key: &str, url: &str, records: &[RawRecord], ttl_seconds: u64) {
        let result = serde_json::to_value(records)
            .map_err(anyhow::Error::from)
            .and_then(|value| self.store.set(key, &value, ttl_seconds));

        match result {
            Ok(()) => debug!(url = %url, key = key, ttl_secs = ttl_seconds, "Cached directory records"),
            Err(e) => warn!(url = %url, key = key, error = %e, "Failed to write cache entry"),
        }
    }
}
