use anyhow::{bail, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A key-value store with per-entry TTL and bulk deletion by key prefix.
///
/// Implementations are shared between concurrent renders; the last write to
/// a key wins. A TTL of 0 means the value is never stored.
pub trait CacheStore: Send + Sync {
    /// Value for `key`, or `None` when absent or expired.
    fn get(&self, key: &str) -> Result<Option<Value>>;

    fn set(&self, key: &str, value: &Value, ttl_seconds: u64) -> Result<()>;

    /// Returns whether an entry was removed.
    fn delete(&self, key: &str) -> Result<bool>;

    /// Remove every entry whose key starts with `prefix`; returns how many.
    fn delete_prefix(&self, prefix: &str) -> Result<usize>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedData<T> {
    pub data: T,
    pub cached_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl<T> CachedData<T> {
    pub fn new(data: T, ttl_seconds: u64) -> Self {
        let cached_at = Utc::now();
        Self {
            data,
            cached_at,
            expires_at: expiry(cached_at, ttl_seconds),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    pub fn age_seconds(&self) -> i64 {
        (Utc::now() - self.cached_at).num_seconds()
    }
}

/// Expiry instant for a TTL; absurdly large TTLs saturate instead of overflowing.
fn expiry(cached_at: DateTime<Utc>, ttl_seconds: u64) -> DateTime<Utc> {
    i64::try_from(ttl_seconds)
        .ok()
        .and_then(Duration::try_seconds)
        .and_then(|ttl| cached_at.checked_add_signed(ttl))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Keys double as file names, so only `[A-Za-z0-9_-]` is accepted.
pub(crate) fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        bail!("cache key must not be empty");
    }
    if !key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        bail!("invalid cache key: {}", key);
    }
    Ok(())
}
