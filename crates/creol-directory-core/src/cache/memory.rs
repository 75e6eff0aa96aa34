use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use anyhow::{anyhow, Result};
use serde_json::Value;

use super::store::{validate_key, CacheStore, CachedData};

/// Process-local cache store.
#[derive(Debug, Default)]
pub struct MemoryCacheStore {
    entries: Mutex<HashMap<String, CachedData<Value>>>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn keys(&self) -> Vec<String> {
        self.entries()
            .map(|e| e.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn entries(&self) -> Result<MutexGuard<'_, HashMap<String, CachedData<Value>>>> {
        self.entries
            .lock()
            .map_err(|_| anyhow!("memory cache lock poisoned"))
    }

    /// Shift an entry into the past, as if it had been stored `seconds` earlier.
    #[cfg(test)]
    pub(crate) fn backdate(&self, key: &str, seconds: i64) {
        if let Ok(mut entries) = self.entries() {
            if let Some(entry) = entries.get_mut(key) {
                let shift = chrono::Duration::seconds(seconds);
                entry.cached_at = entry.cached_at - shift;
                entry.expires_at = entry.expires_at - shift;
            }
        }
    }
}

impl CacheStore for MemoryCacheStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        let mut entries = self.entries()?;
        let expired = match entries.get(key) {
            Some(entry) => entry.is_expired(),
            None => return Ok(None),
        };
        if expired {
            entries.remove(key);
            return Ok(None);
        }
        Ok(entries.get(key).map(|entry| entry.data.clone()))
    }

    fn set(&self, key: &str, value: &Value, ttl_seconds: u64) -> Result<()> {
        validate_key(key)?;
        if ttl_seconds == 0 {
            return Ok(());
        }
        self.entries()?
            .insert(key.to_string(), CachedData::new(value.clone(), ttl_seconds));
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<bool> {
        Ok(self.entries()?.remove(key).is_some())
    }

    fn delete_prefix(&self, prefix: &str) -> Result<usize> {
        let mut entries = self.entries()?;
        let before = entries.len();
        entries.retain(|key, _| !key.starts_with(prefix));
        Ok(before - entries.len())
    }
}
