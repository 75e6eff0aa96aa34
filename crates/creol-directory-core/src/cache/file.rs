use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::debug;

use super::store::{validate_key, CacheStore, CachedData};

/// Cache store keeping one JSON file per key under a site directory.
///
/// Layout: `<root>/<key>.json` for the default site and
/// `<root>/<site>/<key>.json` for every other site scope.
#[derive(Debug, Clone)]
pub struct FileCacheStore {
    cache_dir: PathBuf,
}

impl FileCacheStore {
    pub fn new(cache_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&cache_dir)
            .with_context(|| format!("Failed to create cache directory {}", cache_dir.display()))?;
        Ok(Self { cache_dir })
    }

    /// Store for one site scope below `root`.
    pub fn for_site(root: &Path, site: &str) -> Result<Self> {
        validate_key(site).context("Invalid site name")?;
        Self::new(root.join(site))
    }

    /// The root scope plus one store per site subdirectory.
    pub fn all_sites(root: &Path) -> Result<Vec<Self>> {
        let mut stores = vec![Self::new(root.to_path_buf())?];
        let entries = std::fs::read_dir(root)
            .with_context(|| format!("Failed to list cache directory {}", root.display()))?;
        for entry in entries {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                stores.push(Self { cache_dir: entry.path() });
            }
        }
        Ok(stores)
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    fn cache_path(&self, name: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", name))
    }

    fn load(&self, name: &str) -> Result<Option<CachedData<Value>>> {
        let path = self.cache_path(name);
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read cache file: {}", name))?;

        let cached: CachedData<Value> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse cache file: {}", name))?;

        Ok(Some(cached))
    }

    fn save(&self, name: &str, data: &Value, ttl_seconds: u64) -> Result<()> {
        let cached = CachedData::new(data, ttl_seconds);
        let path = self.cache_path(name);
        let contents = serde_json::to_string(&cached)?;
        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write cache file: {}", name))?;
        Ok(())
    }
}

impl CacheStore for FileCacheStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        validate_key(key)?;
        match self.load(key)? {
            Some(cached) if cached.is_expired() => {
                debug!(cache = key, age_secs = cached.age_seconds(), "Removing expired cache file");
                self.delete(key)?;
                Ok(None)
            }
            Some(cached) => Ok(Some(cached.data)),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &Value, ttl_seconds: u64) -> Result<()> {
        validate_key(key)?;
        if ttl_seconds == 0 {
            return Ok(());
        }
        self.save(key, value, ttl_seconds)
    }

    fn delete(&self, key: &str) -> Result<bool> {
        validate_key(key)?;
        let path = self.cache_path(key);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e).with_context(|| format!("Failed to delete cache file: {}", key)),
        }
    }

    fn delete_prefix(&self, prefix: &str) -> Result<usize> {
        let entries = match std::fs::read_dir(&self.cache_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to list cache directory {}", self.cache_dir.display())
                })
            }
        };

        let mut removed = 0;
        for entry in entries {
            let path = entry?.path();
            let matches = path.is_file()
                && path.extension().is_some_and(|ext| ext == "json")
                && path
                    .file_stem()
                    .and_then(|stem| stem.to_str())
                    .is_some_and(|stem| stem.starts_with(prefix));
            if matches {
                std::fs::remove_file(&path)
                    .with_context(|| format!("Failed to delete cache file {}", path.display()))?;
                removed += 1;
            }
        }
        Ok(removed)
    }
}
