use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use anyhow::{anyhow, Context, Result};
use serde_json::Value;

/// Option name to loosely-typed value.
pub type OptionMap = HashMap<String, Value>;

/// Read access to named option bundles.
pub trait SettingsStore: Send + Sync {
    /// The options of `bundle`, or `None` if it was never saved.
    fn get(&self, bundle: &str) -> Result<Option<OptionMap>>;
}

/// In-process settings, filled by the host.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    bundles: RwLock<HashMap<String, OptionMap>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace a whole bundle.
    pub fn set(&self, bundle: &str, options: OptionMap) -> Result<()> {
        self.bundles
            .write()
            .map_err(|_| anyhow!("settings lock poisoned"))?
            .insert(bundle.to_string(), options);
        Ok(())
    }
}

impl SettingsStore for MemorySettingsStore {
    fn get(&self, bundle: &str) -> Result<Option<OptionMap>> {
        Ok(self
            .bundles
            .read()
            .map_err(|_| anyhow!("settings lock poisoned"))?
            .get(bundle)
            .cloned())
    }
}

/// Settings read from a JSON file shaped `{"bundle": {"option": value}}`.
///
/// The file is read on every lookup so edits made by the host are picked up
/// by the next render. A missing file means no bundles.
#[derive(Debug, Clone)]
pub struct JsonSettingsStore {
    path: PathBuf,
}

impl JsonSettingsStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn load(&self) -> Result<HashMap<String, OptionMap>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let contents = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read settings file {}", self.path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse settings file {}", self.path.display()))
    }
}

impl SettingsStore for JsonSettingsStore {
    fn get(&self, bundle: &str) -> Result<Option<OptionMap>> {
        Ok(self.load()?.remove(bundle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemorySettingsStore::new();
        assert_eq!(store.get("creol_people_api_options").expect("get"), None);

        let options: OptionMap = [("default_columns".to_string(), json!(4))].into_iter().collect();
        store.set("creol_people_api_options", options.clone()).expect("set");
        assert_eq!(store.get("creol_people_api_options").expect("get"), Some(options));
    }

    #[test]
    fn test_json_store_reads_named_bundle() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{"creol_people_api_options": {"default_display": "grid", "default_columns": "5"}}"#,
        )
        .expect("write");

        let store = JsonSettingsStore::new(path);
        let people = store.get("creol_people_api_options").expect("get").expect("bundle");
        assert_eq!(people.get("default_display"), Some(&json!("grid")));
        assert_eq!(store.get("creol_alumni_api_options").expect("get"), None);
    }

    #[test]
    fn test_json_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonSettingsStore::new(dir.path().join("absent.json"));
        assert_eq!(store.get("creol_people_api_options").expect("get"), None);
    }

    #[test]
    fn test_json_store_malformed_file_is_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{not json").expect("write");
        assert!(JsonSettingsStore::new(path).get("x").is_err());
    }
}
