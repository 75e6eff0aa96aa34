//! Maintenance actions: manual cache purge and uninstall cleanup.

use thiserror::Error;
use tracing::{info, warn};

use crate::cache::{CacheStore, CACHE_KEY_PREFIX};

#[derive(Error, Debug)]
pub enum AdminError {
    #[error("operator is not allowed to manage directory options")]
    Forbidden,

    #[error("cache store error: {0:#}")]
    Store(#[from] anyhow::Error),
}

/// Whoever triggers an admin action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Operator {
    pub can_manage_options: bool,
}

impl Operator {
    pub fn admin() -> Self {
        Self { can_manage_options: true }
    }
}

/// Drop every directory cache entry. Returns how many were removed.
///
/// Entries written by anything else sharing the store are left alone. Running
/// it twice is harmless; the second call reports 0.
pub fn clear_all_cache(store: &dyn CacheStore, operator: &Operator) -> Result<usize, AdminError> {
    if !operator.can_manage_options {
        warn!("Cache clear refused: operator lacks permission");
        return Err(AdminError::Forbidden);
    }

    let removed = store.delete_prefix(CACHE_KEY_PREFIX)?;
    info!(removed, "Cleared directory cache");
    Ok(removed)
}

/// Remove this crate's entries from every store (one per site on multi-site hosts).
pub fn uninstall<'a>(stores: impl IntoIterator<Item = &'a dyn CacheStore>) -> Result<usize, AdminError> {
    let mut removed = 0;
    for store in stores {
        removed += store.delete_prefix(CACHE_KEY_PREFIX)?;
    }
    info!(removed, "Removed directory cache entries on uninstall");
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCacheStore;
    use serde_json::json;

    fn seeded() -> MemoryCacheStore {
        let store = MemoryCacheStore::new();
        store.set("creol_aaa", &json!([1]), 300).expect("set");
        store.set("creol_bbb", &json!([2]), 300).expect("set");
        store.set("other_plugin", &json!("keep"), 300).expect("set");
        store
    }

    #[test]
    fn test_clear_requires_permission() {
        let store = seeded();
        let err = clear_all_cache(&store, &Operator::default()).unwrap_err();
        assert!(matches!(err, AdminError::Forbidden));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_clear_is_idempotent_and_scoped() {
        let store = seeded();
        assert_eq!(clear_all_cache(&store, &Operator::admin()).unwrap(), 2);
        assert_eq!(clear_all_cache(&store, &Operator::admin()).unwrap(), 0);
        assert_eq!(store.keys(), vec!["other_plugin".to_string()]);
    }

    #[test]
    fn test_uninstall_covers_every_store() {
        let a = seeded();
        let b = seeded();
        let stores: [&dyn CacheStore; 2] = [&a, &b];
        assert_eq!(uninstall(stores).unwrap(), 4);
        assert_eq!(a.len(), 1);
        assert_eq!(b.len(), 1);
    }
}
