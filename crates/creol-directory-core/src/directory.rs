//! Render entry points.
//!
//! `Directory::people` and `Directory::alumni` are the equivalents of the
//! page shortcodes: attributes in, HTML fragment out. Every failure is turned
//! into a fragment here, so a broken remote never breaks the page that
//! embeds the listing.

use std::sync::Arc;

use thiserror::Error;
use tracing::warn;

use crate::api::{ApiClient, ApiError};
use crate::cache::{CacheStore, CachedClient};
use crate::models::{Alumnus, DirectoryRequest, Person, RecordKind};
use crate::render::{fragments, Html, Renderable};
use crate::resolve::{resolve, Attributes};
use crate::settings::{SettingsBundle, SettingsStore};
use crate::validate::validate_records;

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error(transparent)]
    Fetch(#[from] ApiError),

    #[error("all {count} {kind} records failed validation")]
    AllRecordsInvalid { kind: RecordKind, count: usize },
}

/// The fetch-cache-validate-render pipeline with its injected stores.
#[derive(Clone)]
pub struct Directory {
    client: CachedClient,
    settings: Arc<dyn SettingsStore>,
}

impl Directory {
    pub fn new(api: ApiClient, cache: Arc<dyn CacheStore>, settings: Arc<dyn SettingsStore>) -> Self {
        Self {
            client: CachedClient::new(api, cache),
            settings,
        }
    }

    pub fn client(&self) -> &CachedClient {
        &self.client
    }

    /// People listing for the given attributes.
    pub async fn people(&self, attrs: &Attributes) -> Html {
        self.render::<Person>(attrs).await
    }

    /// Alumni listing for the given attributes.
    pub async fn alumni(&self, attrs: &Attributes) -> Html {
        self.render::<Alumnus>(attrs).await
    }

    /// Current stored defaults for `kind`. An unreadable store means no defaults.
    pub fn settings_for(&self, kind: RecordKind) -> SettingsBundle {
        match self.settings.get(kind.settings_bundle()) {
            Ok(Some(options)) => SettingsBundle::from_options(&options),
            Ok(None) => SettingsBundle::default(),
            Err(e) => {
                warn!(bundle = kind.settings_bundle(), error = %e, "Failed to read settings, using defaults");
                SettingsBundle::default()
            }
        }
    }

    async fn render<T: Renderable>(&self, attrs: &Attributes) -> Html {
        let request = resolve(T::KIND, attrs, &self.settings_for(T::KIND));

        match self.collect::<T>(&request).await {
            Ok(records) => T::render(&records, &request),
            Err(e) => fragments::for_error(&e, T::KIND, request.display),
        }
    }

    /// Fetch (through the cache) and validate the records for `request`.
    pub async fn collect<T: Renderable>(
        &self,
        request: &DirectoryRequest,
    ) -> Result<Vec<T>, DirectoryError> {
        let params = request.query_params();
        let raw = self
            .client
            .get_or_fetch(&params, request.cache_ttl_seconds)
            .await?;

        let records = validate_records::<T>(&raw);
        if records.is_empty() {
            let url = self.client.request_url(&params);
            warn!(url = %url, kind = %T::KIND, count = raw.len(), "All directory records failed validation");
            return Err(DirectoryError::AllRecordsInvalid {
                kind: T::KIND,
                count: raw.len(),
            });
        }

        Ok(records)
    }
}
