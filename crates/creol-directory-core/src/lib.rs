//! CREOL directory - people and alumni listings from the CREOL directory API.
//!
//! Fetches records through a TTL cache, validates them, and renders them as
//! accessible HTML fragments (cards, grid or table). A failing or empty
//! remote never surfaces as an error: callers always get a fragment back.
//!
//! ```no_run
//! # async fn demo() -> anyhow::Result<()> {
//! use std::sync::Arc;
//! use creol_directory_core::{ApiClient, Attributes, Directory, MemoryCacheStore, MemorySettingsStore};
//!
//! let directory = Directory::new(
//!     ApiClient::new()?,
//!     Arc::new(MemoryCacheStore::new()),
//!     Arc::new(MemorySettingsStore::new()),
//! );
//! let attrs: Attributes = [("grpname1", "Faculty"), ("display", "grid")].into_iter().collect();
//! println!("{}", directory.people(&attrs).await);
//! # Ok(())
//! # }
//! ```

pub mod admin;
pub mod api;
pub mod cache;
pub mod config;
pub mod directory;
pub mod models;
pub mod render;
pub mod resolve;
pub mod settings;
pub mod utils;
pub mod validate;

pub use admin::{clear_all_cache, uninstall, AdminError, Operator};
pub use api::{ApiClient, ApiError, API_BASE_URL};
pub use cache::{CacheStore, CachedClient, FileCacheStore, MemoryCacheStore};
pub use config::Config;
pub use directory::{Directory, DirectoryError};
pub use models::{Alumnus, DirectoryRequest, DisplayMode, Person, RawRecord, RecordKind};
pub use render::Html;
pub use resolve::{resolve, Attributes};
pub use settings::{JsonSettingsStore, MemorySettingsStore, SettingsBundle, SettingsStore};
