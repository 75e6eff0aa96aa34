//! Response caching.
//!
//! `CachedClient` wraps the API client with a time-bounded cache keyed by a
//! hash of the request URL. Storage sits behind the `CacheStore` trait:
//!
//! - `MemoryCacheStore`: process-local map
//! - `FileCacheStore`: one JSON file per key, one directory per site
//!
//! Every key starts with `CACHE_KEY_PREFIX`, which is what the administrative
//! clear and uninstall actions delete by.

pub mod file;
pub mod layer;
pub mod memory;
pub mod store;

pub use file::FileCacheStore;
pub use layer::{cache_key, CachedClient, CACHE_KEY_PREFIX};
pub use memory::MemoryCacheStore;
pub use store::{CacheStore, CachedData};
