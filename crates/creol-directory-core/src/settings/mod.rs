//! Stored display defaults.
//!
//! Defaults live in named option bundles owned by the host (an admin screen,
//! a JSON file). The core only reads them, once per render, through the
//! `SettingsStore` trait.

pub mod bundle;
pub mod store;

pub use bundle::SettingsBundle;
pub use store::{JsonSettingsStore, MemorySettingsStore, OptionMap, SettingsStore};
