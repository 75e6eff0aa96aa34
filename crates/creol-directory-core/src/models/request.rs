use std::fmt;
use std::str::FromStr;

use crate::api::QueryParam;

use super::record::RecordKind;

/// Layout strategy for a rendered directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// One card per record, photo included when available
    Card,
    /// Compact cards, never a photo
    Grid,
    /// One table row per record (alumni only)
    Table,
}

impl DisplayMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::Card => "card",
            DisplayMode::Grid => "grid",
            DisplayMode::Table => "table",
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisplayMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "card" => Ok(DisplayMode::Card),
            "grid" => Ok(DisplayMode::Grid),
            "table" => Ok(DisplayMode::Table),
            other => Err(format!("unknown display mode: {}", other)),
        }
    }
}

impl RecordKind {
    pub fn default_display(&self) -> DisplayMode {
        match self {
            RecordKind::People => DisplayMode::Card,
            RecordKind::Alumni => DisplayMode::Grid,
        }
    }

    pub fn supports(&self, display: DisplayMode) -> bool {
        !(matches!(self, RecordKind::People) && display == DisplayMode::Table)
    }
}

/// Fully-resolved description of one render call. Built fresh per call,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryRequest {
    pub kind: RecordKind,
    /// Remote filters as `(name, value)` in the order they are sent.
    pub filters: Vec<(String, String)>,
    /// Maximum rendered records; 0 renders all.
    pub limit: usize,
    pub display: DisplayMode,
    /// Layout hint in `1..=8`.
    pub columns: u8,
    pub dark_mode: bool,
    /// 0 disables caching for this call.
    pub cache_ttl_seconds: u64,
}

impl DirectoryRequest {
    /// Query parameters for the remote call: the mode token first, then filters in order.
    pub fn query_params(&self) -> Vec<QueryParam> {
        std::iter::once(QueryParam::literal(self.kind.mode_token()))
            .chain(
                self.filters
                    .iter()
                    .map(|(name, value)| QueryParam::pair(name.as_str(), value.as_str())),
            )
            .collect()
    }
}
