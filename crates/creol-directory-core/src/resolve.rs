//! Request configuration resolver.
//!
//! Turns caller attributes (the shortcode's `key="value"` pairs) plus stored
//! defaults into a [`DirectoryRequest`]. Lookup order for every option is:
//! caller attribute, then settings bundle, then the constant below.

use std::collections::BTreeMap;

use tracing::debug;

use crate::models::{DirectoryRequest, DisplayMode, RecordKind};
use crate::settings::SettingsBundle;
use crate::utils::{parse_leading_int, parse_truthy, sanitize_text};

/// Cache lifetime when neither caller nor settings give one
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;

pub const DEFAULT_COLUMNS: i64 = 3;
pub const MIN_COLUMNS: i64 = 1;
pub const MAX_COLUMNS: i64 = 8;

/// A remote filter and the attribute names that feed it.
struct FilterSpec {
    param: &'static str,
    keys: &'static [&'static str],
    default: Option<&'static str>,
}

const PEOPLE_FILTERS: &[FilterSpec] = &[
    FilterSpec { param: "GrpName1", keys: &["grpname1", "grp1"], default: None },
    FilterSpec { param: "GrpName2", keys: &["grpname2", "grp2"], default: None },
    FilterSpec { param: "IncludedPositions", keys: &["included_positions"], default: None },
    FilterSpec { param: "ExcludedPositions", keys: &["excluded_positions"], default: None },
];

const ALUMNI_FILTERS: &[FilterSpec] = &[
    FilterSpec { param: "Year", keys: &["year"], default: None },
    FilterSpec { param: "Degree", keys: &["degree"], default: Some("all") },
];

/// Caller-supplied attributes with case-insensitive keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(BTreeMap<String, String>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an attribute; a later key differing only in case replaces an earlier one.
    pub fn insert(&mut self, key: impl AsRef<str>, value: impl Into<String>) {
        self.0.insert(key.as_ref().to_lowercase(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(&key.to_lowercase()).map(String::as_str)
    }

    /// First attribute present among `keys`.
    fn first_of(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|key| self.get(key))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Attributes::new();
        for (key, value) in iter {
            attrs.insert(key, value);
        }
        attrs
    }
}

/// Clamp a column hint into `MIN_COLUMNS..=MAX_COLUMNS`.
pub fn clamp_columns(columns: i64) -> u8 {
    // Clamped range always fits in u8
    columns.clamp(MIN_COLUMNS, MAX_COLUMNS) as u8
}

/// Build the request for one render of `kind`.
pub fn resolve(kind: RecordKind, attrs: &Attributes, settings: &SettingsBundle) -> DirectoryRequest {
    let columns = attrs
        .get("columns")
        .map(parse_leading_int)
        .or(settings.default_columns)
        .unwrap_or(DEFAULT_COLUMNS);

    let limit = attrs
        .get("limit")
        .map(|v| usize::try_from(parse_leading_int(v)).unwrap_or(0))
        .unwrap_or(0);

    let cache_ttl_seconds = attrs
        .get("cache_ttl")
        .map(|v| u64::try_from(parse_leading_int(v)).unwrap_or(0))
        .or(settings.default_cache_ttl)
        .unwrap_or(DEFAULT_CACHE_TTL_SECS);

    let dark_mode = attrs
        .get("dark_mode")
        .map(parse_truthy)
        .or(settings.default_dark_mode)
        .unwrap_or(false);

    let request = DirectoryRequest {
        kind,
        filters: resolve_filters(kind, attrs),
        limit,
        display: resolve_display(kind, attrs.get("display"), settings.default_display),
        columns: clamp_columns(columns),
        dark_mode,
        cache_ttl_seconds,
    };
    debug!(?request, "Resolved directory request");
    request
}

fn resolve_display(
    kind: RecordKind,
    requested: Option<&str>,
    stored: Option<DisplayMode>,
) -> DisplayMode {
    let mode = requested
        .and_then(|s| s.parse::<DisplayMode>().ok())
        .or(stored)
        .unwrap_or_else(|| kind.default_display());

    if kind.supports(mode) {
        mode
    } else {
        debug!(%kind, mode = mode.as_str(), "Display mode not available for kind, using default");
        kind.default_display()
    }
}

fn resolve_filters(kind: RecordKind, attrs: &Attributes) -> Vec<(String, String)> {
    let specs = match kind {
        RecordKind::People => PEOPLE_FILTERS,
        RecordKind::Alumni => ALUMNI_FILTERS,
    };

    specs
        .iter()
        .filter_map(|spec| {
            let value = attrs
                .first_of(spec.keys)
                .map(sanitize_text)
                .or_else(|| spec.default.map(str::to_string))?;
            (!value.is_empty()).then(|| (spec.param.to_string(), value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> Attributes {
        pairs.iter().copied().collect()
    }

    fn people(pairs: &[(&str, &str)]) -> DirectoryRequest {
        resolve(RecordKind::People, &attrs(pairs), &SettingsBundle::default())
    }

    #[test]
    fn test_defaults_without_attributes_or_settings() {
        let request = people(&[]);
        assert_eq!(request.kind, RecordKind::People);
        assert!(request.filters.is_empty());
        assert_eq!(request.limit, 0);
        assert_eq!(request.display, DisplayMode::Card);
        assert_eq!(request.columns, 3);
        assert!(!request.dark_mode);
        assert_eq!(request.cache_ttl_seconds, DEFAULT_CACHE_TTL_SECS);
    }

    #[test]
    fn test_keys_are_case_insensitive() {
        let request = people(&[("GrpName1", "Faculty"), ("DISPLAY", "Grid"), ("Columns", "4")]);
        assert_eq!(request.filters, vec![("GrpName1".to_string(), "Faculty".to_string())]);
        assert_eq!(request.display, DisplayMode::Grid);
        assert_eq!(request.columns, 4);
    }

    #[test]
    fn test_columns_are_clamped() {
        assert_eq!(people(&[("columns", "0")]).columns, 1);
        assert_eq!(people(&[("columns", "9")]).columns, 8);
        assert_eq!(people(&[("columns", "-1")]).columns, 1);
        assert_eq!(people(&[("columns", "5")]).columns, 5);
        assert_eq!(people(&[("columns", "abc")]).columns, 1);
    }

    #[test]
    fn test_limit_parsing() {
        assert_eq!(people(&[("limit", "3")]).limit, 3);
        assert_eq!(people(&[("limit", "-2")]).limit, 0);
        assert_eq!(people(&[("limit", "lots")]).limit, 0);
    }

    #[test]
    fn test_settings_fill_missing_attributes() {
        let settings = SettingsBundle {
            default_cache_ttl: Some(900),
            default_columns: Some(6),
            default_display: Some(DisplayMode::Grid),
            default_dark_mode: Some(true),
        };
        let request = resolve(RecordKind::People, &attrs(&[("columns", "2")]), &settings);
        assert_eq!(request.columns, 2);
        assert_eq!(request.cache_ttl_seconds, 900);
        assert_eq!(request.display, DisplayMode::Grid);
        assert!(request.dark_mode);
    }

    #[test]
    fn test_zero_ttl_overrides_stored_default() {
        let settings = SettingsBundle {
            default_cache_ttl: Some(900),
            ..SettingsBundle::default()
        };
        let request = resolve(RecordKind::People, &attrs(&[("cache_ttl", "0")]), &settings);
        assert_eq!(request.cache_ttl_seconds, 0);

        let negative = resolve(RecordKind::People, &attrs(&[("cache_ttl", "-30")]), &settings);
        assert_eq!(negative.cache_ttl_seconds, 0);
    }

    #[test]
    fn test_table_falls_back_for_people() {
        assert_eq!(people(&[("display", "table")]).display, DisplayMode::Card);
        let alumni = resolve(
            RecordKind::Alumni,
            &attrs(&[("display", "table")]),
            &SettingsBundle::default(),
        );
        assert_eq!(alumni.display, DisplayMode::Table);

        let stored_table = SettingsBundle {
            default_display: Some(DisplayMode::Table),
            ..SettingsBundle::default()
        };
        let request = resolve(RecordKind::People, &Attributes::new(), &stored_table);
        assert_eq!(request.display, DisplayMode::Card);
    }

    #[test]
    fn test_unknown_display_uses_stored_then_kind_default() {
        assert_eq!(people(&[("display", "carousel")]).display, DisplayMode::Card);
        let settings = SettingsBundle {
            default_display: Some(DisplayMode::Grid),
            ..SettingsBundle::default()
        };
        let request = resolve(RecordKind::People, &attrs(&[("display", "carousel")]), &settings);
        assert_eq!(request.display, DisplayMode::Grid);
    }

    #[test]
    fn test_people_filter_order_and_aliases() {
        let request = people(&[
            ("excluded_positions", "Emeritus"),
            ("grp2", "Staff"),
            ("grpname1", " <b>Faculty</b> "),
            ("included_positions", ""),
        ]);
        assert_eq!(
            request.filters,
            vec![
                ("GrpName1".to_string(), "Faculty".to_string()),
                ("GrpName2".to_string(), "Staff".to_string()),
                ("ExcludedPositions".to_string(), "Emeritus".to_string()),
            ]
        );
    }

    #[test]
    fn test_alumni_filters_default_degree() {
        let request = resolve(RecordKind::Alumni, &attrs(&[("year", "2020")]), &SettingsBundle::default());
        assert_eq!(
            request.filters,
            vec![
                ("Year".to_string(), "2020".to_string()),
                ("Degree".to_string(), "all".to_string()),
            ]
        );
        assert_eq!(request.display, DisplayMode::Grid);

        let explicit_empty =
            resolve(RecordKind::Alumni, &attrs(&[("degree", "")]), &SettingsBundle::default());
        assert!(explicit_empty.filters.is_empty());
    }

    #[test]
    fn test_dark_mode_flags() {
        assert!(people(&[("dark_mode", "1")]).dark_mode);
        assert!(people(&[("dark_mode", "true")]).dark_mode);
        assert!(!people(&[("dark_mode", "0")]).dark_mode);
    }
}
