use serde_json::Value;
use tracing::debug;

use crate::models::DisplayMode;
use crate::utils::{parse_leading_int, parse_truthy};

use super::store::OptionMap;

const DEFAULT_CACHE_TTL: &str = "default_cache_ttl";
const DEFAULT_COLUMNS: &str = "default_columns";
const DEFAULT_DISPLAY: &str = "default_display";
const DEFAULT_DARK_MODE: &str = "default_dark_mode";

/// Stored defaults for one record kind. `None` means "not set or unusable",
/// in which case the resolver uses its own constant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsBundle {
    pub default_cache_ttl: Option<u64>,
    pub default_columns: Option<i64>,
    pub default_display: Option<DisplayMode>,
    pub default_dark_mode: Option<bool>,
}

impl SettingsBundle {
    /// Parse a raw option map. Values may be strings, numbers or booleans.
    pub fn from_options(options: &OptionMap) -> Self {
        let bundle = Self {
            default_cache_ttl: options
                .get(DEFAULT_CACHE_TTL)
                .and_then(as_int)
                .and_then(|ttl| u64::try_from(ttl).ok()),
            default_columns: options.get(DEFAULT_COLUMNS).and_then(as_int),
            default_display: options
                .get(DEFAULT_DISPLAY)
                .and_then(Value::as_str)
                .and_then(|s| s.parse().ok()),
            default_dark_mode: options.get(DEFAULT_DARK_MODE).and_then(as_flag),
        };
        debug!(?bundle, "Parsed settings bundle");
        bundle
    }
}

fn as_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => has_leading_digit(s).then(|| parse_leading_int(s)),
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    }
}

/// Whether `s` starts (after whitespace and an optional sign) with a digit.
/// Anything else is unusable rather than 0.
fn has_leading_digit(s: &str) -> bool {
    let s = s.trim_start();
    let unsigned = s.strip_prefix(['-', '+']).unwrap_or(s);
    unsigned.starts_with(|c: char| c.is_ascii_digit())
}

fn as_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => Some(parse_truthy(s)),
        _ => None,
    }
}
