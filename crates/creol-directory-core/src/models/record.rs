use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::utils::{sanitize_text, truncate_string};

/// Maximum length of a raw record when written to the log
const MAX_LOGGED_RECORD_LENGTH: usize = 200;

/// Kind of directory listing; decides the remote mode token, required fields
/// and the display modes that make sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    People,
    Alumni,
}

impl RecordKind {
    /// Literal first query parameter selecting the remote data set.
    pub fn mode_token(&self) -> &'static str {
        match self {
            RecordKind::People => "WWWPeople",
            RecordKind::Alumni => "WWWAlumni",
        }
    }

    /// Name of the settings bundle holding this kind's defaults.
    pub fn settings_bundle(&self) -> &'static str {
        match self {
            RecordKind::People => "creol_people_api_options",
            RecordKind::Alumni => "creol_alumni_api_options",
        }
    }

    /// Lowercase label used in CSS classes and messages.
    pub fn label(&self) -> &'static str {
        match self {
            RecordKind::People => "people",
            RecordKind::Alumni => "alumni",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::People => write!(f, "People"),
            RecordKind::Alumni => write!(f, "Alumni"),
        }
    }
}

/// One element of the remote `response` array, exactly as received.
///
/// Nothing about the shape is trusted: it may not even be an object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(Value);

impl RawRecord {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn is_object(&self) -> bool {
        self.0.is_object()
    }

    /// Scalar field value as a string. Absent, `null`, arrays and objects are `None`.
    pub fn field(&self, name: &str) -> Option<String> {
        match self.0.get(name)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Field sanitized as plain text; `None` when nothing is left.
    pub fn text(&self, name: &str) -> Option<String> {
        self.field(name)
            .map(|raw| sanitize_text(&raw))
            .filter(|s| !s.is_empty())
    }

    /// Compact, truncated JSON for diagnostics.
    pub fn log_repr(&self) -> String {
        truncate_string(&self.0.to_string(), MAX_LOGGED_RECORD_LENGTH)
    }
}

impl From<Value> for RawRecord {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidRecord {
    #[error("record is not a JSON object")]
    NotAnObject,

    #[error("missing required field(s): {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
}

/// A typed record produced from a [`RawRecord`] by fallible normalization.
pub trait DirectoryRecord: Sized {
    const KIND: RecordKind;

    fn from_raw(raw: &RawRecord) -> Result<Self, InvalidRecord>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_accepts_scalars_only() {
        let raw = RawRecord::new(json!({
            "Name": "Jane",
            "Room": 204,
            "Active": true,
            "Phone": null,
            "Tags": ["a"],
        }));
        assert_eq!(raw.field("Name").as_deref(), Some("Jane"));
        assert_eq!(raw.field("Room").as_deref(), Some("204"));
        assert_eq!(raw.field("Active").as_deref(), Some("true"));
        assert_eq!(raw.field("Phone"), None);
        assert_eq!(raw.field("Tags"), None);
        assert_eq!(raw.field("Missing"), None);
    }

    #[test]
    fn test_text_drops_blank_and_markup_only_values() {
        let raw = RawRecord::new(json!({"A": "  ", "B": "<b></b>", "C": " <i>Jo</i> "}));
        assert_eq!(raw.text("A"), None);
        assert_eq!(raw.text("B"), None);
        assert_eq!(raw.text("C").as_deref(), Some("Jo"));
    }

    #[test]
    fn test_non_object_has_no_fields() {
        let raw = RawRecord::new(json!("just a string"));
        assert!(!raw.is_object());
        assert_eq!(raw.field("FirstName"), None);
    }

    #[test]
    fn test_log_repr_is_truncated() {
        let raw = RawRecord::new(json!({"Bio": "x".repeat(500)}));
        assert!(raw.log_repr().chars().count() <= MAX_LOGGED_RECORD_LENGTH);
        assert!(raw.log_repr().ends_with("..."));
    }

    #[test]
    fn test_invalid_record_message_lists_fields() {
        let err = InvalidRecord::MissingFields(vec!["Program", "Degree"]);
        assert_eq!(err.to_string(), "missing required field(s): Program, Degree");
    }

    #[test]
    fn test_record_kind_tokens() {
        assert_eq!(RecordKind::People.mode_token(), "WWWPeople");
        assert_eq!(RecordKind::Alumni.mode_token(), "WWWAlumni");
        assert_eq!(RecordKind::Alumni.settings_bundle(), "creol_alumni_api_options");
    }
}
