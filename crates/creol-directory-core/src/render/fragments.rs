//! Fixed fragments shown instead of a listing.
//!
//! Each outcome has its own stable CSS class so pages can style (or hide)
//! them independently.

use crate::api::ApiError;
use crate::directory::DirectoryError;
use crate::models::{DisplayMode, RecordKind};

use super::markup::{Html, Markup};

fn message(class: &str, text: &str) -> Html {
    let mut m = Markup::new();
    m.text_element("div", &[("class", class)], text);
    m.finish()
}

/// Nothing to show. Table layouts get an extra class since they replace a whole table.
pub fn empty(kind: RecordKind, display: DisplayMode) -> Html {
    let label = kind.label();
    let class = match display {
        DisplayMode::Table => format!("creol-{0}-empty creol-{0}-table-empty", label),
        DisplayMode::Card | DisplayMode::Grid => format!("creol-{}-empty", label),
    };
    message(&class, &format!("No {} found.", label))
}

/// Records arrived but none passed validation.
pub fn invalid(kind: RecordKind) -> Html {
    let label = kind.label();
    message(
        &format!("creol-{0}-empty creol-{0}-invalid", label),
        &format!("No valid {} data found.", label),
    )
}

/// The service could not be reached or answered with an error status.
pub fn unavailable(kind: RecordKind) -> Html {
    let label = kind.label();
    message(
        &format!("creol-{}-error", label),
        &format!("Could not retrieve {} data.", label),
    )
}

/// The service answered with something that is not a record list.
pub fn unreadable(kind: RecordKind) -> Html {
    let label = kind.label();
    message(
        &format!("creol-{0}-error creol-{0}-parse-error", label),
        &format!("Could not read {} data.", label),
    )
}

/// The fragment for a failed render.
pub fn for_error(error: &DirectoryError, kind: RecordKind, display: DisplayMode) -> Html {
    match error {
        DirectoryError::Fetch(ApiError::NoData) => empty(kind, display),
        DirectoryError::Fetch(e) if e.is_unavailable() => unavailable(kind),
        DirectoryError::Fetch(_) => unreadable(kind),
        DirectoryError::AllRecordsInvalid { .. } => invalid(kind),
    }
}
