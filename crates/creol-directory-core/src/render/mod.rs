//! HTML rendering of validated directory records.
//!
//! Each display mode is a pure function of the validated records and the
//! resolved request. All output goes through [`markup::Markup`], which
//! escapes every value except sanitized [`markup::InlineMarkup`] fields
//! (job title, program).

pub mod alumni;
pub mod fragments;
pub mod markup;
pub mod people;
pub(crate) mod sanitize;

use crate::models::{Alumnus, DirectoryRecord, DirectoryRequest, Person};

pub use markup::{escape_html, Html, InlineMarkup, Markup};

/// A record type that knows how to lay out a list of itself.
pub trait Renderable: DirectoryRecord {
    fn render(records: &[Self], request: &DirectoryRequest) -> Html;
}

impl Renderable for Person {
    fn render(records: &[Self], request: &DirectoryRequest) -> Html {
        people::render_people(records, request)
    }
}

impl Renderable for Alumnus {
    fn render(records: &[Self], request: &DirectoryRequest) -> Html {
        alumni::render_alumni(records, request)
    }
}

/// The first `limit` records, or all of them when `limit` is 0.
pub fn limited<T>(records: &[T], limit: usize) -> &[T] {
    if limit > 0 && limit < records.len() {
        &records[..limit]
    } else {
        records
    }
}

/// Space-separated class list: `base` plus every modifier whose flag is set.
pub(crate) fn class_list(base: &str, modifiers: &[(&str, bool)]) -> String {
    let mut classes = base.to_string();
    for (class, enabled) in modifiers {
        if *enabled {
            classes.push(' ');
            classes.push_str(class);
        }
    }
    classes
}
