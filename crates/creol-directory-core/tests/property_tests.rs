//! Property-based tests for resolving, validating and rendering records.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use proptest::prelude::*;
use serde_json::json;

use creol_directory_core::cache::cache_key;
use creol_directory_core::models::DirectoryRecord;
use creol_directory_core::render::{escape_html, InlineMarkup, Renderable};
use creol_directory_core::resolve::{clamp_columns, MAX_COLUMNS, MIN_COLUMNS};
use creol_directory_core::{resolve, Attributes, Person, RecordKind, SettingsBundle};

fn people_named(count: usize) -> Vec<Person> {
    (0..count)
        .map(|i| Person::from_raw(&json!({ "FirstName": format!("P{}", i) }).into()).unwrap())
        .collect()
}

proptest! {
    /// A person with only a first name renders exactly that name.
    #[test]
    fn prop_first_name_only_has_no_padding(first in "[A-Za-z][A-Za-z' -]{0,20}[A-Za-z]") {
        let person = Person::from_raw(&json!({ "FirstName": first.clone() }).into()).unwrap();
        prop_assert_eq!(person.full_name(), first.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    /// Any column hint resolves into the supported range.
    #[test]
    fn prop_columns_are_clamped(columns in any::<i64>()) {
        let attrs: Attributes = [("columns", columns.to_string())].into_iter().collect();
        let request = resolve(RecordKind::People, &attrs, &SettingsBundle::default());
        prop_assert!((MIN_COLUMNS..=MAX_COLUMNS).contains(&i64::from(request.columns)));
        prop_assert_eq!(request.columns, clamp_columns(columns));
    }

    /// Rendering never shows more than `limit` records; 0 shows all.
    #[test]
    fn prop_limit_truncates(count in 1usize..20, limit in 0usize..25) {
        let attrs: Attributes = [("limit", limit.to_string())].into_iter().collect();
        let request = resolve(RecordKind::People, &attrs, &SettingsBundle::default());
        let html = Person::render(&people_named(count), &request).into_string();

        let expected = if limit == 0 { count } else { limit.min(count) };
        prop_assert_eq!(html.matches("<article").count(), expected);
    }

    /// Plain fields can never inject markup.
    #[test]
    fn prop_names_cannot_inject_markup(first in "[ -~]{0,40}") {
        let raw = json!({ "FirstName": first, "LastName": "Doe" }).into();
        let person = Person::from_raw(&raw).unwrap();
        let request = resolve(RecordKind::People, &Attributes::new(), &SettingsBundle::default());
        let html = Person::render(&[person], &request).into_string();

        prop_assert!(!html.contains("<script"));
    }

    /// Sanitized inline markup never keeps script or event handlers.
    #[test]
    fn prop_inline_markup_is_safe(body in "[ -~]{0,40}") {
        let raw = format!("<b onclick=\"x()\">{}</b><script>{}</script>", body, body);
        let markup = InlineMarkup::sanitize(&raw);
        prop_assert!(!markup.as_str().contains("<script"));
        prop_assert!(!markup.as_str().contains("onclick"));
    }

    /// Escaped text contains no raw markup characters.
    #[test]
    fn prop_escape_removes_markup_chars(s in ".{0,60}") {
        let escaped = escape_html(&s);
        prop_assert!(!escaped.contains('<') && !escaped.contains('>') && !escaped.contains('"'));
    }

    /// Distinct URLs map to distinct, well-formed cache keys.
    #[test]
    fn prop_cache_keys_are_distinct(a in "[a-z0-9=&]{1,30}", b in "[a-z0-9=&]{1,30}") {
        prop_assume!(a != b);
        let ka = cache_key(&format!("https://api.creol.ucf.edu/People.asmx/GetData?{}", a));
        let kb = cache_key(&format!("https://api.creol.ucf.edu/People.asmx/GetData?{}", b));
        prop_assert_ne!(&ka, &kb);
        prop_assert!(ka.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
    }
}
