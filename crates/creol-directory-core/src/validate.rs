//! Record validation.
//!
//! Raw records that fail normalization are dropped from the render path and
//! logged one by one with their content.

use tracing::warn;

use crate::models::{Alumnus, DirectoryRecord, Person, RawRecord, RecordKind};

/// Whether `record` carries the minimum fields for `kind`.
pub fn is_valid(record: &RawRecord, kind: RecordKind) -> bool {
    match kind {
        RecordKind::People => Person::from_raw(record).is_ok(),
        RecordKind::Alumni => Alumnus::from_raw(record).is_ok(),
    }
}

/// Normalize every record, keeping the valid ones in their original order.
pub fn validate_records<T: DirectoryRecord>(records: &[RawRecord]) -> Vec<T> {
    records
        .iter()
        .enumerate()
        .filter_map(|(index, raw)| match T::from_raw(raw) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(
                    kind = %T::KIND,
                    index,
                    reason = %e,
                    record = %raw.log_repr(),
                    "Dropping invalid directory record"
                );
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_valid_people() {
        assert!(is_valid(&json!({"FirstName": "A"}).into(), RecordKind::People));
        assert!(is_valid(&json!({"LastName": "B"}).into(), RecordKind::People));
        assert!(!is_valid(&json!({"Email": "x@ucf.edu"}).into(), RecordKind::People));
        assert!(!is_valid(&json!(null).into(), RecordKind::People));
    }

    #[test]
    fn test_is_valid_alumni_is_stricter() {
        let partial = RawRecord::from(json!({"FirstLastName": "A B", "Program": "Optics"}));
        assert!(!is_valid(&partial, RecordKind::Alumni));

        let full = RawRecord::from(json!({
            "FirstLastName": "A B",
            "Program": "Optics",
            "Semester": "Spring 2022",
            "Degree": "MS",
        }));
        assert!(is_valid(&full, RecordKind::Alumni));
        assert!(!is_valid(&full, RecordKind::People));
    }

    #[test]
    fn test_validate_records_keeps_order_and_drops_invalid() {
        let records: Vec<RawRecord> = vec![
            json!({"FirstName": "First"}).into(),
            json!({"Position": "No name"}).into(),
            json!("garbage").into(),
            json!({"LastName": "Last"}).into(),
        ];
        let people: Vec<Person> = validate_records(&records);
        let names: Vec<String> = people.iter().map(Person::full_name).collect();
        assert_eq!(names, vec!["First", "Last"]);
    }
}
