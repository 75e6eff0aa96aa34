use crate::render::markup::InlineMarkup;
use crate::utils::{sanitize_email, sanitize_text, sanitize_url};

use super::record::{DirectoryRecord, InvalidRecord, RawRecord, RecordKind};

// Remote field names
const FIRST_NAME: &str = "FirstName";
const LAST_NAME: &str = "LastName";
const IMAGE_URL: &str = "ImageURL";
const POSITION: &str = "Position";
const EMAIL: &str = "Email";
const PHONE: &str = "Phone";
const ROOM: &str = "Room";

/// A faculty/staff/student entry from the `WWWPeople` data set.
#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub first_name: String,
    pub last_name: String,
    pub image_url: Option<String>,
    /// Job title; may carry basic inline formatting.
    pub position: Option<InlineMarkup>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub room: Option<String>,
}

impl Person {
    /// First and last name joined, with no stray space when either is missing.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

impl DirectoryRecord for Person {
    const KIND: RecordKind = RecordKind::People;

    fn from_raw(raw: &RawRecord) -> Result<Self, InvalidRecord> {
        if !raw.is_object() {
            return Err(InvalidRecord::NotAnObject);
        }

        let first_name = raw.text(FIRST_NAME).unwrap_or_default();
        let last_name = raw.text(LAST_NAME).unwrap_or_default();
        if first_name.is_empty() && last_name.is_empty() {
            return Err(InvalidRecord::MissingFields(vec![FIRST_NAME, LAST_NAME]));
        }

        let position = raw
            .field(POSITION)
            .filter(|p| !sanitize_text(p).is_empty())
            .map(|p| InlineMarkup::sanitize(p.trim()));

        Ok(Person {
            first_name,
            last_name,
            image_url: raw.field(IMAGE_URL).and_then(|u| sanitize_url(&u)),
            position,
            email: raw.field(EMAIL).and_then(|e| sanitize_email(&e)),
            phone: raw.text(PHONE),
            room: raw.text(ROOM),
        })
    }
}
