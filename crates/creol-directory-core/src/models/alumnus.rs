use crate::render::markup::InlineMarkup;
use crate::utils::sanitize_text;

use super::record::{DirectoryRecord, InvalidRecord, RawRecord, RecordKind};

const NAME: &str = "FirstLastName";
const PROGRAM: &str = "Program";
const SEMESTER: &str = "Semester";
const DEGREE: &str = "Degree";
const ADVISOR: &str = "AdvisorName";

/// A graduate from the `WWWAlumni` data set.
///
/// Name, program, semester and degree are all required; a record missing
/// any of them is considered corrupt.
#[derive(Debug, Clone, PartialEq)]
pub struct Alumnus {
    pub name: String,
    pub program: InlineMarkup,
    pub semester: String,
    pub degree: String,
    pub advisor: Option<String>,
}

impl DirectoryRecord for Alumnus {
    const KIND: RecordKind = RecordKind::Alumni;

    fn from_raw(raw: &RawRecord) -> Result<Self, InvalidRecord> {
        if !raw.is_object() {
            return Err(InvalidRecord::NotAnObject);
        }

        let name = raw.text(NAME);
        let program = raw.field(PROGRAM).filter(|p| !sanitize_text(p).is_empty());
        let semester = raw.text(SEMESTER);
        let degree = raw.text(DEGREE);

        match (name, program, semester, degree) {
            (Some(name), Some(program), Some(semester), Some(degree)) => Ok(Alumnus {
                name,
                program: InlineMarkup::sanitize(program.trim()),
                semester,
                degree,
                advisor: raw.text(ADVISOR),
            }),
            (name, program, semester, degree) => {
                let missing = [
                    (NAME, name.is_none()),
                    (PROGRAM, program.is_none()),
                    (SEMESTER, semester.is_none()),
                    (DEGREE, degree.is_none()),
                ]
                .into_iter()
                .filter_map(|(field, missing)| missing.then_some(field))
                .collect();
                Err(InvalidRecord::MissingFields(missing))
            }
        }
    }
}
