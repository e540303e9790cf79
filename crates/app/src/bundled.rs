//! Content shipped inside the binary.

use prep_core::error::SyllabusError;
use prep_core::model::{ProblemSet, Syllabus};

const SYLLABUS_JSON: &str = include_str!("../data/syllabus.json");
const TOP100_JSON: &str = include_str!("../data/top100.json");

/// Syllabus used until the user imports their own.
pub fn syllabus() -> Result<Syllabus, SyllabusError> {
    Syllabus::from_json_str(SYLLABUS_JSON)
}

pub fn top100() -> Result<ProblemSet, SyllabusError> {
    ProblemSet::from_json_str(TOP100_JSON)
}
