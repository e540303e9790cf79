mod ids;
mod ledger;
mod preference;
mod problem_set;
pub mod syllabus;

pub use ids::{ItemKey, ItemPath};
pub use ledger::CompletionLedger;
pub use preference::{PreferenceScope, Site, SitePreference};
pub use problem_set::{PROBLEM_SET_WRAPPER_KEY, ProblemCategory, ProblemSet};
pub use syllabus::{
    DataStructure, ItemGroup, ListKind, NamedSection, SUMMARY_SECTION_KEY, SYLLABUS_WRAPPER_KEY,
    Section, SummarySection, Syllabus, section_title,
};
