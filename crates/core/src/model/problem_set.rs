use serde_json::Value;

use crate::error::SyllabusError;
use crate::model::ids::ItemPath;
use crate::model::syllabus::{dedup_texts, strings_of, unwrap_key};

/// Optional wrapper key around the Top 100 categories.
pub const PROBLEM_SET_WRAPPER_KEY: &str = "Top100MncPrep";

/// Problems of one category, duplicates collapsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemCategory {
    name: String,
    problems: Vec<String>,
}

impl ProblemCategory {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn problems(&self) -> &[String] {
        &self.problems
    }

    #[must_use]
    pub fn path(&self, problem: &str) -> ItemPath {
        ItemPath::problem(&self.name, problem)
    }
}

/// Flat per-category problem list used by the Top 100 tracker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProblemSet {
    categories: Vec<ProblemCategory>,
}

impl ProblemSet {
    /// Build from `(category, problems)` pairs; repeated problems keep their first position.
    #[must_use]
    pub fn new<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<String>)>,
        S: Into<String>,
    {
        let categories = categories
            .into_iter()
            .map(|(name, problems)| ProblemCategory {
                name: name.into(),
                problems: dedup_texts(problems.iter().map(String::as_str)),
            })
            .collect();
        Self { categories }
    }

    /// Parse a problem-set document, unwrapping [`PROBLEM_SET_WRAPPER_KEY`] if present.
    ///
    /// Categories whose value is not a list are skipped.
    ///
    /// # Errors
    ///
    /// Returns `SyllabusError` if the text is not JSON or its top level is not an object.
    pub fn from_json_str(text: &str) -> Result<Self, SyllabusError> {
        let value: Value = serde_json::from_str(text)?;
        let Value::Object(root) = unwrap_key(value, PROBLEM_SET_WRAPPER_KEY) else {
            return Err(SyllabusError::NotAnObject);
        };
        let categories = root
            .iter()
            .filter(|(_, problems)| problems.is_array())
            .map(|(name, problems)| ProblemCategory {
                name: name.clone(),
                problems: strings_of(problems),
            })
            .collect();
        Ok(Self { categories })
    }

    #[must_use]
    pub fn categories(&self) -> &[ProblemCategory] {
        &self.categories
    }

    #[must_use]
    pub fn category(&self, name: &str) -> Option<&ProblemCategory> {
        self.categories.iter().find(|c| c.name == name)
    }

    #[must_use]
    pub fn contains_item(&self, key: &str) -> bool {
        self.categories.iter().any(|category| {
            category
                .problems
                .iter()
                .any(|p| category.path(p).key().as_str() == key)
        })
    }
}
