use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

use crate::model::syllabus::ListKind;

/// Persisted identifier of a checkable item.
///
/// Built by joining the item's path segments with [`ItemKey::DELIMITER`]. Item
/// text containing the delimiter can collide with another path; the key space
/// is small and fixed, so that risk is accepted rather than escaped.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemKey(String);

impl ItemKey {
    pub const DELIMITER: char = '-';

    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ItemKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ItemKey {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl Borrow<str> for ItemKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ItemKey({:?})", self.0)
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Structured location of an item in a syllabus or problem set.
///
/// Two paths compare equal only when every segment matches, so the structured
/// form never collides even when [`ItemPath::key`] would.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemPath {
    segments: Vec<String>,
}

impl ItemPath {
    /// Item of a plain list inside a syllabus section.
    ///
    /// `Topics` items sit directly under the section key; every other list
    /// contributes its field name as an extra segment.
    #[must_use]
    pub fn list_item(section: &str, list: ListKind, item: &str) -> Self {
        let mut segments = vec![section.to_owned()];
        if let Some(segment) = list.key_segment() {
            segments.push(segment.to_owned());
        }
        segments.push(item.to_owned());
        Self { segments }
    }

    /// Operation listed under one data structure of a section.
    #[must_use]
    pub fn data_structure_op(section: &str, data_structure: &str, operation: &str) -> Self {
        Self {
            segments: vec![
                section.to_owned(),
                ListKind::DataStructures.field_name().to_owned(),
                data_structure.to_owned(),
                operation.to_owned(),
            ],
        }
    }

    /// Problem within a Top 100 category.
    #[must_use]
    pub fn problem(category: &str, problem: &str) -> Self {
        Self {
            segments: vec![category.to_owned(), problem.to_owned()],
        }
    }

    #[must_use]
    pub fn key(&self) -> ItemKey {
        let mut buf = String::new();
        for (idx, segment) in self.segments.iter().enumerate() {
            if idx > 0 {
                buf.push(ItemKey::DELIMITER);
            }
            buf.push_str(segment);
        }
        ItemKey(buf)
    }
}
