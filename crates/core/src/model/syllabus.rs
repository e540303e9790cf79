use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::error::SyllabusError;
use crate::model::ids::ItemPath;

/// Key of the section that holds the plain summary map.
///
/// Matched by name only; a syllabus that renames this section will have its
/// summary counted as an ordinary (empty) section.
pub const SUMMARY_SECTION_KEY: &str = "SummaryChecklist";

/// Optional wrapper key an imported document may nest its sections under.
pub const SYLLABUS_WRAPPER_KEY: &str = "SoftwareEngineeringInterviewPreparationSyllabus";

const OPTIONAL_FOR_FIELD: &str = "OptionalFor";

//
// ─── LIST KINDS ────────────────────────────────────────────────────────────────
//

/// A checkable list a section may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Topics,
    KeyConcepts,
    InterviewFocus,
    DataStructures,
    Algorithms,
    TimeAndSpaceComplexity,
    RecommendedSites,
    Practice,
    Bonus,
}

impl ListKind {
    /// Field name used in the JSON document.
    #[must_use]
    pub fn field_name(self) -> &'static str {
        match self {
            ListKind::Topics => "Topics",
            ListKind::KeyConcepts => "KeyConcepts",
            ListKind::InterviewFocus => "InterviewFocus",
            ListKind::DataStructures => "DataStructures",
            ListKind::Algorithms => "Algorithms",
            ListKind::TimeAndSpaceComplexity => "TimeAndSpaceComplexity",
            ListKind::RecommendedSites => "RecommendedSites",
            ListKind::Practice => "Practice",
            ListKind::Bonus => "Bonus",
        }
    }

    /// Segment this list contributes to an item key; `Topics` contributes none.
    #[must_use]
    pub fn key_segment(self) -> Option<&'static str> {
        match self {
            ListKind::Topics => None,
            other => Some(other.field_name()),
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            ListKind::Topics => "Topics",
            ListKind::KeyConcepts => "Key Concepts",
            ListKind::InterviewFocus => "Interview Focus",
            ListKind::DataStructures => "Data Structures",
            ListKind::Algorithms => "Algorithms",
            ListKind::TimeAndSpaceComplexity => "Time and Space Complexity",
            ListKind::RecommendedSites => "Recommended Sites",
            ListKind::Practice => "Practice",
            ListKind::Bonus => "Bonus",
        }
    }

    /// Supplementary lists are checkable but left out of progress totals.
    #[must_use]
    pub fn counts_toward_progress(self) -> bool {
        !matches!(
            self,
            ListKind::RecommendedSites | ListKind::Practice | ListKind::Bonus
        )
    }
}

//
// ─── SECTIONS ──────────────────────────────────────────────────────────────────
//

/// Lists and annotations any non-summary section may carry.
///
/// Every recognised list is kept whatever the section's layout, so a section
/// with both `Topics` and `KeyConcepts` shows and counts both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionLists {
    pub topics: Vec<String>,
    pub key_concepts: Vec<String>,
    pub interview_focus: Vec<String>,
    pub recommended_sites: Vec<String>,
    pub practice: Vec<String>,
    pub bonus: Vec<String>,
    pub optional_for: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataStructure {
    pub name: String,
    pub operations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataStructureSection {
    pub data_structures: Vec<DataStructure>,
    pub algorithms: Vec<String>,
    pub complexity: Vec<String>,
    pub lists: SectionLists,
}

/// Key → description pairs shown as a recap; never checkable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummarySection {
    pub entries: Vec<(String, String)>,
}

/// Section layout, picked from the fields present.
///
/// `DataStructures` wins over `Topics`, which wins over `KeyConcepts`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section {
    Topics(SectionLists),
    KeyConcepts(SectionLists),
    DataStructures(DataStructureSection),
    Summary(SummarySection),
}

/// One renderable list of a section, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemGroup<'a> {
    pub kind: ListKind,
    /// Data-structure name for `DataStructures` groups.
    pub collection: Option<&'a str>,
    pub items: &'a [String],
}

impl ItemGroup<'_> {
    #[must_use]
    pub fn path(&self, section_key: &str, item: &str) -> ItemPath {
        match self.collection {
            Some(ds) => ItemPath::data_structure_op(section_key, ds, item),
            None => ItemPath::list_item(section_key, self.kind, item),
        }
    }
}

impl Section {
    #[must_use]
    pub fn is_summary(&self) -> bool {
        matches!(self, Section::Summary(_))
    }

    #[must_use]
    pub fn lists(&self) -> Option<&SectionLists> {
        match self {
            Section::Topics(lists) | Section::KeyConcepts(lists) => Some(lists),
            Section::DataStructures(s) => Some(&s.lists),
            Section::Summary(_) => None,
        }
    }

    #[must_use]
    pub fn optional_for(&self) -> Option<&str> {
        self.lists().and_then(|l| l.optional_for.as_deref())
    }

    /// Every checkable list of the section, empty lists omitted.
    ///
    /// Data-structure lists come first, then the lists every layout shares.
    #[must_use]
    pub fn groups(&self) -> Vec<ItemGroup<'_>> {
        let mut groups = Vec::new();
        if let Section::DataStructures(s) = self {
            for ds in &s.data_structures {
                push_group(
                    &mut groups,
                    ListKind::DataStructures,
                    Some(ds.name.as_str()),
                    &ds.operations,
                );
            }
            push_group(&mut groups, ListKind::Algorithms, None, &s.algorithms);
            push_group(&mut groups, ListKind::TimeAndSpaceComplexity, None, &s.complexity);
        }

        if let Some(lists) = self.lists() {
            push_group(&mut groups, ListKind::Topics, None, &lists.topics);
            push_group(&mut groups, ListKind::KeyConcepts, None, &lists.key_concepts);
            push_group(&mut groups, ListKind::InterviewFocus, None, &lists.interview_focus);
            push_group(&mut groups, ListKind::RecommendedSites, None, &lists.recommended_sites);
            push_group(&mut groups, ListKind::Practice, None, &lists.practice);
            push_group(&mut groups, ListKind::Bonus, None, &lists.bonus);
        }
        groups
    }

    fn from_object(obj: &Map<String, Value>) -> Self {
        let lists = SectionLists {
            topics: string_list(obj, ListKind::Topics.field_name()),
            key_concepts: string_list(obj, ListKind::KeyConcepts.field_name()),
            interview_focus: string_list(obj, ListKind::InterviewFocus.field_name()),
            recommended_sites: string_list(obj, ListKind::RecommendedSites.field_name()),
            practice: string_list(obj, ListKind::Practice.field_name()),
            bonus: string_list(obj, ListKind::Bonus.field_name()),
            optional_for: obj
                .get(OPTIONAL_FOR_FIELD)
                .and_then(Value::as_str)
                .map(str::to_owned),
        };

        if let Some(map) = obj
            .get(ListKind::DataStructures.field_name())
            .and_then(Value::as_object)
        {
            let data_structures = map
                .iter()
                .filter(|(_, ops)| ops.is_array())
                .map(|(name, ops)| DataStructure {
                    name: name.clone(),
                    operations: strings_of(ops),
                })
                .collect();
            return Section::DataStructures(DataStructureSection {
                data_structures,
                algorithms: string_list(obj, ListKind::Algorithms.field_name()),
                complexity: string_list(obj, ListKind::TimeAndSpaceComplexity.field_name()),
                lists,
            });
        }

        if obj.contains_key(ListKind::KeyConcepts.field_name())
            && !obj.contains_key(ListKind::Topics.field_name())
        {
            return Section::KeyConcepts(lists);
        }
        Section::Topics(lists)
    }

    fn summary_from(value: &Value) -> Self {
        let entries = value
            .as_object()
            .map(|obj| {
                obj.iter()
                    .map(|(k, v)| {
                        let text = v.as_str().map_or_else(|| v.to_string(), str::to_owned);
                        (k.clone(), text)
                    })
                    .collect()
            })
            .unwrap_or_default();
        Section::Summary(SummarySection { entries })
    }
}

//
// ─── SYLLABUS ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedSection {
    pub key: String,
    pub section: Section,
}

impl NamedSection {
    /// Human-readable heading derived from the section key.
    #[must_use]
    pub fn title(&self) -> String {
        section_title(&self.key)
    }

    /// Flattened `(path, text)` pairs of every checkable item.
    #[must_use]
    pub fn items(&self) -> Vec<(ItemPath, &str)> {
        self.section
            .groups()
            .into_iter()
            .flat_map(|group| {
                group
                    .items
                    .iter()
                    .map(move |item| (group.path(&self.key, item), item.as_str()))
            })
            .collect()
    }
}

/// Read-only study syllabus with sections in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Syllabus {
    sections: Vec<NamedSection>,
}

impl Syllabus {
    /// Parse a syllabus document, unwrapping [`SYLLABUS_WRAPPER_KEY`] if present.
    ///
    /// # Errors
    ///
    /// Returns `SyllabusError` if the text is not JSON or its top level is not an object.
    pub fn from_json_str(text: &str) -> Result<Self, SyllabusError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(unwrap_key(value, SYLLABUS_WRAPPER_KEY))
    }

    /// Build a syllabus from an already-unwrapped JSON value.
    ///
    /// Section values that are not objects are skipped, as are non-string list entries.
    ///
    /// # Errors
    ///
    /// Returns `SyllabusError::NotAnObject` if `value` is not a JSON object.
    pub fn from_value(value: Value) -> Result<Self, SyllabusError> {
        let Value::Object(root) = value else {
            return Err(SyllabusError::NotAnObject);
        };

        let sections = root
            .iter()
            .filter_map(|(key, value)| {
                let section = if key == SUMMARY_SECTION_KEY {
                    Section::summary_from(value)
                } else {
                    Section::from_object(value.as_object()?)
                };
                Some(NamedSection {
                    key: key.clone(),
                    section,
                })
            })
            .collect();
        Ok(Self { sections })
    }

    #[must_use]
    pub fn sections(&self) -> &[NamedSection] {
        &self.sections
    }

    #[must_use]
    pub fn section(&self, key: &str) -> Option<&NamedSection> {
        self.sections.iter().find(|s| s.key == key)
    }

    /// Sections that take part in counting and filtering.
    pub fn checkable_sections(&self) -> impl Iterator<Item = &NamedSection> {
        self.sections.iter().filter(|s| !s.section.is_summary())
    }

    #[must_use]
    pub fn summary(&self) -> Option<&SummarySection> {
        self.sections.iter().find_map(|s| match &s.section {
            Section::Summary(summary) => Some(summary),
            _ => None,
        })
    }

    /// Whether `key` names a checkable item of this syllabus.
    #[must_use]
    pub fn contains_item(&self, key: &str) -> bool {
        self.checkable_sections()
            .flat_map(NamedSection::items)
            .any(|(path, _)| path.key().as_str() == key)
    }
}

/// `3_DataStructuresAndAlgorithms` → `Data Structures And Algorithms`.
#[must_use]
pub fn section_title(key: &str) -> String {
    let digits = key.bytes().take_while(u8::is_ascii_digit).count();
    let rest = if digits > 0 && key[digits..].starts_with('_') {
        &key[digits + 1..]
    } else {
        key
    };

    let mut title = String::with_capacity(rest.len() + 8);
    for ch in rest.chars() {
        if ch.is_ascii_uppercase() {
            title.push(' ');
        }
        title.push(ch);
    }
    title.trim().to_owned()
}

pub(crate) fn unwrap_key(value: Value, wrapper: &str) -> Value {
    match value {
        Value::Object(mut obj) if obj.contains_key(wrapper) => {
            obj.remove(wrapper).unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// String entries of `value` in order, non-strings skipped.
pub(crate) fn strings_of(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| dedup_texts(items.iter().filter_map(Value::as_str)))
        .unwrap_or_default()
}

/// Keeps the first occurrence of each text.
pub(crate) fn dedup_texts<'a>(texts: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    texts
        .into_iter()
        .filter(|text| seen.insert(*text))
        .map(str::to_owned)
        .collect()
}

fn push_group<'a>(
    groups: &mut Vec<ItemGroup<'a>>,
    kind: ListKind,
    collection: Option<&'a str>,
    items: &'a [String],
) {
    if !items.is_empty() {
        groups.push(ItemGroup {
            kind,
            collection,
            items,
        });
    }
}

fn string_list(obj: &Map<String, Value>, field: &str) -> Vec<String> {
    obj.get(field).map(strings_of).unwrap_or_default()
}
