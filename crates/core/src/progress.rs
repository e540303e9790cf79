//! Completion counts over syllabi and problem sets.
//!
//! Everything here is recomputed from the ledger on demand; nothing is cached.
//! Lists are counted over their distinct texts so repeated entries never
//! inflate either side of the ratio.

use std::collections::HashSet;
use std::iter::Sum;
use std::ops::Add;

use crate::model::{
    CompletionLedger, DataStructure, ItemGroup, ItemPath, NamedSection, ProblemCategory,
    ProblemSet, Section, Syllabus,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    #[must_use]
    pub fn new(completed: usize, total: usize) -> Self {
        Self { completed, total }
    }

    /// Share of completed items in `0.0..=100.0`; `0.0` for an empty scope.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.completed as f64 / self.total as f64 * 100.0
    }

    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn rounded_percent(&self) -> u32 {
        self.percentage().round() as u32
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}

impl Add for Progress {
    type Output = Progress;

    fn add(self, rhs: Progress) -> Progress {
        Progress {
            completed: self.completed + rhs.completed,
            total: self.total + rhs.total,
        }
    }
}

impl Sum for Progress {
    fn sum<I: Iterator<Item = Progress>>(iter: I) -> Self {
        iter.fold(Progress::default(), Add::add)
    }
}

/// Count distinct `items`, treating each as done when its path's key is in the ledger.
pub fn list_progress<'a, I, F>(items: I, ledger: &CompletionLedger, path_of: F) -> Progress
where
    I: IntoIterator<Item = &'a str>,
    F: Fn(&str) -> ItemPath,
{
    let mut seen = HashSet::new();
    let mut progress = Progress::default();
    for item in items {
        if !seen.insert(item) {
            continue;
        }
        progress.total += 1;
        if ledger.is_completed(path_of(item).key().as_str()) {
            progress.completed += 1;
        }
    }
    progress
}

#[must_use]
pub fn group_progress(section_key: &str, group: &ItemGroup<'_>, ledger: &CompletionLedger) -> Progress {
    list_progress(group.items.iter().map(String::as_str), ledger, |item| {
        group.path(section_key, item)
    })
}

/// Progress over every counted list of a section; summary sections count as empty.
#[must_use]
pub fn section_progress(section: &NamedSection, ledger: &CompletionLedger) -> Progress {
    section
        .section
        .groups()
        .iter()
        .filter(|group| group.kind.counts_toward_progress())
        .map(|group| group_progress(&section.key, group, ledger))
        .sum()
}

#[must_use]
pub fn syllabus_progress(syllabus: &Syllabus, ledger: &CompletionLedger) -> Progress {
    syllabus
        .checkable_sections()
        .map(|section| section_progress(section, ledger))
        .sum()
}

/// Progress of one data structure's operations.
#[must_use]
pub fn data_structure_progress(
    section_key: &str,
    data_structure: &DataStructure,
    ledger: &CompletionLedger,
) -> Progress {
    list_progress(
        data_structure.operations.iter().map(String::as_str),
        ledger,
        |op| ItemPath::data_structure_op(section_key, &data_structure.name, op),
    )
}

/// Sum over all data structures of a section, `None` if it has none.
#[must_use]
pub fn data_structures_progress(section: &NamedSection, ledger: &CompletionLedger) -> Option<Progress> {
    match &section.section {
        Section::DataStructures(ds) => Some(
            ds.data_structures
                .iter()
                .map(|d| data_structure_progress(&section.key, d, ledger))
                .sum(),
        ),
        _ => None,
    }
}

#[must_use]
pub fn category_progress(category: &ProblemCategory, ledger: &CompletionLedger) -> Progress {
    list_progress(
        category.problems().iter().map(String::as_str),
        ledger,
        |problem| category.path(problem),
    )
}

#[must_use]
pub fn problem_set_progress(problems: &ProblemSet, ledger: &CompletionLedger) -> Progress {
    problems
        .categories()
        .iter()
        .map(|category| category_progress(category, ledger))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ItemKey;

    fn syllabus() -> Syllabus {
        Syllabus::from_json_str(
            r#"{
                "1_Basics": {
                    "Topics": ["Variables", "Loops"],
                    "InterviewFocus": ["Scope"],
                    "Bonus": ["Trivia"]
                },
                "2_OOP": { "KeyConcepts": ["Inheritance"] },
                "3_DSA": {
                    "DataStructures": { "Stack": ["Push", "Pop"], "Queue": ["Enqueue"] },
                    "Algorithms": ["Sorting"],
                    "TimeAndSpaceComplexity": ["Big O"]
                },
                "SummaryChecklist": { "Basics": "Know them" }
            }"#,
        )
        .unwrap()
    }

    fn ledger(keys: &[&str]) -> CompletionLedger {
        let mut ledger = CompletionLedger::new();
        for key in keys {
            ledger.set(ItemKey::from(*key), true);
        }
        ledger
    }

    #[test]
    fn empty_scope_has_zero_percentage() {
        let progress = Progress::default();
        assert!(progress.percentage().abs() < f64::EPSILON);
        assert!(!progress.is_complete());
    }

    #[test]
    fn counts_every_counted_list_and_skips_summary_and_bonus() {
        let syllabus = syllabus();
        let progress = syllabus_progress(&syllabus, &CompletionLedger::new());
        // 2 topics + 1 focus + 1 key concept + 3 ops + 1 algorithm + 1 complexity
        assert_eq!(progress, Progress::new(0, 9));
    }

    #[test]
    fn completed_keys_outside_the_tree_are_ignored() {
        let syllabus = syllabus();
        let ledger = ledger(&[
            "1_Basics-Loops",
            "1_Basics-Bonus-Trivia",
            "3_DSA-DataStructures-Stack-Pop",
            "Unknown-Item",
        ]);
        let progress = syllabus_progress(&syllabus, &ledger);
        assert_eq!(progress, Progress::new(2, 9));
        assert!(progress.completed <= progress.total);
    }

    #[test]
    fn data_structure_scopes() {
        let syllabus = syllabus();
        let ledger = ledger(&["3_DSA-DataStructures-Stack-Push", "3_DSA-DataStructures-Stack-Pop"]);
        let section = syllabus.section("3_DSA").unwrap();
        let Section::DataStructures(ds) = &section.section else {
            panic!("expected data structures");
        };
        let stack = data_structure_progress("3_DSA", &ds.data_structures[0], &ledger);
        assert!(stack.is_complete());
        assert_eq!(data_structures_progress(section, &ledger), Some(Progress::new(2, 3)));
        assert_eq!(section_progress(section, &ledger), Progress::new(2, 5));
    }

    #[test]
    fn mixed_sections_count_every_list() {
        let syllabus = Syllabus::from_json_str(
            r#"{
                "X": { "Topics": ["a"], "KeyConcepts": ["b"] },
                "Y": {
                    "DataStructures": { "Stack": ["Push"] },
                    "Topics": ["t"],
                    "KeyConcepts": ["k"]
                }
            }"#,
        )
        .unwrap();
        let ledger = ledger(&["X-KeyConcepts-b", "Y-t", "Y-DataStructures-Stack-Push"]);
        let x = syllabus.section("X").unwrap();
        let y = syllabus.section("Y").unwrap();
        assert_eq!(section_progress(x, &ledger), Progress::new(1, 2));
        assert_eq!(section_progress(y, &ledger), Progress::new(2, 3));
        assert_eq!(syllabus_progress(&syllabus, &ledger), Progress::new(3, 5));
    }

    #[test]
    fn duplicate_texts_count_once() {
        let items = ["Two Sum", "Two Sum", "Reverse List"];
        let ledger = ledger(&["Arrays-Two Sum"]);
        let progress = list_progress(items, &ledger, |p| ItemPath::problem("Arrays", p));
        assert_eq!(progress, Progress::new(1, 2));
        assert_eq!(progress.rounded_percent(), 50);
    }

    #[test]
    fn problem_set_sums_categories() {
        let set = ProblemSet::new([
            ("Arrays", vec!["Two Sum".to_owned(), "Two Sum".to_owned()]),
            ("Graphs", vec!["BFS".to_owned(), "DFS".to_owned()]),
        ]);
        let ledger = ledger(&["Arrays-Two Sum", "Graphs-DFS"]);
        assert_eq!(problem_set_progress(&set, &ledger), Progress::new(2, 3));
        assert_eq!(
            category_progress(set.category("Arrays").unwrap(), &ledger),
            Progress::new(1, 1)
        );
    }
}
