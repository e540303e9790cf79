//! External search links for checklist items.

use crate::model::{PreferenceScope, SitePreference};

pub const SEARCH_ENDPOINT: &str = "https://www.google.com/search";

/// Item that links to a curated reference instead of a generated search.
pub const TOP100_INTRO_LABEL: &str = "Introduction to Top 100 Codes";
pub const TOP100_INTRO_URL: &str =
    "https://www.geeksforgeeks.org/dsa/top-100-data-structure-and-algorithms-dsa-interview-questions-topic-wise/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Study topics: "Explain the concept of …".
    Concept,
    /// Practice problems: "Problem …".
    Problem,
}

impl SearchMode {
    #[must_use]
    pub fn phrase(self, text: &str) -> String {
        match self {
            SearchMode::Concept => format!("Explain the concept of {text}"),
            SearchMode::Problem => format!("Problem {text}"),
        }
    }
}

impl From<PreferenceScope> for SearchMode {
    fn from(scope: PreferenceScope) -> Self {
        match scope {
            PreferenceScope::Checklist => SearchMode::Concept,
            PreferenceScope::Top100 => SearchMode::Problem,
        }
    }
}

/// Query text: mode phrase and site suffix joined by single spaces, empty parts skipped.
///
/// Item text is used verbatim; only the suffix is trimmed, so a blank custom
/// site adds nothing.
#[must_use]
pub fn search_query(text: &str, mode: SearchMode, suffix: &str) -> String {
    let phrase = mode.phrase(text);
    [phrase.as_str(), suffix.trim()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[must_use]
pub fn is_top100_intro(text: &str) -> bool {
    text.trim().eq_ignore_ascii_case(TOP100_INTRO_LABEL)
}

/// Link for an item given its text, mode, and the active site preference.
///
/// The query is percent-encoded over the RFC 3986 unreserved set, so `!'()*`
/// are escaped as well (unlike a browser's `encodeURIComponent`).
#[must_use]
pub fn search_link(text: &str, mode: SearchMode, preference: &SitePreference) -> String {
    if is_top100_intro(text) {
        return TOP100_INTRO_URL.to_owned();
    }
    let query = search_query(text, mode, preference.search_suffix());
    format!("{SEARCH_ENDPOINT}?q={}", urlencoding::encode(&query))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Site;

    #[test]
    fn concept_links_append_site_suffix() {
        let pref = SitePreference::new(Site::Gfg, "");
        assert_eq!(
            search_link("Binary Search", SearchMode::Concept, &pref),
            "https://www.google.com/search?q=Explain%20the%20concept%20of%20Binary%20Search%20GeeksforGeeks"
        );
    }

    #[test]
    fn problem_links_use_problem_phrase() {
        let pref = SitePreference::default();
        assert_eq!(
            search_link("Two Sum", SearchMode::Problem, &pref),
            "https://www.google.com/search?q=Problem%20Two%20Sum%20LeetCode"
        );
    }

    #[test]
    fn empty_custom_suffix_is_skipped() {
        let pref = SitePreference::new(Site::Other, "   ");
        assert_eq!(search_query("Tries", SearchMode::Problem, pref.search_suffix()), "Problem Tries");
    }

    #[test]
    fn reserved_characters_are_percent_encoded() {
        let pref = SitePreference::new(Site::Other, "c++ & rust");
        let link = search_link("A/B?", SearchMode::Problem, &pref);
        assert_eq!(
            link,
            "https://www.google.com/search?q=Problem%20A%2FB%3F%20c%2B%2B%20%26%20rust"
        );
    }

    #[test]
    fn item_text_is_kept_verbatim() {
        let pref = SitePreference::new(Site::Other, "  docs  ");
        assert_eq!(
            search_query(" Heaps ", SearchMode::Concept, pref.search_suffix()),
            "Explain the concept of  Heaps  docs"
        );
        assert_eq!(
            search_link("Tries (Prefix)!", SearchMode::Problem, &pref),
            "https://www.google.com/search?q=Problem%20Tries%20%28Prefix%29%21%20docs"
        );
    }

    #[test]
    fn intro_label_gets_fixed_reference_link() {
        let pref = SitePreference::new(Site::HackerRank, "");
        for label in [
            "Introduction to Top 100 Codes",
            "  introduction TO top 100 codes ",
        ] {
            assert_eq!(search_link(label, SearchMode::Problem, &pref), TOP100_INTRO_URL);
            assert_eq!(search_link(label, SearchMode::Concept, &pref), TOP100_INTRO_URL);
        }
        assert_ne!(
            search_link("Introduction to Top 100 Codes II", SearchMode::Problem, &pref),
            TOP100_INTRO_URL
        );
    }

    #[test]
    fn scope_selects_mode() {
        assert_eq!(SearchMode::from(PreferenceScope::Checklist), SearchMode::Concept);
        assert_eq!(SearchMode::from(PreferenceScope::Top100), SearchMode::Problem);
    }
}
