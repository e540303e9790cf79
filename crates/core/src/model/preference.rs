use std::fmt;
use std::str::FromStr;

use crate::error::{ParseScopeError, ParseSiteError};

/// Site appended to generated search queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Site {
    #[default]
    LeetCode,
    Gfg,
    HackerRank,
    /// Free text supplied by the user.
    Other,
}

impl Site {
    pub const ALL: [Site; 4] = [Site::LeetCode, Site::Gfg, Site::HackerRank, Site::Other];

    /// Persisted form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Site::LeetCode => "leetcode",
            Site::Gfg => "gfg",
            Site::HackerRank => "hackerrank",
            Site::Other => "other",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Site::LeetCode => "LeetCode",
            Site::Gfg => "GFG",
            Site::HackerRank => "HackerRank",
            Site::Other => "Other",
        }
    }

    /// Fixed query suffix; `None` for `Other`, which uses the custom text.
    #[must_use]
    pub fn search_suffix(self) -> Option<&'static str> {
        match self {
            Site::LeetCode => Some("LeetCode"),
            Site::Gfg => Some("GeeksforGeeks"),
            Site::HackerRank => Some("HackerRank"),
            Site::Other => None,
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Site {
    type Err = ParseSiteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Site::ALL
            .into_iter()
            .find(|site| site.as_str() == s)
            .ok_or_else(|| ParseSiteError { raw: s.to_owned() })
    }
}

/// Independent preference slots; one per tracker page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceScope {
    Checklist,
    Top100,
}

impl PreferenceScope {
    pub const ALL: [PreferenceScope; 2] = [PreferenceScope::Checklist, PreferenceScope::Top100];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PreferenceScope::Checklist => "checklist",
            PreferenceScope::Top100 => "top100",
        }
    }
}

impl fmt::Display for PreferenceScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PreferenceScope {
    type Err = ParseScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PreferenceScope::ALL
            .into_iter()
            .find(|scope| scope.as_str() == s)
            .ok_or_else(|| ParseScopeError { raw: s.to_owned() })
    }
}

/// Selected site plus the custom text used when the site is `Other`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SitePreference {
    site: Site,
    custom: String,
}

impl SitePreference {
    #[must_use]
    pub fn new(site: Site, custom: impl Into<String>) -> Self {
        Self {
            site,
            custom: custom.into(),
        }
    }

    /// Rebuild from persisted values. Unknown site strings keep the default.
    #[must_use]
    pub fn from_persisted(site: Option<&str>, custom: Option<String>) -> Self {
        Self {
            site: site.and_then(|raw| raw.parse().ok()).unwrap_or_default(),
            custom: custom.unwrap_or_default(),
        }
    }

    #[must_use]
    pub fn site(&self) -> Site {
        self.site
    }

    #[must_use]
    pub fn custom(&self) -> &str {
        &self.custom
    }

    pub fn set_site(&mut self, site: Site) {
        self.site = site;
    }

    pub fn set_custom(&mut self, custom: impl Into<String>) {
        self.custom = custom.into();
    }

    /// Text appended to search queries; empty when `Other` has no custom text.
    #[must_use]
    pub fn search_suffix(&self) -> &str {
        match self.site.search_suffix() {
            Some(suffix) => suffix,
            None => self.custom.trim(),
        }
    }
}
