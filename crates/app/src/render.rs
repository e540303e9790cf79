//! Plain-text views printed by the CLI.

use std::fmt::{self, Write as _};

use prep_core::model::{ItemGroup, NamedSection, PreferenceScope, ProblemCategory, SummarySection};
use prep_core::progress::{self, Progress};
use services::{ChecklistTracker, PreferenceService, Top100Tracker};

fn progress_label(progress: Progress) -> String {
    format!(
        "{}/{} ({}%)",
        progress.completed,
        progress.total,
        progress.rounded_percent()
    )
}

fn checkbox(done: bool) -> &'static str {
    if done { "[x]" } else { "[ ]" }
}

/// Checklist page: overall progress, filtered sections, and the summary.
pub fn checklist(
    tracker: &ChecklistTracker,
    prefs: &PreferenceService,
    filter: Option<&str>,
) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "Overall progress: {}", progress_label(tracker.progress()))?;
    let pref = prefs.get(PreferenceScope::Checklist);
    writeln!(out, "Search site: {}", pref.site().label())?;

    for section in tracker.sections(filter) {
        out.push('\n');
        section_block(&mut out, tracker, prefs, section)?;
    }

    if let Some(summary) = tracker.summary(filter) {
        out.push('\n');
        summary_block(&mut out, summary)?;
    }
    Ok(out)
}

fn section_block(
    out: &mut String,
    tracker: &ChecklistTracker,
    prefs: &PreferenceService,
    section: &NamedSection,
) -> fmt::Result {
    let progress = progress::section_progress(section, tracker.ledger());
    writeln!(
        out,
        "== {} [{}] {}",
        section.title(),
        section.key,
        progress_label(progress)
    )?;
    if let Some(note) = section.section.optional_for() {
        writeln!(out, "   optional for: {note}")?;
    }
    if let Some(ds) = progress::data_structures_progress(section, tracker.ledger()) {
        writeln!(out, "   data structures: {}", progress_label(ds))?;
    }

    for group in section.section.groups() {
        group_block(out, tracker, prefs, &section.key, &group)?;
    }
    Ok(())
}

fn group_block(
    out: &mut String,
    tracker: &ChecklistTracker,
    prefs: &PreferenceService,
    section_key: &str,
    group: &ItemGroup<'_>,
) -> fmt::Result {
    let heading = match group.collection {
        Some(name) => format!("{}: {name}", group.kind.title()),
        None => group.kind.title().to_owned(),
    };
    if group.kind.counts_toward_progress() {
        let progress = progress::group_progress(section_key, group, tracker.ledger());
        writeln!(out, "   {heading} {}", progress_label(progress))?;
    } else {
        writeln!(out, "   {heading}")?;
    }

    for item in group.items {
        let key = group.path(section_key, item).key();
        writeln!(
            out,
            "     {} {item}  <{key}>",
            checkbox(tracker.is_completed(key.as_str()))
        )?;
        writeln!(
            out,
            "         {}",
            prefs.search_link(PreferenceScope::Checklist, item)
        )?;
    }
    Ok(())
}

fn summary_block(out: &mut String, summary: &SummarySection) -> fmt::Result {
    writeln!(out, "== Summary Checklist")?;
    for (topic, description) in &summary.entries {
        writeln!(out, "   {topic}: {description}")?;
    }
    Ok(())
}

/// Top 100 page: overall progress and one block per category.
pub fn top100(
    tracker: &Top100Tracker,
    prefs: &PreferenceService,
    filter: Option<&str>,
) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "Overall progress: {}", progress_label(tracker.progress()))?;
    let pref = prefs.get(PreferenceScope::Top100);
    writeln!(out, "Search site: {}", pref.site().label())?;

    for category in tracker.categories(filter) {
        out.push('\n');
        category_block(&mut out, tracker, prefs, category)?;
    }
    Ok(out)
}

fn category_block(
    out: &mut String,
    tracker: &Top100Tracker,
    prefs: &PreferenceService,
    category: &ProblemCategory,
) -> fmt::Result {
    let progress = progress::category_progress(category, tracker.ledger());
    writeln!(out, "== {} {}", category.name(), progress_label(progress))?;
    for problem in category.problems() {
        let key = category.path(problem).key();
        writeln!(
            out,
            "   {} {problem}  <{key}>",
            checkbox(tracker.is_completed(key.as_str()))
        )?;
        writeln!(
            out,
            "       {}",
            prefs.search_link(PreferenceScope::Top100, problem)
        )?;
    }
    Ok(())
}

/// One line describing a scope's current site preference.
pub fn preference(prefs: &PreferenceService, scope: PreferenceScope) -> String {
    let pref = prefs.get(scope);
    if pref.custom().trim().is_empty() {
        format!("{scope}: {}", pref.site())
    } else {
        format!("{scope}: {} (custom: {})", pref.site(), pref.custom())
    }
}
