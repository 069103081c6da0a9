//! Collapse per-subject teacher rows into one entry per teacher name.
//!
//! Rows are first put into a canonical order (name, then row id), so each
//! name's representative is its lowest row id whatever order the store
//! happened to return them in. The teacher picker is rebuilt on every fetch and must not
//! reshuffle between refreshes.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use classboard_core::TeacherId;

use crate::types::{GroupedTeacher, Teacher};

fn canonical(teachers: &[Teacher]) -> Vec<&Teacher> {
    let mut rows: Vec<&Teacher> = teachers.iter().collect();
    rows.sort_by(|a, b| {
        a.name
            .trim()
            .cmp(b.name.trim())
            .then_with(|| a.id.cmp(&b.id))
            .then_with(|| a.subject.cmp(&b.subject))
    });
    rows
}

/// One entry per distinct teacher name, sorted by name, each with its
/// distinct non-empty subjects sorted ascending.
pub fn group_by_name(teachers: &[Teacher]) -> Vec<GroupedTeacher> {
    let mut groups: BTreeMap<&str, (TeacherId, BTreeSet<&str>)> = BTreeMap::new();

    for row in canonical(teachers) {
        let entry = groups
            .entry(row.name.trim())
            .or_insert_with(|| (row.id.clone(), BTreeSet::new()));
        let subject = row.subject.trim();
        if !subject.is_empty() {
            entry.1.insert(subject);
        }
    }

    groups
        .into_iter()
        .map(|(name, (representative_id, subjects))| GroupedTeacher {
            name: name.to_string(),
            representative_id,
            subjects: subjects.into_iter().map(String::from).collect(),
        })
        .collect()
}

/// Groups that teach `subject`, keeping their name order.
pub fn filter_by_subject<'a>(groups: &'a [GroupedTeacher], subject: &str) -> Vec<&'a GroupedTeacher> {
    let subject = subject.trim();
    groups
        .iter()
        .filter(|g| g.subjects.iter().any(|s| s == subject))
        .collect()
}

/// Row id to store on a schedule when `name` is picked to teach `subject`.
///
/// With duplicate rows the lowest id wins, so the choice is stable.
pub fn row_for_subject<'a>(teachers: &'a [Teacher], name: &str, subject: &str) -> Option<&'a TeacherId> {
    let (name, subject) = (name.trim(), subject.trim());
    canonical(teachers)
        .into_iter()
        .find(|t| t.name.trim() == name && t.subject.trim() == subject)
        .map(|t| &t.id)
}

/// Rows repeating a (name, subject) pair already held by another row.
///
/// A teacher should have at most one row per subject; the store can use
/// this to report or clean up violations.
pub fn duplicate_subject_rows(teachers: &[Teacher]) -> Vec<&Teacher> {
    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    canonical(teachers)
        .into_iter()
        .filter(|t| !seen.insert((t.name.trim(), t.subject.trim())))
        .collect()
}
