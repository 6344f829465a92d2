use std::collections::{BTreeSet, HashSet};

use crate::models::{SelectedParticipant, Student};

/// Students that may still be picked individually.
///
/// Starting from `all` (whose order is kept), drops students outside
/// `class_filter`, students not matching `search_term` on any of name, code,
/// grade or class, students already in `selection` (either origin) and
/// students already enrolled in the event. The search is a case-insensitive
/// substring match after trimming leading and trailing whitespace from
/// `search_term`; inner whitespace is kept. Blank search terms and class
/// filters match everything.
pub fn compute_selectable_pool<'a>(
    all: &'a [Student],
    selection: &[SelectedParticipant],
    event_participants: &HashSet<i64>,
    search_term: &str,
    class_filter: Option<&str>,
) -> Vec<&'a Student> {
    let query = search_term.trim().to_lowercase();
    let class_filter = class_filter.filter(|c| !c.is_empty());
    let selected: HashSet<i64> = selection.iter().map(|p| p.id).collect();

    all.iter()
        .filter(|s| class_filter.map_or(true, |c| s.class_name == c))
        .filter(|s| query.is_empty() || s.matches_search(&query))
        .filter(|s| !selected.contains(&s.id))
        .filter(|s| !event_participants.contains(&s.id))
        .collect()
}

/// Distinct non-empty class labels, sorted, for the class filter options
pub fn available_classes(all: &[Student]) -> Vec<&str> {
    all.iter()
        .map(|s| s.class_name.as_str())
        .filter(|c| !c.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
