//! Search, filter and sort for the team and event list views.

use std::cmp::Ordering;

use crate::models::{EventSortColumn, EventStatus, EventSummary, TeamSortColumn, TeamSummary};
use crate::utils::{cmp_ignore_case, contains_ignore_case};

#[derive(Debug, Clone)]
pub struct TeamQuery {
    pub search: String,
    pub sort_column: TeamSortColumn,
    pub ascending: bool,
}

impl Default for TeamQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            sort_column: TeamSortColumn::Name,
            ascending: true,
        }
    }
}

impl TeamQuery {
    fn matches(team: &TeamSummary, query: &str) -> bool {
        contains_ignore_case(&team.name, query)
            || team.sport.as_deref().is_some_and(|s| contains_ignore_case(s, query))
            || team.coach.as_deref().is_some_and(|s| contains_ignore_case(s, query))
    }

    /// Teams matching the search, in the current sort order
    pub fn apply<'a>(&self, teams: &'a [TeamSummary]) -> Vec<&'a TeamSummary> {
        let mut sorted: Vec<&TeamSummary> = teams.iter().collect();

        if !self.search.trim().is_empty() {
            let query = self.search.trim().to_lowercase();
            sorted.retain(|t| Self::matches(t, &query));
        }

        sorted.sort_by(|a, b| {
            let name_cmp = |x: &TeamSummary, y: &TeamSummary| cmp_ignore_case(&x.name, &y.name);

            let cmp = match self.sort_column {
                TeamSortColumn::Name => name_cmp(a, b),
                TeamSortColumn::Sport => {
                    cmp_ignore_case(a.sport.as_deref().unwrap_or(""), b.sport.as_deref().unwrap_or(""))
                        .then_with(|| name_cmp(a, b))
                }
                TeamSortColumn::Members => a.member_count.cmp(&b.member_count).then_with(|| name_cmp(a, b)),
            };

            if self.ascending {
                cmp
            } else {
                cmp.reverse()
            }
        });

        sorted
    }
}

#[derive(Debug, Clone)]
pub struct EventQuery {
    pub search: String,
    pub status: Option<EventStatus>,
    pub sort_column: EventSortColumn,
    pub ascending: bool,
}

impl Default for EventQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            status: None,
            sort_column: EventSortColumn::Date,
            ascending: true,
        }
    }
}

impl EventQuery {
    fn matches(event: &EventSummary, query: &str) -> bool {
        contains_ignore_case(&event.name, query)
            || event.location.as_deref().is_some_and(|s| contains_ignore_case(s, query))
            || event.event_type.as_deref().is_some_and(|s| contains_ignore_case(s, query))
    }

    /// Undated events sort after dated ones regardless of direction
    fn date_cmp(a: &EventSummary, b: &EventSummary, ascending: bool) -> Ordering {
        match (a.start_key(), b.start_key()) {
            (Some(x), Some(y)) if ascending => x.cmp(&y),
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }

    /// Events matching the search and status filter, in the current sort order
    pub fn apply<'a>(&self, events: &'a [EventSummary]) -> Vec<&'a EventSummary> {
        let mut sorted: Vec<&EventSummary> = events.iter().collect();

        if let Some(status) = self.status {
            sorted.retain(|e| e.status() == status);
        }
        if !self.search.trim().is_empty() {
            let query = self.search.trim().to_lowercase();
            sorted.retain(|e| Self::matches(e, &query));
        }

        sorted.sort_by(|a, b| {
            let name_cmp = |x: &EventSummary, y: &EventSummary| cmp_ignore_case(&x.name, &y.name);

            if self.sort_column == EventSortColumn::Date {
                return Self::date_cmp(a, b, self.ascending).then_with(|| name_cmp(a, b));
            }

            let cmp = match self.sort_column {
                EventSortColumn::Name => name_cmp(a, b),
                EventSortColumn::Location => cmp_ignore_case(
                    a.location.as_deref().unwrap_or(""),
                    b.location.as_deref().unwrap_or(""),
                )
                .then_with(|| name_cmp(a, b)),
                EventSortColumn::Status => a.status().cmp(&b.status()).then_with(|| name_cmp(a, b)),
                EventSortColumn::Date => Ordering::Equal,
            };

            if self.ascending {
                cmp
            } else {
                cmp.reverse()
            }
        });

        sorted
    }
}
