use std::collections::HashSet;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::utils::format_date;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EventStatus {
    Upcoming,
    Ongoing,
    Completed,
    Cancelled,
    Unknown,
}

impl EventStatus {
    /// Parse the API's status string, tolerating case and a few synonyms
    pub fn parse(s: Option<&str>) -> Self {
        match s.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("upcoming") | Some("planned") | Some("scheduled") => EventStatus::Upcoming,
            Some("ongoing") | Some("in_progress") | Some("in progress") => EventStatus::Ongoing,
            Some("completed") | Some("finished") | Some("done") => EventStatus::Completed,
            Some("cancelled") | Some("canceled") => EventStatus::Cancelled,
            _ => EventStatus::Unknown,
        }
    }
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventStatus::Upcoming => write!(f, "Upcoming"),
            EventStatus::Ongoing => write!(f, "Ongoing"),
            EventStatus::Completed => write!(f, "Completed"),
            EventStatus::Cancelled => write!(f, "Cancelled"),
            EventStatus::Unknown => write!(f, "-"),
        }
    }
}

/// A row in the school's event list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct EventSummary {
    pub id: i64,
    pub name: String,
    #[serde(rename = "eventType")]
    pub event_type: Option<String>,
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "participantCount", default)]
    pub participant_count: u32,
}

/// An event with its enrolled participants, as returned by `GET /events/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct EventDetail {
    pub id: i64,
    pub name: String,
    #[serde(rename = "eventType")]
    pub event_type: Option<String>,
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
    #[serde(default)]
    pub participants: Vec<EventParticipant>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct EventParticipant {
    #[serde(rename = "studentId")]
    pub student_id: i64,
    #[serde(rename = "studentCode")]
    pub student_code: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "teamId")]
    pub team_id: Option<i64>,
}

impl EventSummary {
    pub fn status(&self) -> EventStatus {
        EventStatus::parse(self.status.as_deref())
    }

    pub fn formatted_date(&self) -> String {
        self.start_date
            .as_deref()
            .map(format_date)
            .unwrap_or_else(|| "TBD".to_string())
    }

    /// Start date as a sortable key. Unparseable dates sort last.
    pub fn start_key(&self) -> Option<NaiveDate> {
        let date = self.start_date.as_deref()?;
        DateTime::parse_from_rfc3339(date)
            .map(|dt| dt.date_naive())
            .ok()
            .or_else(|| NaiveDate::parse_from_str(date, "%Y-%m-%d").ok())
    }
}

impl EventDetail {
    pub fn status(&self) -> EventStatus {
        EventStatus::parse(self.status.as_deref())
    }

    /// Ids of students already enrolled in this event
    pub fn participant_ids(&self) -> HashSet<i64> {
        self.participants.iter().map(|p| p.student_id).collect()
    }

    /// Counts of (team-enrolled, individually-enrolled) participants
    pub fn origin_counts(&self) -> (usize, usize) {
        let from_team = self.participants.iter().filter(|p| p.team_id.is_some()).count();
        (from_team, self.participants.len() - from_team)
    }
}

// Sorting options for events table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventSortColumn {
    Name,
    #[default]
    Date,
    Location,
    Status,
}

impl EventSortColumn {
    /// Column for a `--sort` argument, case-insensitive
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "name" => Some(EventSortColumn::Name),
            "date" => Some(EventSortColumn::Date),
            "location" => Some(EventSortColumn::Location),
            "status" => Some(EventSortColumn::Status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_status_parse() {
        assert_eq!(EventStatus::parse(Some("upcoming")), EventStatus::Upcoming);
        assert_eq!(EventStatus::parse(Some("Completed")), EventStatus::Completed);
        assert_eq!(EventStatus::parse(Some("in_progress")), EventStatus::Ongoing);
        assert_eq!(EventStatus::parse(Some("canceled")), EventStatus::Cancelled);
        assert_eq!(EventStatus::parse(Some("???")), EventStatus::Unknown);
        assert_eq!(EventStatus::parse(None), EventStatus::Unknown);
    }

    #[test]
    fn test_parse_event_detail() {
        let json = r#"{"id": 42, "name": "City Relay", "eventType": "competition",
            "startDate": "2026-11-02", "endDate": null, "location": "Stadium", "status": "upcoming",
            "participants": [
                {"studentId": 1, "studentCode": "S001", "name": "Ana", "teamId": 7},
                {"studentId": 5, "studentCode": "S005", "name": "Eve", "teamId": null}
            ]}"#;
        let event: EventDetail = serde_json::from_str(json).expect("Failed to parse event JSON");
        assert_eq!(event.participant_ids(), HashSet::from([1, 5]));
        assert_eq!(event.origin_counts(), (1, 1));
        assert_eq!(event.status(), EventStatus::Upcoming);
    }

    #[test]
    fn test_summary_start_key() {
        let mut event = EventSummary {
            id: 1,
            name: "Practice".to_string(),
            event_type: None,
            start_date: Some("2026-03-01T08:00:00Z".to_string()),
            location: None,
            status: None,
            participant_count: 0,
        };
        assert_eq!(event.start_key(), NaiveDate::from_ymd_opt(2026, 3, 1));
        event.start_date = Some("soon".to_string());
        assert_eq!(event.start_key(), None);
        event.start_date = None;
        assert_eq!(event.formatted_date(), "TBD");
    }

    #[test]
    fn test_event_sort_column_from_name() {
        assert_eq!(EventSortColumn::from_name(" Date "), Some(EventSortColumn::Date));
        assert_eq!(EventSortColumn::from_name("status"), Some(EventSortColumn::Status));
        assert_eq!(EventSortColumn::from_name("members"), None);
    }
}
