use serde::{Deserialize, Serialize};

use super::Student;

/// A team with its full member roster, as returned by `GET /teams/{id}`.
///
/// `members` keeps the server's order; the reconciler relies on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Team {
    pub id: i64,
    pub name: String,
    pub sport: Option<String>,
    pub coach: Option<String>,
    #[serde(default)]
    pub members: Vec<Student>,
}

/// A row in the school's team list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct TeamSummary {
    pub id: i64,
    pub name: String,
    pub sport: Option<String>,
    pub coach: Option<String>,
    #[serde(rename = "memberCount", default)]
    pub member_count: u32,
}

impl TeamSummary {
    pub fn sport_display(&self) -> &str {
        self.sport.as_deref().filter(|s| !s.is_empty()).unwrap_or("-")
    }

    pub fn coach_display(&self) -> &str {
        self.coach.as_deref().filter(|s| !s.is_empty()).unwrap_or("-")
    }
}

// Sorting options for the teams table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TeamSortColumn {
    #[default]
    Name,
    Sport,
    Members,
}

impl TeamSortColumn {
    /// Column for a `--sort` argument, case-insensitive
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "name" => Some(TeamSortColumn::Name),
            "sport" => Some(TeamSortColumn::Sport),
            "members" | "size" => Some(TeamSortColumn::Members),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_team_with_members() {
        let json = r#"{"id": 7, "name": "Junior Volleyball", "sport": "Volleyball", "coach": null,
            "members": [
                {"id": 1, "studentCode": "S001", "name": "Ana", "grade": "Grade 7", "className": "7A"},
                {"id": 2, "studentCode": "S002", "name": "Ben", "grade": "Grade 7", "className": "7B"}
            ]}"#;
        let team: Team = serde_json::from_str(json).expect("Failed to parse team JSON");
        assert_eq!(team.id, 7);
        let ids: Vec<i64> = team.members.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert!(team.coach.is_none());
    }

    #[test]
    fn test_parse_team_without_members() {
        let json = r#"{"id": 9, "name": "Chess", "sport": null, "coach": "Mr. Tan"}"#;
        let team: Team = serde_json::from_str(json).expect("Failed to parse team JSON");
        assert!(team.members.is_empty());
    }

    #[test]
    fn test_summary_display_fallbacks() {
        let summary = TeamSummary {
            id: 1,
            name: "Chess".to_string(),
            sport: Some(String::new()),
            coach: None,
            member_count: 0,
        };
        assert_eq!(summary.sport_display(), "-");
        assert_eq!(summary.coach_display(), "-");
    }

    #[test]
    fn test_team_sort_column_from_name() {
        assert_eq!(TeamSortColumn::from_name("Sport"), Some(TeamSortColumn::Sport));
        assert_eq!(TeamSortColumn::from_name("members"), Some(TeamSortColumn::Members));
        assert_eq!(TeamSortColumn::from_name("coach"), None);
    }
}
