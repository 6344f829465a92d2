use serde::{Deserialize, Serialize};

use super::Student;

/// Where a selected participant came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(tag = "kind", content = "teamId", rename_all = "camelCase")]
pub enum ParticipantOrigin {
    /// Imported in bulk from the roster of the given team
    Team(i64),
    /// Picked by hand from the school roster
    Individual,
}

/// An entry in the in-progress selection set.
///
/// Display fields are copied from the `Student` so the selection can be
/// rendered without the candidate list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct SelectedParticipant {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub grade: String,
    #[serde(rename = "className")]
    pub class_name: String,
    pub origin: ParticipantOrigin,
}

impl SelectedParticipant {
    pub fn from_team(student: &Student, team_id: i64) -> Self {
        Self::with_origin(student, ParticipantOrigin::Team(team_id))
    }

    pub fn individual(student: &Student) -> Self {
        Self::with_origin(student, ParticipantOrigin::Individual)
    }

    fn with_origin(student: &Student, origin: ParticipantOrigin) -> Self {
        Self {
            id: student.id,
            code: student.code.clone(),
            name: student.name.clone(),
            grade: student.grade.clone(),
            class_name: student.class_name.clone(),
            origin,
        }
    }

    pub fn is_from_team(&self) -> bool {
        matches!(self.origin, ParticipantOrigin::Team(_))
    }

    /// Team id for team-origin entries, `None` for individual picks
    pub fn team_id(&self) -> Option<i64> {
        match self.origin {
            ParticipantOrigin::Team(id) => Some(id),
            ParticipantOrigin::Individual => None,
        }
    }
}

/// Body of `POST /events/{id}/participants`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct EnrollmentRequest {
    #[serde(rename = "teamId", skip_serializing_if = "Option::is_none", default)]
    pub team_id: Option<i64>,
    #[serde(rename = "studentIds")]
    pub student_ids: Vec<i64>,
    #[serde(rename = "isFromTeam")]
    pub is_from_team: bool,
}

impl EnrollmentRequest {
    pub fn team_batch(team_id: i64, student_ids: Vec<i64>) -> Self {
        Self {
            team_id: Some(team_id),
            student_ids,
            is_from_team: true,
        }
    }

    pub fn individual_batch(student_ids: Vec<i64>) -> Self {
        Self {
            team_id: None,
            student_ids,
            is_from_team: false,
        }
    }
}
