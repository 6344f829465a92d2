//! Data models for school teams, events and their rosters.
//!
//! - `Student`: a candidate eligible for enrollment
//! - `Team`, `TeamSummary`: activity groups and their member rosters
//! - `EventSummary`, `EventDetail`, `EventParticipant`: competitions and sessions
//! - `SelectedParticipant`, `EnrollmentRequest`: the in-progress selection and
//!   what gets submitted for it

pub mod event;
pub mod participant;
pub mod student;
pub mod team;

pub use event::{EventDetail, EventParticipant, EventSortColumn, EventStatus, EventSummary};
pub use participant::{EnrollmentRequest, ParticipantOrigin, SelectedParticipant};
pub use student::Student;
pub use team::{Team, TeamSortColumn, TeamSummary};
