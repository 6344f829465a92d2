use thiserror::Error;

use crate::api::ApiError;

/// Shown when a submission fails without a message from the server
pub const GENERIC_SUBMIT_FAILURE: &str = "Failed to add participants";

/// Recoverable failures of a reconciliation session. The selection set is
/// always left as it was before the failing operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReconcileError {
    #[error("Select at least one participant")]
    NothingSelected,

    #[error("Failed to load team roster: {0}")]
    RosterFetch(String),

    #[error("{0}")]
    Submission(String),
}

impl ReconcileError {
    pub fn roster_fetch(err: &ApiError) -> Self {
        ReconcileError::RosterFetch(err.to_string())
    }

    /// Prefer the server's own message, fall back to the generic one
    pub fn submission(err: &ApiError) -> Self {
        let message = err
            .server_message()
            .map(str::to_string)
            .unwrap_or_else(|| GENERIC_SUBMIT_FAILURE.to_string());
        ReconcileError::Submission(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_submission_uses_server_message() {
        let api = ApiError::from_status(StatusCode::CONFLICT, r#"{"message": "Event is full"}"#);
        assert_eq!(
            ReconcileError::submission(&api),
            ReconcileError::Submission("Event is full".to_string())
        );
    }

    #[test]
    fn test_submission_falls_back_to_generic() {
        let api = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "");
        assert_eq!(
            ReconcileError::submission(&api).to_string(),
            GENERIC_SUBMIT_FAILURE
        );
        assert_eq!(
            ReconcileError::submission(&ApiError::Unauthorized(None)).to_string(),
            GENERIC_SUBMIT_FAILURE
        );
    }

    #[test]
    fn test_submission_message_independent_of_status() {
        let expired = ApiError::from_status(StatusCode::UNAUTHORIZED, r#"{"message":"Session expired"}"#);
        assert_eq!(
            ReconcileError::submission(&expired),
            ReconcileError::Submission("Session expired".to_string())
        );

        let plain = "Cannot POST /events/42/participants";
        for status in [StatusCode::BAD_REQUEST, StatusCode::NOT_FOUND] {
            let err = ApiError::from_status(status, plain);
            assert_eq!(ReconcileError::submission(&err).to_string(), GENERIC_SUBMIT_FAILURE);
        }
    }

    #[test]
    fn test_roster_fetch_message() {
        let err = ReconcileError::roster_fetch(&ApiError::from_status(
            StatusCode::NOT_FOUND,
            r#"{"message": "Team not found"}"#,
        ));
        assert_eq!(err.to_string(), "Failed to load team roster: Resource not found: Team not found");
    }
}
