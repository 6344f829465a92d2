use serde::Deserialize;
use thiserror::Error;

/// Every status-derived variant keeps the message the server put in its
/// JSON error body, if any. `server_message()` exposes only that text.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Access denied: {detail}")]
    AccessDenied {
        detail: String,
        message: Option<String>,
    },

    #[error("Unauthorized - token may be missing or expired")]
    Unauthorized(Option<String>),

    #[error("Resource not found: {detail}")]
    NotFound {
        detail: String,
        message: Option<String>,
    },

    #[error("Rate limited - please wait before retrying")]
    RateLimited(Option<String>),

    /// Any other non-success status. `detail` is the server's message when the
    /// body carried one, otherwise the (truncated) raw body.
    #[error("Server error ({status}): {detail}")]
    Server {
        status: u16,
        detail: String,
        message: Option<String>,
    },

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// Error body schema returned by the school API.
/// Older endpoints use `error` or `msg` instead of `message`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(alias = "error", alias = "msg")]
    message: Option<String>,
}

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            let mut end = MAX_ERROR_BODY_LENGTH;
            while !body.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
        }
    }

    /// Extract the server-provided message from an error body, if it has one
    fn decode_message(body: &str) -> Option<String> {
        serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let message = Self::decode_message(body);
        let detail = message.clone().unwrap_or_else(|| Self::truncate_body(body));
        match status.as_u16() {
            401 => ApiError::Unauthorized(message),
            403 => ApiError::AccessDenied { detail, message },
            404 => ApiError::NotFound { detail, message },
            429 => ApiError::RateLimited(message),
            code => ApiError::Server {
                status: code,
                detail,
                message,
            },
        }
    }

    /// The message the server itself supplied in a JSON error body, suitable
    /// for showing to the user. `None` for raw bodies and network errors,
    /// whatever the status.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::AccessDenied { message, .. }
            | ApiError::NotFound { message, .. }
            | ApiError::Server { message, .. }
            | ApiError::Unauthorized(message)
            | ApiError::RateLimited(message) => message.as_deref(),
            ApiError::NetworkError(_) | ApiError::InvalidResponse(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_from_status_decodes_message() {
        let err = ApiError::from_status(
            StatusCode::BAD_REQUEST,
            r#"{"message": "Student 12 is already enrolled"}"#,
        );
        assert!(matches!(err, ApiError::Server { status: 400, .. }));
        assert_eq!(err.server_message(), Some("Student 12 is already enrolled"));
    }

    #[test]
    fn test_from_status_accepts_error_alias() {
        let err = ApiError::from_status(StatusCode::UNPROCESSABLE_ENTITY, r#"{"error": "Team is archived"}"#);
        assert_eq!(err.server_message(), Some("Team is archived"));
    }

    #[test]
    fn test_from_status_raw_body_is_not_a_server_message() {
        let err = ApiError::from_status(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>");
        match &err {
            ApiError::Server { detail, message, .. } => {
                assert_eq!(detail, "<html>bad gateway</html>");
                assert!(message.is_none());
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.server_message(), None);
    }

    #[test]
    fn test_from_status_mapping() {
        assert!(matches!(ApiError::from_status(StatusCode::UNAUTHORIZED, ""), ApiError::Unauthorized(None)));
        assert!(matches!(ApiError::from_status(StatusCode::TOO_MANY_REQUESTS, ""), ApiError::RateLimited(None)));
        let not_found = ApiError::from_status(StatusCode::NOT_FOUND, r#"{"message": "Team not found"}"#);
        assert_eq!(not_found.server_message(), Some("Team not found"));
    }

    #[test]
    fn test_auth_and_rate_limit_keep_server_message() {
        let expired = ApiError::from_status(StatusCode::UNAUTHORIZED, r#"{"message": "Session expired"}"#);
        assert_eq!(expired.server_message(), Some("Session expired"));
        let slow = ApiError::from_status(StatusCode::TOO_MANY_REQUESTS, r#"{"msg": "Slow down"}"#);
        assert_eq!(slow.server_message(), Some("Slow down"));
    }

    #[test]
    fn test_plain_text_body_is_never_a_server_message() {
        let body = "Cannot POST /events/42/participants";
        for status in [StatusCode::BAD_REQUEST, StatusCode::FORBIDDEN, StatusCode::NOT_FOUND, StatusCode::BAD_GATEWAY] {
            let err = ApiError::from_status(status, body);
            assert_eq!(err.server_message(), None, "status {}", status);
        }
        match ApiError::from_status(StatusCode::NOT_FOUND, body) {
            ApiError::NotFound { detail, message } => {
                assert_eq!(detail, body);
                assert!(message.is_none());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_truncate_body() {
        let body = "x".repeat(MAX_ERROR_BODY_LENGTH + 20);
        let truncated = ApiError::truncate_body(&body);
        assert!(truncated.starts_with(&"x".repeat(MAX_ERROR_BODY_LENGTH)));
        assert!(truncated.ends_with(&format!("(truncated, {} total bytes)", body.len())));
    }
}
