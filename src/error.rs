//! Error taxonomy for backend calls.
//!
//! Every failure a controller can see is one of these variants. Controllers
//! convert them into a single user-facing message; nothing propagates past
//! the controller boundary as an unhandled failure.

use serde::Deserialize;

/// Errors from authenticated backend calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No session token was available at call time. No request was sent.
    #[error("Not signed in")]
    Auth,
    /// The backend rejected the token (401). The host should route the
    /// user back through login.
    #[error("Session expired, please sign in again")]
    SessionExpired,
    /// A list retrieval failed — transport error or non-2xx response.
    #[error("Failed to load data: {cause}")]
    Fetch { cause: String },
    /// A create failed. Carries the server's `detail` when present.
    #[error("{message}")]
    Create { message: String },
    /// An update failed. Carries the server's `detail` when present.
    #[error("{message}")]
    Update { message: String },
    /// A delete failed. Carries the server's `detail` when present.
    #[error("{message}")]
    Delete { message: String },
    /// The assistant call failed.
    #[error("{message}")]
    Chat { message: String },
}

impl ApiError {
    /// Classify a transport-level reqwest failure for list calls.
    pub(crate) fn fetch(err: reqwest::Error) -> Self {
        ApiError::Fetch {
            cause: describe_transport_error(&err),
        }
    }
}

/// Error body the backend emits alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

/// Extract the server-supplied `detail` string from an error body, if any.
///
/// The backend responds with `{"detail": "..."}` on failures; anything else
/// (empty body, HTML error page, malformed JSON) yields `None` and the
/// caller falls back to a generic message.
pub fn server_detail(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|b| b.detail)
        .filter(|d| !d.trim().is_empty())
}

/// Human-readable description of a transport failure.
pub(crate) fn describe_transport_error(err: &reqwest::Error) -> String {
    if err.is_connect() {
        "could not reach the backend".to_string()
    } else if err.is_timeout() {
        "the request timed out".to_string()
    } else {
        err.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_detail_extracts_message() {
        let body = r#"{"detail": "Failed to create medication"}"#;
        assert_eq!(
            server_detail(body),
            Some("Failed to create medication".to_string())
        );
    }

    #[test]
    fn server_detail_rejects_empty_detail() {
        assert_eq!(server_detail(r#"{"detail": "  "}"#), None);
    }

    #[test]
    fn server_detail_rejects_malformed_body() {
        assert_eq!(server_detail(""), None);
        assert_eq!(server_detail("<html>502 Bad Gateway</html>"), None);
        assert_eq!(server_detail(r#"{"error": "nope"}"#), None);
    }

    #[test]
    fn auth_error_message_is_user_facing() {
        assert_eq!(ApiError::Auth.to_string(), "Not signed in");
    }

    #[test]
    fn session_expired_mentions_sign_in() {
        assert!(ApiError::SessionExpired.to_string().contains("sign in"));
    }

    #[test]
    fn mutation_errors_carry_message_verbatim() {
        let err = ApiError::Create {
            message: "Failed to create medication".into(),
        };
        assert_eq!(err.to_string(), "Failed to create medication");
    }
}
