//! Error taxonomy for Toe Beans API operations.
//!
//! Every network operation in this client resolves to a value or one of
//! four classified errors:
//!
//! | variant | meaning | recovery |
//! |---------|---------|----------|
//! | AuthExpired | server answered 401 | invalidate session, go to login |
//! | Rejected | non-401 error envelope | show the server message inline |
//! | NoResponse | request sent, nothing usable back | show a generic failure |
//! | Client | request could not be built or sent | show a generic failure |
//!
//! Callers never see a raw `reqwest::Error`; classification happens at
//! the client boundary.

use serde::Deserialize;
use thiserror::Error;

/// Error envelope returned by the Toe Beans backend: `{status, message}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    pub status: u16,
    pub message: String,
}

/// Classified failure of an API operation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The server rejected the session (HTTP 401). The caller must
    /// invalidate the session flags and navigate to the login screen.
    #[error("session expired")]
    AuthExpired,

    /// The server answered with a non-401 error envelope. The message
    /// is shown to the user verbatim.
    #[error("request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The request went out but no usable response came back
    /// (connection refused, timeout, truncated body).
    #[error("no response from server: {0}")]
    NoResponse(String),

    /// The request could not be constructed or sent at all.
    #[error("client error: {0}")]
    Client(String),
}

impl ApiError {
    /// Classify a reqwest transport error (no HTTP status available).
    ///
    /// Connect, timeout and body/decode failures must be checked before
    /// the broader request-kind checks: reqwest marks a refused
    /// connection as a request error too.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() || err.is_body() || err.is_decode() {
            // The server never answered usefully.
            ApiError::NoResponse(err.to_string())
        } else {
            ApiError::Client(err.to_string())
        }
    }

    /// Classify an HTTP error response from its status and raw body.
    ///
    /// A 401 is the distinguished session-invalid signal regardless of
    /// envelope contents. Other statuses surface the envelope message,
    /// falling back to the body text when the envelope does not parse.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        if status == 401 {
            return ApiError::AuthExpired;
        }
        match serde_json::from_slice::<ErrorEnvelope>(body) {
            // Some proxies rewrite the HTTP status but keep the
            // envelope; the envelope's 401 still means the session died.
            Ok(env) if env.status == 401 => ApiError::AuthExpired,
            Ok(env) => ApiError::Rejected {
                status: env.status,
                message: env.message,
            },
            Err(_) => ApiError::Rejected {
                status,
                message: String::from_utf8_lossy(body).trim().to_string(),
            },
        }
    }

    /// Whether this error must be handled by session invalidation.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, ApiError::AuthExpired)
    }

    /// One-line message suitable for the status bar.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::AuthExpired => "Session expired, please log in again".to_string(),
            ApiError::Rejected { message, .. } => message.clone(),
            ApiError::NoResponse(_) | ApiError::Client(_) => "Request failed".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_401_status_wins_over_body() {
        let err = ApiError::from_response(401, b"whatever");
        assert_eq!(err, ApiError::AuthExpired);
        assert!(err.is_auth_expired());
    }

    #[test]
    fn test_envelope_401_is_auth_expired() {
        let body = br#"{"status":401,"message":"token invalid"}"#;
        let err = ApiError::from_response(403, body);
        assert_eq!(err, ApiError::AuthExpired);
    }

    #[test]
    fn test_envelope_message_surfaces_verbatim() {
        let body = br#"{"status":400,"message":"title is required"}"#;
        let err = ApiError::from_response(400, body);
        assert_eq!(
            err,
            ApiError::Rejected {
                status: 400,
                message: "title is required".to_string()
            }
        );
        assert_eq!(err.user_message(), "title is required");
    }

    #[test]
    fn test_unparseable_body_falls_back_to_http_status() {
        let err = ApiError::from_response(500, b"<html>boom</html>");
        match err {
            ApiError::Rejected { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "<html>boom</html>");
            }
            other => panic!("expected Rejected, got {:?}", other),
        }
    }

    #[test]
    fn test_generic_message_for_transport_failures() {
        let err = ApiError::NoResponse("connection refused".to_string());
        assert_eq!(err.user_message(), "Request failed");
        let err = ApiError::Client("bad url".to_string());
        assert_eq!(err.user_message(), "Request failed");
    }

    #[test]
    fn test_display() {
        let err = ApiError::Rejected {
            status: 400,
            message: "nope".to_string(),
        };
        assert_eq!(err.to_string(), "request rejected (400): nope");
        assert_eq!(ApiError::AuthExpired.to_string(), "session expired");
    }
}
