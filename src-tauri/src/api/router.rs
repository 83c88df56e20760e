//! Cross-cutting handling of failed API calls.
//!
//! Every failure the dispatcher sees goes through [`ResponseRouter::route`],
//! whichever command issued the call. The router turns the failure into a
//! [`Notice`] for the UI and applies the side effects tied to the status
//! (a 401 clears the stored credentials).

use reqwest::StatusCode;
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{info, warn};

use super::error::ApiError;
use crate::session::SessionHandle;

pub const SESSION_EXPIRED: &str = "Session expired. Please log in again.";
pub const FORBIDDEN: &str = "You don't have permission to perform this action.";
pub const NOT_FOUND: &str = "The requested resource was not found.";
pub const INTERNAL_ERROR: &str = "Internal server error. Please try again later.";
pub const UNAVAILABLE: &str = "Server is temporarily unavailable. Please try again later.";
pub const NETWORK_ERROR: &str = "Network error. Please check your connection.";
pub const UNEXPECTED_RESPONSE: &str = "The server sent a response this app could not read.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Error,
    /// The request went through but its answer could not be used.
    Warning,
}

/// A user-facing notification, shown as a toast.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub status: Option<u16>,
}

impl Notice {
    pub fn error(message: impl Into<String>, status: Option<u16>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
            status,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
            status: None,
        }
    }
}

/// Map a failure to the notice the user sees. Pure; no side effects.
pub fn classify(err: &ApiError) -> Notice {
    match err {
        ApiError::Transport(_) => Notice::error(NETWORK_ERROR, None),
        // Serde text means nothing to the user; it goes to the log only.
        ApiError::Decode(_) => Notice::warning(UNEXPECTED_RESPONSE),
        ApiError::Http { status, body } => {
            let code = Some(status.as_u16());
            let message = match *status {
                StatusCode::UNAUTHORIZED => SESSION_EXPIRED.to_string(),
                StatusCode::FORBIDDEN => FORBIDDEN.to_string(),
                StatusCode::NOT_FOUND => NOT_FOUND.to_string(),
                StatusCode::INTERNAL_SERVER_ERROR => INTERNAL_ERROR.to_string(),
                StatusCode::BAD_GATEWAY
                | StatusCode::SERVICE_UNAVAILABLE
                | StatusCode::GATEWAY_TIMEOUT => UNAVAILABLE.to_string(),
                _ => body
                    .as_ref()
                    .and_then(|b| b.detail_message())
                    .unwrap_or_else(|| format!("Error: {}", err)),
            };
            Notice::error(message, code)
        }
    }
}

#[derive(Clone)]
pub struct ResponseRouter {
    session: SessionHandle,
    notices: broadcast::Sender<Notice>,
}

impl ResponseRouter {
    pub fn new(session: SessionHandle, notices: broadcast::Sender<Notice>) -> Self {
        Self { session, notices }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.notices.subscribe()
    }

    /// Publish the notice for `err` and apply its side effects.
    pub fn route(&self, err: &ApiError) -> Notice {
        let notice = classify(err);
        warn!("API call failed: {} ({})", err, notice.message);

        if err.status() == Some(StatusCode::UNAUTHORIZED) {
            info!("Received 401, clearing stored credentials");
            if let Err(e) = self.session.clear() {
                warn!("Failed to clear credentials after 401: {}", e);
            }
        }

        // No subscribers (e.g. before the UI attaches) is not an error.
        let _ = self.notices.send(notice.clone());
        notice
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{Detail, ErrorBody};
    use crate::session::{MemoryStorage, Session, SessionStore};

    fn http(status: u16, detail: Option<&str>) -> ApiError {
        ApiError::Http {
            status: StatusCode::from_u16(status).unwrap(),
            body: detail.map(|d| ErrorBody {
                detail: Some(Detail::Text(d.to_string())),
                message: None,
            }),
        }
    }

    #[test]
    fn test_status_table() {
        assert_eq!(classify(&http(401, None)).message, SESSION_EXPIRED);
        assert_eq!(classify(&http(403, None)).message, FORBIDDEN);
        assert_eq!(classify(&http(404, Some("Prediction not found"))).message, NOT_FOUND);
        assert_eq!(classify(&http(500, None)).message, INTERNAL_ERROR);
        for status in [502, 503, 504] {
            assert_eq!(classify(&http(status, None)).message, UNAVAILABLE);
        }
    }

    #[test]
    fn test_other_status_uses_detail_then_generic() {
        assert_eq!(
            classify(&http(400, Some("Email already registered"))).message,
            "Email already registered"
        );
        assert_eq!(
            classify(&http(422, None)).message,
            "Error: Request failed with status code 422"
        );
        assert_eq!(classify(&http(409, None)).status, Some(409));
    }

    #[test]
    fn test_decode_failure_hides_serde_text() {
        let notice = classify(&ApiError::Decode(
            "missing field `total` at line 1 column 13".to_string(),
        ));
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert_eq!(notice.message, UNEXPECTED_RESPONSE);
        assert_eq!(notice.status, None);
    }

    #[test]
    fn test_route_401_clears_session_and_publishes() {
        let session = SessionStore::open(MemoryStorage::new());
        session
            .establish(Session {
                token: "tok".into(),
                user_id: 1,
            })
            .unwrap();
        let (tx, mut rx) = broadcast::channel(8);
        let router = ResponseRouter::new(session.clone(), tx);

        router.route(&http(401, Some("Could not validate credentials")));

        assert!(!session.is_authenticated());
        let notice = rx.try_recv().unwrap();
        assert_eq!(notice.message, SESSION_EXPIRED);
        assert_eq!(notice.status, Some(401));
    }

    #[test]
    fn test_route_other_errors_keep_session() {
        let session = SessionStore::open(MemoryStorage::new());
        session
            .establish(Session {
                token: "tok".into(),
                user_id: 1,
            })
            .unwrap();
        let (tx, _rx) = broadcast::channel(8);
        let router = ResponseRouter::new(session.clone(), tx);

        for status in [403, 404, 500, 503] {
            router.route(&http(status, None));
        }
        assert!(session.is_authenticated());
    }
}
