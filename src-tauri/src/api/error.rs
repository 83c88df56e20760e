use reqwest::StatusCode;
use thiserror::Error;

use super::types::ErrorBody;

/// Failure of a single API call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response was received (connect failure, timeout, broken body).
    #[error("Network error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("Request failed with status code {}", .status.as_u16())]
    Http {
        status: StatusCode,
        body: Option<ErrorBody>,
    },

    /// A 2xx response whose body did not match the expected shape.
    #[error("Unexpected response from server: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn body(&self) -> Option<&ErrorBody> {
        match self {
            ApiError::Http { body, .. } => body.as_ref(),
            _ => None,
        }
    }

    /// Message for the caller: server `detail`, then server `message`, then
    /// the transport text, then `fallback`. An undecodable success body has no
    /// useful text of its own and always gets `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        if let Some(body) = self.body() {
            if let Some(detail) = body.detail_message() {
                return detail;
            }
            if let Some(message) = body.message() {
                return message;
            }
        }

        match self {
            ApiError::Decode(_) => fallback.to_string(),
            _ => {
                let text = self.to_string();
                if text.trim().is_empty() {
                    fallback.to_string()
                } else {
                    text
                }
            }
        }
    }
}
