use thiserror::Error;

use crate::api::ApiError;

#[derive(Debug, Error)]
pub enum ExoError {
    #[error("Missing required parameters: {}", .0.join(", "))]
    MissingParameters(Vec<String>),

    #[error("Please enter {0}")]
    MissingInput(&'static str),

    #[error("You need to log in first")]
    NotAuthenticated,

    /// A failed API call. Displays the message shown to the user, picked from
    /// the server detail, the server message, the transport text and finally
    /// the operation's fallback.
    #[error("{}", .cause.user_message(.fallback))]
    Request {
        #[source]
        cause: ApiError,
        fallback: &'static str,
    },

    #[error("Session storage error: {0}")]
    Storage(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl ExoError {
    pub fn request(fallback: &'static str) -> impl FnOnce(ApiError) -> ExoError {
        move |cause| ExoError::Request { cause, fallback }
    }
}

impl From<ExoError> for String {
    fn from(err: ExoError) -> Self {
        err.to_string()
    }
}
