//! Error type for the arena API client.
//!
//! # Design
//! Every failed call produces exactly one `ApiError`. Application failures
//! are normalized into `Status`, whose `Display` is the human-readable
//! message alone so callers can show it verbatim. Transport failures are
//! not normalized and pass through as the underlying `reqwest::Error`.

use thiserror::Error;

/// Message used for a 2xx response that does not declare a JSON body.
pub const NON_JSON_MESSAGE: &str = "Response is not JSON";

/// Errors returned by `ArenaClient` parse methods and `ArenaApi` calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned a non-2xx status. `message` comes from the body's
    /// `detail` or `message` field, or is the generic status message.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The server returned a 2xx status without a JSON content type.
    #[error("Response is not JSON")]
    NonJson {
        status: u16,
        content_type: Option<String>,
    },

    /// A 2xx JSON body did not match the expected response shape.
    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// The request payload could not be serialized to JSON.
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// The request never produced a response.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

impl ApiError {
    /// Generic message used when the error body carries nothing usable.
    pub fn status_message(status: u16) -> String {
        format!("HTTP error! status: {status}")
    }

    /// HTTP status of the response, when there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } | ApiError::NonJson { status, .. } => Some(*status),
            ApiError::Transport(err) => err.status().map(|status| status.as_u16()),
            ApiError::Decode(_) | ApiError::Encode(_) => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}
