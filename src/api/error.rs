//! Error types for backend calls.

use thiserror::Error;

use crate::model::ImageError;

/// Errors that can occur while talking to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Transport failure: connect, timeout, broken body
    #[error("Request to '{endpoint}' failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// Backend answered with a non-2xx status
    #[error("Backend returned {status} for '{endpoint}': {message}")]
    Status {
        endpoint: String,
        status: u16,
        message: String,
    },

    /// Response body did not match the expected shape
    #[error("Failed to decode response from '{endpoint}': {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    /// A call that needs a bearer token was attempted while logged out
    #[error("Authentication required")]
    Unauthenticated,

    /// A staged image could not be turned into upload bytes
    #[error("Invalid image: {0}")]
    InvalidImage(#[from] ImageError),
}

impl ApiError {
    /// HTTP status of a backend rejection, if that is what this is.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Short machine-friendly classification.
    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::Client(_) => "client_error",
            ApiError::Transport { .. } => "transport_error",
            ApiError::Status { .. } => "status_error",
            ApiError::Decode { .. } => "decode_error",
            ApiError::Unauthenticated => "unauthenticated",
            ApiError::InvalidImage(_) => "invalid_image",
        }
    }

    /// Generic message shown to the user for a failed `action`
    /// (e.g. "load the exhibition").
    pub fn user_message(&self, action: &str) -> String {
        match self {
            ApiError::Unauthenticated => format!("Please log in to {}.", action),
            ApiError::Status { status: 401, .. } | ApiError::Status { status: 403, .. } => {
                format!("You are not allowed to {}.", action)
            }
            ApiError::InvalidImage(_) => format!("Could not {}: the image is invalid.", action),
            _ => format!("Could not {}. Please try again.", action),
        }
    }
}
