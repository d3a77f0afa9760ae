//! Error types for the country API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because the lookups must tell "no such
//! country" apart from "the server misbehaved". All other non-2xx responses
//! land in `HttpError` with the raw status and body; the user-facing text is
//! derived from that body on demand by `user_message`.

use thiserror::Error;

use crate::types::ErrorBody;

/// Fallback text when a failure carries nothing more specific.
pub const GENERIC_ERROR: &str = "Server error";

/// Errors produced while building requests, parsing responses, or validating
/// form input.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Input rejected locally; no request was issued.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// No response arrived.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}

/// The four failure classes a user can tell apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Server,
    Transport,
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Validation(_) | ApiError::SerializationError(_) => ErrorKind::Validation,
            ApiError::NotFound => ErrorKind::NotFound,
            ApiError::HttpError { .. } | ApiError::DeserializationError(_) => ErrorKind::Server,
            ApiError::Transport(_) => ErrorKind::Transport,
        }
    }

    /// The most specific message available for display.
    ///
    /// For server failures: the structured `message` field, then the raw
    /// body, then `GENERIC_ERROR`.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Validation(msg) => msg.clone(),
            ApiError::NotFound => "Not found".to_string(),
            ApiError::HttpError { body, .. } => extract_message(body),
            ApiError::Transport(_) => "Could not reach server".to_string(),
            ApiError::DeserializationError(_) | ApiError::SerializationError(_) => {
                GENERIC_ERROR.to_string()
            }
        }
    }
}

impl From<crate::http::TransportError> for ApiError {
    fn from(err: crate::http::TransportError) -> Self {
        ApiError::Transport(err.0)
    }
}

/// Pick the best message out of an error response body.
pub fn extract_message(body: &str) -> String {
    let structured = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty());
    if let Some(message) = structured {
        return message;
    }
    let raw = body.trim();
    if raw.is_empty() {
        GENERIC_ERROR.to_string()
    } else {
        raw.to_string()
    }
}
