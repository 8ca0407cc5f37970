// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Error types for the client core and the stable reason taxonomy handed to
//! the presentation layer.

use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Failure of a single backend call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("Authentication required")]
    Unauthenticated,

    #[error("Session rejected by backend")]
    Unauthorized,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Backend returned HTTP {status}")]
    ServerError { status: u16 },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Invalid request: {0}")]
    InvalidInput(String),
}

impl ApiError {
    /// Map to the presentation taxonomy.
    pub fn reason(&self) -> ErrorReason {
        match self {
            ApiError::Unauthenticated => ErrorReason::Unauthenticated,
            ApiError::Unauthorized => ErrorReason::Unauthorized,
            ApiError::Network(_) => ErrorReason::Network,
            ApiError::ServerError { status } => ErrorReason::ServerError {
                status_code: *status,
            },
            ApiError::MalformedResponse(_) => ErrorReason::MalformedResponse,
            ApiError::InvalidInput(_) => ErrorReason::InvalidInput,
        }
    }
}

/// Token payload could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("Token is empty")]
    Empty,

    #[error("Token must have three segments, found {0}")]
    Segments(usize),

    #[error("Token payload is not valid base64url")]
    Base64,

    #[error("Token payload is not a JSON claims object: {0}")]
    Json(String),

    #[error("Token has no customer identifier")]
    MissingCustomerId,
}

/// Underlying key-value storage failure.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage document is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Login failed at the backend or while persisting the token.
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Could not save session: {0}")]
    Storage(#[from] StorageError),
}

/// Stable error taxonomy for the UI. Serialized values never change so the
/// presentation layer can localize them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "ui/src/generated/")
)]
pub enum ErrorReason {
    Unauthenticated,
    Unauthorized,
    Network,
    ServerError { status_code: u16 },
    MalformedResponse,
    DecodeError,
    InvalidInput,
}

impl ErrorReason {
    /// Default English message for the reason.
    pub fn user_message(&self) -> String {
        match self {
            ErrorReason::Unauthenticated => "Please log in to continue.".to_string(),
            ErrorReason::Unauthorized => "Your session has expired. Please log in again.".to_string(),
            ErrorReason::Network => {
                "Unable to reach the server. Check your connection and try again.".to_string()
            }
            ErrorReason::ServerError { status_code } => {
                format!("The server could not complete the request ({status_code}).")
            }
            ErrorReason::MalformedResponse => "The server sent an unexpected response.".to_string(),
            ErrorReason::DecodeError => "Error loading profile".to_string(),
            ErrorReason::InvalidInput => "All fields are required.".to_string(),
        }
    }
}

impl From<DecodeError> for ErrorReason {
    fn from(_: DecodeError) -> Self {
        ErrorReason::DecodeError
    }
}

/// Result type alias for backend calls
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_serializes_stably() {
        let json = serde_json::to_value(ErrorReason::ServerError { status_code: 500 }).unwrap();
        assert_eq!(json["kind"], "server_error");
        assert_eq!(json["status_code"], 500);

        let json = serde_json::to_value(ErrorReason::MalformedResponse).unwrap();
        assert_eq!(json["kind"], "malformed_response");
    }

    #[test]
    fn test_api_error_maps_to_reason() {
        assert_eq!(
            ApiError::Network("timeout".into()).reason(),
            ErrorReason::Network
        );
        assert_eq!(
            ApiError::ServerError { status: 502 }.reason(),
            ErrorReason::ServerError { status_code: 502 }
        );
        assert_eq!(ApiError::Unauthorized.reason(), ErrorReason::Unauthorized);
    }
}
