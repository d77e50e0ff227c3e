//! Error types for the device API client.
//!
//! # Design
//! One variant covers every application-level rejection: any non-2xx response
//! lands in `ServerCommunication` with the status code and whatever
//! `ErrorInfo` payload the body yielded. Transport failures (refused
//! connections, timeouts, DNS) never appear here — the host owns the I/O and
//! its own error type for it.

use std::fmt;

use crate::types::ErrorInfo;

/// Errors returned by `DeviceClient` build and parse methods.
#[derive(Debug)]
pub enum ApiError {
    /// The server answered with a non-2xx status. `error_info` holds the
    /// decoded failure payload when the body was a valid `ErrorInfo`.
    ServerCommunication {
        status: u16,
        error_info: Option<ErrorInfo>,
    },

    /// A 2xx response body could not be deserialized into the expected type.
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    Serialization(String),

    /// The base URL given at construction cannot be used to build requests.
    InvalidBaseUrl(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::ServerCommunication {
                status,
                error_info: Some(info),
            } => {
                write!(
                    f,
                    "server rejected the request: HTTP {status}: {} (code {})",
                    info.description, info.code
                )
            }
            ApiError::ServerCommunication {
                status,
                error_info: None,
            } => {
                write!(f, "server rejected the request: HTTP {status}")
            }
            ApiError::Deserialization(msg) => {
                write!(f, "deserialization failed: {msg}")
            }
            ApiError::Serialization(msg) => {
                write!(f, "serialization failed: {msg}")
            }
            ApiError::InvalidBaseUrl(msg) => {
                write!(f, "invalid base URL: {msg}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_payload_when_present() {
        let err = ApiError::ServerCommunication {
            status: 400,
            error_info: Some(ErrorInfo {
                description: "Device manufacturer is needed".to_string(),
                code: 8003,
                more_info_url: "/errorcodes/".to_string(),
                api_version: 1,
            }),
        };
        let text = err.to_string();
        assert!(text.contains("HTTP 400"));
        assert!(text.contains("Device manufacturer is needed"));
        assert!(text.contains("8003"));
    }

    #[test]
    fn display_without_payload_still_names_status() {
        let err = ApiError::ServerCommunication {
            status: 502,
            error_info: None,
        };
        assert_eq!(err.to_string(), "server rejected the request: HTTP 502");
    }
}
