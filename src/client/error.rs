//! Error types for the GitHub client

use compact_str::CompactString;
use reqwest::StatusCode;
use thiserror::Error;

use crate::result::FetchTarget;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error from {endpoint}: {message}")]
    JsonParse {
        endpoint: CompactString,
        message: CompactString,
        #[source]
        source: serde_json::Error,
    },

    /// Any non-success status. The status code is kept for logging only.
    #[error("{target} not found (HTTP {status})")]
    NotFound { target: FetchTarget, status: u16 },

    #[error("Invalid URL: {url}")]
    InvalidUrl { url: CompactString },

    #[error("Configuration error: {0}")]
    Config(CompactString),

    #[error("Invalid configuration for {field}: {message}")]
    ConfigValidation { field: CompactString, message: CompactString },
}

impl ClientError {
    pub fn json_parse(
        endpoint: impl Into<CompactString>,
        message: impl Into<CompactString>,
        source: serde_json::Error,
    ) -> Self {
        Self::JsonParse { endpoint: endpoint.into(), message: message.into(), source }
    }

    pub fn invalid_url(url: impl Into<CompactString>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    pub fn config(message: impl Into<CompactString>) -> Self {
        Self::Config(message.into())
    }

    pub fn config_validation(
        field: impl Into<CompactString>,
        message: impl Into<CompactString>,
    ) -> Self {
        Self::ConfigValidation { field: field.into(), message: message.into() }
    }
}

/// Translates an HTTP status into the error for `target`.
///
/// Every non-2xx status collapses into the same not-found kind; 401, 404
/// and 503 are indistinguishable to callers. Returns `None` on success.
pub fn http_status_to_error(target: FetchTarget, status: StatusCode) -> Option<ClientError> {
    if status.is_success() {
        None
    } else {
        Some(ClientError::NotFound { target, status: status.as_u16() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_statuses_are_not_errors() {
        for code in [200, 201, 204] {
            let status = StatusCode::from_u16(code).unwrap();
            assert!(http_status_to_error(FetchTarget::Profile, status).is_none());
        }
    }

    #[test]
    fn every_failure_status_collapses_to_not_found() {
        for code in [301, 401, 403, 404, 422, 500, 503] {
            let status = StatusCode::from_u16(code).unwrap();
            match http_status_to_error(FetchTarget::Repositories, status) {
                Some(ClientError::NotFound { target, status }) => {
                    assert_eq!(target, FetchTarget::Repositories);
                    assert_eq!(status, code);
                },
                other => panic!("unexpected result for {code}: {other:?}"),
            }
        }
    }
}
