use std::path::PathBuf;

use compact_str::{CompactString, ToCompactString};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LookupError>;

/// Message shown for every failed profile or repository fetch.
pub const NOT_FOUND_MESSAGE: &str = "User not found. Please check the username.";

/// Which upstream call a fetch error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchTarget {
    Profile,
    Repositories,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LookupError {
    #[error("{}", NOT_FOUND_MESSAGE)]
    ProfileNotFound,
    #[error("{}", NOT_FOUND_MESSAGE)]
    RepositoriesNotFound,

    #[error("Failed to load configuration from: {path}")]
    ConfigLoadError { path: PathBuf, message: String },

    #[error("Failed to save configuration to: {path}")]
    ConfigSaveError { path: PathBuf, message: String },

    #[error("Invalid configuration: {field}")]
    ConfigValidationError { field: String, message: String },

    #[error("{0}")]
    GeneralError(CompactString),
}

impl FetchTarget {
    /// The collapsed error kind for a failed fetch of this target.
    pub fn not_found(self) -> LookupError {
        match self {
            FetchTarget::Profile => LookupError::ProfileNotFound,
            FetchTarget::Repositories => LookupError::RepositoriesNotFound,
        }
    }
}

impl std::fmt::Display for FetchTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            FetchTarget::Profile => write!(f, "profile"),
            FetchTarget::Repositories => write!(f, "repositories"),
        }
    }
}

impl From<std::io::Error> for LookupError {
    fn from(e: std::io::Error) -> Self {
        LookupError::GeneralError(e.to_compact_string())
    }
}

impl From<crate::client::ClientError> for LookupError {
    fn from(e: crate::client::ClientError) -> Self {
        match e {
            crate::client::ClientError::ConfigValidation { field, message } => {
                LookupError::config_validation_error(field, message)
            },
            e => LookupError::GeneralError(e.to_compact_string()),
        }
    }
}

impl LookupError {
    /// Create a configuration load error
    pub fn config_load_error(path: PathBuf, source: impl std::fmt::Display) -> Self {
        Self::ConfigLoadError { path, message: source.to_string() }
    }

    /// Create a configuration save error
    pub fn config_save_error(path: PathBuf, source: impl std::fmt::Display) -> Self {
        Self::ConfigSaveError { path, message: source.to_string() }
    }

    /// Create a configuration validation error
    pub fn config_validation_error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidationError { field: field.into(), message: message.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_fetch_errors_share_the_fixed_message() {
        assert_eq!(LookupError::ProfileNotFound.to_string(), NOT_FOUND_MESSAGE);
        assert_eq!(LookupError::RepositoriesNotFound.to_string(), NOT_FOUND_MESSAGE);
    }

    #[test]
    fn fetch_target_maps_to_its_error_kind() {
        assert_eq!(FetchTarget::Profile.not_found(), LookupError::ProfileNotFound);
        assert_eq!(
            FetchTarget::Repositories.not_found(),
            LookupError::RepositoriesNotFound
        );
    }
}
