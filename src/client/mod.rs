//! GitHub client modules
//!
//! `api` performs the raw HTTP calls, `service` turns their outcomes into
//! events for the application.

pub mod api;
pub mod config;
pub mod error;
pub mod service;

pub use api::GithubApi;
pub use config::ClientConfig;
pub use error::ClientError;
pub use service::GithubService;
