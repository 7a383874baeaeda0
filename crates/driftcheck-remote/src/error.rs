//! Remote client error types

use thiserror::Error;

/// Errors raised by the REST client
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("no identity path template registered for resource type: {0}")]
    UnknownResourceType(String),

    #[error("unresolved path variable: {{{{{0}}}}}")]
    UnresolvedPathVariable(String),

    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, RemoteError>;
