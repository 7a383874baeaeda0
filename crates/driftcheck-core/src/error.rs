//! Core error types

use thiserror::Error;

/// Errors raised while building or rendering a run specification
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("unresolved placeholder: %{{{name}}} has no matching parameter")]
    UnresolvedPlaceholder { name: String },

    #[error("invalid scenario: {0}")]
    InvalidScenario(String),

    #[error("scenario parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
