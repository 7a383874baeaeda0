//! Environment-based configuration for the remote management API.

use crate::error::{RemoteError, Result};

/// Connection and billing context for the management API.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// API base path, always with a trailing slash
    /// (e.g. `https://us-central1-api.example.com/v1/`)
    pub base_url: String,

    /// Project the verified resources live in
    pub project: String,

    /// Bearer token for authentication
    pub api_token: String,

    /// Project billed for the lookups, when different from `project`
    pub billing_project: Option<String>,
}

impl RemoteConfig {
    /// Create a RemoteConfig from environment variables
    pub fn from_env() -> Result<Self> {
        let base_url = require_env("DRIFTCHECK_BASE_URL")?;
        let project = require_env("DRIFTCHECK_PROJECT")?;
        let api_token = require_env("DRIFTCHECK_API_TOKEN")?;
        let billing_project = std::env::var("DRIFTCHECK_BILLING_PROJECT").ok();

        Ok(Self {
            base_url: normalize_base_url(base_url),
            project,
            api_token,
            billing_project,
        })
    }
}

fn require_env(name: &str) -> Result<String> {
    std::env::var(name).map_err(|_| RemoteError::MissingEnvVar(name.to_string()))
}

/// Identity path templates splice the base path directly in front of
/// `projects/...`, so it must end with a slash.
fn normalize_base_url(mut base_url: String) -> String {
    if !base_url.ends_with('/') {
        base_url.push('/');
    }
    base_url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_reads_all_variables() {
        temp_env::with_vars(
            [
                ("DRIFTCHECK_BASE_URL", Some("https://api.test/v1")),
                ("DRIFTCHECK_PROJECT", Some("demo-project")),
                ("DRIFTCHECK_API_TOKEN", Some("token-123")),
                ("DRIFTCHECK_BILLING_PROJECT", Some("billing-project")),
            ],
            || {
                let config = RemoteConfig::from_env().unwrap();
                assert_eq!(config.base_url, "https://api.test/v1/");
                assert_eq!(config.project, "demo-project");
                assert_eq!(config.api_token, "token-123");
                assert_eq!(config.billing_project.as_deref(), Some("billing-project"));
            },
        );
    }

    #[test]
    fn test_missing_variable_is_named() {
        temp_env::with_vars(
            [
                ("DRIFTCHECK_BASE_URL", Some("https://api.test/v1/")),
                ("DRIFTCHECK_PROJECT", None::<&str>),
                ("DRIFTCHECK_API_TOKEN", Some("token-123")),
            ],
            || {
                let err = RemoteConfig::from_env().unwrap_err();
                match err {
                    RemoteError::MissingEnvVar(name) => assert_eq!(name, "DRIFTCHECK_PROJECT"),
                    other => panic!("unexpected error: {other}"),
                }
            },
        );
    }

    #[test]
    fn test_trailing_slash_preserved() {
        assert_eq!(
            normalize_base_url("https://api.test/v1/".to_string()),
            "https://api.test/v1/"
        );
        assert_eq!(
            normalize_base_url("https://api.test/v1".to_string()),
            "https://api.test/v1/"
        );
    }
}
