//! Identity path templates for the import and lookup URL space.
//!
//! A template like
//! `{{basePath}}projects/{{project}}/locations/{{location}}/endpoints/{{name}}`
//! is expanded against the remote configuration and one resource's
//! identity to reconstruct its canonical URL.

use crate::config::RemoteConfig;
use crate::error::{RemoteError, Result};
use driftcheck_core::ResourceRef;
use regex::Regex;
use std::collections::HashMap;

const PATH_VAR_PATTERN: &str = r"\{\{([A-Za-z_][A-Za-z0-9_]*)\}\}";

/// Expand every `{{var}}` in the template from the variable map.
///
/// Fails with [`RemoteError::UnresolvedPathVariable`] on the first
/// variable with no entry.
pub fn expand(template: &str, vars: &HashMap<&str, String>) -> Result<String> {
    let pattern = Regex::new(PATH_VAR_PATTERN).unwrap();

    let mut expanded = String::with_capacity(template.len());
    let mut last = 0;
    for caps in pattern.captures_iter(template) {
        let whole = caps.get(0).unwrap();
        let name = &caps[1];
        let value = vars
            .get(name)
            .ok_or_else(|| RemoteError::UnresolvedPathVariable(name.to_string()))?;

        expanded.push_str(&template[last..whole.start()]);
        expanded.push_str(value);
        last = whole.end();
    }
    expanded.push_str(&template[last..]);

    Ok(expanded)
}

/// Variable set for one resource under one configuration
pub(crate) fn identity_vars(
    config: &RemoteConfig,
    resource: &ResourceRef,
) -> HashMap<&'static str, String> {
    HashMap::from([
        ("basePath", config.base_url.clone()),
        ("project", config.project.clone()),
        ("location", resource.location.clone()),
        ("name", resource.name.clone()),
    ])
}
