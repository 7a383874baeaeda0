//! `%{name}` placeholder substitution
//!
//! The renderer is a pure function over its inputs: no I/O, no
//! interpretation of the rendered document. Semantic validation is the
//! apply engine's responsibility.

use crate::error::{CoreError, Result};
use crate::params::ParamContext;
use regex::Regex;

const PLACEHOLDER_PATTERN: &str = r"%\{([A-Za-z_][A-Za-z0-9_]*)\}";

/// Render a template by substituting every `%{name}` placeholder with the
/// stringified parameter value.
///
/// Each occurrence is substituted independently, so repeated placeholders
/// are supported. Fails with [`CoreError::UnresolvedPlaceholder`] on the
/// first placeholder with no matching entry.
pub fn render(template: &str, params: &ParamContext) -> Result<String> {
    let pattern = Regex::new(PLACEHOLDER_PATTERN).unwrap();

    let mut rendered = String::with_capacity(template.len());
    let mut last = 0;
    for caps in pattern.captures_iter(template) {
        let whole = caps.get(0).unwrap();
        let name = &caps[1];
        let value = params
            .get(name)
            .ok_or_else(|| CoreError::UnresolvedPlaceholder {
                name: name.to_string(),
            })?;

        rendered.push_str(&template[last..whole.start()]);
        rendered.push_str(&value.to_string());
        last = whole.end();
    }
    rendered.push_str(&template[last..]);

    Ok(rendered)
}

/// Render placeholders inside a JSON value.
///
/// Strings are substituted; arrays and objects are walked recursively;
/// numbers, booleans and nulls pass through unchanged. Used for declared
/// attribute values, which may reference the same parameters as the
/// template body.
pub fn render_value(value: &serde_json::Value, params: &ParamContext) -> Result<serde_json::Value> {
    use serde_json::Value;

    match value {
        Value::String(s) => Ok(Value::String(render(s, params)?)),
        Value::Array(items) => {
            let mut rendered = Vec::with_capacity(items.len());
            for item in items {
                rendered.push(render_value(item, params)?);
            }
            Ok(Value::Array(rendered))
        }
        Value::Object(fields) => {
            let mut rendered = serde_json::Map::with_capacity(fields.len());
            for (key, item) in fields {
                rendered.insert(key.clone(), render_value(item, params)?);
            }
            Ok(Value::Object(rendered))
        }
        other => Ok(other.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params() -> ParamContext {
        ParamContext::new()
            .with_str("name", "endpoint-a1b2c3")
            .with_int("endpoint_id", 1234567890)
            .with_reference("kms_key", "projects/demo/locations/us/keyRings/r/cryptoKeys/k")
    }

    #[test]
    fn test_substitutes_each_kind() {
        let rendered = render(
            "name = \"%{name}\"\nid = %{endpoint_id}\nkey = \"%{kms_key}\"",
            &params(),
        )
        .unwrap();

        assert_eq!(
            rendered,
            "name = \"endpoint-a1b2c3\"\nid = 1234567890\nkey = \"projects/demo/locations/us/keyRings/r/cryptoKeys/k\""
        );
    }

    #[test]
    fn test_repeated_placeholders_substituted_independently() {
        let rendered = render("%{name}/%{name}", &params()).unwrap();
        assert_eq!(rendered, "endpoint-a1b2c3/endpoint-a1b2c3");
    }

    #[test]
    fn test_unresolved_placeholder_is_an_error() {
        let err = render("name = %{missing}", &params()).unwrap_err();
        match err {
            CoreError::UnresolvedPlaceholder { name } => assert_eq!(name, "missing"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_no_placeholders_passes_through() {
        let rendered = render("plain text, no substitution", &params()).unwrap();
        assert_eq!(rendered, "plain text, no substitution");
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let template = "resource \"%{name}\" { id = %{endpoint_id} }";
        let first = render(template, &params()).unwrap();
        let second = render(template, &params()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_render_value_walks_nested_structures() {
        let value = json!({
            "display_name": "sample-endpoint",
            "name": "%{name}",
            "labels": { "label-one": "value-one", "owner": "%{name}" },
            "replicas": 3,
            "zones": ["%{name}-a", "%{name}-b"],
        });

        let rendered = render_value(&value, &params()).unwrap();

        assert_eq!(
            rendered,
            json!({
                "display_name": "sample-endpoint",
                "name": "endpoint-a1b2c3",
                "labels": { "label-one": "value-one", "owner": "endpoint-a1b2c3" },
                "replicas": 3,
                "zones": ["endpoint-a1b2c3-a", "endpoint-a1b2c3-b"],
            })
        );
    }

    #[test]
    fn test_render_value_propagates_unresolved() {
        let value = json!({ "labels": { "k": "%{nope}" } });
        assert!(render_value(&value, &params()).is_err());
    }
}
