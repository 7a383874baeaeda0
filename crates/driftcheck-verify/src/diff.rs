//! Declared-vs-observed attribute comparison.
//!
//! The checker holds no built-in exceptions: computed-only fields (etags,
//! region aliases) must be in the caller-supplied ignored set.

use serde_json::Value;
use std::collections::{HashMap, HashSet};

/// One differing attribute: what was declared vs what the remote returned.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Mismatch {
    pub attribute: String,

    /// Declared value
    pub expected: Value,

    /// Observed value, or `None` if the attribute is absent from the
    /// snapshot
    pub actual: Option<Value>,
}

impl std::fmt::Display for Mismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.actual {
            Some(actual) => write!(
                f,
                "{}: expected {}, got {}",
                self.attribute, self.expected, actual
            ),
            None => write!(f, "{}: expected {}, got nothing", self.attribute, self.expected),
        }
    }
}

/// Compare declared attributes against an observed snapshot.
///
/// Reports every attribute present in the declaration but absent or
/// differing in the observation, excluding names in the ignored set.
/// String-typed label maps are JSON objects and compare as whole values:
/// an extra or missing key is a mismatch, with no partial credit. The
/// result is ordered by attribute name.
pub fn diff_attributes(
    declared: &HashMap<String, Value>,
    observed: &HashMap<String, Value>,
    ignored: &HashSet<String>,
) -> Vec<Mismatch> {
    let mut mismatches: Vec<Mismatch> = declared
        .iter()
        .filter(|(attribute, _)| !ignored.contains(*attribute))
        .filter_map(|(attribute, expected)| match observed.get(attribute) {
            Some(actual) if actual == expected => None,
            actual => Some(Mismatch {
                attribute: attribute.clone(),
                expected: expected.clone(),
                actual: actual.cloned(),
            }),
        })
        .collect();

    mismatches.sort_by(|a, b| a.attribute.cmp(&b.attribute));
    mismatches
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attrs(pairs: &[(&str, Value)]) -> HashMap<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn ignored(names: &[&str]) -> HashSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_identical_attributes_produce_empty_diff() {
        let declared = attrs(&[
            ("display_name", json!("sample-endpoint")),
            ("labels", json!({ "label-one": "value-one" })),
        ]);
        let observed = declared.clone();

        assert!(diff_attributes(&declared, &observed, &HashSet::new()).is_empty());
    }

    #[test]
    fn test_absent_attribute_reported_with_no_actual() {
        let declared = attrs(&[("display_name", json!("sample-endpoint"))]);
        let observed = attrs(&[]);

        let mismatches = diff_attributes(&declared, &observed, &HashSet::new());
        assert_eq!(mismatches.len(), 1);
        assert_eq!(mismatches[0].attribute, "display_name");
        assert!(mismatches[0].actual.is_none());
    }

    #[test]
    fn test_differing_attribute_reported_with_both_values() {
        let declared = attrs(&[("display_name", json!("new-sample-endpoint"))]);
        let observed = attrs(&[("display_name", json!("sample-endpoint"))]);

        let mismatches = diff_attributes(&declared, &observed, &HashSet::new());
        assert_eq!(mismatches.len(), 1);
        assert_eq!(mismatches[0].expected, json!("new-sample-endpoint"));
        assert_eq!(mismatches[0].actual, Some(json!("sample-endpoint")));
    }

    #[test]
    fn test_ignored_attributes_never_reported() {
        let declared = attrs(&[
            ("etag", json!("abc123")),
            ("region", json!("us-central1")),
            ("display_name", json!("sample-endpoint")),
        ]);
        let observed = attrs(&[("display_name", json!("sample-endpoint"))]);

        let mismatches = diff_attributes(&declared, &observed, &ignored(&["etag", "region"]));
        assert!(mismatches.is_empty());
    }

    #[test]
    fn test_label_maps_compare_as_whole_mappings() {
        let declared = attrs(&[("labels", json!({ "label-two": "value-two" }))]);

        // Exact map: no mismatch
        let exact = attrs(&[("labels", json!({ "label-two": "value-two" }))]);
        assert!(diff_attributes(&declared, &exact, &HashSet::new()).is_empty());

        // Extra key in the observed map: mismatch
        let extra = attrs(&[(
            "labels",
            json!({ "label-two": "value-two", "stale": "value-one" }),
        )]);
        assert_eq!(diff_attributes(&declared, &extra, &HashSet::new()).len(), 1);

        // Missing key: mismatch
        let missing = attrs(&[("labels", json!({}))]);
        assert_eq!(
            diff_attributes(&declared, &missing, &HashSet::new()).len(),
            1
        );
    }

    #[test]
    fn test_result_ordered_by_attribute_name() {
        let declared = attrs(&[
            ("zeta", json!(1)),
            ("alpha", json!(2)),
            ("mid", json!(3)),
        ]);
        let observed = attrs(&[]);

        let names: Vec<String> = diff_attributes(&declared, &observed, &HashSet::new())
            .into_iter()
            .map(|m| m.attribute)
            .collect();
        assert_eq!(names, vec!["alpha", "mid", "zeta"]);
    }
}
