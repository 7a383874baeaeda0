//! Observed remote state of a single resource.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The remote system's current representation of one resource.
///
/// Populated by a read against the remote API. Never mutated in place:
/// each read produces a fresh snapshot, owned transiently by whichever
/// check consumes it and discarded after comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceSnapshot {
    /// Resource type tag
    pub resource_type: String,

    /// Location/region tag
    pub location: String,

    /// Attributes as the remote reported them
    pub attributes: HashMap<String, serde_json::Value>,
}

impl ResourceSnapshot {
    pub fn new(resource_type: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            location: location.into(),
            attributes: HashMap::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    pub fn get_attribute(&self, key: &str) -> Option<&serde_json::Value> {
        self.attributes.get(key)
    }
}
