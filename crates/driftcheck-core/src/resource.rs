//! Resource identity shared by declarations, snapshots and destroy checks.

use serde::{Deserialize, Serialize};

/// Identity of one remote resource: type, location and name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceRef {
    /// Resource type (e.g. "endpoint", "crypto-key")
    pub resource_type: String,

    /// Location or region the resource lives in
    pub location: String,

    /// Resource name, unique within (type, location)
    pub name: String,
}

impl ResourceRef {
    pub fn new(
        resource_type: impl Into<String>,
        location: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            resource_type: resource_type.into(),
            location: location.into(),
            name: name.into(),
        }
    }

    /// Get the full resource key (type:location:name)
    pub fn key(&self) -> String {
        format!("{}:{}:{}", self.resource_type, self.location, self.name)
    }
}

impl std::fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}
