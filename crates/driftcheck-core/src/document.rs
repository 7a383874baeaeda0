//! Rendered configuration documents and the resources they declare.

use crate::resource::ResourceRef;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A fully rendered configuration blob plus the resources it declares.
///
/// The body is opaque to the harness: it is handed to the apply engine
/// verbatim. The declared resources drive import verification and destroy
/// checking. Immutable once rendered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigDocument {
    /// Rendered configuration text, consumed by the apply engine
    pub body: String,

    /// Resources this document declares
    pub resources: Vec<DeclaredResource>,
}

impl ConfigDocument {
    /// Find a declared resource by its key
    pub fn declared(&self, key: &str) -> Option<&DeclaredResource> {
        self.resources.iter().find(|r| r.reference.key() == key)
    }
}

/// One resource declared by a configuration document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeclaredResource {
    /// Resource identity
    pub reference: ResourceRef,

    /// Read-only data lookup, never subject to destroy checking
    pub data_source: bool,

    /// Declared attributes, compared against the imported snapshot
    pub attributes: HashMap<String, serde_json::Value>,
}

impl DeclaredResource {
    pub fn new(reference: ResourceRef) -> Self {
        Self {
            reference,
            data_source: false,
            attributes: HashMap::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    pub fn as_data_source(mut self) -> Self {
        self.data_source = true;
        self
    }
}
