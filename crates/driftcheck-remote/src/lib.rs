//! driftcheck remote client
//!
//! REST implementation of the verification engine traits against a
//! Google-Cloud-style management API: converge (apply/teardown) endpoints,
//! identity-URL reads for the import path, and single-shot existence
//! lookups for destroy checking. Configuration comes from the environment;
//! identity URLs are reconstructed from per-resource-type path templates
//! such as
//! `{{basePath}}projects/{{project}}/locations/{{location}}/endpoints/{{name}}`.

pub mod client;
pub mod config;
pub mod error;
pub mod path;

// Re-exports
pub use client::RestClient;
pub use config::RemoteConfig;
pub use error::{RemoteError, Result};
pub use path::expand;
