//! driftcheck core model
//!
//! This crate holds the data model shared by the verification harness:
//! run parameters, the `%{name}` template renderer, the run specification
//! (scenario) model, and the configuration documents a run applies.
//!
//! Nothing here touches the network. Rendering is a pure function over a
//! template and a [`ParamContext`], so every substitution failure surfaces
//! before the first remote call.

pub mod document;
pub mod error;
pub mod params;
pub mod resource;
pub mod scenario;
pub mod template;

// Re-exports
pub use document::{ConfigDocument, DeclaredResource};
pub use error::{CoreError, Result};
pub use params::{ParamContext, ParamValue};
pub use resource::ResourceRef;
pub use scenario::{ResourceSpec, Scenario, Step, StepSpec};
pub use template::{render, render_value};
