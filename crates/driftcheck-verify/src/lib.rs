//! driftcheck verification core
//!
//! This crate drives a declared resource lifecycle against a remote
//! management API and verifies it at every stage:
//!
//! - the [`Runner`] sequences apply and import-verify steps, strictly in
//!   order, aborting on the first failure;
//! - the state equality checker ([`diff_attributes`]) compares declared
//!   attributes against an imported [`ResourceSnapshot`], excluding a
//!   caller-supplied set of server-managed fields;
//! - the destroy verifier confirms, with one lookup per resource, that
//!   everything a run created is gone after teardown.
//!
//! The external collaborators (apply engine, import reader, remote lookup)
//! sit behind the traits in [`engine`]; the orchestrator only ever sees
//! success or a typed failure.

pub mod destroy;
pub mod diff;
pub mod engine;
pub mod error;
pub mod run;
pub mod snapshot;

// Re-exports
pub use destroy::{DestroyCheck, DestroyCheckResult, check_resource, verify_all_destroyed};
pub use diff::{Mismatch, diff_attributes};
pub use engine::{ApplyEngine, EngineError, ImportReader, LookupOutcome, LookupResponse, RemoteLookup};
pub use error::{Result, VerifyError};
pub use run::{RunReport, RunState, Runner};
pub use snapshot::ResourceSnapshot;
