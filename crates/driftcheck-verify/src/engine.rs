//! Engine-facing traits: the external collaborators a run drives.
//!
//! Convergence polling, retries and backoff live behind [`ApplyEngine`];
//! the orchestrator only ever sees success or a typed failure. Keeping the
//! boundary this thin is what keeps the orchestrator engine-agnostic.

use crate::snapshot::ResourceSnapshot;
use async_trait::async_trait;
use driftcheck_core::{ConfigDocument, ResourceRef};
use thiserror::Error;

/// Failure reported by an external engine operation
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("convergence failed: {0}")]
    Convergence(String),

    #[error("read failed: {0}")]
    Read(String),

    #[error("transport error: {0}")]
    Transport(String),
}

/// External apply/converge engine.
///
/// Accepts a rendered configuration document and converges the remote
/// system toward it, or tears down everything the run created.
#[async_trait]
pub trait ApplyEngine: Send + Sync {
    /// Converge the remote system toward the document
    async fn apply(&self, document: &ConfigDocument) -> Result<(), EngineError>;

    /// Tear down everything applied during the run
    async fn teardown(&self) -> Result<(), EngineError>;
}

/// Import path: re-read a resource's current remote state using only its
/// identity, independent of how it was declared.
#[async_trait]
pub trait ImportReader: Send + Sync {
    async fn import(&self, resource: &ResourceRef) -> Result<ResourceSnapshot, EngineError>;
}

/// Outcome of a single remote existence lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// The lookup succeeded: the resource exists
    Found,

    /// The remote reported a not-found condition
    NotFound,

    /// The lookup itself failed (transport, auth, unexpected status)
    Error(String),
}

/// Response of one remote lookup, with the URL that was checked.
///
/// The URL is carried even on failure so destroy-check reports can point
/// operators at the exact endpoint that was queried.
#[derive(Debug, Clone)]
pub struct LookupResponse {
    pub url: String,
    pub outcome: LookupOutcome,
}

/// Single-shot remote existence check used by the destroy verifier.
///
/// One lookup per call, no retry or backoff; any eventual-consistency
/// tolerance belongs to the implementation's own semantics.
#[async_trait]
pub trait RemoteLookup: Send + Sync {
    async fn lookup(&self, resource: &ResourceRef) -> LookupResponse;
}
