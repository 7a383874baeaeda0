//! Verification error types
//!
//! Every variant is fatal: the first failure aborts the remaining steps of
//! the run and carries enough context (step index, resource key, diff or
//! cause) to diagnose without re-running.

use crate::diff::Mismatch;
use thiserror::Error;

/// Errors surfaced by a verification run
#[derive(Error, Debug)]
pub enum VerifyError {
    /// Rendering or specification failure, raised before any remote call
    #[error(transparent)]
    Template(#[from] driftcheck_core::CoreError),

    /// The external engine could not converge an apply step
    #[error("apply failed at step {step}: {message}")]
    ApplyFailed { step: usize, message: String },

    /// The import re-read itself failed; reported separately from a state
    /// mismatch so a broken read path is not mistaken for drift
    #[error("import read failed at step {step} for {resource}: {message}")]
    ImportFailed {
        step: usize,
        resource: String,
        message: String,
    },

    /// Declared vs observed attribute divergence
    #[error("state mismatch at step {step} for {resource}: [{}]", format_mismatches(.mismatches))]
    StateMismatch {
        step: usize,
        resource: String,
        mismatches: Vec<Mismatch>,
    },

    /// An import-verify step referenced a resource no prior apply declared
    #[error("step {step} imports {resource} with no prior apply declaring it")]
    NoPriorDeclaration { step: usize, resource: String },

    /// The engine's teardown phase failed
    #[error("teardown failed: {0}")]
    TeardownFailed(String),

    /// A resource survived teardown
    #[error("{resource} still exists at {url}")]
    ResourceNotDestroyed { resource: String, url: String },

    /// The destroy-check lookup failed for a reason other than not-found;
    /// distinct from [`VerifyError::ResourceNotDestroyed`] so operators can
    /// tell a leaked resource from broken verification infrastructure
    #[error("destroy verification failed for {resource} at {url}: {reason}")]
    VerificationError {
        resource: String,
        url: String,
        reason: String,
    },
}

fn format_mismatches(mismatches: &[Mismatch]) -> String {
    mismatches
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, VerifyError>;
