//! Post-teardown absence verification.
//!
//! One lookup per resource, no retry or backoff: eventual-consistency
//! tolerance belongs to the lookup function's own semantics, not here.

use crate::engine::{LookupOutcome, RemoteLookup};
use crate::error::{Result, VerifyError};
use driftcheck_core::ResourceRef;

/// Result of a single destroy check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestroyCheckResult {
    /// The remote lookup returned a not-found condition
    Absent,

    /// The remote lookup succeeded: the resource is still there
    StillExists,
}

/// Outcome of checking one resource, with the URL that was queried.
#[derive(Debug, Clone)]
pub struct DestroyCheck {
    pub resource: ResourceRef,
    pub url: String,
    pub result: DestroyCheckResult,
}

/// Issue a single existence lookup for one resource.
///
/// A lookup failure for any reason other than not-found is a
/// [`VerifyError::VerificationError`], never conflated with a resource
/// that was actually found.
pub async fn check_resource(
    lookup: &dyn RemoteLookup,
    resource: &ResourceRef,
) -> Result<DestroyCheck> {
    let response = lookup.lookup(resource).await;

    match response.outcome {
        LookupOutcome::NotFound => {
            tracing::debug!(resource = %resource.key(), url = %response.url, "resource absent");
            Ok(DestroyCheck {
                resource: resource.clone(),
                url: response.url,
                result: DestroyCheckResult::Absent,
            })
        }
        LookupOutcome::Found => Ok(DestroyCheck {
            resource: resource.clone(),
            url: response.url,
            result: DestroyCheckResult::StillExists,
        }),
        LookupOutcome::Error(reason) => Err(VerifyError::VerificationError {
            resource: resource.key(),
            url: response.url,
            reason,
        }),
    }
}

/// Check that every recorded resource is gone after teardown.
///
/// Returns the number of resources checked. Fails with
/// [`VerifyError::ResourceNotDestroyed`] (including the reconstructed
/// lookup URL) on the first resource that still exists.
pub async fn verify_all_destroyed(
    lookup: &dyn RemoteLookup,
    resources: &[ResourceRef],
) -> Result<usize> {
    for resource in resources {
        let check = check_resource(lookup, resource).await?;
        if check.result == DestroyCheckResult::StillExists {
            return Err(VerifyError::ResourceNotDestroyed {
                resource: check.resource.key(),
                url: check.url,
            });
        }
    }

    Ok(resources.len())
}
