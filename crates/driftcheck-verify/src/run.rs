//! Step orchestration and the run state machine.
//!
//! A run is strictly sequential: a step only begins once the previous step
//! has returned success, and the first failure aborts everything that
//! remains. Multiple independent runs may execute in parallel because each
//! owns its step sequence and parameter context outright.

use crate::destroy;
use crate::diff::diff_attributes;
use crate::engine::{ApplyEngine, ImportReader, RemoteLookup};
use crate::error::{Result, VerifyError};
use chrono::{DateTime, Utc};
use driftcheck_core::{DeclaredResource, ParamContext, ResourceRef, Scenario, Step};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// State machine for a single run:
/// `Pending → Applying(i) → Verifying(i) → … → Destroying → Verified | Failed`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Pending,
    Applying(usize),
    Verifying(usize),
    Destroying,
    Verified,
    Failed,
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunState::Pending => write!(f, "pending"),
            RunState::Applying(step) => write!(f, "applying({})", step),
            RunState::Verifying(step) => write!(f, "verifying({})", step),
            RunState::Destroying => write!(f, "destroying"),
            RunState::Verified => write!(f, "verified"),
            RunState::Failed => write!(f, "failed"),
        }
    }
}

/// Summary of a verified run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Scenario name
    pub scenario: String,

    /// Steps executed, all successful
    pub steps_completed: usize,

    /// Resources confirmed absent after teardown
    pub destroy_checks: usize,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Drives one scenario through apply, import-verify, teardown and the
/// final destroy check.
///
/// The three collaborators are borrowed so a single client that implements
/// all of them can back a run without cloning.
pub struct Runner<'a> {
    engine: &'a dyn ApplyEngine,
    reader: &'a dyn ImportReader,
    lookup: &'a dyn RemoteLookup,
}

impl<'a> Runner<'a> {
    pub fn new(
        engine: &'a dyn ApplyEngine,
        reader: &'a dyn ImportReader,
        lookup: &'a dyn RemoteLookup,
    ) -> Self {
        Self {
            engine,
            reader,
            lookup,
        }
    }

    /// Execute every step of the scenario in order, then tear down and
    /// verify destruction.
    ///
    /// Returns the first failure with its step index and cause; remaining
    /// steps are not attempted. Teardown and the destroy check still run
    /// best-effort after a failed step so partially applied resources are
    /// not leaked silently.
    pub async fn execute(&self, scenario: &Scenario, params: &ParamContext) -> Result<RunReport> {
        let started_at = Utc::now();
        tracing::info!(scenario = %scenario.name, state = %RunState::Pending, "run starting");

        // Rendering resolves every placeholder up front: an unresolved
        // parameter fails here, before the first remote call.
        let steps = scenario.render(params)?;

        let mut last_applied: HashMap<String, DeclaredResource> = HashMap::new();
        let mut created: Vec<ResourceRef> = Vec::new();
        let mut recorded: HashSet<String> = HashSet::new();

        for (step, rendered) in steps.iter().enumerate() {
            let outcome = match rendered {
                Step::Apply(document) => {
                    tracing::info!(
                        scenario = %scenario.name,
                        state = %RunState::Applying(step),
                        resources = document.resources.len(),
                        "applying configuration"
                    );
                    self.apply_step(step, document, &mut last_applied, &mut created, &mut recorded)
                        .await
                }
                Step::ImportVerify {
                    resource,
                    ignored_fields,
                } => {
                    tracing::info!(
                        scenario = %scenario.name,
                        state = %RunState::Verifying(step),
                        resource = %resource.key(),
                        "verifying via import"
                    );
                    self.import_verify_step(step, resource, ignored_fields, &last_applied)
                        .await
                }
            };

            if let Err(cause) = outcome {
                tracing::error!(
                    scenario = %scenario.name,
                    state = %RunState::Failed,
                    step,
                    error = %cause,
                    "step failed, aborting run"
                );
                self.cleanup_after_failure(&created).await;
                return Err(cause);
            }
        }

        tracing::info!(scenario = %scenario.name, state = %RunState::Destroying, "tearing down");
        self.engine
            .teardown()
            .await
            .map_err(|e| VerifyError::TeardownFailed(e.to_string()))?;

        let destroy_checks = destroy::verify_all_destroyed(self.lookup, &created).await?;

        tracing::info!(
            scenario = %scenario.name,
            state = %RunState::Verified,
            destroy_checks,
            "run verified"
        );
        Ok(RunReport {
            scenario: scenario.name.clone(),
            steps_completed: steps.len(),
            destroy_checks,
            started_at,
            finished_at: Utc::now(),
        })
    }

    async fn apply_step(
        &self,
        step: usize,
        document: &driftcheck_core::ConfigDocument,
        last_applied: &mut HashMap<String, DeclaredResource>,
        created: &mut Vec<ResourceRef>,
        recorded: &mut HashSet<String>,
    ) -> Result<()> {
        self.engine
            .apply(document)
            .await
            .map_err(|e| VerifyError::ApplyFailed {
                step,
                message: e.to_string(),
            })?;

        // Only a successful apply records its resources: a create that
        // never converged is never destroy-checked. Data sources are
        // read-only lookups and are excluded outright.
        for resource in &document.resources {
            let key = resource.reference.key();
            last_applied.insert(key.clone(), resource.clone());
            if !resource.data_source && recorded.insert(key) {
                created.push(resource.reference.clone());
            }
        }

        Ok(())
    }

    async fn import_verify_step(
        &self,
        step: usize,
        resource: &ResourceRef,
        ignored_fields: &HashSet<String>,
        last_applied: &HashMap<String, DeclaredResource>,
    ) -> Result<()> {
        let declared =
            last_applied
                .get(&resource.key())
                .ok_or_else(|| VerifyError::NoPriorDeclaration {
                    step,
                    resource: resource.key(),
                })?;

        let snapshot =
            self.reader
                .import(resource)
                .await
                .map_err(|e| VerifyError::ImportFailed {
                    step,
                    resource: resource.key(),
                    message: e.to_string(),
                })?;

        let mismatches = diff_attributes(&declared.attributes, &snapshot.attributes, ignored_fields);
        if !mismatches.is_empty() {
            return Err(VerifyError::StateMismatch {
                step,
                resource: resource.key(),
                mismatches,
            });
        }

        Ok(())
    }

    /// Best-effort teardown and destroy check after an aborted run.
    ///
    /// Secondary failures are logged at warn; the step failure stays the
    /// run's error.
    async fn cleanup_after_failure(&self, created: &[ResourceRef]) {
        if let Err(e) = self.engine.teardown().await {
            tracing::warn!(error = %e, "best-effort teardown failed after aborted run");
            return;
        }

        match destroy::verify_all_destroyed(self.lookup, created).await {
            Ok(checked) => tracing::debug!(checked, "post-abort destroy check passed"),
            Err(e) => tracing::warn!(error = %e, "post-abort destroy check failed"),
        }
    }
}
