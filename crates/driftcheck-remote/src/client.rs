//! REST client for the management API
//!
//! Implements the three engine traits over plain authenticated HTTP:
//! apply and teardown as converge calls, import as an identity-URL read,
//! and the destroy-check lookup as a single GET. Uses Bearer token
//! authentication, with an optional billing-project header.

use crate::config::RemoteConfig;
use crate::error::{RemoteError, Result};
use crate::path;
use async_trait::async_trait;
use driftcheck_core::{ConfigDocument, ResourceRef};
use driftcheck_verify::{
    ApplyEngine, EngineError, ImportReader, LookupOutcome, LookupResponse, RemoteLookup,
    ResourceSnapshot,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Management API client
pub struct RestClient {
    client: reqwest::Client,
    config: RemoteConfig,
    path_templates: HashMap<String, String>,
}

impl RestClient {
    pub fn new(config: RemoteConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
            path_templates: HashMap::new(),
        }
    }

    /// Register the identity path template for a resource type
    pub fn with_path_template(
        mut self,
        resource_type: impl Into<String>,
        template: impl Into<String>,
    ) -> Self {
        self.path_templates
            .insert(resource_type.into(), template.into());
        self
    }

    /// Register several identity path templates at once
    pub fn with_path_templates(mut self, templates: HashMap<String, String>) -> Self {
        self.path_templates.extend(templates);
        self
    }

    /// Reconstruct the canonical URL for one resource
    pub fn identity_url(&self, resource: &ResourceRef) -> Result<String> {
        let template = self
            .path_templates
            .get(&resource.resource_type)
            .ok_or_else(|| RemoteError::UnknownResourceType(resource.resource_type.clone()))?;
        path::expand(template, &path::identity_vars(&self.config, resource))
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let request = request.bearer_auth(&self.config.api_token);
        match &self.config.billing_project {
            Some(billing) => request.header("X-Goog-User-Project", billing),
            None => request,
        }
    }

    /// POST a converge request and fail unless the engine reports done
    async fn converge(&self, verb: &str, request: &ConvergeRequest<'_>) -> Result<()> {
        let url = format!(
            "{}projects/{}/configurations:{}",
            self.config.base_url, self.config.project, verb
        );
        tracing::debug!(%url, "sending converge request");

        let response = self
            .authorize(self.client.post(&url))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::ApiError(format!("{} returned {}", url, status)));
        }

        let outcome: ConvergeResponse = response.json().await?;
        if !outcome.done {
            let reason = outcome
                .error
                .unwrap_or_else(|| "converge did not complete".to_string());
            return Err(RemoteError::ApiError(reason));
        }

        Ok(())
    }

    /// GET a resource's current attributes by identity
    async fn read_attributes(&self, url: &str) -> Result<HashMap<String, serde_json::Value>> {
        tracing::debug!(%url, "reading resource");
        let response = self.authorize(self.client.get(url)).send().await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(RemoteError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            return Err(RemoteError::ApiError(format!("{} returned {}", url, status)));
        }

        let body: serde_json::Value = response.json().await?;
        match body {
            serde_json::Value::Object(fields) => Ok(fields.into_iter().collect()),
            other => Err(RemoteError::ApiError(format!(
                "expected a JSON object, got {}",
                other
            ))),
        }
    }
}

#[async_trait]
impl ApplyEngine for RestClient {
    async fn apply(&self, document: &ConfigDocument) -> std::result::Result<(), EngineError> {
        let request = ConvergeRequest {
            configuration: &document.body,
        };
        self.converge("apply", &request)
            .await
            .map_err(|e| EngineError::Convergence(e.to_string()))
    }

    async fn teardown(&self) -> std::result::Result<(), EngineError> {
        let request = ConvergeRequest { configuration: "" };
        self.converge("teardown", &request)
            .await
            .map_err(|e| EngineError::Convergence(e.to_string()))
    }
}

#[async_trait]
impl ImportReader for RestClient {
    async fn import(
        &self,
        resource: &ResourceRef,
    ) -> std::result::Result<ResourceSnapshot, EngineError> {
        let url = self
            .identity_url(resource)
            .map_err(|e| EngineError::Read(e.to_string()))?;

        let attributes = self.read_attributes(&url).await.map_err(|e| match e {
            RemoteError::Http(e) => EngineError::Transport(e.to_string()),
            other => EngineError::Read(other.to_string()),
        })?;

        let mut snapshot = ResourceSnapshot::new(&resource.resource_type, &resource.location);
        snapshot.attributes = attributes;
        Ok(snapshot)
    }
}

#[async_trait]
impl RemoteLookup for RestClient {
    async fn lookup(&self, resource: &ResourceRef) -> LookupResponse {
        let url = match self.identity_url(resource) {
            Ok(url) => url,
            Err(e) => {
                return LookupResponse {
                    url: resource.key(),
                    outcome: LookupOutcome::Error(e.to_string()),
                };
            }
        };

        tracing::debug!(%url, "destroy-check lookup");
        let outcome = match self.authorize(self.client.get(&url)).send().await {
            Ok(response) => classify_status(response.status()),
            Err(e) => LookupOutcome::Error(e.to_string()),
        };

        LookupResponse { url, outcome }
    }
}

/// Map a lookup's HTTP status to its outcome: not-found is the only
/// status that counts as absence, success means the resource is still
/// there, anything else is a lookup failure.
fn classify_status(status: reqwest::StatusCode) -> LookupOutcome {
    if status == reqwest::StatusCode::NOT_FOUND {
        LookupOutcome::NotFound
    } else if status.is_success() {
        LookupOutcome::Found
    } else {
        LookupOutcome::Error(format!("unexpected status {}", status))
    }
}

// ============ Wire types ============

#[derive(Debug, Serialize)]
struct ConvergeRequest<'a> {
    configuration: &'a str,
}

#[derive(Debug, Deserialize)]
struct ConvergeResponse {
    done: bool,
    #[serde(default)]
    error: Option<String>,
}
