//! Run specification model: an ordered list of lifecycle steps.
//!
//! A scenario file declares what the harness drives: apply steps carrying a
//! parameterized configuration template, and import-verify steps that
//! re-read a declared resource and diff it against the last applied
//! document. Step order is significant.

use crate::document::{ConfigDocument, DeclaredResource};
use crate::error::{CoreError, Result};
use crate::params::ParamContext;
use crate::resource::ResourceRef;
use crate::template;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// One verification scenario: a named, ordered step sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Scenario name, used in reports and logs
    pub name: String,

    /// Identity path templates by resource type, used by the import and
    /// lookup paths (e.g.
    /// `{{basePath}}projects/{{project}}/locations/{{location}}/endpoints/{{name}}`)
    #[serde(default)]
    pub identity_paths: HashMap<String, String>,

    /// Ordered lifecycle steps
    pub steps: Vec<StepSpec>,
}

/// One lifecycle step, as declared in a scenario file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepSpec {
    /// Converge the remote system toward a rendered configuration
    Apply {
        /// Configuration template with `%{name}` placeholders
        template: String,

        /// Resources the template declares
        #[serde(default)]
        resources: Vec<ResourceSpec>,
    },

    /// Re-read a resource by identity and diff against the last applied
    /// declaration
    ImportVerify {
        /// Resource to import
        resource: ResourceRef,

        /// Attribute names excluded from the comparison (server-managed or
        /// environment-dependent fields)
        #[serde(default)]
        ignored_fields: Vec<String>,
    },
}

/// A resource declaration inside an apply step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceSpec {
    #[serde(flatten)]
    pub reference: ResourceRef,

    /// Read-only data lookup, excluded from destroy checking
    #[serde(default)]
    pub data_source: bool,

    /// Declared attributes; string values may carry `%{name}` placeholders
    #[serde(default)]
    pub attributes: HashMap<String, serde_json::Value>,
}

/// A fully rendered lifecycle step, ready for the orchestrator.
#[derive(Debug, Clone)]
pub enum Step {
    Apply(ConfigDocument),
    ImportVerify {
        resource: ResourceRef,
        ignored_fields: HashSet<String>,
    },
}

impl Scenario {
    /// Parse a scenario from its JSON representation
    pub fn from_json(content: &str) -> Result<Self> {
        let scenario: Scenario = serde_json::from_str(content)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Structural checks that need no parameters and no network.
    ///
    /// Rendering still enforces placeholder resolution; the orchestrator
    /// still enforces declaration order at run time. This catches the same
    /// mistakes earlier, while the scenario is being authored.
    pub fn validate(&self) -> Result<()> {
        if self.steps.is_empty() {
            return Err(CoreError::InvalidScenario(format!(
                "scenario '{}' has no steps",
                self.name
            )));
        }

        // Import-verify must reference a resource some earlier apply step
        // declares. Raw (unrendered) names compare exactly because both
        // sides use the same placeholder text.
        let mut declared: HashSet<String> = HashSet::new();
        for (index, step) in self.steps.iter().enumerate() {
            match step {
                StepSpec::Apply { resources, .. } => {
                    for resource in resources {
                        declared.insert(resource.reference.key());
                    }
                }
                StepSpec::ImportVerify { resource, .. } => {
                    if !declared.contains(&resource.key()) {
                        return Err(CoreError::InvalidScenario(format!(
                            "step {} imports {} but no earlier apply step declares it",
                            index,
                            resource.key()
                        )));
                    }
                }
            }
        }

        Ok(())
    }

    /// Render every step against the parameter context.
    ///
    /// Fails before any remote call if a placeholder is unresolved,
    /// whether it appears in a template body, an attribute value or a
    /// resource name.
    pub fn render(&self, params: &ParamContext) -> Result<Vec<Step>> {
        tracing::debug!(
            scenario = %self.name,
            steps = self.steps.len(),
            params = params.len(),
            "rendering scenario"
        );
        let mut steps = Vec::with_capacity(self.steps.len());

        for spec in &self.steps {
            match spec {
                StepSpec::Apply {
                    template: body,
                    resources,
                } => {
                    let mut rendered_resources = Vec::with_capacity(resources.len());
                    for resource in resources {
                        rendered_resources.push(render_resource(resource, params)?);
                    }

                    steps.push(Step::Apply(ConfigDocument {
                        body: template::render(body, params)?,
                        resources: rendered_resources,
                    }));
                }
                StepSpec::ImportVerify {
                    resource,
                    ignored_fields,
                } => {
                    steps.push(Step::ImportVerify {
                        resource: render_reference(resource, params)?,
                        ignored_fields: ignored_fields.iter().cloned().collect(),
                    });
                }
            }
        }

        Ok(steps)
    }
}

fn render_reference(reference: &ResourceRef, params: &ParamContext) -> Result<ResourceRef> {
    Ok(ResourceRef {
        resource_type: reference.resource_type.clone(),
        location: template::render(&reference.location, params)?,
        name: template::render(&reference.name, params)?,
    })
}

fn render_resource(resource: &ResourceSpec, params: &ParamContext) -> Result<DeclaredResource> {
    let mut attributes = HashMap::with_capacity(resource.attributes.len());
    for (name, value) in &resource.attributes {
        attributes.insert(name.clone(), template::render_value(value, params)?);
    }

    Ok(DeclaredResource {
        reference: render_reference(&resource.reference, params)?,
        data_source: resource.data_source,
        attributes,
    })
}
