// SPDX-FileCopyrightText: 2026 FlowForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generation contracts: idea to concept, concept to workflow, and concept
//! plus workflow to schema.
//!
//! Each contract is one provider call. The response text must be a single
//! JSON document of the contract's shape; anything else is a
//! [`FlowforgeError::Generation`] with no partial result. Parsed data is then
//! inspected, and the resulting [`DataWarning`]s travel with it.

pub mod contract;
pub mod inspect;
pub mod prompts;
pub mod requests;

use std::sync::Arc;

use flowforge_config::model::GenerationConfig;
use flowforge_core::{
    FlowforgeError, OptimizedData, ProviderAdapter, ProviderRequest, SchemaData, WorkflowData,
};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

pub use contract::Contract;
pub use inspect::DataWarning;
pub use requests::{ConceptRequest, SchemaRequest, WorkflowRequest};

use crate::requests::profile;

/// Parsed contract output plus any data-quality findings.
#[derive(Debug, Clone, PartialEq)]
pub struct Generated<T> {
    pub data: T,
    pub warnings: Vec<DataWarning>,
}

/// Model and token budget for each contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSettings {
    /// Empty selects the provider's default model.
    pub model: String,
    pub concept_max_tokens: u32,
    pub workflow_max_tokens: u32,
    pub schema_max_tokens: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self::from(&GenerationConfig::default())
    }
}

impl From<&GenerationConfig> for GenerationSettings {
    fn from(config: &GenerationConfig) -> Self {
        Self {
            model: config.model.clone().unwrap_or_default(),
            concept_max_tokens: config.concept_max_tokens,
            workflow_max_tokens: config.workflow_max_tokens,
            schema_max_tokens: config.schema_max_tokens,
        }
    }
}

impl GenerationSettings {
    fn max_tokens(&self, contract: Contract) -> u32 {
        match contract {
            Contract::Concept => self.concept_max_tokens,
            Contract::Workflow => self.workflow_max_tokens,
            Contract::Schema => self.schema_max_tokens,
        }
    }
}

/// Runs the generation contracts against a provider.
#[derive(Clone)]
pub struct Generator {
    provider: Arc<dyn ProviderAdapter>,
    settings: GenerationSettings,
}

impl Generator {
    pub fn new(provider: Arc<dyn ProviderAdapter>, settings: GenerationSettings) -> Self {
        Self { provider, settings }
    }

    pub fn provider(&self) -> &Arc<dyn ProviderAdapter> {
        &self.provider
    }

    /// Idea to [`OptimizedData`].
    pub async fn generate_concept(
        &self,
        request: &ConceptRequest,
    ) -> Result<Generated<OptimizedData>, FlowforgeError> {
        let idea = request.validate()?;
        let project_type = profile(request.project_type);

        let data: OptimizedData = self
            .call(
                Contract::Concept,
                prompts::system_prompt(Contract::Concept, project_type, None),
                prompts::concept_prompt(idea),
            )
            .await?;

        Ok(finish(Contract::Concept, data, inspect::inspect_concept))
    }

    /// [`OptimizedData`] to [`WorkflowData`].
    pub async fn generate_workflow(
        &self,
        request: &WorkflowRequest,
    ) -> Result<Generated<WorkflowData>, FlowforgeError> {
        let concept = request.validate()?;
        let project_type = profile(request.project_type);

        let data: WorkflowData = self
            .call(
                Contract::Workflow,
                prompts::system_prompt(Contract::Workflow, project_type, None),
                prompts::workflow_prompt(concept),
            )
            .await?;

        Ok(finish(Contract::Workflow, data, inspect::inspect_workflow))
    }

    /// Concept, optional workflow, and dialect to [`SchemaData`].
    pub async fn generate_schema(
        &self,
        request: &SchemaRequest,
    ) -> Result<Generated<SchemaData>, FlowforgeError> {
        let (concept, dialect) = request.validate()?;
        let project_type = profile(request.project_type);

        let data: SchemaData = self
            .call(
                Contract::Schema,
                prompts::system_prompt(Contract::Schema, project_type, Some(dialect)),
                prompts::schema_prompt(concept, request.workflow_data.as_ref(), dialect),
            )
            .await?;

        Ok(finish(Contract::Schema, data, |schema| {
            inspect::inspect_schema(schema, dialect)
        }))
    }

    async fn call<T: DeserializeOwned>(
        &self,
        contract: Contract,
        system_prompt: String,
        prompt: String,
    ) -> Result<T, FlowforgeError> {
        let request = ProviderRequest {
            model: self.settings.model.clone(),
            system_prompt: Some(system_prompt),
            prompt,
            max_tokens: self.settings.max_tokens(contract),
        };

        debug!(%contract, max_tokens = request.max_tokens, "calling provider");
        let response = match self.provider.complete(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(%contract, error = %e, "provider call failed");
                return Err(match e {
                    FlowforgeError::Timeout { .. } => e,
                    other => FlowforgeError::generation(contract.to_string(), other.to_string()),
                });
            }
        };

        info!(
            %contract,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "generation response received"
        );
        parse_strict(contract, &response.content)
    }
}

/// Parses the whole response as one JSON document. Only surrounding
/// whitespace is tolerated; code fences or prose are a failure.
pub fn parse_strict<T: DeserializeOwned>(
    contract: Contract,
    text: &str,
) -> Result<T, FlowforgeError> {
    serde_json::from_str(text.trim()).map_err(|e| {
        warn!(%contract, error = %e, "response did not match the expected shape");
        FlowforgeError::generation(
            contract.to_string(),
            format!("response is not a valid {contract} document: {e}"),
        )
    })
}

fn finish<T>(
    contract: Contract,
    data: T,
    inspect: impl FnOnce(&T) -> Vec<DataWarning>,
) -> Generated<T> {
    let warnings = inspect(&data);
    for warning in &warnings {
        warn!(%contract, %warning, "generated data needs attention");
    }
    Generated { data, warnings }
}
