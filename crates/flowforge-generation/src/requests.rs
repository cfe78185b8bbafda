// SPDX-FileCopyrightText: 2026 FlowForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Inputs to the generation contracts.
//!
//! Fields are optional at the serde level so a missing field reaches
//! [`validate`](ConceptRequest::validate) and is reported as a
//! [`FlowforgeError::Validation`] instead of a deserialization error.

use flowforge_core::{
    DatabaseType, FlowforgeError, OptimizedData, ProjectType, WorkflowData,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptRequest {
    #[serde(default)]
    pub idea: Option<String>,
    #[serde(default)]
    pub project_type: Option<ProjectType>,
}

impl ConceptRequest {
    pub fn new(idea: impl Into<String>, project_type: ProjectType) -> Self {
        Self {
            idea: Some(idea.into()),
            project_type: Some(project_type),
        }
    }

    /// The trimmed idea, or a validation error when it is absent or blank.
    pub fn validate(&self) -> Result<&str, FlowforgeError> {
        self.idea
            .as_deref()
            .map(str::trim)
            .filter(|idea| !idea.is_empty())
            .ok_or_else(|| FlowforgeError::Validation("Idea is required".into()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowRequest {
    #[serde(default)]
    pub optimized_data: Option<OptimizedData>,
    #[serde(default)]
    pub project_type: Option<ProjectType>,
}

impl WorkflowRequest {
    pub fn new(concept: OptimizedData, project_type: ProjectType) -> Self {
        Self {
            optimized_data: Some(concept),
            project_type: Some(project_type),
        }
    }

    pub fn validate(&self) -> Result<&OptimizedData, FlowforgeError> {
        self.optimized_data
            .as_ref()
            .ok_or_else(|| FlowforgeError::Validation("Optimized data is required".into()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaRequest {
    #[serde(default)]
    pub optimized_data: Option<OptimizedData>,
    #[serde(default)]
    pub workflow_data: Option<WorkflowData>,
    #[serde(default)]
    pub project_type: Option<ProjectType>,
    #[serde(default)]
    pub database_type: Option<DatabaseType>,
}

impl SchemaRequest {
    pub fn new(
        concept: OptimizedData,
        workflow: Option<WorkflowData>,
        project_type: ProjectType,
        database_type: DatabaseType,
    ) -> Self {
        Self {
            optimized_data: Some(concept),
            workflow_data: workflow,
            project_type: Some(project_type),
            database_type: Some(database_type),
        }
    }

    pub fn validate(&self) -> Result<(&OptimizedData, DatabaseType), FlowforgeError> {
        match (&self.optimized_data, self.database_type) {
            (Some(concept), Some(dialect)) => Ok((concept, dialect)),
            _ => Err(FlowforgeError::Validation("Missing required data".into())),
        }
    }
}

/// Unset project types select the public profile.
pub(crate) fn profile(project_type: Option<ProjectType>) -> ProjectType {
    project_type.unwrap_or(ProjectType::Public)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_idea_is_rejected() {
        let req = ConceptRequest {
            idea: Some("   ".into()),
            project_type: None,
        };
        assert!(matches!(req.validate(), Err(FlowforgeError::Validation(m)) if m == "Idea is required"));
        assert!(ConceptRequest::default().validate().is_err());
        assert_eq!(
            ConceptRequest::new("  notes app ", ProjectType::Personal)
                .validate()
                .unwrap(),
            "notes app"
        );
    }

    #[test]
    fn schema_request_needs_concept_and_dialect() {
        let json = r#"{"optimizedData":{"appName":"A","tagline":"B","description":"C","features":[]}}"#;
        let req: SchemaRequest = serde_json::from_str(json).unwrap();
        assert!(req.validate().is_err());

        let json = r#"{"optimizedData":{"appName":"A","tagline":"B","description":"C","features":[]},"databaseType":"mysql"}"#;
        let req: SchemaRequest = serde_json::from_str(json).unwrap();
        let (_, dialect) = req.validate().unwrap();
        assert_eq!(dialect, DatabaseType::Mysql);
    }

    #[test]
    fn workflow_request_deserializes_camel_case() {
        let json = r#"{"optimizedData":{"appName":"A","tagline":"B","description":"C","features":["x"]},"projectType":"personal"}"#;
        let req: WorkflowRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.project_type, Some(ProjectType::Personal));
        assert_eq!(req.validate().unwrap().features, vec!["x"]);
    }

    #[test]
    fn missing_profile_defaults_to_public() {
        assert_eq!(profile(None), ProjectType::Public);
        assert_eq!(profile(Some(ProjectType::Personal)), ProjectType::Personal);
    }
}
