// SPDX-FileCopyrightText: 2026 FlowForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! System and user prompts for each contract.
//!
//! The system prompt is picked by project type. The user prompt pins the JSON
//! shape the response must follow.

use std::fmt::Write as _;

use flowforge_core::{DatabaseType, OptimizedData, ProjectType, WorkflowData};
use flowforge_schema::dialect::{Primitive, type_token};

use crate::contract::Contract;

const JSON_ONLY: &str = "Return ONLY valid JSON, no markdown or explanation.";

/// System prompt for a contract and profile. Schema prompts also name the
/// dialect.
pub fn system_prompt(
    contract: Contract,
    project_type: ProjectType,
    dialect: Option<DatabaseType>,
) -> String {
    let dialect_line = dialect
        .map(|d| format!("\nUse {} syntax.", d.to_string().to_uppercase()))
        .unwrap_or_default();

    let body = match (contract, project_type) {
        (Contract::Concept, ProjectType::Personal) => {
            "You turn app ideas into structured concepts for personal tools.\n\
             Favor simplicity, few dependencies, no authentication, and a fast build.\n\
             Recommend SQLite for storage. Keep every feature practical."
        }
        (Contract::Concept, ProjectType::Public) => {
            "You turn app ideas into structured concepts for public applications.\n\
             Account for user authentication, database scalability, monetization, and analytics.\n\
             Recommend PostgreSQL for storage. Include user management and growth features."
        }
        (Contract::Workflow, ProjectType::Personal) => {
            "You design workflow pipelines for personal tools.\n\
             Keep flows short and direct with little branching.\n\
             Cover core functionality only: no authentication or payment flows."
        }
        (Contract::Workflow, ProjectType::Public) => {
            "You design workflow pipelines for production applications.\n\
             Include authentication, validation, error handling, and monitoring steps.\n\
             Account for scalability and security."
        }
        (Contract::Schema, ProjectType::Personal) => {
            "You are a database architect designing schemas for personal tools.\n\
             Use as few tables as possible. No user or authentication tables."
        }
        (Contract::Schema, ProjectType::Public) => {
            "You are a database architect designing schemas for production applications.\n\
             Include user management and audit trails, with explicit relationships."
        }
    };

    format!("{body}{dialect_line}")
}

pub fn concept_prompt(idea: &str) -> String {
    format!(
        r#"Convert this app idea into a structured concept using exactly this JSON format:
{{
  "appName": "CamelCase name for the app",
  "tagline": "Short catchy tagline (under 10 words)",
  "description": "2-3 sentence description of what the app does",
  "features": ["feature 1", "feature 2", "feature 3", "feature 4", "feature 5"]
}}

App idea: {idea}

{JSON_ONLY}"#
    )
}

pub fn workflow_prompt(concept: &OptimizedData) -> String {
    format!(
        r#"Create workflow pipelines for this app using exactly this JSON format:
{{
  "pipelines": [
    {{
      "id": "pipeline-1",
      "name": "User Flow Name",
      "steps": [
        {{
          "id": "step-1",
          "name": "Step Name",
          "type": "start|process|decision|end|database|api|user",
          "description": "What this step does"
        }}
      ],
      "connections": [
        {{ "from": "step-1", "to": "step-2", "label": "optional label" }}
      ]
    }}
  ]
}}

{app}

Create 2-3 key workflow pipelines (for example the main user flow and data management).
Each pipeline should have 3-6 steps. Connections may only reference step ids of the same pipeline.
{JSON_ONLY}"#,
        app = app_summary(concept),
    )
}

pub fn schema_prompt(
    concept: &OptimizedData,
    workflow: Option<&WorkflowData>,
    dialect: DatabaseType,
) -> String {
    let types = [
        Primitive::Id,
        Primitive::Text,
        Primitive::Datetime,
        Primitive::Boolean,
        Primitive::Json,
    ]
    .map(|p| type_token(dialect, p))
    .join("|");
    let dialect_name = dialect.to_string().to_uppercase();

    let mut prompt = format!(
        r#"Design a database schema for this app using exactly this JSON format:
{{
  "tables": [
    {{
      "name": "table_name",
      "columns": [
        {{
          "name": "column_name",
          "type": "{types}|etc",
          "constraints": ["PRIMARY KEY", "NOT NULL", "UNIQUE", "REFERENCES other_table(id)", etc.]
        }}
      ]
    }}
  ]
}}

{app}
Database Type: {dialect_name}
"#,
        app = app_summary(concept),
    );

    if let Some(workflow) = workflow {
        let names: Vec<&str> = workflow.pipelines.iter().map(|p| p.name.as_str()).collect();
        // Names are rendered as a JSON array so quotes inside them survive.
        let rendered = serde_json::to_string(&names).unwrap_or_default();
        let _ = writeln!(prompt, "Workflow Pipelines: {rendered}");
    }

    let _ = write!(
        prompt,
        "\nCreate appropriate tables with proper relationships. Use {dialect_name} data types.\n{JSON_ONLY}"
    );
    prompt
}

fn app_summary(concept: &OptimizedData) -> String {
    format!(
        "App: {}\nDescription: {}\nFeatures: {}",
        concept.app_name,
        concept.description,
        concept.features.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use flowforge_core::Pipeline;

    use super::*;

    fn concept() -> OptimizedData {
        OptimizedData {
            app_name: "StreakKeeper".into(),
            tagline: "Never break the chain".into(),
            description: "Track daily habits and streaks.".into(),
            features: vec!["Habits".into(), "Streaks".into()],
        }
    }

    #[test]
    fn personal_and_public_profiles_differ() {
        for contract in [Contract::Concept, Contract::Workflow, Contract::Schema] {
            let personal = system_prompt(contract, ProjectType::Personal, None);
            let public = system_prompt(contract, ProjectType::Public, None);
            assert_ne!(personal, public);
        }
        assert!(system_prompt(Contract::Concept, ProjectType::Personal, None).contains("SQLite"));
        assert!(system_prompt(Contract::Concept, ProjectType::Public, None).contains("PostgreSQL"));
    }

    #[test]
    fn schema_system_prompt_names_dialect() {
        let prompt = system_prompt(Contract::Schema, ProjectType::Public, Some(DatabaseType::Mysql));
        assert!(prompt.ends_with("Use MYSQL syntax."));
    }

    #[test]
    fn concept_prompt_embeds_idea_and_shape() {
        let prompt = concept_prompt("A habit tracker with streaks");
        assert!(prompt.contains("App idea: A habit tracker with streaks"));
        assert!(prompt.contains("\"appName\""));
        assert!(prompt.contains("\"features\""));
    }

    #[test]
    fn workflow_prompt_summarizes_concept() {
        let prompt = workflow_prompt(&concept());
        assert!(prompt.contains("App: StreakKeeper"));
        assert!(prompt.contains("Features: Habits, Streaks"));
        assert!(prompt.contains("start|process|decision|end|database|api|user"));
    }

    #[test]
    fn schema_prompt_embeds_dialect_vocabulary() {
        let prompt = schema_prompt(&concept(), None, DatabaseType::Sqlite);
        assert!(prompt.contains("\"type\": \"INTEGER|TEXT|TEXT|INTEGER|TEXT|etc\""));
        assert!(prompt.contains("Database Type: SQLITE"));
        assert!(!prompt.contains("Workflow Pipelines"));

        let prompt = schema_prompt(&concept(), None, DatabaseType::Postgresql);
        assert!(prompt.contains("SERIAL|VARCHAR(255)|TIMESTAMP|BOOLEAN|JSONB"));

        let prompt = schema_prompt(&concept(), None, DatabaseType::Mysql);
        assert!(prompt.contains("INT AUTO_INCREMENT|VARCHAR(255)|DATETIME|TINYINT(1)|JSON"));
    }

    #[test]
    fn schema_prompt_lists_pipeline_names() {
        let workflow = WorkflowData {
            pipelines: vec![Pipeline {
                id: "p1".into(),
                name: "Daily Check-in".into(),
                steps: vec![],
                connections: vec![],
            }],
        };
        let prompt = schema_prompt(&concept(), Some(&workflow), DatabaseType::Sqlite);
        assert!(prompt.contains(r#"Workflow Pipelines: ["Daily Check-in"]"#));
    }
}
