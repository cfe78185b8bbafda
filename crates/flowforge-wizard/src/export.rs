// SPDX-FileCopyrightText: 2026 FlowForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The step-8 export artifact.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use flowforge_core::{DatabaseType, DevEnvironment, FlowforgeError, OptimizedData, SchemaData};
use flowforge_schema::sql::generate_sql;
use serde::Serialize;
use tracing::info;

use crate::catalog::{database_info, dev_environment_info};
use crate::graph::{WorkflowGraph, layout};
use crate::state::WizardState;

pub const SQL_FILE: &str = "schema.sql";
pub const BRIEF_FILE: &str = "PROJECT.md";
pub const GRAPH_FILE: &str = "workflow.json";

/// Everything the user takes away from the wizard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportBundle {
    pub app_name: String,
    pub database_type: DatabaseType,
    pub dev_environment: DevEnvironment,
    /// DDL for the edited schema in the chosen dialect.
    pub sql: String,
    pub setup_command: String,
    /// Markdown project brief.
    pub brief: String,
    pub graph: WorkflowGraph,
}

impl ExportBundle {
    /// Builds the bundle from a wizard state. The concept, database type,
    /// schema, and dev environment must all be set; the workflow is optional.
    pub fn from_state(state: &WizardState) -> Result<Self, FlowforgeError> {
        let concept = require(state.optimized_data.as_ref(), "app concept")?;
        let database_type = require(state.database_type.as_ref(), "database type")?;
        let schema = require(state.schema_data.as_ref(), "database schema")?;
        let dev_environment = require(state.dev_environment.as_ref(), "dev environment")?;

        let sql = generate_sql(&schema.tables, *database_type);
        let graph = state.workflow_data.as_ref().map(layout).unwrap_or_default();
        let brief = render_brief(state, concept, schema, *database_type, *dev_environment, &sql);

        Ok(Self {
            app_name: concept.app_name.clone(),
            database_type: *database_type,
            dev_environment: *dev_environment,
            sql,
            setup_command: dev_environment_info(*dev_environment).setup_command.to_string(),
            brief,
            graph,
        })
    }

    /// Writes `schema.sql`, `PROJECT.md`, and `workflow.json` into `dir`,
    /// creating it if needed. Returns the written paths.
    pub fn write_to_dir(&self, dir: &Path) -> Result<Vec<PathBuf>, FlowforgeError> {
        std::fs::create_dir_all(dir).map_err(FlowforgeError::storage)?;

        let graph = serde_json::to_string_pretty(&self.graph)
            .map_err(|e| FlowforgeError::Internal(format!("failed to encode workflow graph: {e}")))?;

        let files = [
            (SQL_FILE, format!("{}\n", self.sql)),
            (BRIEF_FILE, self.brief.clone()),
            (GRAPH_FILE, graph),
        ];

        let mut written = Vec::with_capacity(files.len());
        for (name, contents) in files {
            let path = dir.join(name);
            std::fs::write(&path, contents).map_err(FlowforgeError::storage)?;
            written.push(path);
        }
        info!(dir = %dir.display(), files = written.len(), "export written");
        Ok(written)
    }
}

fn require<'a, T>(value: Option<&'a T>, what: &str) -> Result<&'a T, FlowforgeError> {
    value.ok_or_else(|| FlowforgeError::Validation(format!("cannot export without a {what}")))
}

fn render_brief(
    state: &WizardState,
    concept: &OptimizedData,
    schema: &SchemaData,
    database_type: DatabaseType,
    dev_environment: DevEnvironment,
    sql: &str,
) -> String {
    let mut md = String::new();
    let _ = writeln!(md, "# {}\n", concept.app_name);
    let _ = writeln!(md, "> {}\n", concept.tagline);
    let _ = writeln!(md, "{}\n", concept.description);

    if !state.original_idea.is_empty() {
        let _ = writeln!(md, "**Original idea:** {}\n", state.original_idea);
    }
    if let Some(project_type) = state.project_type {
        let _ = writeln!(md, "**Project type:** {project_type}\n");
    }

    md.push_str("## Features\n\n");
    for feature in &concept.features {
        let _ = writeln!(md, "- {feature}");
    }
    md.push('\n');

    if let Some(workflow) = &state.workflow_data {
        md.push_str("## Workflows\n\n");
        for pipeline in &workflow.pipelines {
            let _ = writeln!(md, "### {}\n", pipeline.name);
            for (n, step) in pipeline.steps.iter().enumerate() {
                let _ = write!(md, "{}. **{}** ({})", n + 1, step.name, step.kind);
                if !step.description.is_empty() {
                    let _ = write!(md, ": {}", step.description);
                }
                md.push('\n');
            }
            md.push('\n');
        }
    }

    let _ = writeln!(
        md,
        "## Database\n\n{} with {} tables.\n",
        database_info(database_type).title,
        schema.tables.len()
    );
    let _ = writeln!(md, "```sql\n{sql}\n```\n");

    let env = dev_environment_info(dev_environment);
    let _ = writeln!(
        md,
        "## Development Environment\n\n{}: {}\n\n```sh\n{}\n```",
        env.title, env.description, env.setup_command
    );
    md
}

#[cfg(test)]
mod tests {
    use flowforge_core::ProjectType;
    use flowforge_test_utils::fixtures;

    use super::*;

    fn complete_state() -> WizardState {
        let mut state = WizardState::new();
        state.set_project_type(ProjectType::Personal);
        state.set_original_idea(fixtures::HABIT_IDEA);
        state.set_optimized_data(fixtures::concept());
        state.set_workflow_data(fixtures::workflow());
        state.set_database_type(DatabaseType::Sqlite);
        state.set_schema_data(fixtures::schema());
        state.set_dev_environment(DevEnvironment::ClaudeTerminal);
        state
    }

    #[test]
    fn bundle_carries_sql_command_and_brief() {
        let bundle = ExportBundle::from_state(&complete_state()).unwrap();
        assert_eq!(bundle.app_name, "StreakKeeper");
        assert!(bundle.sql.starts_with("CREATE TABLE habits (\n  id INTEGER PRIMARY KEY,"));
        assert_eq!(bundle.setup_command, "npm i -g @anthropic-ai/claude-code");
        assert!(bundle.brief.starts_with("# StreakKeeper\n"));
        assert!(bundle.brief.contains("### Daily Check-in"));
        assert!(bundle.brief.contains("3. **Already Done?** (decision): Check for today's entry"));
        assert!(bundle.brief.contains("SQLite with 2 tables."));
        assert!(!bundle.graph.is_empty());
    }

    #[test]
    fn missing_pieces_are_validation_errors() {
        let mut state = complete_state();
        state.dev_environment = None;
        let err = ExportBundle::from_state(&state).unwrap_err();
        assert!(matches!(err, FlowforgeError::Validation(ref m) if m.contains("dev environment")));
    }

    #[test]
    fn workflow_is_optional() {
        let mut state = complete_state();
        state.workflow_data = None;
        let bundle = ExportBundle::from_state(&state).unwrap();
        assert!(bundle.graph.is_empty());
        assert!(!bundle.brief.contains("## Workflows"));
    }

    #[test]
    fn write_to_dir_creates_three_files() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("export");
        let bundle = ExportBundle::from_state(&complete_state()).unwrap();
        let written = bundle.write_to_dir(&out).unwrap();
        assert_eq!(written.len(), 3);

        let sql = std::fs::read_to_string(out.join(SQL_FILE)).unwrap();
        assert_eq!(sql.trim_end(), bundle.sql);
        let graph: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(out.join(GRAPH_FILE)).unwrap()).unwrap();
        assert_eq!(graph["nodes"][0]["type"], "title");
    }
}
