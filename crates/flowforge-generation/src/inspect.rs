// SPDX-FileCopyrightText: 2026 FlowForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Non-fatal checks on generated data.
//!
//! Findings are reported alongside the data; nothing here rejects or repairs
//! a response.

use std::collections::HashSet;
use std::fmt;

use flowforge_core::{DatabaseType, OptimizedData, SchemaData, WorkflowData};
use flowforge_schema::dialect::is_recognized_type;
use serde::Serialize;

/// Number of features the concept prompt asks for.
pub const EXPECTED_FEATURES: usize = 5;

/// A data-quality defect in a generated payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DataWarning {
    #[serde(rename_all = "camelCase")]
    FeatureCount { expected: usize, actual: usize },
    EmptyAppName,
    #[serde(rename_all = "camelCase")]
    EmptyPipeline { pipeline: String },
    #[serde(rename_all = "camelCase")]
    DuplicateStepId { pipeline: String, step: String },
    /// A connection endpoint names no step of its pipeline.
    #[serde(rename_all = "camelCase")]
    DanglingConnection {
        pipeline: String,
        from: String,
        to: String,
        missing: String,
    },
    #[serde(rename_all = "camelCase")]
    EmptyTable { table: String },
    #[serde(rename_all = "camelCase")]
    UnknownColumnType {
        table: String,
        column: String,
        data_type: String,
        dialect: DatabaseType,
    },
}

impl fmt::Display for DataWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataWarning::FeatureCount { expected, actual } => {
                write!(f, "expected {expected} features, got {actual}")
            }
            DataWarning::EmptyAppName => f.write_str("app name is empty"),
            DataWarning::EmptyPipeline { pipeline } => {
                write!(f, "pipeline `{pipeline}` has no steps")
            }
            DataWarning::DuplicateStepId { pipeline, step } => {
                write!(f, "pipeline `{pipeline}` repeats step id `{step}`")
            }
            DataWarning::DanglingConnection {
                pipeline,
                from,
                to,
                missing,
            } => write!(
                f,
                "pipeline `{pipeline}` connection {from} -> {to} references unknown step `{missing}`"
            ),
            DataWarning::EmptyTable { table } => write!(f, "table `{table}` has no columns"),
            DataWarning::UnknownColumnType {
                table,
                column,
                data_type,
                dialect,
            } => write!(
                f,
                "column `{table}.{column}` has type `{data_type}` not known for {dialect}"
            ),
        }
    }
}

pub fn inspect_concept(concept: &OptimizedData) -> Vec<DataWarning> {
    let mut warnings = Vec::new();
    if concept.app_name.trim().is_empty() {
        warnings.push(DataWarning::EmptyAppName);
    }
    if concept.features.len() != EXPECTED_FEATURES {
        warnings.push(DataWarning::FeatureCount {
            expected: EXPECTED_FEATURES,
            actual: concept.features.len(),
        });
    }
    warnings
}

pub fn inspect_workflow(workflow: &WorkflowData) -> Vec<DataWarning> {
    let mut warnings = Vec::new();

    for pipeline in &workflow.pipelines {
        if pipeline.steps.is_empty() {
            warnings.push(DataWarning::EmptyPipeline {
                pipeline: pipeline.id.clone(),
            });
        }

        let mut ids = HashSet::new();
        for step in &pipeline.steps {
            if !ids.insert(step.id.as_str()) {
                warnings.push(DataWarning::DuplicateStepId {
                    pipeline: pipeline.id.clone(),
                    step: step.id.clone(),
                });
            }
        }

        for connection in &pipeline.connections {
            for endpoint in [&connection.from, &connection.to] {
                if !ids.contains(endpoint.as_str()) {
                    warnings.push(DataWarning::DanglingConnection {
                        pipeline: pipeline.id.clone(),
                        from: connection.from.clone(),
                        to: connection.to.clone(),
                        missing: endpoint.clone(),
                    });
                }
            }
        }
    }

    warnings
}

pub fn inspect_schema(schema: &SchemaData, dialect: DatabaseType) -> Vec<DataWarning> {
    let mut warnings = Vec::new();
    for table in &schema.tables {
        if table.columns.is_empty() {
            warnings.push(DataWarning::EmptyTable {
                table: table.name.clone(),
            });
        }
        for column in &table.columns {
            if !is_recognized_type(dialect, &column.data_type) {
                warnings.push(DataWarning::UnknownColumnType {
                    table: table.name.clone(),
                    column: column.name.clone(),
                    data_type: column.data_type.clone(),
                    dialect,
                });
            }
        }
    }
    warnings
}
