// SPDX-FileCopyrightText: 2026 FlowForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Canned generation payloads for a personal habit tracker.
//!
//! The JSON strings are what a well-behaved model returns for each contract;
//! the typed helpers parse the same text.

use flowforge_core::{OptimizedData, SchemaData, WorkflowData};

/// The idea the fixtures answer.
pub const HABIT_IDEA: &str = "A habit tracker with streaks";

pub fn concept_json() -> String {
    serde_json::json!({
        "appName": "StreakKeeper",
        "tagline": "Never break the chain",
        "description": "StreakKeeper tracks daily habits and keeps a running streak for each one. \
                        A quick check-in each day keeps the chain going.",
        "features": [
            "Create and archive habits",
            "One-tap daily check-in",
            "Current and longest streak per habit",
            "Calendar heatmap of completions",
            "Local reminders"
        ]
    })
    .to_string()
}

pub fn workflow_json() -> String {
    serde_json::json!({
        "pipelines": [
            {
                "id": "pipeline-1",
                "name": "Daily Check-in",
                "steps": [
                    {"id": "step-1", "name": "Open App", "type": "start", "description": "User opens today's view"},
                    {"id": "step-2", "name": "Pick Habit", "type": "user", "description": "User taps a habit"},
                    {"id": "step-3", "name": "Already Done?", "type": "decision", "description": "Check for today's entry"},
                    {"id": "step-4", "name": "Save Check-in", "type": "database", "description": "Insert a check-in row"},
                    {"id": "step-5", "name": "Done", "type": "end", "description": "Streak updated"}
                ],
                "connections": [
                    {"from": "step-1", "to": "step-2"},
                    {"from": "step-2", "to": "step-3"},
                    {"from": "step-3", "to": "step-4", "label": "No"},
                    {"from": "step-3", "to": "step-5", "label": "Yes"},
                    {"from": "step-4", "to": "step-5"}
                ]
            },
            {
                "id": "pipeline-2",
                "name": "Habit Management",
                "steps": [
                    {"id": "step-1", "name": "Start", "type": "start", "description": "Open habit list"},
                    {"id": "step-2", "name": "Edit Habit", "type": "process", "description": "Change name or schedule"},
                    {"id": "step-3", "name": "Persist", "type": "database", "description": "Update the habit row"},
                    {"id": "step-4", "name": "End", "type": "end", "description": "Return to list"}
                ],
                "connections": [
                    {"from": "step-1", "to": "step-2"},
                    {"from": "step-2", "to": "step-3"},
                    {"from": "step-3", "to": "step-4"}
                ]
            }
        ]
    })
    .to_string()
}

/// A schema using only SQLite vocabulary.
pub fn schema_json() -> String {
    serde_json::json!({
        "tables": [
            {
                "name": "habits",
                "columns": [
                    {"name": "id", "type": "INTEGER", "constraints": ["PRIMARY KEY"]},
                    {"name": "name", "type": "TEXT", "constraints": ["NOT NULL"]},
                    {"name": "created_at", "type": "TEXT", "constraints": ["NOT NULL"]},
                    {"name": "archived", "type": "INTEGER", "constraints": ["DEFAULT 0"]}
                ]
            },
            {
                "name": "check_ins",
                "columns": [
                    {"name": "id", "type": "INTEGER", "constraints": ["PRIMARY KEY"]},
                    {"name": "habit_id", "type": "INTEGER", "constraints": ["NOT NULL", "REFERENCES habits(id)"]},
                    {"name": "day", "type": "TEXT", "constraints": ["NOT NULL"]}
                ]
            }
        ]
    })
    .to_string()
}

/// The three contract responses in wizard order.
pub fn habit_tracker_responses() -> Vec<String> {
    vec![concept_json(), workflow_json(), schema_json()]
}

pub fn concept() -> OptimizedData {
    parse(&concept_json())
}

pub fn workflow() -> WorkflowData {
    parse(&workflow_json())
}

pub fn schema() -> SchemaData {
    parse(&schema_json())
}

fn parse<T: serde::de::DeserializeOwned>(text: &str) -> T {
    serde_json::from_str(text).expect("fixture JSON matches its type")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_parse() {
        assert_eq!(concept().features.len(), 5);
        let workflow = workflow();
        assert_eq!(workflow.pipelines.len(), 2);
        assert!(
            workflow
                .pipelines
                .iter()
                .all(|p| (3..=6).contains(&p.steps.len()))
        );
        assert_eq!(schema().tables.len(), 2);
    }
}
