// SPDX-FileCopyrightText: 2026 FlowForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lays workflow pipelines out as positioned nodes and edges.
//!
//! Each pipeline gets a title row followed by its steps left to right.
//! Node ids are namespaced by pipeline because generated step ids
//! (`step-1`, ...) repeat across pipelines.

use flowforge_core::{StepKind, WorkflowData};
use serde::Serialize;

/// Horizontal distance between consecutive steps.
pub const STEP_SPACING: f32 = 220.0;
/// Gap between a pipeline title and its steps.
pub const TITLE_GAP: f32 = 50.0;
/// Gap between the steps of one pipeline and the next title.
pub const PIPELINE_GAP: f32 = 150.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeShape {
    Rounded,
    /// Drawn as a square rotated 45 degrees.
    Diamond,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NodeStyle {
    pub background: &'static str,
    pub border: &'static str,
    pub shape: NodeShape,
}

/// Presentation attributes for a step kind.
pub fn node_style(kind: StepKind) -> NodeStyle {
    let (background, border) = match kind {
        StepKind::Start | StepKind::End => ("#22d3ee", "#0891b2"),
        StepKind::Process => ("#3b82f6", "#1d4ed8"),
        StepKind::Decision => ("#f59e0b", "#d97706"),
        StepKind::Database => ("#8b5cf6", "#7c3aed"),
        StepKind::Api => ("#10b981", "#059669"),
        StepKind::User => ("#ec4899", "#db2777"),
    };
    let shape = match kind {
        StepKind::Decision => NodeShape::Diamond,
        _ => NodeShape::Rounded,
    };
    NodeStyle {
        background,
        border,
        shape,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GraphNode {
    /// Pipeline title row.
    Title {
        id: String,
        label: String,
        position: Position,
    },
    #[serde(rename_all = "camelCase")]
    Step {
        id: String,
        label: String,
        description: String,
        kind: StepKind,
        position: Position,
        style: NodeStyle,
    },
}

impl GraphNode {
    pub fn id(&self) -> &str {
        match self {
            GraphNode::Title { id, .. } | GraphNode::Step { id, .. } => id,
        }
    }

    pub fn position(&self) -> Position {
        match self {
            GraphNode::Title { position, .. } | GraphNode::Step { position, .. } => *position,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WorkflowGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl WorkflowGraph {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

fn node_id(pipeline: &str, step: &str) -> String {
    format!("{pipeline}/{step}")
}

/// Positions every pipeline's steps and turns its connections into edges.
///
/// Connections are laid out as given, even when an endpoint names no step.
pub fn layout(workflow: &WorkflowData) -> WorkflowGraph {
    let mut graph = WorkflowGraph::default();
    let mut y = 0.0;

    for (index, pipeline) in workflow.pipelines.iter().enumerate() {
        graph.nodes.push(GraphNode::Title {
            id: format!("pipeline-label-{index}"),
            label: pipeline.name.clone(),
            position: Position { x: 0.0, y },
        });
        y += TITLE_GAP;

        for (column, step) in pipeline.steps.iter().enumerate() {
            graph.nodes.push(GraphNode::Step {
                id: node_id(&pipeline.id, &step.id),
                label: step.name.clone(),
                description: step.description.clone(),
                kind: step.kind,
                position: Position {
                    x: column as f32 * STEP_SPACING,
                    y,
                },
                style: node_style(step.kind),
            });
        }

        for connection in &pipeline.connections {
            let source = node_id(&pipeline.id, &connection.from);
            let target = node_id(&pipeline.id, &connection.to);
            graph.edges.push(GraphEdge {
                id: format!("{source}->{target}"),
                source,
                target,
                label: connection.label.clone(),
            });
        }

        y += PIPELINE_GAP;
    }

    graph
}
