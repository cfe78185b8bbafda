// SPDX-FileCopyrightText: 2026 FlowForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the FlowForge project wizard.
//!
//! This crate provides the domain types (concept, workflow, schema, project
//! records), the shared error type, and the adapter traits implemented by the
//! LLM provider and the project store.

pub mod error;
pub mod traits;
pub mod types;

pub use error::FlowforgeError;
pub use types::{
    AdapterType, Column, Connection, DatabaseType, DevEnvironment, HealthStatus, NewProject,
    OptimizedData, Pipeline, ProjectPatch, ProjectRecord, ProjectStatus, ProjectType,
    ProviderRequest, ProviderResponse, SchemaData, StepKind, Table, TokenUsage, WorkflowData,
    WorkflowStep,
};

pub use traits::{PluginAdapter, ProjectStore, ProviderAdapter};
