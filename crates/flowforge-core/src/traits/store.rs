// SPDX-FileCopyrightText: 2026 FlowForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Project persistence contract consumed by the wizard and the gateway.

use async_trait::async_trait;

use crate::error::FlowforgeError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{NewProject, ProjectPatch, ProjectRecord};

/// Durable keyed store of saved projects.
///
/// Workflow, concept, and schema payloads are kept as opaque JSON; the store
/// never looks inside them.
#[async_trait]
pub trait ProjectStore: PluginAdapter {
    /// Most recently updated first, at most 20 records.
    async fn list(&self) -> Result<Vec<ProjectRecord>, FlowforgeError>;

    async fn get(&self, id: &str) -> Result<Option<ProjectRecord>, FlowforgeError>;

    /// Inserts a new project. Fails with [`FlowforgeError::Conflict`] if the
    /// id is taken.
    async fn create(&self, project: NewProject) -> Result<ProjectRecord, FlowforgeError>;

    /// Applies the provided fields and refreshes `updatedAt`. Fails with
    /// [`FlowforgeError::NotFound`] if the id is absent.
    async fn update(&self, id: &str, patch: ProjectPatch)
    -> Result<ProjectRecord, FlowforgeError>;

    /// Removes the project. Fails with [`FlowforgeError::NotFound`] if the id
    /// is absent.
    async fn delete(&self, id: &str) -> Result<(), FlowforgeError>;
}
