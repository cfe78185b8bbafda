// SPDX-FileCopyrightText: 2026 FlowForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The three generation contracts.

use serde::Serialize;
use strum::{Display, EnumIter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Contract {
    /// Idea to app concept.
    Concept,
    /// Concept to workflow pipelines.
    Workflow,
    /// Concept and workflow to database schema.
    Schema,
}

impl Contract {
    /// User-facing message when the contract fails.
    pub fn failure_message(self) -> &'static str {
        match self {
            Contract::Concept => "Failed to optimize idea",
            Contract::Workflow => "Failed to generate workflow",
            Contract::Schema => "Failed to generate schema",
        }
    }
}
