// SPDX-FileCopyrightText: 2026 FlowForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The eight-step wizard state machine.
//!
//! Steps move one at a time, forward or back, and never leave `1..=8`.
//! Backward jumps to any earlier step are allowed; forward jumps are not.
//! No transition fails: a declined transition leaves the state untouched.

use flowforge_core::{
    DatabaseType, DevEnvironment, OptimizedData, ProjectType, SchemaData, WorkflowData,
};
use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

/// One of the eight wizard steps, in order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum WizardStep {
    #[default]
    Type,
    Idea,
    Refine,
    Workflow,
    Database,
    Schema,
    DevSetup,
    Export,
}

impl WizardStep {
    pub const FIRST: WizardStep = WizardStep::Type;
    pub const LAST: WizardStep = WizardStep::Export;

    /// 1-based position.
    pub fn number(self) -> u8 {
        self as u8 + 1
    }

    pub fn from_number(number: u8) -> Option<Self> {
        Self::iter().find(|s| s.number() == number)
    }

    pub fn label(self) -> &'static str {
        match self {
            WizardStep::Type => "Type",
            WizardStep::Idea => "Idea",
            WizardStep::Refine => "Refine",
            WizardStep::Workflow => "Workflow",
            WizardStep::Database => "Database",
            WizardStep::Schema => "Schema",
            WizardStep::DevSetup => "Dev Setup",
            WizardStep::Export => "Export",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            WizardStep::Type => "Choose project type",
            WizardStep::Idea => "Describe your app idea",
            WizardStep::Refine => "Review AI optimization",
            WizardStep::Workflow => "View workflow diagram",
            WizardStep::Database => "Select database type",
            WizardStep::Schema => "Edit database schema",
            WizardStep::DevSetup => "Choose dev environment",
            WizardStep::Export => "Download your project",
        }
    }

    pub fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    pub fn previous(self) -> Option<Self> {
        self.number().checked_sub(1).and_then(Self::from_number)
    }
}

/// Everything the wizard knows about the project being built.
///
/// Unset fields are `None`; the idea uses the empty string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardState {
    current_step: WizardStep,
    pub project_type: Option<ProjectType>,
    pub original_idea: String,
    pub optimized_data: Option<OptimizedData>,
    pub workflow_data: Option<WorkflowData>,
    pub database_type: Option<DatabaseType>,
    pub schema_data: Option<SchemaData>,
    pub dev_environment: Option<DevEnvironment>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl WizardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_step(&self) -> WizardStep {
        self.current_step
    }

    /// Jumps back to an earlier step. Returns whether the jump was taken.
    pub fn go_to_step(&mut self, step: WizardStep) -> bool {
        if step < self.current_step {
            self.current_step = step;
            true
        } else {
            false
        }
    }

    /// [`go_to_step`](Self::go_to_step) by number; numbers outside `1..=8`
    /// are declined.
    pub fn go_to_number(&mut self, number: u8) -> bool {
        WizardStep::from_number(number).is_some_and(|step| self.go_to_step(step))
    }

    /// Moves forward one step; a no-op on the last step.
    pub fn advance(&mut self) -> bool {
        match self.current_step.next() {
            Some(next) => {
                self.current_step = next;
                true
            }
            None => false,
        }
    }

    /// Moves back one step; a no-op on the first step.
    pub fn retreat(&mut self) -> bool {
        match self.current_step.previous() {
            Some(previous) => {
                self.current_step = previous;
                true
            }
            None => false,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn set_project_type(&mut self, project_type: ProjectType) {
        self.project_type = Some(project_type);
    }

    pub fn set_original_idea(&mut self, idea: impl Into<String>) {
        self.original_idea = idea.into();
    }

    pub fn set_optimized_data(&mut self, data: OptimizedData) {
        self.optimized_data = Some(data);
    }

    pub fn set_workflow_data(&mut self, data: WorkflowData) {
        self.workflow_data = Some(data);
    }

    pub fn set_database_type(&mut self, database_type: DatabaseType) {
        self.database_type = Some(database_type);
    }

    pub fn set_schema_data(&mut self, data: SchemaData) {
        self.schema_data = Some(data);
    }

    pub fn set_dev_environment(&mut self, environment: DevEnvironment) {
        self.dev_environment = Some(environment);
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    /// Places the wizard at `step` regardless of direction. Used when
    /// rehydrating a saved project.
    pub(crate) fn restore_step(&mut self, step: WizardStep) {
        self.current_step = step;
    }
}
