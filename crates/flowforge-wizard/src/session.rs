// SPDX-FileCopyrightText: 2026 FlowForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Drives one wizard session: each step's completing action, the
//! generation calls behind them, and saving to a project store.
//!
//! Completing actions only run at their own step. To redo an earlier step
//! the caller goes back first and re-submits, which overwrites that step's
//! data. A failed generation call leaves previously stored data in place
//! and records a message in [`WizardState::error`].

use std::sync::Arc;

use flowforge_core::{
    DatabaseType, DevEnvironment, FlowforgeError, NewProject, ProjectPatch, ProjectRecord,
    ProjectStatus, ProjectStore, ProjectType,
};
use flowforge_generation::{
    ConceptRequest, Contract, DataWarning, Generated, Generator, SchemaRequest, WorkflowRequest,
};
use flowforge_schema::SchemaEditor;
use flowforge_schema::sql::generate_sql;
use tracing::{debug, info, warn};

use crate::export::ExportBundle;
use crate::state::{WizardState, WizardStep};

/// Name given to a saved project when no concept has been generated yet.
pub const UNTITLED_PROJECT: &str = "Untitled Project";

pub struct WizardSession {
    state: WizardState,
    generator: Generator,
    store: Option<Arc<dyn ProjectStore>>,
    project_id: Option<String>,
    warnings: Vec<DataWarning>,
}

impl WizardSession {
    pub fn new(generator: Generator) -> Self {
        Self {
            state: WizardState::new(),
            generator,
            store: None,
            project_id: None,
            warnings: Vec::new(),
        }
    }

    pub fn with_store(mut self, store: Arc<dyn ProjectStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Rehydrates a saved project and positions the session at the furthest
    /// step its data supports.
    pub async fn resume(
        generator: Generator,
        store: Arc<dyn ProjectStore>,
        id: &str,
    ) -> Result<Self, FlowforgeError> {
        let record = store
            .get(id)
            .await?
            .ok_or_else(|| FlowforgeError::not_found("project", id))?;

        let mut state = WizardState::new();
        state.project_type = Some(record.project_type);
        state.original_idea = record.original_idea;
        state.optimized_data = record.optimized_data;
        state.workflow_data = record.workflow_data;
        state.database_type = record.database_type;
        state.schema_data = record.schema_data;
        state.dev_environment = record.dev_environment;
        let step = furthest_step(&state);
        state.restore_step(step);

        info!(id, step = step.number(), "session resumed");
        Ok(Self {
            state,
            generator,
            store: Some(store),
            project_id: Some(record.id),
            warnings: Vec::new(),
        })
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn current_step(&self) -> WizardStep {
        self.state.current_step()
    }

    /// Id of the saved project, once [`save`](Self::save) has run.
    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }

    /// Findings from the most recent generation call.
    pub fn warnings(&self) -> &[DataWarning] {
        &self.warnings
    }

    pub fn go_back(&mut self) -> bool {
        self.state.retreat()
    }

    pub fn go_to_step(&mut self, step: WizardStep) -> bool {
        self.state.go_to_step(step)
    }

    /// Starts over. The saved-project link is dropped too.
    pub fn reset(&mut self) {
        self.state.reset();
        self.project_id = None;
        self.warnings.clear();
    }

    // --- Completing actions ---

    pub fn choose_project_type(&mut self, project_type: ProjectType) -> Result<(), FlowforgeError> {
        self.expect_step(WizardStep::Type)?;
        self.state.set_project_type(project_type);
        self.state.advance();
        Ok(())
    }

    /// Stores the idea, generates the concept, and moves to review.
    pub async fn submit_idea(&mut self, idea: &str) -> Result<(), FlowforgeError> {
        self.expect_step(WizardStep::Idea)?;
        let idea = idea.trim();
        if idea.is_empty() {
            return Err(FlowforgeError::Validation("Idea is required".into()));
        }
        self.project_type()?;

        self.state.set_original_idea(idea);
        self.regenerate_concept().await?;
        self.state.advance();
        Ok(())
    }

    /// Accepts the concept, generates the workflow, and moves to the diagram.
    pub async fn confirm_concept(&mut self) -> Result<(), FlowforgeError> {
        self.expect_step(WizardStep::Refine)?;
        self.regenerate_workflow().await?;
        self.state.advance();
        Ok(())
    }

    pub fn confirm_workflow(&mut self) -> Result<(), FlowforgeError> {
        self.expect_step(WizardStep::Workflow)?;
        if self.state.workflow_data.is_none() {
            return Err(FlowforgeError::Validation("Workflow is required".into()));
        }
        self.state.advance();
        Ok(())
    }

    /// Picks the dialect, moves to the schema step, and generates the schema
    /// if none exists for it.
    ///
    /// Choosing a different dialect discards a schema generated for the old
    /// one. When generation fails the session still sits at the schema step
    /// and [`ensure_schema`](Self::ensure_schema) can retry.
    pub async fn choose_database(&mut self, database: DatabaseType) -> Result<(), FlowforgeError> {
        self.expect_step(WizardStep::Database)?;
        if self.state.database_type.is_some_and(|current| current != database) {
            debug!(%database, "dialect changed, discarding schema");
            self.state.schema_data = None;
        }
        self.state.set_database_type(database);
        self.state.advance();
        self.ensure_schema().await
    }

    /// Generates the schema when none is stored.
    pub async fn ensure_schema(&mut self) -> Result<(), FlowforgeError> {
        if self.state.schema_data.is_some() {
            return Ok(());
        }
        self.regenerate_schema().await
    }

    pub fn confirm_schema(&mut self) -> Result<(), FlowforgeError> {
        self.expect_step(WizardStep::Schema)?;
        if self.state.schema_data.is_none() {
            return Err(FlowforgeError::Validation("Schema is required".into()));
        }
        self.state.advance();
        Ok(())
    }

    pub fn choose_dev_environment(
        &mut self,
        environment: DevEnvironment,
    ) -> Result<(), FlowforgeError> {
        self.expect_step(WizardStep::DevSetup)?;
        self.state.set_dev_environment(environment);
        self.state.advance();
        Ok(())
    }

    pub fn export(&self) -> Result<ExportBundle, FlowforgeError> {
        ExportBundle::from_state(&self.state)
    }

    // --- Schema editing ---

    /// Editor over the stored schema.
    pub fn schema_editor(&mut self) -> Result<SchemaEditor<'_>, FlowforgeError> {
        self.state
            .schema_data
            .as_mut()
            .map(SchemaEditor::new)
            .ok_or_else(|| FlowforgeError::Validation("Schema is required".into()))
    }

    /// DDL for the current schema, when both schema and dialect are set.
    pub fn sql(&self) -> Option<String> {
        let schema = self.state.schema_data.as_ref()?;
        let dialect = self.state.database_type?;
        Some(generate_sql(&schema.tables, dialect))
    }

    // --- Generation ---

    pub async fn regenerate_concept(&mut self) -> Result<(), FlowforgeError> {
        let project_type = self.project_type()?;
        let request = ConceptRequest::new(self.state.original_idea.clone(), project_type);

        self.begin(Contract::Concept);
        let result = self.generator.generate_concept(&request).await;
        let concept = self.finish(Contract::Concept, result)?;
        self.state.set_optimized_data(concept);
        Ok(())
    }

    pub async fn regenerate_workflow(&mut self) -> Result<(), FlowforgeError> {
        let project_type = self.project_type()?;
        let concept = self
            .state
            .optimized_data
            .clone()
            .ok_or_else(|| FlowforgeError::Validation("Optimized data is required".into()))?;
        let request = WorkflowRequest::new(concept, project_type);

        self.begin(Contract::Workflow);
        let result = self.generator.generate_workflow(&request).await;
        let workflow = self.finish(Contract::Workflow, result)?;
        self.state.set_workflow_data(workflow);
        Ok(())
    }

    pub async fn regenerate_schema(&mut self) -> Result<(), FlowforgeError> {
        let request = SchemaRequest {
            optimized_data: self.state.optimized_data.clone(),
            workflow_data: self.state.workflow_data.clone(),
            project_type: self.state.project_type,
            database_type: self.state.database_type,
        };
        request.validate()?;

        self.begin(Contract::Schema);
        let result = self.generator.generate_schema(&request).await;
        let schema = self.finish(Contract::Schema, result)?;
        self.state.set_schema_data(schema);
        Ok(())
    }

    // --- Persistence ---

    /// Creates the project on first call and updates it afterwards.
    ///
    /// The status is `completed` once the session has reached the export
    /// step, `draft` before that.
    pub async fn save(&mut self) -> Result<ProjectRecord, FlowforgeError> {
        let store = self
            .store
            .clone()
            .ok_or_else(|| FlowforgeError::Config("no project store configured".into()))?;

        let status = if self.current_step() == WizardStep::Export {
            ProjectStatus::Completed
        } else {
            ProjectStatus::Draft
        };
        let name = self
            .state
            .optimized_data
            .as_ref()
            .map(|c| c.app_name.trim())
            .filter(|n| !n.is_empty())
            .unwrap_or(UNTITLED_PROJECT)
            .to_string();

        let record = match self.project_id.clone() {
            Some(id) => {
                let patch = ProjectPatch {
                    name: Some(name),
                    project_type: self.state.project_type,
                    status: Some(status),
                    original_idea: Some(self.state.original_idea.clone()),
                    // Payloads are always written so a discarded one is
                    // cleared rather than kept.
                    optimized_data: Some(self.state.optimized_data.clone()),
                    workflow_data: Some(self.state.workflow_data.clone()),
                    schema_data: Some(self.state.schema_data.clone()),
                    dev_environment: self.state.dev_environment,
                    database_type: self.state.database_type,
                };
                store.update(&id, patch).await?
            }
            None => {
                let project = NewProject {
                    id: uuid::Uuid::new_v4().to_string(),
                    name,
                    original_idea: self.state.original_idea.clone(),
                    project_type: self.state.project_type,
                    status: Some(status),
                    optimized_data: self.state.optimized_data.clone(),
                    workflow_data: self.state.workflow_data.clone(),
                    schema_data: self.state.schema_data.clone(),
                    dev_environment: self.state.dev_environment,
                    database_type: self.state.database_type,
                };
                let record = store.create(project).await?;
                self.project_id = Some(record.id.clone());
                record
            }
        };

        info!(id = %record.id, status = %record.status, "project saved");
        Ok(record)
    }

    // --- Internals ---

    fn expect_step(&self, step: WizardStep) -> Result<(), FlowforgeError> {
        let current = self.current_step();
        if current == step {
            Ok(())
        } else {
            Err(FlowforgeError::Validation(format!(
                "step {} ({}) is not active; the wizard is at step {} ({})",
                step.number(),
                step.label(),
                current.number(),
                current.label()
            )))
        }
    }

    fn project_type(&self) -> Result<ProjectType, FlowforgeError> {
        self.state
            .project_type
            .ok_or_else(|| FlowforgeError::Validation("Project type is required".into()))
    }

    fn begin(&mut self, contract: Contract) {
        debug!(%contract, "generation started");
        self.state.set_error(None);
        self.state.set_loading(true);
    }

    fn finish<T>(
        &mut self,
        contract: Contract,
        result: Result<Generated<T>, FlowforgeError>,
    ) -> Result<T, FlowforgeError> {
        self.state.set_loading(false);
        match result {
            Ok(generated) => {
                self.warnings = generated.warnings;
                Ok(generated.data)
            }
            Err(e) => {
                warn!(%contract, error = %e, "generation failed");
                self.state
                    .set_error(Some(format!("{}: {e}", contract.failure_message())));
                Err(e)
            }
        }
    }
}

/// The last step whose prerequisites are all present.
fn furthest_step(state: &WizardState) -> WizardStep {
    let reached = [
        (WizardStep::Idea, state.project_type.is_some()),
        (WizardStep::Refine, state.optimized_data.is_some()),
        (WizardStep::Workflow, state.workflow_data.is_some()),
        (WizardStep::Database, state.workflow_data.is_some()),
        (WizardStep::Schema, state.database_type.is_some()),
        (WizardStep::DevSetup, state.schema_data.is_some()),
        (WizardStep::Export, state.dev_environment.is_some()),
    ];
    reached
        .into_iter()
        .take_while(|(_, ok)| *ok)
        .last()
        .map(|(step, _)| step)
        .unwrap_or(WizardStep::Type)
}

#[cfg(test)]
mod tests {
    use flowforge_generation::GenerationSettings;
    use flowforge_schema::catalog::Constraint;
    use flowforge_test_utils::{MockProvider, TestHarness, fixtures};
    use tracing_test::traced_test;

    use super::*;

    fn session(provider: Arc<MockProvider>) -> WizardSession {
        WizardSession::new(Generator::new(provider, GenerationSettings::default()))
    }

    async fn at_refine(provider: Arc<MockProvider>) -> WizardSession {
        let mut s = session(provider);
        s.choose_project_type(ProjectType::Personal).unwrap();
        s.submit_idea(fixtures::HABIT_IDEA).await.unwrap();
        s
    }

    #[tokio::test]
    async fn submit_idea_requires_text() {
        let provider = Arc::new(MockProvider::new());
        let mut s = session(provider.clone());
        s.choose_project_type(ProjectType::Public).unwrap();

        let err = s.submit_idea("   ").await.unwrap_err();
        assert!(matches!(err, FlowforgeError::Validation(ref m) if m == "Idea is required"));
        assert_eq!(s.current_step(), WizardStep::Idea);
        assert!(provider.requests().await.is_empty());
    }

    #[tokio::test]
    async fn actions_are_bound_to_their_step() {
        let mut s = session(Arc::new(MockProvider::new()));
        assert!(s.submit_idea("idea").await.is_err());
        assert!(s.confirm_workflow().is_err());
        assert_eq!(s.current_step(), WizardStep::Type);
    }

    #[tokio::test]
    async fn submit_idea_generates_concept_and_advances() {
        let provider = Arc::new(MockProvider::with_responses(vec![fixtures::concept_json()]));
        let s = at_refine(provider).await;
        assert_eq!(s.current_step(), WizardStep::Refine);
        assert_eq!(s.state().original_idea, fixtures::HABIT_IDEA);
        assert_eq!(s.state().optimized_data, Some(fixtures::concept()));
        assert!(!s.state().is_loading);
        assert!(s.state().error.is_none());
    }

    #[tokio::test]
    #[traced_test]
    async fn failed_generation_keeps_previous_data() {
        let provider = Arc::new(MockProvider::with_responses(vec![fixtures::concept_json()]));
        let mut s = at_refine(provider.clone()).await;

        provider.fail_next("overloaded").await;
        let err = s.regenerate_concept().await.unwrap_err();
        assert!(matches!(err, FlowforgeError::Generation { .. }));
        assert_eq!(s.state().optimized_data, Some(fixtures::concept()));
        assert!(!s.state().is_loading);
        let message = s.state().error.clone().unwrap();
        assert!(message.starts_with("Failed to optimize idea"), "got: {message}");
        assert!(logs_contain("generation failed"));

        // Usable afterwards; the error clears on the next call.
        provider.add_response(fixtures::workflow_json()).await;
        s.confirm_concept().await.unwrap();
        assert!(s.state().error.is_none());
        assert_eq!(s.current_step(), WizardStep::Workflow);
    }

    #[tokio::test]
    async fn failed_concept_does_not_advance() {
        let provider = Arc::new(MockProvider::with_responses(vec!["not json".into()]));
        let mut s = session(provider);
        s.choose_project_type(ProjectType::Personal).unwrap();
        assert!(s.submit_idea("idea").await.is_err());
        assert_eq!(s.current_step(), WizardStep::Idea);
        assert!(s.state().optimized_data.is_none());
        assert_eq!(s.state().original_idea, "idea");
    }

    #[tokio::test]
    async fn choose_database_generates_schema_once() {
        let provider = Arc::new(MockProvider::with_responses(fixtures::habit_tracker_responses()));
        let mut s = at_refine(provider.clone()).await;
        s.confirm_concept().await.unwrap();
        s.confirm_workflow().unwrap();
        s.choose_database(DatabaseType::Sqlite).await.unwrap();

        assert_eq!(s.current_step(), WizardStep::Schema);
        assert_eq!(s.state().schema_data, Some(fixtures::schema()));
        s.ensure_schema().await.unwrap();
        assert_eq!(provider.requests().await.len(), 3);
    }

    #[tokio::test]
    async fn switching_dialect_discards_schema() {
        let provider = Arc::new(MockProvider::with_responses(fixtures::habit_tracker_responses()));
        let mut s = at_refine(provider.clone()).await;
        s.confirm_concept().await.unwrap();
        s.confirm_workflow().unwrap();
        s.choose_database(DatabaseType::Sqlite).await.unwrap();

        assert!(s.go_back());
        provider.add_response(fixtures::schema_json()).await;
        s.choose_database(DatabaseType::Mysql).await.unwrap();
        let sent = provider.requests().await;
        assert_eq!(sent.len(), 4);
        assert!(sent[3].system_prompt.as_deref().unwrap().ends_with("Use MYSQL syntax."));
    }

    #[tokio::test]
    async fn schema_editor_and_sql_preview() {
        let provider = Arc::new(MockProvider::with_responses(fixtures::habit_tracker_responses()));
        let mut s = at_refine(provider).await;
        s.confirm_concept().await.unwrap();
        s.confirm_workflow().unwrap();
        s.choose_database(DatabaseType::Sqlite).await.unwrap();

        {
            let mut editor = s.schema_editor().unwrap();
            let column = editor.add_column(0).unwrap();
            editor.toggle_constraint(0, column, Constraint::NotNull).unwrap();
        }
        let sql = s.sql().unwrap();
        assert!(sql.contains("  new_column TEXT NOT NULL\n);"), "got: {sql}");
    }

    #[tokio::test]
    async fn save_creates_then_updates() {
        let harness = TestHarness::builder()
            .with_mock_responses(fixtures::habit_tracker_responses())
            .build()
            .await
            .unwrap();
        let mut s = session(harness.provider.clone()).with_store(harness.store.clone());
        s.choose_project_type(ProjectType::Personal).unwrap();
        s.submit_idea(fixtures::HABIT_IDEA).await.unwrap();

        let first = s.save().await.unwrap();
        assert_eq!(first.status, ProjectStatus::Draft);
        assert_eq!(first.name, "StreakKeeper");
        assert!(uuid::Uuid::parse_str(&first.id).is_ok());

        s.confirm_concept().await.unwrap();
        let second = s.save().await.unwrap();
        assert_eq!(second.id, first.id);
        assert!(second.workflow_data.is_some());
        assert_eq!(harness.store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn failed_dialect_switch_does_not_restore_old_schema() {
        let harness = TestHarness::builder()
            .with_mock_responses(fixtures::habit_tracker_responses())
            .build()
            .await
            .unwrap();
        let mut s = session(harness.provider.clone()).with_store(harness.store.clone());
        s.choose_project_type(ProjectType::Personal).unwrap();
        s.submit_idea(fixtures::HABIT_IDEA).await.unwrap();
        s.confirm_concept().await.unwrap();
        s.confirm_workflow().unwrap();
        s.choose_database(DatabaseType::Sqlite).await.unwrap();
        let id = s.save().await.unwrap().id;

        assert!(s.go_back());
        harness.provider.fail_next("overloaded").await;
        assert!(s.choose_database(DatabaseType::Mysql).await.is_err());
        let saved = s.save().await.unwrap();
        assert_eq!(saved.database_type, Some(DatabaseType::Mysql));
        assert!(saved.schema_data.is_none());

        let generator = Generator::new(harness.provider.clone(), GenerationSettings::default());
        let resumed = WizardSession::resume(generator, harness.store.clone(), &id)
            .await
            .unwrap();
        assert_eq!(resumed.state().database_type, Some(DatabaseType::Mysql));
        assert!(resumed.state().schema_data.is_none());
        assert_eq!(resumed.current_step(), WizardStep::Schema);
    }

    #[tokio::test]
    async fn save_without_store_is_config_error() {
        let mut s = session(Arc::new(MockProvider::new()));
        assert!(matches!(s.save().await, Err(FlowforgeError::Config(_))));
    }

    #[tokio::test]
    async fn resume_positions_at_furthest_step() {
        let harness = TestHarness::new().await.unwrap();
        let mut project = NewProject::new("p1", "StreakKeeper", fixtures::HABIT_IDEA);
        project.optimized_data = Some(fixtures::concept());
        project.workflow_data = Some(fixtures::workflow());
        project.database_type = Some(DatabaseType::Sqlite);
        harness.store.create(project).await.unwrap();

        let generator = Generator::new(harness.provider.clone(), GenerationSettings::default());
        let s = WizardSession::resume(generator, harness.store.clone(), "p1")
            .await
            .unwrap();
        assert_eq!(s.current_step(), WizardStep::Schema);
        assert_eq!(s.project_id(), Some("p1"));
        assert_eq!(s.state().project_type, Some(ProjectType::Personal));
    }

    #[tokio::test]
    async fn resume_unknown_project_is_not_found() {
        let harness = TestHarness::new().await.unwrap();
        let generator = Generator::new(harness.provider.clone(), GenerationSettings::default());
        let result = WizardSession::resume(generator, harness.store.clone(), "ghost").await;
        assert!(matches!(result, Err(FlowforgeError::NotFound { .. })));
    }

    #[test]
    fn furthest_step_stops_at_first_gap() {
        let mut state = WizardState::new();
        assert_eq!(furthest_step(&state), WizardStep::Type);
        state.project_type = Some(ProjectType::Public);
        assert_eq!(furthest_step(&state), WizardStep::Idea);
        state.workflow_data = Some(fixtures::workflow());
        assert_eq!(furthest_step(&state), WizardStep::Idea);
        state.optimized_data = Some(fixtures::concept());
        assert_eq!(furthest_step(&state), WizardStep::Database);
    }
}
