// SPDX-FileCopyrightText: 2026 FlowForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `flowforge wizard` command implementation.
//!
//! Walks the eight wizard steps in a terminal with a colored prompt and
//! readline history. The project is saved as a draft after every completed
//! step from the idea onward, and marked completed on export.

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use colored::Colorize;
use flowforge_config::FlowforgeConfig;
use flowforge_core::{
    DatabaseType, DevEnvironment, FlowforgeError, PluginAdapter, ProjectStore, ProjectType,
};
use flowforge_schema::{ColumnField, Constraint, Toggle};
use flowforge_wizard::catalog::{
    database_info, dev_environment_info, project_type_info, recommended_database,
};
use flowforge_wizard::{WizardSession, WizardStep};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use strum::IntoEnumIterator;
use tracing::{debug, warn};

use crate::runtime;

/// One parsed line of wizard input.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Quit,
    Help,
    Back,
    Jump(u8),
    Save,
    Regenerate,
    Show,
    /// Empty line or `y` on a review step.
    Accept,
    ProjectType(ProjectType),
    Idea(String),
    Database(DatabaseType),
    Edit(SchemaEdit),
    DevEnvironment(DevEnvironment),
    /// Target directory; `None` uses the default.
    Export(Option<PathBuf>),
}

/// Schema step edit. Indices are zero-based.
#[derive(Debug, Clone, PartialEq, Eq)]
enum SchemaEdit {
    AddTable(String),
    DropTable(usize),
    RenameTable(usize, String),
    AddColumn(usize),
    DropColumn(usize, usize),
    RenameColumn(usize, usize, String),
    SetType(usize, usize, String),
    Toggle(usize, usize, Constraint),
}

enum Outcome {
    Continue,
    Finished,
}

/// Runs the `flowforge wizard` interactive session.
pub async fn run_wizard(
    config: FlowforgeConfig,
    resume: Option<String>,
) -> Result<(), FlowforgeError> {
    let store = runtime::open_store(&config).await?;
    let generator = runtime::build_generator(&config)?;
    let project_store: Arc<dyn ProjectStore> = store.clone();

    let mut session = match resume {
        Some(id) => WizardSession::resume(generator, project_store, &id).await?,
        None => WizardSession::new(generator).with_store(project_store),
    };

    let mut rl = DefaultEditor::new()
        .map_err(|e| FlowforgeError::Internal(format!("failed to initialize readline: {e}")))?;

    println!("{}", "flowforge wizard".bold().green());
    println!("Type {} for commands, {} to exit.\n", "/help".yellow(), "/quit".yellow());
    render_step(&session);

    loop {
        let step = session.current_step();
        let prompt = format!(
            "{}> ",
            format!("[{}/8 {}]", step.number(), step.label()).green()
        );

        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if !trimmed.is_empty() {
                    let _ = rl.add_history_entry(&line);
                }

                let input = match parse_input(step, trimmed) {
                    Ok(Input::Quit) => break,
                    Ok(input) => input,
                    Err(hint) => {
                        eprintln!("{}", hint.yellow());
                        continue;
                    }
                };

                match apply(&mut session, input).await {
                    Ok(Outcome::Finished) => break,
                    Ok(Outcome::Continue) => {}
                    Err(e) => eprintln!("{}: {e}", "error".red()),
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C
                break;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D
                break;
            }
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        }
    }

    if let Some(id) = session.project_id() {
        println!("{}", format!("project saved as {id}").dimmed());
        println!(
            "{}",
            format!("resume with: flowforge wizard --resume {id}").dimmed()
        );
    }
    store.shutdown().await?;

    println!("{}", "goodbye".dimmed());
    Ok(())
}

/// Parses one line for the given step. `Err` carries a hint for the user.
fn parse_input(step: WizardStep, line: &str) -> Result<Input, String> {
    if let Some(command) = line.strip_prefix('/') {
        let mut parts = command.split_whitespace();
        return match (parts.next(), parts.next()) {
            (Some("quit" | "exit"), None) => Ok(Input::Quit),
            (Some("help"), None) => Ok(Input::Help),
            (Some("back"), None) => Ok(Input::Back),
            (Some("save"), None) => Ok(Input::Save),
            (Some("regen"), None) => Ok(Input::Regenerate),
            (Some("show"), None) => Ok(Input::Show),
            (Some("step"), Some(n)) => n
                .parse()
                .map(Input::Jump)
                .map_err(|_| format!("not a step number: {n}")),
            _ => Err(format!("unknown command: /{command} (try /help)")),
        };
    }

    match step {
        WizardStep::Type => choose(line, "project type").map(Input::ProjectType),
        WizardStep::Idea if line.is_empty() => Err("describe your app idea".into()),
        WizardStep::Idea => Ok(Input::Idea(line.to_string())),
        WizardStep::Refine | WizardStep::Workflow => accept(line),
        // Empty picks the recommended database.
        WizardStep::Database if line.is_empty() => Ok(Input::Accept),
        WizardStep::Database => choose(line, "database").map(Input::Database),
        WizardStep::Schema if is_accept(line) => Ok(Input::Accept),
        WizardStep::Schema => parse_edit(line).map(Input::Edit),
        WizardStep::DevSetup => choose(line, "dev environment").map(Input::DevEnvironment),
        WizardStep::Export if line.is_empty() => Ok(Input::Export(None)),
        WizardStep::Export => Ok(Input::Export(Some(PathBuf::from(line)))),
    }
}

fn is_accept(line: &str) -> bool {
    line.is_empty() || line.eq_ignore_ascii_case("y") || line.eq_ignore_ascii_case("yes")
}

fn accept(line: &str) -> Result<Input, String> {
    if is_accept(line) {
        Ok(Input::Accept)
    } else {
        Err("press Enter to continue, /regen to regenerate, or /back".into())
    }
}

/// A menu choice by 1-based number or by name.
fn choose<T>(line: &str, what: &str) -> Result<T, String>
where
    T: IntoEnumIterator + FromStr,
{
    if let Ok(n) = line.parse::<usize>() {
        return n
            .checked_sub(1)
            .and_then(|i| T::iter().nth(i))
            .ok_or_else(|| format!("no {what} numbered {n}"));
    }
    T::from_str(line).map_err(|_| format!("unknown {what}: {line:?}"))
}

fn parse_edit(line: &str) -> Result<SchemaEdit, String> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let index = |i: usize| -> Result<usize, String> {
        let raw = parts.get(i).ok_or("missing index")?;
        raw.parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .ok_or_else(|| format!("not a 1-based index: {raw}"))
    };
    let rest = |from: usize| -> Result<String, String> {
        match parts.get(from..) {
            Some(words) if !words.is_empty() => Ok(words.join(" ")),
            _ => Err("missing value".to_string()),
        }
    };

    match parts.first().copied() {
        Some("add-table") => Ok(SchemaEdit::AddTable(rest(1)?)),
        Some("drop-table") => Ok(SchemaEdit::DropTable(index(1)?)),
        Some("rename-table") => Ok(SchemaEdit::RenameTable(index(1)?, rest(2)?)),
        Some("add-column") => Ok(SchemaEdit::AddColumn(index(1)?)),
        Some("drop-column") => Ok(SchemaEdit::DropColumn(index(1)?, index(2)?)),
        Some("rename") => Ok(SchemaEdit::RenameColumn(index(1)?, index(2)?, rest(3)?)),
        Some("type") => Ok(SchemaEdit::SetType(index(1)?, index(2)?, rest(3)?)),
        Some("toggle") => {
            let constraint = rest(3)?;
            let constraint = Constraint::from_str(&constraint)
                .map_err(|_| format!("unknown constraint: {constraint}"))?;
            Ok(SchemaEdit::Toggle(index(1)?, index(2)?, constraint))
        }
        _ => Err("unknown edit (try /help)".into()),
    }
}

async fn apply(session: &mut WizardSession, input: Input) -> Result<Outcome, FlowforgeError> {
    let step = session.current_step();
    match input {
        Input::Quit => return Ok(Outcome::Finished),
        Input::Help => {
            print_help();
            return Ok(Outcome::Continue);
        }
        Input::Show => {}
        Input::Back => {
            if !session.go_back() {
                println!("{}", "already at the first step".dimmed());
            }
        }
        Input::Jump(n) => match WizardStep::from_number(n) {
            Some(target) if session.go_to_step(target) => {}
            _ => println!("{}", "only earlier steps can be revisited".dimmed()),
        },
        Input::Save => {
            let record = session.save().await?;
            println!("saved {} ({})", record.name.bold(), record.status);
            return Ok(Outcome::Continue);
        }
        Input::Regenerate => {
            generating(step);
            match step {
                WizardStep::Refine => session.regenerate_concept().await?,
                WizardStep::Workflow => session.regenerate_workflow().await?,
                WizardStep::Schema => session.regenerate_schema().await?,
                _ => println!("{}", "nothing to regenerate at this step".dimmed()),
            }
        }
        Input::ProjectType(project_type) => session.choose_project_type(project_type)?,
        Input::Idea(idea) => {
            generating(WizardStep::Refine);
            session.submit_idea(&idea).await?;
            autosave(session).await;
        }
        Input::Accept => {
            match step {
                WizardStep::Refine => {
                    generating(WizardStep::Workflow);
                    session.confirm_concept().await?;
                }
                WizardStep::Workflow => session.confirm_workflow()?,
                WizardStep::Database => {
                    let project_type = session.state().project_type.unwrap_or_default();
                    choose_database(session, recommended_database(project_type)).await?;
                }
                WizardStep::Schema => session.confirm_schema()?,
                _ => return Ok(Outcome::Continue),
            }
            autosave(session).await;
        }
        Input::Database(database) => {
            choose_database(session, database).await?;
            autosave(session).await;
        }
        Input::Edit(edit) => apply_edit(session, edit)?,
        Input::DevEnvironment(environment) => {
            session.choose_dev_environment(environment)?;
            autosave(session).await;
        }
        Input::Export(dir) => {
            let bundle = session.export()?;
            let dir = dir.unwrap_or_else(|| default_export_dir(&bundle.app_name));
            for path in bundle.write_to_dir(&dir)? {
                println!("wrote {}", path.display().to_string().bold());
            }
            println!("\nGet started: {}", bundle.setup_command.cyan());
            session.save().await?;
            return Ok(Outcome::Finished);
        }
    }

    render_step(session);
    Ok(Outcome::Continue)
}

async fn choose_database(
    session: &mut WizardSession,
    database: DatabaseType,
) -> Result<(), FlowforgeError> {
    generating(WizardStep::Schema);
    session.choose_database(database).await
}

fn apply_edit(session: &mut WizardSession, edit: SchemaEdit) -> Result<(), FlowforgeError> {
    let mut editor = session.schema_editor()?;
    match edit {
        SchemaEdit::AddTable(name) => {
            editor.add_table(name);
        }
        SchemaEdit::DropTable(t) => {
            editor.remove_table(t)?;
        }
        SchemaEdit::RenameTable(t, name) => editor.rename_table(t, name)?,
        SchemaEdit::AddColumn(t) => {
            editor.add_column(t)?;
        }
        SchemaEdit::DropColumn(t, c) => {
            editor.remove_column(t, c)?;
        }
        SchemaEdit::RenameColumn(t, c, name) => {
            editor.set_column_field(t, c, ColumnField::Name(name))?
        }
        SchemaEdit::SetType(t, c, data_type) => {
            editor.set_column_field(t, c, ColumnField::Type(data_type))?
        }
        SchemaEdit::Toggle(t, c, constraint) => {
            let outcome = editor.toggle_constraint(t, c, constraint)?;
            debug!(?outcome, %constraint, "constraint toggled");
            if let Toggle::Removed(n) = outcome {
                println!("{}", format!("removed {n} {constraint} constraint(s)").dimmed());
            }
        }
    }
    Ok(())
}

/// Saves a draft once there is an idea to save. Failures are reported but
/// do not stop the wizard.
async fn autosave(session: &mut WizardSession) {
    if session.state().original_idea.is_empty() {
        return;
    }
    if let Err(e) = session.save().await {
        warn!(error = %e, "autosave failed");
        eprintln!("{}", format!("warning: could not save project: {e}").yellow());
    }
}

/// `./<app-name>` lowercased with runs of other characters turned into `-`.
fn default_export_dir(app_name: &str) -> PathBuf {
    let mut slug = String::with_capacity(app_name.len());
    for ch in app_name.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    PathBuf::from(if slug.is_empty() { "flowforge-export" } else { slug })
}

fn generating(step: WizardStep) {
    let what = match step {
        WizardStep::Refine => "concept",
        WizardStep::Workflow => "workflow",
        WizardStep::Schema => "schema",
        _ => return,
    };
    println!("{}", format!("generating {what}...").dimmed());
}

fn print_help() {
    println!("{}", "commands".bold());
    println!("  /back            previous step");
    println!("  /step <n>        jump back to step n");
    println!("  /regen           regenerate this step's output");
    println!("  /show            show the current step again");
    println!("  /save            save the project");
    println!("  /quit            exit");
    println!("{}", "schema edits (1-based indices)".bold());
    println!("  add-table <name>         drop-table <t>         rename-table <t> <name>");
    println!("  add-column <t>           drop-column <t> <c>");
    println!("  rename <t> <c> <name>    type <t> <c> <type>    toggle <t> <c> <constraint>");
    println!(
        "  constraints: {}",
        Constraint::iter()
            .map(|c| c.token())
            .collect::<Vec<_>>()
            .join(", ")
    );
}

fn render_step(session: &WizardSession) {
    let step = session.current_step();
    let state = session.state();

    println!(
        "\n{} {}",
        format!("Step {}:", step.number()).bold().cyan(),
        step.description().bold()
    );

    if let Some(error) = &state.error {
        println!("{}", error.red());
    }
    for warning in session.warnings() {
        println!("{}", format!("note: {warning}").yellow());
    }

    match step {
        WizardStep::Type => {
            for (i, project_type) in ProjectType::iter().enumerate() {
                let info = project_type_info(project_type);
                println!("  {}. {} - {}", i + 1, info.title.bold(), info.description);
                println!("     {}", info.highlights.join(", ").dimmed());
            }
        }
        WizardStep::Idea => {
            if !state.original_idea.is_empty() {
                println!("current idea: {}", state.original_idea.italic());
            }
            println!("{}", "Describe the app you want to build.".dimmed());
        }
        WizardStep::Refine => {
            if let Some(concept) = &state.optimized_data {
                println!("  {}", concept.app_name.bold().green());
                println!("  {}", concept.tagline.italic());
                println!("  {}", concept.description);
                for (i, feature) in concept.features.iter().enumerate() {
                    println!("    {}. {feature}", i + 1);
                }
            }
            println!("{}", "Enter to accept and design the workflow, /regen to retry.".dimmed());
        }
        WizardStep::Workflow => {
            for pipeline in state.workflow_data.iter().flat_map(|w| &w.pipelines) {
                println!("  {}", pipeline.name.bold());
                for step in &pipeline.steps {
                    println!(
                        "    [{}] {} {}",
                        step.kind,
                        step.name,
                        step.description.dimmed()
                    );
                }
                for connection in &pipeline.connections {
                    let label = connection
                        .label
                        .as_deref()
                        .map(|l| format!(" ({l})"))
                        .unwrap_or_default();
                    println!("    {} -> {}{}", connection.from, connection.to, label.dimmed());
                }
            }
            println!("{}", "Enter to continue, /regen to retry.".dimmed());
        }
        WizardStep::Database => {
            let recommended = recommended_database(state.project_type.unwrap_or_default());
            for (i, database) in DatabaseType::iter().enumerate() {
                let info = database_info(database);
                let tag = if database == recommended {
                    " (recommended)".green().to_string()
                } else {
                    String::new()
                };
                println!("  {}. {}{} - {}", i + 1, info.title.bold(), tag, info.description);
            }
            println!("{}", "Enter picks the recommended database.".dimmed());
        }
        WizardStep::Schema => {
            if let Some(schema) = &state.schema_data {
                for (t, table) in schema.tables.iter().enumerate() {
                    println!("  {}. {}", t + 1, table.name.bold());
                    for (c, column) in table.columns.iter().enumerate() {
                        println!(
                            "     {}. {} {} {}",
                            c + 1,
                            column.name,
                            column.data_type.cyan(),
                            column.constraints.join(" ").dimmed()
                        );
                    }
                }
            }
            if let Some(sql) = session.sql() {
                println!("\n{}", sql.dimmed());
            }
            println!("{}", "Edit the schema (see /help), Enter to accept.".dimmed());
        }
        WizardStep::DevSetup => {
            for (i, environment) in DevEnvironment::iter().enumerate() {
                let info = dev_environment_info(environment);
                println!("  {}. {} - {}", i + 1, info.title.bold(), info.description);
            }
        }
        WizardStep::Export => {
            if let Some(concept) = &state.optimized_data {
                println!(
                    "Ready to export {}. Enter a directory (default ./{}).",
                    concept.app_name.bold(),
                    default_export_dir(&concept.app_name).display()
                );
            }
        }
    }
}
