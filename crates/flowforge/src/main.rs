// SPDX-FileCopyrightText: 2026 FlowForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! FlowForge - turn an app idea into a concept, workflow, and database schema.
//!
//! This is the binary entry point.

mod projects;
mod runtime;
mod serve;
mod shell;
mod sql;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use flowforge_core::DatabaseType;

/// FlowForge - turn an app idea into a concept, workflow, and database schema.
#[derive(Parser, Debug)]
#[command(name = "flowforge", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP gateway.
    Serve,
    /// Run the interactive project wizard.
    Wizard {
        /// Continue a saved project.
        #[arg(long)]
        resume: Option<String>,
    },
    /// Inspect saved projects.
    Projects {
        #[command(subcommand)]
        action: ProjectsAction,
    },
    /// Print the DDL of a saved project's schema.
    Sql {
        project_id: String,
        /// Render for this dialect instead of the saved one.
        #[arg(long)]
        dialect: Option<DatabaseType>,
    },
}

#[derive(Subcommand, Debug)]
enum ProjectsAction {
    /// List the most recently updated projects.
    List,
    /// Print a project as JSON.
    Show { id: String },
    /// Delete a project.
    Delete { id: String },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => flowforge_config::load_and_validate_path(path),
        None => flowforge_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            flowforge_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.app.log_level);

    let result = match cli.command {
        Some(Commands::Serve) => serve::run_serve(config).await,
        Some(Commands::Wizard { resume }) => shell::run_wizard(config, resume).await,
        Some(Commands::Projects { action }) => match action {
            ProjectsAction::List => projects::run_list(config).await,
            ProjectsAction::Show { id } => projects::run_show(config, &id).await,
            ProjectsAction::Delete { id } => projects::run_delete(config, &id).await,
        },
        Some(Commands::Sql {
            project_id,
            dialect,
        }) => sql::run_sql(config, &project_id, dialect).await,
        None => {
            println!("flowforge: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {e}", "error".red());
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber with the given log level.
///
/// Logs go to stderr so command output on stdout stays machine-readable.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("flowforge={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn sql_dialect_parses_case_insensitively() {
        let cli = Cli::parse_from(["flowforge", "sql", "p1", "--dialect", "MySQL"]);
        match cli.command {
            Some(Commands::Sql {
                project_id,
                dialect,
            }) => {
                assert_eq!(project_id, "p1");
                assert_eq!(dialect, Some(DatabaseType::Mysql));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn wizard_resume_flag() {
        let cli = Cli::parse_from(["flowforge", "wizard", "--resume", "abc"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Wizard { resume: Some(ref id) }) if id == "abc"
        ));
    }

    #[test]
    fn binary_loads_config_defaults() {
        let config = flowforge_config::load_and_validate_str("")
            .expect("default config should be valid");
        assert_eq!(config.app.name, "flowforge");
    }
}
