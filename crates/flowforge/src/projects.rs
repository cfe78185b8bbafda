// SPDX-FileCopyrightText: 2026 FlowForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `flowforge projects` subcommands.

use colored::Colorize;
use flowforge_config::FlowforgeConfig;
use flowforge_core::{FlowforgeError, ProjectRecord, ProjectStatus, ProjectStore};

use crate::runtime;

pub async fn run_list(config: FlowforgeConfig) -> Result<(), FlowforgeError> {
    let store = runtime::open_store(&config).await?;
    let projects = store.list().await?;

    if projects.is_empty() {
        println!("{}", "no saved projects".dimmed());
        return Ok(());
    }
    for project in &projects {
        println!("{}", list_line(project));
    }
    Ok(())
}

pub async fn run_show(config: FlowforgeConfig, id: &str) -> Result<(), FlowforgeError> {
    let store = runtime::open_store(&config).await?;
    let project = store
        .get(id)
        .await?
        .ok_or_else(|| FlowforgeError::not_found("project", id))?;

    let json = serde_json::to_string_pretty(&project)
        .map_err(|e| FlowforgeError::Internal(format!("failed to encode project: {e}")))?;
    println!("{json}");
    Ok(())
}

pub async fn run_delete(config: FlowforgeConfig, id: &str) -> Result<(), FlowforgeError> {
    let store = runtime::open_store(&config).await?;
    store.delete(id).await?;
    println!("deleted {}", id.bold());
    Ok(())
}

/// One row of `projects list`: id, status, type, name, last update.
fn list_line(project: &ProjectRecord) -> String {
    let status = match project.status {
        ProjectStatus::Completed => project.status.to_string().green(),
        ProjectStatus::Draft => project.status.to_string().yellow(),
    };
    format!(
        "{}  {:<9}  {:<8}  {}  {}",
        project.id.dimmed(),
        status,
        project.project_type.to_string(),
        project.name.bold(),
        project.updated_at.dimmed()
    )
}
