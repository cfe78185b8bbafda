// SPDX-FileCopyrightText: 2026 FlowForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Display metadata for the wizard's choice steps.

use flowforge_core::{DatabaseType, DevEnvironment, ProjectType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectTypeInfo {
    pub title: &'static str,
    pub description: &'static str,
    pub highlights: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatabaseInfo {
    pub title: &'static str,
    pub description: &'static str,
    pub highlights: &'static [&'static str],
    /// Project type this database is suggested for, if any.
    pub recommended_for: Option<ProjectType>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DevEnvironmentInfo {
    pub title: &'static str,
    pub description: &'static str,
    /// Shown on the export step as the way to get started.
    pub setup_command: &'static str,
}

pub fn project_type_info(project_type: ProjectType) -> ProjectTypeInfo {
    match project_type {
        ProjectType::Personal => ProjectTypeInfo {
            title: "Personal Tool",
            description: "Simple, fast, no overhead",
            highlights: &[
                "SQLite database",
                "No authentication",
                "Minimal dependencies",
                "Quick to build",
            ],
        },
        ProjectType::Public => ProjectTypeInfo {
            title: "Public App",
            description: "Production-ready, scalable",
            highlights: &[
                "PostgreSQL database",
                "User authentication",
                "Stripe payments",
                "Analytics ready",
            ],
        },
    }
}

pub fn database_info(database: DatabaseType) -> DatabaseInfo {
    match database {
        DatabaseType::Sqlite => DatabaseInfo {
            title: "SQLite",
            description: "Lightweight, file-based database",
            highlights: &[
                "Zero configuration",
                "Single file storage",
                "Perfect for local tools",
                "Fastest setup",
            ],
            recommended_for: Some(ProjectType::Personal),
        },
        DatabaseType::Postgresql => DatabaseInfo {
            title: "PostgreSQL",
            description: "Powerful, enterprise-grade database",
            highlights: &[
                "Advanced features",
                "Excellent for scaling",
                "Strong data integrity",
                "Best for production",
            ],
            recommended_for: Some(ProjectType::Public),
        },
        DatabaseType::Mysql => DatabaseInfo {
            title: "MySQL",
            description: "Popular, widely supported database",
            highlights: &[
                "Wide hosting support",
                "Good performance",
                "Large community",
                "Easy to deploy",
            ],
            recommended_for: None,
        },
    }
}

/// The database flagged as recommended for a project type.
pub fn recommended_database(project_type: ProjectType) -> DatabaseType {
    match project_type {
        ProjectType::Personal => DatabaseType::Sqlite,
        ProjectType::Public => DatabaseType::Postgresql,
    }
}

pub fn dev_environment_info(environment: DevEnvironment) -> DevEnvironmentInfo {
    match environment {
        DevEnvironment::Opencode => DevEnvironmentInfo {
            title: "Open Code",
            description: "Fast terminal AI coding",
            setup_command: "npm i -g opencode",
        },
        DevEnvironment::ClaudeTerminal => DevEnvironmentInfo {
            title: "Claude Code Terminal",
            description: "Official Anthropic CLI",
            setup_command: "npm i -g @anthropic-ai/claude-code",
        },
        DevEnvironment::ClaudeVscode => DevEnvironmentInfo {
            title: "Claude Code VS Code",
            description: "IDE integration",
            setup_command: "Install VS Code extension",
        },
        DevEnvironment::ClaudeDesktop => DevEnvironmentInfo {
            title: "Claude Desktop",
            description: "Desktop app with MCP",
            setup_command: "Download from anthropic.com",
        },
        DevEnvironment::GeminiAntigraphity => DevEnvironmentInfo {
            title: "Gemini Antigraphity",
            description: "Visual canvas for coding",
            setup_command: "Visit antigraphity.com",
        },
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn recommendation_matches_database_flags() {
        for project_type in ProjectType::iter() {
            let db = recommended_database(project_type);
            assert_eq!(database_info(db).recommended_for, Some(project_type));
        }
        assert_eq!(database_info(DatabaseType::Mysql).recommended_for, None);
    }

    #[test]
    fn every_environment_has_a_setup_command() {
        for env in DevEnvironment::iter() {
            assert!(!dev_environment_info(env).setup_command.is_empty());
        }
        assert_eq!(
            dev_environment_info(DevEnvironment::ClaudeTerminal).setup_command,
            "npm i -g @anthropic-ai/claude-code"
        );
    }
}
