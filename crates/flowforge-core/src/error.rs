// SPDX-FileCopyrightText: 2026 FlowForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the FlowForge wizard.

use thiserror::Error;

/// The primary error type shared by every FlowForge crate.
#[derive(Debug, Error)]
pub enum FlowforgeError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// LLM provider errors (API failure, bad credentials, unreadable response).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A generation contract could not produce its expected shape.
    #[error("{contract} generation failed: {message}")]
    Generation { contract: String, message: String },

    /// A request was missing required input or carried an invalid value.
    #[error("invalid input: {0}")]
    Validation(String),

    /// A keyed lookup found nothing.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// A write collided with an existing record.
    #[error("conflict: {0}")]
    Conflict(String),

    /// A positional edit addressed an element that does not exist.
    #[error("{collection} index {index} out of range (len {len})")]
    IndexOutOfRange {
        collection: String,
        index: usize,
        len: usize,
    },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl FlowforgeError {
    /// Wraps any error as a storage failure.
    pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Storage {
            source: Box::new(err),
        }
    }

    /// Builds a generation failure for the named contract.
    pub fn generation(contract: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Generation {
            contract: contract.into(),
            message: message.into(),
        }
    }

    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    pub fn out_of_range(collection: impl Into<String>, index: usize, len: usize) -> Self {
        Self::IndexOutOfRange {
            collection: collection.into(),
            index,
            len,
        }
    }
}
