// SPDX-FileCopyrightText: 2026 FlowForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider adapter trait for the text-generation collaborator.

use async_trait::async_trait;

use crate::error::FlowforgeError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{ProviderRequest, ProviderResponse};

/// A single-shot completion backend.
///
/// The generation contracts treat implementors as an opaque oracle: one
/// request in, one text response out, or an error.
#[async_trait]
pub trait ProviderAdapter: PluginAdapter {
    /// Sends a completion request and returns the full response.
    async fn complete(&self, request: ProviderRequest)
    -> Result<ProviderResponse, FlowforgeError>;
}
