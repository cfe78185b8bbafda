// SPDX-FileCopyrightText: 2026 FlowForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for FlowForge.
//!
//! Exposes the three generation contracts, project persistence, and SQL
//! rendering as JSON endpoints for a browser client.

pub mod error;
pub mod handlers;
pub mod server;

pub use error::{ApiError, ApiResult, ErrorResponse};
pub use server::{GatewayState, ServerConfig, router, start_server};
