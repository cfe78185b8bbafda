// SPDX-FileCopyrightText: 2026 FlowForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for FlowForge integration tests.
//!
//! Provides a scripted provider, canned generation payloads, and a harness
//! with a throwaway SQLite project store, so tests run without network
//! access or shared state.
//!
//! # Components
//!
//! - [`MockProvider`] - Provider with scripted responses and request capture
//! - [`fixtures`] - The habit-tracker concept, workflow, and schema
//! - [`TestHarness`] - Mock provider plus temp project store

pub mod fixtures;
pub mod harness;
pub mod mock_provider;

pub use harness::TestHarness;
pub use mock_provider::MockProvider;
