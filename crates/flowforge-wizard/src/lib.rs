// SPDX-FileCopyrightText: 2026 FlowForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The FlowForge wizard.
//!
//! [`WizardState`] is the eight-step state machine and the data collected
//! along the way. [`WizardSession`] performs each step's completing action,
//! calling the generation contracts and the project store as needed.
//! [`ExportBundle`] is what the final step hands to the user.

pub mod catalog;
pub mod export;
pub mod graph;
pub mod session;
pub mod state;

pub use export::ExportBundle;
pub use graph::{WorkflowGraph, layout};
pub use session::WizardSession;
pub use state::{WizardState, WizardStep};
