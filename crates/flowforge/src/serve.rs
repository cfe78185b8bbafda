// SPDX-FileCopyrightText: 2026 FlowForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `flowforge serve` command implementation.
//!
//! Opens the project store, builds the generator, and runs the HTTP gateway
//! until SIGINT or SIGTERM.

use flowforge_config::FlowforgeConfig;
use flowforge_core::{FlowforgeError, PluginAdapter, ProjectStore};
use flowforge_gateway::{GatewayState, ServerConfig, start_server};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::runtime;

/// Runs the `flowforge serve` command.
pub async fn run_serve(config: FlowforgeConfig) -> Result<(), FlowforgeError> {
    info!("starting flowforge serve");

    let store = runtime::open_store(&config).await?;
    let generator = runtime::build_generator(&config)?;

    let state = GatewayState::new(generator, store.clone() as Arc<dyn ProjectStore>);
    let server_config = ServerConfig::from(&config.gateway);

    let cancel = install_signal_handler();
    let shutdown = {
        let cancel = cancel.clone();
        async move { cancel.cancelled().await }
    };

    let served = start_server(&server_config, state, shutdown).await;

    if let Err(e) = store.shutdown().await {
        warn!(error = %e, "project store shutdown failed");
    }
    served?;

    info!("flowforge serve shutdown complete");
    Ok(())
}

/// Installs signal handlers for SIGTERM and SIGINT.
///
/// Returns a [`CancellationToken`] that is cancelled when either signal is received.
fn install_signal_handler() -> CancellationToken {
    let token = CancellationToken::new();
    let token_clone = token.clone();

    tokio::spawn(async move {
        let ctrl_c = tokio::signal::ctrl_c();

        #[cfg(unix)]
        {
            use tokio::signal::unix::{SignalKind, signal};
            match signal(SignalKind::terminate()) {
                Ok(mut sigterm) => {
                    tokio::select! {
                        _ = ctrl_c => {
                            info!("received SIGINT (Ctrl+C), initiating shutdown");
                        }
                        _ = sigterm.recv() => {
                            info!("received SIGTERM, initiating shutdown");
                        }
                    }
                }
                Err(e) => {
                    warn!(error = %e, "failed to install SIGTERM handler, listening for Ctrl+C only");
                    let _ = ctrl_c.await;
                    info!("received Ctrl+C, initiating shutdown");
                }
            }
        }

        #[cfg(not(unix))]
        {
            let _ = ctrl_c.await;
            info!("received Ctrl+C, initiating shutdown");
        }

        token_clone.cancel();
        debug!("shutdown signal handler completed");
    });

    token
}
