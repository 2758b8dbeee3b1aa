//! Handler for the `serve` command.

use std::sync::Arc;

use tokio::signal;
use tracing::{info, warn};

use crate::adapter::inbound::http::{router, serve, ReceiverState};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::factory::notifier::build_notifier;

/// Execute the serve command.
///
/// Runs the CloudEvent receiver until Ctrl-C or SIGTERM.
pub async fn execute(config: &Config) -> Result<()> {
    let notifier = Arc::new(build_notifier(config)?);
    let state = Arc::new(ReceiverState::new(
        notifier,
        config.notifier.source_collection.clone(),
    ));

    info!(
        region = %config.region,
        source_collection = %config.notifier.source_collection,
        dry_run = config.dry_run,
        "lowstock starting"
    );

    serve(config.server.addr(), router(state), shutdown_signal()).await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Ctrl+C handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, initiating shutdown"),
        () = terminate => info!("Received SIGTERM, initiating shutdown"),
    }
}
