use std::fmt;

use tokio::signal;
use tracing::{error, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    Interrupt,
    Terminate,
}

impl fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShutdownReason::Interrupt => write!(f, "Ctrl+C"),
            ShutdownReason::Terminate => write!(f, "SIGTERM"),
        }
    }
}

/// Resolves once the process is asked to stop. A signal handler that cannot
/// be installed never fires, so the other one still can.
pub async fn shutdown_signal() -> ShutdownReason {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let reason = tokio::select! {
        _ = ctrl_c => ShutdownReason::Interrupt,
        _ = terminate => ShutdownReason::Terminate,
    };

    warn!("🛑 {} received, initiating shutdown...", reason);
    reason
}
