//! Listener lifecycle: serve until shutdown, then drain with a deadline.

use std::{future::Future, io, time::Duration};

use anyhow::{Context, Result};
use axum::Router;
use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle, time};
use tracing::{error, info, warn};

/// How long in-flight requests may run after a shutdown signal.
pub const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Serve `router` on `listener` until `shutdown` resolves.
///
/// Once `shutdown` fires the listener stops accepting and in-flight requests
/// get `drain_timeout` to finish. Connections still open after that are
/// abandoned; this is logged and is not an error.
///
/// # Errors
///
/// Returns an error if the server stops on its own before a shutdown was
/// requested (e.g. the listener fails).
pub async fn run<F>(
    listener: TcpListener,
    router: Router,
    shutdown: F,
    drain_timeout: Duration,
) -> Result<()>
where
    F: Future<Output = ()> + Send,
{
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let server = tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                let _ = stop_rx.await;
            })
            .await
    });

    supervise(server, stop_tx, shutdown, drain_timeout).await
}

/// Wait for `shutdown` or for the server task to end, whichever is first.
/// After `shutdown`, tell the server to stop through `stop_tx` and give it
/// `drain_timeout` before aborting the task.
async fn supervise<F>(
    mut server: JoinHandle<io::Result<()>>,
    stop_tx: oneshot::Sender<()>,
    shutdown: F,
    drain_timeout: Duration,
) -> Result<()>
where
    F: Future<Output = ()> + Send,
{
    tokio::select! {
        res = &mut server => {
            res.context("server task panicked")?
                .context("server failed")?;
            anyhow::bail!("server stopped before shutdown was requested");
        }
        () = shutdown => {}
    }

    info!("shutting down the server");
    let _ = stop_tx.send(());

    match time::timeout(drain_timeout, &mut server).await {
        Ok(Ok(Ok(()))) => info!("server shut down successfully"),
        Ok(Ok(Err(e))) => error!(error = %e, "server failed while shutting down"),
        Ok(Err(e)) => error!(error = %e, "server task failed while shutting down"),
        Err(_) => {
            warn!(
                timeout_ms = drain_timeout.as_millis() as u64,
                "graceful shutdown timed out; abandoning in-flight requests"
            );
            server.abort();
        }
    }
    Ok(())
}

/// Resolve on SIGINT (Ctrl+C) or, on Unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!(signal = "SIGINT", "shutdown signal received"),
        () = terminate => info!(signal = "SIGTERM", "shutdown signal received"),
    }
}
