// src/server.rs
use anyhow::{Context, Result};
use tracing::info;

use crate::application::FlashcardService;
use crate::infrastructure::{Config, SqliteFlashcardRepository};
use crate::ports;

/// Open storage, wire the service into the router and serve until Ctrl+C or SIGTERM
pub async fn serve(config: Config) -> Result<()> {
    let addr = config.server.socket_addr()?;

    let repository = SqliteFlashcardRepository::open(&config.database.path)?;
    let service = FlashcardService::new(repository);
    let router = ports::router(service, &config.server);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!(%addr, database = ?config.database.path, "Flashcard service listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down gracefully"),
        () = terminate => info!("Received SIGTERM, shutting down gracefully"),
    }
}
