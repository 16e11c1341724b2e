use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::task::JoinSet;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use oak_common::ServerConfig;
use oak_server::conn;
use oak_store::StoreRegistry;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "oak_server=info,oak_store=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::default();
    let registry = Arc::new(StoreRegistry::new());

    let listener = match TcpListener::bind(config.bind_addr()).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("failed to bind to {}: {e}", config.bind_addr());
            std::process::exit(1);
        }
    };
    tracing::info!("listening on {}", config.bind_addr());
    tracing::info!("supports SET, GET and DEL commands");

    let mut connections = JoinSet::new();
    loop {
        tokio::select! {
            accepted = listener.accept() => {
                match accepted {
                    Ok((socket, addr)) => {
                        tracing::debug!("accepted connection from {addr}");
                        let registry = Arc::clone(&registry);
                        let store_path = config.store_path.clone();
                        connections.spawn(conn::handle_connection(socket, registry, store_path));
                    }
                    Err(e) => {
                        tracing::warn!("error accepting connection: {e}");
                    }
                }
            }
            _ = shutdown_signal() => {
                tracing::info!("shutdown signal received, closing listener");
                break;
            }
        }
    }

    // Stop accepting, then let in-flight handlers run to completion.
    drop(listener);
    while connections.join_next().await.is_some() {}
    tracing::info!("all connections handled, exiting");
}

/// Completes on SIGINT, or on SIGTERM where available.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = term.recv() => {}
                }
            }
            Err(e) => {
                tracing::warn!("failed to install SIGTERM handler: {e}");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
