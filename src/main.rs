use std::sync::Arc;

use clap::Parser;
use media_gateway::cli_arguments::CliArguments;
use media_gateway::http_client::reqwest_http_client::ReqwestHttpClient;
use media_gateway::{ServerState, router};
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: CliArguments = CliArguments::parse();

    let tcp_listener = tokio::net::TcpListener::bind(("0.0.0.0", args.port))
        .await
        .expect("Failed to bind TCP listener");

    match tcp_listener.local_addr() {
        Ok(address) => info!("Server listening on http://{address}"),
        Err(err) => error!("Failed to read local address: {err}"),
    }
    info!("Local system: http://localhost:{}", args.port);
    info!("Forwarding /api/fetch to {}", args.upstream_url);

    let state = ServerState::new(Arc::new(ReqwestHttpClient::default()), args.upstream_url);

    axum::serve(tcp_listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("HTTP server failed");

    info!("HTTP server closed");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for SIGINT: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!("Failed to listen for SIGTERM: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received: closing HTTP server");
}
