use std::net::SocketAddr;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use livepost_server::{create_router, AppState, Args, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging
    let log_filter = args.log_level.clone();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "livepost_server={0},livepost_core={0},tower_http=info",
                    log_filter
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config: ServerConfig = args.into();
    config.validate()?;

    let state = AppState::new(config.clone());
    tracing::info!(
        posts = state.store.len(),
        subscriber_buffer = config.subscriber_buffer,
        client_dir = %config.client_dir.display(),
        "state initialized"
    );

    let app = create_router(state);

    let listener = TcpListener::bind(config.listen_addr()).await?;

    tracing::info!("Server ready at {}", config.http_url());
    tracing::info!("Subscriptions ready at {}", config.ws_url());

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("server shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl+c");
        std::future::pending::<()>().await;
    }
    tracing::info!("received shutdown signal");
}
