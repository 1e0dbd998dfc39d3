use clap::Parser;
use minmax::config::{Cli, Config};
use minmax::services::{AnalysisService, WindowAggregator};
use minmax::sources::McxClient;
use minmax::{build_router, AppState};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration, flags win over the environment
    let cli = Cli::parse();
    let config = Arc::new(Config::from_env().with_cli(&cli));

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting minmax server on {}", config.bind_addr());
    info!("Scanning hops {:?}", config.hops);

    let client = McxClient::new(
        config.upstream_url.clone(),
        config.upstream_referer.clone(),
        config.upstream_timeout,
    )?;
    let analysis = AnalysisService::new(
        Arc::new(client),
        WindowAggregator::new(config.hops.iter().copied()),
    );

    let state = AppState {
        config: config.clone(),
        analysis,
    };
    let app = build_router(state);

    // Start the server
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("minmax server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("minmax server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
