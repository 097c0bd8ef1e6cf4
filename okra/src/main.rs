use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use okra::api::{create_router, AppState};
use okra::config::Config;
use okra::metrics::Metrics;
use okra::ocr::TesseractEngine;

#[derive(Parser)]
#[command(name = "okra")]
#[command(about = "HTTP gateway for Tesseract OCR")]
struct Args {
    /// Override the bind address (defaults to OKRA_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Override the bind port (defaults to OKRA_PORT)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "okra=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = Config::from_env();
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    tracing::info!("Initializing OCR engine: {}...", config.ocr.engine_path);
    let engine = TesseractEngine::new(&config.ocr);
    if let Err(e) = engine.probe().await {
        tracing::warn!("OCR engine unavailable - /ocr/ requests will fail until it is installed: {e}");
    }

    let metrics = Metrics::new();

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config, engine, metrics);
    let app = create_router(state);

    tracing::info!("Okra starting on http://{}", addr);
    tracing::info!("  Health check: http://{}/", addr);
    tracing::info!("  Metrics:      http://{}/metrics", addr);
    tracing::info!("  API docs:     http://{}/docs", addr);
    tracing::info!("  OpenAPI spec: http://{}/openapi.json", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, stopping...");
}
