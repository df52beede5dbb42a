//! feedback-server - Two-dashboard AI feedback service
//!
//! Users rate and review at `/user`; each submission gets an AI-written
//! reply, summary and recommended action, and is listed at `/admin`.

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use feedback_common::config::{load_toml_config, AppConfig, TomlConfig};
use feedback_server::cli::Args;
use feedback_server::generator::{GeminiClient, ResponseGenerator};
use feedback_server::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let toml = match &args.config {
        Some(path) => load_toml_config(path)?,
        None => TomlConfig::default(),
    };
    let config = AppConfig::resolve(args.overrides(), toml)?;

    // RUST_LOG wins over the configured level
    let level = &config.log_level;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("feedback_server={level},feedback_common={level},tower_http={level}").into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting feedback-server v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    if let Some(path) = &args.config {
        info!("Config file: {}", path.display());
    }

    let store = feedback_common::open_store(&config.storage)
        .await
        .with_context(|| {
            format!(
                "Failed to open {} store at {}",
                config.storage.backend,
                config.storage_path().display()
            )
        })?;
    info!("✓ Storage ready ({})", store.backend_name());

    let generator = match GeminiClient::from_config(&config.ai)
        .context("Failed to build Gemini client")?
    {
        Some(client) => {
            info!("✓ AI generation enabled (model {})", client.model());
            ResponseGenerator::new(Arc::new(client))
        }
        None => {
            warn!("GEMINI_API_KEY not set, submissions will receive the fallback response");
            ResponseGenerator::fallback_only()
        }
    };

    let state = AppState::new(store, generator);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind))?;
    info!("feedback-server listening on http://{}", config.bind);
    info!("User dashboard: http://{}/user", config.bind);
    info!("Admin dashboard: http://{}/admin", config.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
