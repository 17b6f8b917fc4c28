//! chat-server – entry point.
//!
//! Startup order:
//! 1. Parse configuration from flags / environment variables.
//! 2. Initialise tracing (JSON or pretty).
//! 3. Build the provider adapter and the reply resolver.
//! 4. Build the Axum router and serve with graceful shutdown.

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};

use chat_server::config::Config;
use chat_server::middleware::cors_layer;
use chat_server::provider::OpenAiCompatProvider;
use chat_server::routes;
use chat_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Configuration ───────────────────────────────────────────────────────
    let cfg = Config::parse();

    // ── 2. Tracing ─────────────────────────────────────────────────────────────
    init_tracing(&cfg);
    info!(version = env!("CARGO_PKG_VERSION"), "chat-server starting");

    // ── 3. Provider + resolver ─────────────────────────────────────────────────
    let provider_cfg = cfg.provider_config();
    if !provider_cfg.has_credential() {
        warn!("GROQ_API_KEY is not set; every reply will come from the local fallback");
    }
    info!(
        provider = provider_cfg.provider.label(),
        model = %provider_cfg.model,
        base_url = %provider_cfg.base_url(),
        "completion provider configured"
    );
    let provider = OpenAiCompatProvider::new(provider_cfg)?;
    let resolver = cfg.resolver(Arc::new(provider));
    let state = AppState::new(Arc::new(resolver), cfg.reply_delay());

    // ── 4. HTTP server with graceful shutdown ──────────────────────────────────
    let app = routes::build(state, cors_layer(cfg.cors_origins.as_deref()));
    let addr: SocketAddr = cfg.bind_address().parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "chat server listening, ready for messages");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("chat-server stopped");
    Ok(())
}

fn init_tracing(cfg: &Config) {
    let env_filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(f) => f,
        Err(_) => match cfg.log_level.parse::<tracing_subscriber::EnvFilter>() {
            Ok(f) => f,
            Err(e) => {
                eprintln!(
                    "WARN: CHAT_LOG='{}' is not a valid tracing filter ({}); falling back to 'info'",
                    cfg.log_level, e
                );
                tracing_subscriber::EnvFilter::new("info")
            }
        },
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true);

    if cfg.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

/// Resolves when SIGINT (Ctrl-C) or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to install CTRL+C signal handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => warn!(error = %e, "failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    info!("shutdown signal received; starting graceful shutdown");
}
