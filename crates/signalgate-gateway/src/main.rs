//! signalgate gateway binary.
//!
//! Usage: `signalgate-gateway [config.yaml]`. Without a path the built-in
//! defaults apply (listen on 0.0.0.0:8000).

use tracing_subscriber::{fmt, EnvFilter};

use signalgate_core::error::{Result, SignalError};
use signalgate_gateway::{app_state, config, router};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    if let Err(e) = run().await {
        tracing::error!(code = e.client_code().as_str(), error = %e, "signalgate-gateway failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cfg = match std::env::args().nth(1) {
        Some(path) => config::load_from_file(&path)?,
        None => config::GatewayConfig::default(),
    };
    let listen = cfg.server.listen_addr()?;

    let state = app_state::AppState::new(cfg)?;
    let app = router::build_router(state);

    tracing::info!(%listen, "signalgate-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| SignalError::Internal(format!("failed to bind {listen}: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| SignalError::Internal(format!("server failed: {e}")))?;

    tracing::info!("signalgate-gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "ctrl-c handler unavailable; running until killed");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received, draining");
}
