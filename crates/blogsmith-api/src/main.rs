//! Blogsmith REST API entry point.
//!
//! Binary name: `blogsmith`
//!
//! Parses CLI arguments, loads environment configuration, initializes the
//! database and services, then serves the API until Ctrl+C or SIGTERM.

mod http;
mod state;

use clap::Parser;

use blogsmith_infra::config::Settings;
use state::AppState;

#[derive(Parser)]
#[command(name = "blogsmith", about = "Blogsmith REST API server", version)]
struct Cli {
    /// Host to bind.
    #[arg(long, env = "BLOGSMITH_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to bind.
    #[arg(long, env = "BLOGSMITH_PORT", default_value_t = 8080)]
    port: u16,

    /// Export spans via the OpenTelemetry stdout exporter.
    #[arg(long)]
    otel: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Held until the end of main so buffered spans flush on shutdown.
    let _tracing = blogsmith_observe::tracing_setup::init_tracing(cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let settings = Settings::from_env()?;
    let state = AppState::init(settings).await?;

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "Blogsmith API listening");

    let router = http::router::build_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
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
}
