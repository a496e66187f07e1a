//! Session service binary.
//!
//! Reads configuration, builds the shared state, and serves the session
//! router. Startup fails when the signing secret is absent: a deployment
//! that cannot sign tokens must not come up at all.

use std::net::SocketAddr;

use anyhow::Context;
use clap::Parser;
use smartslate_api::AppState;
use smartslate_auth::{TokenCodec, TrustedDomains};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "smartslate-server", version)]
#[command(about = "Cross-subdomain session token service for the SmartSlate portal")]
struct Cli {
    /// Address the HTTP listener binds to.
    #[arg(long, env = "LISTEN_ADDR", default_value = "127.0.0.1:8787")]
    listen: SocketAddr,

    /// Symmetric secret used to sign and verify session tokens.
    #[arg(long, env = "SESSION_JWT_SECRET", hide_env_values = true)]
    session_secret: Option<String>,

    /// Production apex domain trusted for cookie sharing and CORS.
    #[arg(long, env = "SESSION_APEX_DOMAIN", default_value = "smartslate.io")]
    apex_domain: String,

    /// Local-development apex with the same cross-subdomain behavior.
    #[arg(long, env = "SESSION_DEV_DOMAIN", default_value = "smartslate.test")]
    dev_domain: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let secret = cli.session_secret.context("SESSION_JWT_SECRET is not set")?;
    let codec = TokenCodec::new(&secret).context("session signing secret rejected")?;
    let domains = TrustedDomains {
        apex: cli.apex_domain,
        dev_apex: cli.dev_domain,
    };
    tracing::info!(apex = %domains.apex, dev_apex = %domains.dev_apex, "trusted apex domains");

    let app = smartslate_api::router(AppState::new(codec, domains));
    let listener = tokio::net::TcpListener::bind(cli.listen)
        .await
        .with_context(|| format!("failed to bind {}", cli.listen))?;
    tracing::info!(addr = %cli.listen, "session service listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
