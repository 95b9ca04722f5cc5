mod arxiv;
mod cache;
mod config;
mod gemini;
mod html;
mod review;
mod search;
mod session;
mod web;

pub const USER_AGENT: &str = concat!("multiview/", env!("CARGO_PKG_VERSION"));

use std::time::Duration;

use clap::Parser;
use reqwest::Client;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;

use config::Config;

/// TCP connection establishment timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Per-request ceiling; generation for a long abstract can take a while.
const HTTP_TIMEOUT: Duration = Duration::from_secs(60);

/// `RUST_LOG` plus our own events and the per-request spans from `TraceLayer`.
fn log_filter() -> Result<EnvFilter, ParseError> {
    Ok(EnvFilter::from_default_env()
        .add_directive("multiview=info".parse()?)
        .add_directive("tower_http=info".parse()?))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter()?)
        .init();

    let config = Config::parse();
    config.validate()?;

    let http = Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(HTTP_TIMEOUT)
        .build()?;

    let app = web::router(web::AppState::new(http, &config));
    let listener = TcpListener::bind(config.bind)
        .await
        .inspect_err(|e| tracing::error!("failed to bind {}: {e}", config.bind))?;

    info!(
        addr = %listener.local_addr()?,
        model = %config.model,
        cache_ttl_secs = config.cache_ttl_secs,
        "starting multiview web UI"
    );

    axum::serve(listener, app).await?;
    info!("server stopped");
    Ok(())
}
