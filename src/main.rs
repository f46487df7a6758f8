use std::net::SocketAddr;

use anyhow::Context;
use dotenv::dotenv;
use tracing::info;

use xtrack::api::{AppState, create_router};
use xtrack::config::ConfigLoader;
use xtrack::telemetry::init_tracing;

const DEFAULT_CONFIG_DIR: &str = "./config/xtrack";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing().context("Failed to initialize tracing subscriber")?;

    let config_dir =
        std::env::var("XTRACK_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let config = ConfigLoader::load(&config_dir)
        .with_context(|| format!("Failed to load configuration from {}", config_dir))?;

    let server = config.app().server;
    let port = match std::env::var("XTRACK_PORT") {
        Ok(value) => value
            .parse::<u16>()
            .with_context(|| format!("XTRACK_PORT is not a port: {}", value))?,
        Err(_) => server.port,
    };
    let addr = SocketAddr::new(server.host, port);

    info!(
        name = %config.app().name,
        employees = config.config().seed_employees().len(),
        "Configuration loaded"
    );

    let app = create_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("Xtrack listening on {}", addr);

    axum::serve(listener, app)
        .await
        .context("Failed to serve application")?;

    Ok(())
}
