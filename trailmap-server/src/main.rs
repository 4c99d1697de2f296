//! Server binary.
//!
//! Run with: `cargo run -p trailmap-server -- --help`

use clap::Parser;
use trailmap_server::{
    telemetry::{init_logging, TelemetryConfig},
    ServerConfig, TrailServer,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::parse();

    let telemetry_config = TelemetryConfig::with_server_config(&config);
    init_logging(&telemetry_config);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        storage = config.storage_type_str(),
        addr = %config.listen_addr,
        cors = config.cors_enabled,
        seed_demo = config.seed_demo,
        "starting trail map server"
    );

    let server = TrailServer::new(config).await?;
    server.run().await.map_err(Into::into)
}
