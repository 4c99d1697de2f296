//! HTTP server for the trail map API.
//!
//! Thin axum layer over [`trailmap_api`]: each handler parses request
//! parameters, calls one [`trailmap_api::TrailStore`] operation and renders
//! the result as GeoJSON. Construction, routing and middleware live here;
//! domain behavior lives in the lower crates.
//!
//! ```ignore
//! use trailmap_server::{ServerConfig, TrailServer};
//!
//! #[tokio::main]
//! async fn main() {
//!     let server = TrailServer::new(ServerConfig::default()).await.unwrap();
//!     server.run().await.unwrap();
//! }
//! ```

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod telemetry;

pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use state::AppState;
pub use telemetry::{init_logging, TelemetryConfig};

use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// A configured server, ready to run.
pub struct TrailServer {
    state: Arc<AppState>,
    router: Router,
}

impl TrailServer {
    /// Open the store per `config` and assemble the router.
    pub async fn new(config: ServerConfig) -> std::result::Result<Self, trailmap_api::ApiError> {
        let telemetry_config = TelemetryConfig::with_server_config(&config);
        let state = Arc::new(AppState::new(config, telemetry_config).await?);
        let router = routes::build_router(state.clone());

        Ok(Self { state, router })
    }

    /// Shared application state.
    pub fn state(&self) -> &Arc<AppState> {
        &self.state
    }

    /// A clone of the router, for driving requests without a listener.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Bind the configured address and serve until shutdown.
    pub async fn run(self) -> std::result::Result<(), std::io::Error> {
        let addr = self.state.config.listen_addr;
        let listener = TcpListener::bind(addr).await?;

        info!(
            addr = %addr,
            storage = %self.state.config.storage_type_str(),
            log_filter = %self.state.telemetry_config.filter,
            "trail map server listening"
        );

        axum::serve(listener, self.router).await
    }
}
