//! CLI and environment configuration.

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Trail map HTTP server configuration, from flags or `TRAILMAP_*` env vars.
#[derive(Parser, Debug, Clone)]
#[command(name = "trailmap-server")]
#[command(about = "HTTP REST API server for mountain-bike trail data")]
pub struct ServerConfig {
    /// Listen address for the HTTP server
    #[arg(long, env = "TRAILMAP_LISTEN_ADDR", default_value = "0.0.0.0:8090")]
    pub listen_addr: SocketAddr,

    /// Data directory for the snapshot file (enables file storage mode)
    #[arg(long, env = "TRAILMAP_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Allow cross-origin requests from any origin
    #[arg(long, env = "TRAILMAP_CORS_ENABLED", default_value = "true")]
    pub cors_enabled: bool,

    /// Request body size limit in bytes (default 10MB)
    #[arg(long, env = "TRAILMAP_BODY_LIMIT", default_value = "10485760")]
    pub body_limit: usize,

    /// Log level when neither RUST_LOG nor LOG_LEVEL is set
    #[arg(long, env = "TRAILMAP_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Load the demo dataset on startup when the store is empty
    #[arg(long, env = "TRAILMAP_SEED_DEMO", default_value = "false")]
    pub seed_demo: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8090".parse().unwrap(),
            data_dir: None,
            cors_enabled: true,
            body_limit: 10 * 1024 * 1024, // 10MB
            log_level: "info".to_string(),
            seed_demo: false,
        }
    }
}

impl ServerConfig {
    /// Whether a data directory is configured.
    pub fn is_file_storage(&self) -> bool {
        self.data_dir.is_some()
    }

    /// Storage label for logs and `/api/stats`.
    pub fn storage_type_str(&self) -> &'static str {
        if self.is_file_storage() {
            "file"
        } else {
            "memory"
        }
    }
}
