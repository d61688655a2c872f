//! HTTP server for the Folio document builder.
//!
//! This crate provides the axum server behind the browser editor:
//! - JSON API endpoints for image upload, text rephrasing, HTML refinement
//!   and document generation
//! - Static files for the editor and uploaded images
//!
//! # Quick Start
//!
//! ```ignore
//! use folio_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     run_server(ServerConfig::default()).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum server (folio-server)
//!                        │
//!                        ├─► /api/generate-document ──► folio-renderer
//!                        │
//!                        ├─► /api/rephrase, /api/fix-html ──► folio-gemini (blocking pool)
//!                        │
//!                        ├─► /api/upload-image ──► upload directory
//!                        │
//!                        └─► /, /static/* (tower-http)
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;
mod static_files;
pub mod uploads;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use folio_gemini::GeminiClient;
use folio_renderer::RenderLimits;
use state::AppState;

pub use error::ServerError;
pub use uploads::{StoredUpload, UploadError, UploadStore};

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Directory served under `/static`.
    pub static_dir: PathBuf,
    /// Directory uploaded images are stored in.
    pub upload_dir: PathBuf,
    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,
    /// Gemini API base URL.
    pub gemini_base_url: String,
    /// Gemini model identifier.
    pub gemini_model: String,
    /// Timeout for one Gemini call.
    pub gemini_timeout: Duration,
    /// Structural limits for generated documents.
    pub limits: RenderLimits,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 5000,
            static_dir: PathBuf::from("static"),
            upload_dir: PathBuf::from("static/uploads"),
            max_body_bytes: 16 * 1024 * 1024,
            gemini_base_url: "https://generativelanguage.googleapis.com/v1beta".to_owned(),
            gemini_model: "gemini-2.5-flash".to_owned(),
            gemini_timeout: Duration::from_secs(120),
            limits: RenderLimits::default(),
        }
    }
}

/// Run the server.
///
/// # Arguments
///
/// * `config` - Server configuration
///
/// # Errors
///
/// Returns an error if the upload directory cannot be created or the server
/// fails to start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(&config.upload_dir)?;

    let model = Arc::new(GeminiClient::with_timeout(
        &config.gemini_base_url,
        &config.gemini_model,
        config.gemini_timeout,
    ));

    let state = Arc::new(AppState {
        uploads: UploadStore::new(config.upload_dir.clone()),
        model,
        limits: config.limits,
        static_dir: config.static_dir.clone(),
        max_body_bytes: config.max_body_bytes,
    });

    let app = app::create_router(state);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(
        address = %addr,
        static_dir = %config.static_dir.display(),
        upload_dir = %config.upload_dir.display(),
        model = %config.gemini_model,
        "Starting server"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        return;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from Folio config.
#[must_use]
pub fn server_config_from_config(config: &folio_config::Config) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        static_dir: config.storage_resolved.static_dir.clone(),
        upload_dir: config.storage_resolved.upload_dir.clone(),
        max_body_bytes: config.server.max_body_bytes,
        gemini_base_url: config.gemini.base_url.clone(),
        gemini_model: config.gemini.model.clone(),
        gemini_timeout: Duration::from_secs(config.gemini.timeout_secs),
        limits: RenderLimits {
            max_depth: config.render.max_depth,
            max_sections: config.render.max_sections,
        },
    }
}
