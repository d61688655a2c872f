//! `folio serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use folio_config::{CliSettings, Config};
use folio_server::{run_server, server_config_from_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Static asset directory holding index.html (overrides config).
    #[arg(short, long)]
    static_dir: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long, env = "FOLIO_HOST")]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long, env = "FOLIO_PORT")]
    port: Option<u16>,

    /// Enable verbose output (request and generation logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            static_dir: self.static_dir,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.field(
            "Listening",
            format!("http://{}:{}", config.server.host, config.server.port),
        );
        if let Some(path) = &config.config_path {
            output.field("Config", path.display());
        }
        output.field("Static directory", config.storage_resolved.static_dir.display());
        output.field("Upload directory", config.storage_resolved.upload_dir.display());
        output.field("Model", &config.gemini.model);

        if !config.storage_resolved.static_dir.join("index.html").exists() {
            output.warning("index.html not found in static directory; / will return 404");
        }

        run_server(server_config_from_config(&config))
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }
}
