//! `mdocs serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use mdocs_config::{CliSettings, Config};
use mdocs_server::{run_server, server_config_from_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover mdocs.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable verbose output (request and render logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self, version: &str) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.info(&format!(
            "Starting server on http://{}:{}/docs/",
            config.server.host, config.server.port
        ));
        match &config.config_path {
            Some(path) => output.info(&format!("Configuration: {}", path.display())),
            None => output.warning("No mdocs.toml found, serving an empty documentation set"),
        }
        output.info(&format!(
            "Documents: {}",
            config.documentation_resolved.len()
        ));
        if config.access.tokens.is_empty() {
            output.info("Access: open");
        } else {
            output.info("Access: bearer token required");
        }

        tracing::debug!(
            config = ?config.config_path,
            documents = config.documentation_resolved.len(),
            "Loaded configuration"
        );
        let server_config = server_config_from_config(&config, version.to_owned());
        run_server(server_config)
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }
}
