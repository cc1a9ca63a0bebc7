//! Configuration management for mdocs.
//!
//! Parses `mdocs.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Documentation Table
//!
//! The `[documentation]` table maps display names to markdown files. Its
//! insertion order is preserved and drives the order of the navigation menu:
//!
//! ```toml
//! [documentation]
//! "Getting Started" = "README.md"
//! "Developer/Setup" = "docs/setup.md"
//! "Developer/Code Conventions" = "docs/conventions.md"
//! ```
//!
//! Relative paths are resolved against the directory of the config file.
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `server.host`
//! - `access.tokens`
//! - `client.mermaid_url`
//! - `client.highlight_js_url`
//! - `client.highlight_css_url`

mod expand;

use indexmap::IndexMap;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mdocs.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Display name to markdown path mapping (paths as written in TOML).
    documentation: IndexMap<String, String>,
    /// Adjacent asset serving configuration.
    pub assets: AssetsConfig,
    /// Access control configuration.
    pub access: AccessConfig,
    /// Client-side script configuration.
    pub client: ClientConfig,
    /// Markdown rendering configuration.
    pub render: RenderConfig,

    /// Resolved documentation mapping with absolute paths (set after loading).
    #[serde(skip)]
    pub documentation_resolved: IndexMap<String, PathBuf>,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            documentation: IndexMap::new(),
            assets: AssetsConfig::default(),
            access: AccessConfig::default(),
            client: ClientConfig::default(),
            render: RenderConfig::default(),
            documentation_resolved: IndexMap::new(),
            config_path: None,
        }
    }
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7979,
        }
    }
}

/// Files that may be served from a document's directory.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Allowed file extensions, including the leading dot.
    pub allowed_extensions: Vec<String>,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            allowed_extensions: [".txt", ".png", ".gif", ".jpg", ".jpeg"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
        }
    }
}

/// Access control configuration.
///
/// With no tokens configured every request holds the `Documentation`
/// capability. Otherwise a matching `Authorization: Bearer` token is required.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AccessConfig {
    /// Accepted bearer tokens.
    pub tokens: Vec<String>,
}

/// Client-side script configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Mermaid diagram renderer script.
    pub mermaid_url: String,
    /// highlight.js script.
    pub highlight_js_url: String,
    /// highlight.js stylesheet.
    pub highlight_css_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            mermaid_url: "https://cdnjs.cloudflare.com/ajax/libs/mermaid/8.7.0/mermaid.min.js"
                .to_owned(),
            highlight_js_url:
                "https://cdnjs.cloudflare.com/ajax/libs/highlight.js/10.1.2/highlight.min.js"
                    .to_owned(),
            highlight_css_url:
                "https://cdnjs.cloudflare.com/ajax/libs/highlight.js/10.1.2/styles/default.min.css"
                    .to_owned(),
        }
    }
}

/// Markdown rendering configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// CSS class added to every `<table>` element.
    pub table_class: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            table_class: "table".to_owned(),
        }
    }
}

/// Only the `[documentation]` table, for cheap re-reads.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DocumentationOnly {
    documentation: IndexMap<String, String>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`access.tokens`").
        field: String,
        /// Error message (e.g., "${`DOCS_TOKEN`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to be an http(s) URL or a server-absolute path.
fn require_script_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") && !url.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http://, https:// or /"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `mdocs.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Re-read the `[documentation]` table from a config file.
    ///
    /// Used to consult the documentation mapping fresh on every request, so
    /// edits to the file take effect without a restart.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed.
    pub fn load_documentation(path: &Path) -> Result<IndexMap<String, PathBuf>, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let raw: DocumentationOnly = toml::from_str(&content)?;
        let config_dir = path.parent().unwrap_or(Path::new("."));
        Ok(resolve_documentation(&raw.documentation, config_dir))
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Checks that all required fields are properly set and contain valid values.
    /// Called automatically after loading from file.
    ///
    /// The one-folder-level rule for display names is enforced by the document
    /// registry on every build, not here.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_assets()?;
        self.validate_access()?;
        self.validate_client()?;
        Ok(())
    }

    fn validate_server(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;

        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        Ok(())
    }

    fn validate_assets(&self) -> Result<(), ConfigError> {
        for ext in &self.assets.allowed_extensions {
            if ext.len() < 2 || !ext.starts_with('.') {
                return Err(ConfigError::Validation(format!(
                    "assets.allowed_extensions entry {ext:?} must look like \".png\""
                )));
            }
        }
        Ok(())
    }

    fn validate_access(&self) -> Result<(), ConfigError> {
        for token in &self.access.tokens {
            require_non_empty(token, "access.tokens")?;
        }
        Ok(())
    }

    fn validate_client(&self) -> Result<(), ConfigError> {
        require_script_url(&self.client.mermaid_url, "client.mermaid_url")?;
        require_script_url(&self.client.highlight_js_url, "client.highlight_js_url")?;
        require_script_url(&self.client.highlight_css_url, "client.highlight_css_url")?;
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;

        for token in &mut self.access.tokens {
            *token = expand::expand_env(token, "access.tokens")?;
        }

        self.client.mermaid_url = expand::expand_env(&self.client.mermaid_url, "client.mermaid_url")?;
        self.client.highlight_js_url =
            expand::expand_env(&self.client.highlight_js_url, "client.highlight_js_url")?;
        self.client.highlight_css_url =
            expand::expand_env(&self.client.highlight_css_url, "client.highlight_css_url")?;

        Ok(())
    }

    /// Resolve relative documentation paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.documentation_resolved = resolve_documentation(&self.documentation, config_dir);
    }
}

/// Join every documentation path onto `config_dir`, keeping insertion order.
///
/// Absolute paths are kept as they are (`Path::join` replaces the base).
fn resolve_documentation(
    raw: &IndexMap<String, String>,
    config_dir: &Path,
) -> IndexMap<String, PathBuf> {
    raw.iter()
        .map(|(name, path)| (name.clone(), config_dir.join(path)))
        .collect()
}
