//! `folio.toml` loading.
//!
//! The file is looked up in the working directory and then each parent.
//! With no file, built-in defaults rooted at the working directory apply.
//! Command-line flags passed as [`CliSettings`] win over file values.
//!
//! `server.host`, `gemini.base_url`, `gemini.model` and the storage paths
//! may reference environment variables as `${VAR}` (must be set) or
//! `${VAR:-fallback}`. Storage paths also expand a leading `~`.

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Command-line overrides. `None` leaves the file value in place.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override static asset directory.
    pub static_dir: Option<PathBuf>,
}

/// File name looked up by [`Config::load`].
const CONFIG_FILENAME: &str = "folio.toml";

/// Settings for the server, the Gemini client and the renderer.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Storage configuration (paths are relative strings from TOML).
    storage: RawStorage,
    /// Language model configuration.
    pub gemini: GeminiConfig,
    /// Rendering limits.
    pub render: RenderConfig,

    /// Resolved storage configuration (set after loading).
    #[serde(skip)]
    pub storage_resolved: StorageConfig,
    /// File the settings came from, if any.
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::rooted_at(Path::new("."))
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
    /// Maximum accepted request body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 5000,
            max_body_bytes: 16 * 1024 * 1024,
        }
    }
}

/// Raw storage configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RawStorage {
    static_dir: Option<String>,
    upload_dir: Option<String>,
}

/// Resolved storage configuration with absolute paths.
#[derive(Debug, Default)]
pub struct StorageConfig {
    /// Directory served under `/static`, holding `index.html`.
    pub static_dir: PathBuf,
    /// Directory uploaded images are written to, served under
    /// `/static/uploads`.
    pub upload_dir: PathBuf,
}

/// Gemini client configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    /// Model identifier.
    pub model: String,
    /// API base URL, without the `/models/...` suffix.
    pub base_url: String,
    /// Global request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_owned(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_owned(),
            timeout_secs: 120,
        }
    }
}

/// Structural limits applied to submitted documents.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Maximum section nesting depth.
    pub max_depth: usize,
    /// Maximum number of sections in one document.
    pub max_sections: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_depth: 8,
            max_sections: 2000,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An explicitly named file does not exist.
    #[error("Config file does not exist: {}", .0.display())]
    NotFound(PathBuf),
    /// The file could not be read.
    #[error("Cannot read config: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not valid TOML for this schema.
    #[error("Invalid config syntax: {0}")]
    Parse(#[from] toml::de::Error),
    /// A value is out of range.
    #[error("Invalid config value: {0}")]
    Validation(String),
    /// A `${VAR}` reference could not be expanded.
    #[error("Cannot expand {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`gemini.base_url`").
        field: String,
        /// Error message (e.g., "${`GEMINI_GATEWAY`} not set").
        message: String,
    },
}

fn invalid(field: &str, problem: &str) -> ConfigError {
    ConfigError::Validation(format!("{field} {problem}"))
}

fn non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(invalid(field, "cannot be empty"));
    }
    Ok(())
}

fn http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    match url.split_once("://") {
        Some(("http" | "https", rest)) if !rest.is_empty() => Ok(()),
        _ => Err(invalid(field, "must be an http:// or https:// URL")),
    }
}

fn non_zero(value: u64, field: &str) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(invalid(field, "must be greater than 0"));
    }
    Ok(())
}

impl Config {
    /// Load `explicit`, or the nearest `folio.toml`, then apply `overrides`.
    ///
    /// Relative storage paths resolve against the file's directory.
    ///
    /// # Errors
    ///
    /// Fails when `explicit` is missing, the file cannot be parsed, a
    /// `${VAR}` reference is unset, or a value (after overrides) is invalid.
    pub fn load(
        explicit: Option<&Path>,
        overrides: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = match explicit {
            Some(path) if !path.exists() => {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Some(path) => Self::from_file(path)?,
            None => match Self::find_upwards() {
                Some(found) => Self::from_file(&found)?,
                None => Self::rooted_at_cwd(),
            },
        };

        if let Some(settings) = overrides {
            config.apply_overrides(settings);
            config.validate()?;
        }

        Ok(config)
    }

    fn apply_overrides(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(static_dir) = &settings.static_dir {
            self.storage_resolved.static_dir.clone_from(static_dir);
            // Keep uploads inside the overridden directory unless placed explicitly
            if self.storage.upload_dir.is_none() {
                self.storage_resolved.upload_dir = static_dir.join("uploads");
            }
        }
    }

    fn find_upwards() -> Option<PathBuf> {
        let cwd = std::env::current_dir().ok()?;
        cwd.ancestors()
            .map(|dir| dir.join(CONFIG_FILENAME))
            .find(|candidate| candidate.is_file())
    }

    fn rooted_at_cwd() -> Self {
        Self::rooted_at(&std::env::current_dir().unwrap_or_default())
    }

    /// Defaults with the static directory at `base/static`.
    fn rooted_at(base: &Path) -> Self {
        Self {
            server: ServerConfig::default(),
            storage: RawStorage::default(),
            gemini: GeminiConfig::default(),
            render: RenderConfig::default(),
            storage_resolved: StorageConfig {
                static_dir: base.join("static"),
                upload_dir: base.join("static").join("uploads"),
            },
            config_path: None,
        }
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(&std::fs::read_to_string(path)?)?;
        config.expand_env_fields()?;
        config.resolve_storage(path.parent().unwrap_or(Path::new(".")));
        config.config_path = Some(path.to_path_buf());
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_gemini()?;
        self.validate_render()?;
        Ok(())
    }

    fn validate_server(&self) -> Result<(), ConfigError> {
        non_empty(&self.server.host, "server.host")?;
        non_zero(u64::from(self.server.port), "server.port")?;
        non_zero(self.server.max_body_bytes as u64, "server.max_body_bytes")
    }

    fn validate_gemini(&self) -> Result<(), ConfigError> {
        non_empty(&self.gemini.model, "gemini.model")?;
        http_url(&self.gemini.base_url, "gemini.base_url")?;
        non_zero(self.gemini.timeout_secs, "gemini.timeout_secs")
    }

    fn validate_render(&self) -> Result<(), ConfigError> {
        non_zero(self.render.max_depth as u64, "render.max_depth")?;
        non_zero(self.render.max_sections as u64, "render.max_sections")
    }

    fn expand_env_fields(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;
        self.gemini.base_url = expand::expand_env(&self.gemini.base_url, "gemini.base_url")?;
        self.gemini.model = expand::expand_env(&self.gemini.model, "gemini.model")?;
        if let Some(dir) = &self.storage.static_dir {
            self.storage.static_dir = Some(expand::expand_path(dir, "storage.static_dir")?);
        }
        if let Some(dir) = &self.storage.upload_dir {
            self.storage.upload_dir = Some(expand::expand_path(dir, "storage.upload_dir")?);
        }
        Ok(())
    }

    /// Join storage paths onto `config_dir`. `upload_dir` defaults to
    /// `uploads` inside the static directory.
    fn resolve_storage(&mut self, config_dir: &Path) {
        let static_dir = config_dir.join(self.storage.static_dir.as_deref().unwrap_or("static"));
        let upload_dir = self
            .storage
            .upload_dir
            .as_deref()
            .map_or_else(|| static_dir.join("uploads"), |dir| config_dir.join(dir));

        self.storage_resolved = StorageConfig {
            static_dir,
            upload_dir,
        };
    }
}
