//! Configuration loading and validation for the students service.
//!
//! Values come from a YAML file whose path is taken from `CONFIG_PATH` or,
//! failing that, the `-config` command-line flag. Individual values may be
//! overridden by `ENV`, `STORAGE_PATH` and `HTTP_SERVER_ADDR`. The process
//! exits with a clear error message if the file is missing or any value is
//! invalid.

use std::{
    ffi::OsString,
    fmt,
    path::{Path, PathBuf},
};

use clap::Parser;
use serde::Deserialize;
use thiserror::Error;

/// Environment variable holding the config file path.
pub const CONFIG_PATH_VAR: &str = "CONFIG_PATH";

/// Errors produced while resolving, reading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Neither `CONFIG_PATH` nor `-config` was supplied.
    #[error("config path is not set (use CONFIG_PATH or -config)")]
    PathNotSet,

    /// The resolved path does not point at a readable file.
    #[error("config file does not exist: {}", .0.display())]
    NotFound(PathBuf),

    /// The file could not be parsed or deserialised.
    #[error("cannot read config file: {0}")]
    Read(#[from] config::ConfigError),

    /// A value parsed but failed validation.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Command-line arguments.
#[derive(Debug, Default, Parser)]
#[command(name = "students-api", version, about)]
pub struct Args {
    /// Path to the configuration file.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Parse the process arguments, accepting single-dash `-config` as well
    /// as `--config`.
    pub fn parse_env() -> Self {
        Self::parse_from(std::env::args_os().map(normalize_flag))
    }
}

/// Rewrite `-config` / `-config=...` to their double-dash form.
fn normalize_flag(arg: OsString) -> OsString {
    match arg.to_str() {
        Some("-config") => "--config".into(),
        Some(s) if s.starts_with("-config=") => format!("-{s}").into(),
        _ => arg,
    }
}

/// Deployment environment the service runs in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Local,
    Dev,
    #[default]
    #[serde(alias = "prod")]
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Dev => "dev",
            Environment::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `http_server` section of the config file.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServer {
    /// Listen address as `host:port`.
    #[serde(rename = "address")]
    pub addr: String,
}

/// Validated service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Deployment environment; selects the log format.
    #[serde(default)]
    pub env: Environment,

    /// Filesystem path of the SQLite database. **Required.**
    pub storage_path: String,

    /// HTTP listener settings. **Required.**
    pub http_server: HttpServer,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Resolve the config path, then load and validate the file.
    ///
    /// `CONFIG_PATH` takes precedence over the `-config` flag.
    ///
    /// # Errors
    ///
    /// Returns an error if no path is set, the file is missing, or any value
    /// is absent or invalid.
    pub fn load(args: &Args) -> Result<Self, ConfigError> {
        Self::load_with(args, |key| std::env::var(key).ok())
    }

    /// Like [`Config::load`], reading `CONFIG_PATH` and the overrides
    /// through `env` instead of the process environment.
    pub fn load_with<F>(args: &Args, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = resolve_path(env(CONFIG_PATH_VAR), args.config.clone())?;
        Self::from_file(&path, env)
    }

    /// Load configuration from `path`, applying overrides looked up through
    /// `env` (`ENV`, `STORAGE_PATH`, `HTTP_SERVER_ADDR`). Empty values are
    /// ignored.
    pub fn from_file<F>(path: &Path, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let lookup = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        let cfg = config::Config::builder()
            .add_source(config::File::from(path).format(config::FileFormat::Yaml))
            .set_override_option("env", lookup("ENV"))?
            .set_override_option("storage_path", lookup("STORAGE_PATH"))?
            .set_override_option("http_server.address", lookup("HTTP_SERVER_ADDR"))?
            .build()?;

        let c: Config = cfg.try_deserialize()?;
        c.validate()?;
        Ok(c)
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<(), ConfigError> {
        ensure_non_empty(&self.storage_path, "storage_path")?;
        ensure_non_empty(&self.http_server.addr, "http_server.address")?;

        let port = self
            .http_server
            .addr
            .rsplit_once(':')
            .map(|(_, port)| port)
            .ok_or_else(|| {
                ConfigError::Invalid(format!(
                    "http_server.address must be host:port, got {:?}",
                    self.http_server.addr
                ))
            })?;
        if port.parse::<u16>().is_err() {
            return Err(ConfigError::Invalid(format!(
                "http_server.address has an invalid port: {port:?}"
            )));
        }
        Ok(())
    }
}

/// Pick the config path: the env value if non-empty, else the flag.
fn resolve_path(env: Option<String>, flag: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = env.filter(|p| !p.trim().is_empty()) {
        return Ok(PathBuf::from(path));
    }
    flag.filter(|p| !p.as_os_str().is_empty())
        .ok_or(ConfigError::PathNotSet)
}

fn ensure_non_empty(value: &str, name: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Invalid(format!(
            "{name} is required and must not be empty"
        )));
    }
    Ok(())
}
