//! Server configuration.
//!
//! Precedence, highest first: command-line overrides, environment variables, the first
//! config file found, built-in defaults.

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

pub const DEFAULT_BIND: &str = "127.0.0.1:4567";
pub const CONFIG_FILE_NAME: &str = "todo-api.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub seed_path: Option<PathBuf>,
    /// A log4rs YAML file; when set it replaces the programmatic logging setup.
    pub log_config: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_retention: Option<u32>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            seed_path: None,
            log_config: None,
            log_dir: None,
            log_level: None,
            log_retention: None,
        }
    }
}

/// Values given on the command line. `None` leaves the lower layers in charge.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub bind: Option<String>,
    pub seed_path: Option<PathBuf>,
    pub log_level: Option<String>,
}

impl ServerConfig {
    /// Parses and validates a TOML config.
    ///
    /// # Errors
    /// Returns an error if the text is not valid TOML or a setting is invalid.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Loads the config file at `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let s = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io { path: path.display().to_string(), reason: e.to_string() })?;
        Self::from_toml_str(&s)
    }

    /// Resolves the full configuration from every layer.
    ///
    /// # Errors
    /// Returns an error if an explicitly named config file is missing or any layer holds an
    /// invalid value.
    pub fn load(cli_config: Option<&Path>, overrides: &Overrides) -> Result<Self, ConfigError> {
        let explicit = cli_config
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os("TODO_API_CONFIG").map(PathBuf::from));
        let mut cfg = match explicit {
            Some(p) => Self::from_file(&p)?,
            None => match default_config_paths().into_iter().find(|p| p.is_file()) {
                Some(p) => Self::from_file(&p)?,
                None => Self::default(),
            },
        };
        cfg.apply_env(|k| std::env::var(k).ok());
        cfg.apply_overrides(overrides);
        cfg.validate()?;
        Ok(cfg)
    }

    /// Applies `TODO_API_*` variables looked up through `get`.
    pub fn apply_env(&mut self, get: impl Fn(&str) -> Option<String>) {
        if let Some(s) = get("TODO_API_BIND") {
            self.bind = s;
        }
        if let Some(s) = get("TODO_API_SEED") {
            self.seed_path = Some(PathBuf::from(s));
        }
        if let Some(s) = get("TODO_API_LOG_CONFIG") {
            self.log_config = Some(PathBuf::from(s));
        }
        if let Some(s) = get("TODO_API_LOG_DIR") {
            self.log_dir = Some(PathBuf::from(s));
        }
        if let Some(s) = get("TODO_API_LOG_LEVEL") {
            self.log_level = Some(s);
        }
        if let Some(n) = get("TODO_API_LOG_RETENTION").and_then(|s| s.parse().ok()) {
            self.log_retention = Some(n);
        }
    }

    pub fn apply_overrides(&mut self, o: &Overrides) {
        if let Some(b) = &o.bind {
            self.bind.clone_from(b);
        }
        if let Some(p) = &o.seed_path {
            self.seed_path = Some(p.clone());
        }
        if let Some(l) = &o.log_level {
            self.log_level = Some(l.clone());
        }
    }

    /// # Errors
    /// Returns `ConfigError::Invalid` naming the first bad setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bind_addr()?;
        if let Some(level) = &self.log_level
            && crate::logger::parse_level(level).is_none()
        {
            return Err(ConfigError::Invalid {
                key: "log_level".into(),
                reason: format!("unknown level '{level}' (error|warn|info|debug|trace)"),
            });
        }
        if self.log_retention == Some(0) {
            return Err(ConfigError::Invalid { key: "log_retention".into(), reason: "must be at least 1".into() });
        }
        Ok(())
    }

    /// # Errors
    /// Returns `ConfigError::Invalid` if `bind` is not a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind.parse().map_err(|e| ConfigError::Invalid {
            key: "bind".into(),
            reason: format!("'{}' is not a socket address: {e}", self.bind),
        })
    }
}

/// Config file locations tried in order when none is named explicitly.
#[must_use]
pub fn default_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(dir) = dirs_next::config_dir() {
        paths.push(dir.join(CONFIG_FILE_NAME));
    }
    if let Ok(cur) = std::env::current_dir() {
        paths.push(cur.join(CONFIG_FILE_NAME));
    }
    paths
}
