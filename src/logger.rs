//! log4rs setup for the server.
//!
//! Two destinations: the application log (console plus a rolling `todo-api.log`) and the
//! access log (`access.log`), which receives only the `todo_api::access` target.

use crate::config::ServerConfig;
use crate::errors::ConfigError;
use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::append::rolling_file::RollingFileAppender;
use log4rs::append::rolling_file::policy::compound::{
    CompoundPolicy, roll::fixed_window::FixedWindowRoller, trigger::size::SizeTrigger,
};
use log4rs::config::{Appender, Config, Logger, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::path::{Path, PathBuf};

pub const ACCESS_TARGET: &str = "todo_api::access";

const PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} [{l}] {t} - {m}{n}";
const ROLL_SIZE: u64 = 10 * 1024 * 1024;
const DEFAULT_RETENTION: u32 = 7;

#[must_use]
pub fn parse_level(s: &str) -> Option<LevelFilter> {
    match s.to_ascii_lowercase().as_str() {
        "off" => Some(LevelFilter::Off),
        "error" => Some(LevelFilter::Error),
        "warn" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}

/// Initializes logging from a log4rs YAML file.
///
/// # Errors
/// Returns an error if the file cannot be read or a logger is already installed.
pub fn init_file(path: &Path) -> Result<(), ConfigError> {
    log4rs::init_file(path, log4rs::config::Deserializers::default())
        .map_err(|e| ConfigError::Logging(format!("{}: {e}", path.display())))
}

fn rolling(base: &Path, stem: &str, keep: u32) -> Result<RollingFileAppender, ConfigError> {
    let roller = FixedWindowRoller::builder()
        .build(&format!("{}", base.join(format!("{stem}.{{}}.log")).display()), keep)
        .map_err(|e| ConfigError::Logging(e.to_string()))?;
    let policy = CompoundPolicy::new(Box::new(SizeTrigger::new(ROLL_SIZE)), Box::new(roller));
    RollingFileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build(base.join(format!("{stem}.log")), Box::new(policy))
        .map_err(|e| ConfigError::Logging(e.to_string()))
}

/// Builds the programmatic log4rs config.
///
/// - `dir`: directory for log files; `None` logs to the console only.
/// - `level`: error|warn|info|debug|trace, default info.
/// - `retention`: rolled files kept per log, default 7.
///
/// # Errors
/// Returns an error if the directory cannot be created or an appender fails to build.
pub fn build_config(dir: Option<&Path>, level: Option<&str>, retention: Option<u32>) -> Result<Config, ConfigError> {
    let lvl = level.and_then(parse_level).unwrap_or(LevelFilter::Info);
    let keep = retention.unwrap_or(DEFAULT_RETENTION);
    let console = ConsoleAppender::builder().encoder(Box::new(PatternEncoder::new(PATTERN))).build();

    let mut builder = Config::builder().appender(Appender::builder().build("console", Box::new(console)));
    let mut root = Root::builder().appender("console");
    let mut access = Logger::builder().additive(false);

    if let Some(dir) = dir {
        let base = PathBuf::from(dir);
        std::fs::create_dir_all(&base).map_err(|e| ConfigError::Logging(format!("{}: {e}", base.display())))?;
        builder = builder
            .appender(Appender::builder().build("app", Box::new(rolling(&base, "todo-api", keep)?)))
            .appender(Appender::builder().build("access", Box::new(rolling(&base, "access", keep)?)));
        root = root.appender("app");
        access = access.appender("access");
    } else {
        access = access.appender("console");
    }

    builder
        .logger(access.build(ACCESS_TARGET, lvl))
        .build(root.build(lvl))
        .map_err(|e| ConfigError::Logging(e.to_string()))
}

/// Installs the programmatic config as the global logger.
///
/// # Errors
/// Returns an error if the config cannot be built or a logger is already installed.
pub fn configure_logging(dir: Option<&Path>, level: Option<&str>, retention: Option<u32>) -> Result<(), ConfigError> {
    let config = build_config(dir, level, retention)?;
    log4rs::init_config(config).map_err(|e| ConfigError::Logging(e.to_string()))?;
    Ok(())
}

/// Sets up logging for the server: a YAML file when configured, otherwise the programmatic
/// config from the remaining `log_*` settings.
///
/// # Errors
/// Returns an error if logging cannot be initialized.
pub fn init_for_server(cfg: &ServerConfig) -> Result<(), ConfigError> {
    match &cfg.log_config {
        Some(path) => init_file(path),
        None => configure_logging(cfg.log_dir.as_deref(), cfg.log_level.as_deref(), cfg.log_retention),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_names() {
        assert_eq!(parse_level("DEBUG"), Some(LevelFilter::Debug));
        assert_eq!(parse_level("verbose"), None);
    }

    #[test]
    fn file_config_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let logs = dir.path().join("logs");
        let cfg = build_config(Some(&logs), Some("debug"), Some(2)).unwrap();
        assert!(logs.is_dir());
        assert_eq!(cfg.root().level(), LevelFilter::Debug);
        assert!(cfg.loggers().iter().any(|l| l.name() == ACCESS_TARGET && !l.additive()));
    }

    #[test]
    fn console_only_without_dir() {
        let cfg = build_config(None, None, None).unwrap();
        assert_eq!(cfg.appenders().len(), 1);
        assert_eq!(cfg.root().level(), LevelFilter::Info);
    }
}
