//! Environment-derived server configuration.
//!
//! # Responsibility
//! - Resolve host, port, database path and logging settings from the
//!   process environment with sensible local-development defaults.
//!
//! # Invariants
//! - The resolved log directory is always absolute (core logging rejects
//!   relative paths).
//! - Invalid numeric or boolean values fail startup instead of being
//!   silently replaced.

use anyhow::{anyhow, Context, Result};
use minitask_core::{default_log_level, LogConfig};
use std::env;
use std::path::PathBuf;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_DATABASE_FILE: &str = "tasks.db";
const DEFAULT_LOG_DIR: &str = "logs";

/// Resolved server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
    pub log_stderr: bool,
}

impl ServerConfig {
    /// Reads configuration from the environment.
    ///
    /// Recognized variables: `HOST`, `PORT`, `DATABASE_PATH`, `LOG_DIR`,
    /// `LOG_LEVEL`, `LOG_STDERR`. All are optional.
    pub fn from_env() -> Result<Self> {
        let host = env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());

        let port = match env::var("PORT") {
            Ok(raw) => parse_port(&raw)?,
            Err(_) => DEFAULT_PORT,
        };

        let database_path = env::var("DATABASE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATABASE_FILE));

        let cwd = env::current_dir().context("cannot resolve current directory")?;
        let log_dir = absolutize(
            env::var("LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_LOG_DIR)),
            &cwd,
        );

        let log_level =
            env::var("LOG_LEVEL").unwrap_or_else(|_| default_log_level().to_string());

        let log_stderr = match env::var("LOG_STDERR") {
            Ok(raw) => parse_bool(&raw)?,
            Err(_) => true,
        };

        Ok(Self {
            host,
            port,
            database_path,
            log_dir,
            log_level,
            log_stderr,
        })
    }

    /// Returns the bind address in `host:port` form.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the logging bootstrap parameters for this configuration.
    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            level: self.log_level.clone(),
            dir: self.log_dir.clone(),
            echo_stderr: self.log_stderr,
        }
    }
}

fn parse_port(raw: &str) -> Result<u16> {
    raw.trim()
        .parse::<u16>()
        .map_err(|_| anyhow!("invalid PORT value `{raw}`; expected 1-65535"))
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        other => Err(anyhow!(
            "invalid boolean value `{other}`; expected true/false"
        )),
    }
}

fn absolutize(path: PathBuf, cwd: &std::path::Path) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}
