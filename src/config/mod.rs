//! Configuration module for the MONKI client.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Backend base URL used when neither `API_URL` nor `NEXT_PUBLIC_API_URL` is set.
pub const DEFAULT_API_URL: &str = "http://localhost:8787";

/// Default cap on an upload request body (5 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the MONKI backend
    pub api_url: String,
    /// Directory uploaded badge icons and clan emblems are written to
    pub upload_dir: PathBuf,
    /// Address to bind the upload service to
    pub bind_addr: SocketAddr,
    /// Base URL clients use to reach the upload service
    pub upload_url: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Maximum accepted size of an upload request body
    pub max_upload_bytes: usize,
    /// When set, upload routes require this exact bearer token
    pub admin_token: Option<String>,
    /// When set, the client persists its session token in this file
    pub session_file: Option<PathBuf>,
}

/// A configuration variable held a value that could not be parsed.
#[derive(Debug)]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid value for {}: {:?}", self.var, self.value)
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let api_url = env::var("API_URL")
            .or_else(|_| env::var("NEXT_PUBLIC_API_URL"))
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let upload_dir = env::var("MONKI_UPLOAD_DIR")
            .unwrap_or_else(|_| "./public/badges".to_string())
            .into();

        let bind_addr = parse_var("MONKI_BIND_ADDR", "127.0.0.1:3000")?;
        let upload_url = env::var("MONKI_UPLOAD_URL")
            .unwrap_or_else(|_| format!("http://{}", bind_addr));
        let max_upload_bytes =
            parse_var("MONKI_MAX_UPLOAD_BYTES", &DEFAULT_MAX_UPLOAD_BYTES.to_string())?;

        let log_level = env::var("MONKI_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let admin_token = env::var("MONKI_ADMIN_TOKEN")
            .ok()
            .filter(|token| !token.is_empty());
        let session_file = env::var("MONKI_SESSION_FILE").ok().map(PathBuf::from);

        Ok(Self {
            api_url,
            upload_dir,
            bind_addr,
            upload_url,
            log_level,
            max_upload_bytes,
            admin_token,
            session_file,
        })
    }
}

fn parse_var<T: std::str::FromStr>(var: &'static str, default: &str) -> Result<T, ConfigError> {
    let value = env::var(var).unwrap_or_else(|_| default.to_string());
    value.parse().map_err(|_| ConfigError { var, value })
}
