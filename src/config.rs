//! Configuration management for the FTP gateway
//!
//! Everything here is read once at startup. The FTP credentials are fixed for
//! the lifetime of the process and handed to the session gateway by reference.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

/// Complete gateway configuration
#[derive(Debug, Deserialize, Clone)]
pub struct GatewayConfig {
    // ═══ HTTP SURFACE ═══
    /// IP address the HTTP listener binds to
    pub bind_address: String,

    /// Port for the HTTP listener
    pub http_port: u16,

    /// Largest accepted request body (uploads), in MB
    pub max_upload_size_mb: usize,

    // ═══ REMOTE FTP SERVER ═══
    pub ftp: FtpConfig,
}

/// Connection settings for the remote FTP server
#[derive(Deserialize, Clone)]
pub struct FtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,

    /// Bound on each phase of opening a session: TCP connect, greeting, login
    pub connect_timeout_secs: u64,
}

impl GatewayConfig {
    /// Load configuration from defaults, an optional config.toml and
    /// `FTP_GATEWAY_*` environment overrides (`__` separates nested keys).
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .set_default("bind_address", "127.0.0.1")?
            .set_default("http_port", 5000)?
            .set_default("max_upload_size_mb", 100)?
            .set_default("ftp.host", "127.0.0.1")?
            .set_default("ftp.port", 21)?
            .set_default("ftp.user", "anonymous")?
            .set_default("ftp.password", "")?
            .set_default("ftp.connect_timeout_secs", 10)?
            // Docker layout first, then local development
            .add_source(File::with_name("ftp-gateway/config").required(false))
            .add_source(File::with_name("config").required(false))
            .add_source(
                Environment::with_prefix("FTP_GATEWAY")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let config: GatewayConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bind_address.trim().is_empty() {
            return Err(ConfigError::Message("bind_address cannot be empty".into()));
        }

        if self.http_port == 0 {
            return Err(ConfigError::Message("HTTP port cannot be 0".into()));
        }

        if self.max_upload_size_mb == 0 {
            return Err(ConfigError::Message(
                "max_upload_size_mb must be greater than 0".into(),
            ));
        }

        self.ftp.validate()
    }

    /// Get bind address and HTTP port as socket address
    pub fn http_socket(&self) -> String {
        format!("{}:{}", self.bind_address, self.http_port)
    }

    /// Get maximum upload size in bytes
    pub fn max_upload_size_bytes(&self) -> usize {
        self.max_upload_size_mb * 1024 * 1024
    }
}

impl FtpConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::Message("ftp.host cannot be empty".into()));
        }

        if self.port == 0 {
            return Err(ConfigError::Message("ftp.port cannot be 0".into()));
        }

        if self.user.is_empty() {
            return Err(ConfigError::Message("ftp.user cannot be empty".into()));
        }

        if self.connect_timeout_secs == 0 {
            return Err(ConfigError::Message(
                "ftp.connect_timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Get FTP host and port as `host:port`
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get connect timeout as Duration
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

// Keeps the password out of logs
impl fmt::Debug for FtpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .finish()
    }
}
