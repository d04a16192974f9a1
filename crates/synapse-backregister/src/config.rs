//! Configuration for the registration front end.

use anyhow::{bail, Context, Result};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

/// Prefix shared by every environment variable this service reads.
const ENV_PREFIX: &str = "SYNAPSE";

/// Service configuration.
///
/// Built once at startup and never mutated. The shared secret is wrapped in
/// `SecretString` so it is redacted from `Debug` output.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Registration shared secret configured on the homeserver (`SYNAPSE_SECRET`)
    pub secret: SecretString,

    /// Homeserver base URL (`SYNAPSE_SERVER`)
    pub server: String,

    /// Listener configuration
    #[serde(default)]
    pub listen: ListenConfig,

    /// Outbound call configuration
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListenConfig {
    /// Listen address
    #[serde(default = "default_listen_addr")]
    pub addr: String,

    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    /// Total time allowed for one registration call
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,

    /// Time allowed to establish the connection
    #[serde(default = "default_connect_timeout", with = "humantime_serde")]
    pub connect_timeout: Duration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    /// Form submissions accepted per minute across all clients
    #[serde(default = "default_submissions_per_minute")]
    pub submissions_per_minute: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl ListenConfig {
    /// Socket address to bind.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .addr
            .parse()
            .with_context(|| format!("invalid SYNAPSE_LISTEN__ADDR: {:?}", self.addr))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            addr: default_listen_addr(),
            port: default_port(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            connect_timeout: default_connect_timeout(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            submissions_per_minute: default_submissions_per_minute(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_listen_addr() -> String {
    "0.0.0.0".into()
}

fn default_port() -> u16 {
    8000
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_connect_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_submissions_per_minute() -> u32 {
    10
}

fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// `SYNAPSE_SECRET` and `SYNAPSE_SERVER` are required. Nested settings use
    /// a double underscore, e.g. `SYNAPSE_LISTEN__PORT=8000`.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        Self::from_environment(Self::environment())
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(false)
    }

    fn from_environment(environment: config::Environment) -> Result<Self> {
        let config: Self = config::Config::builder()
            .add_source(environment)
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration (SYNAPSE_SECRET and SYNAPSE_SERVER are required)")?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.secret.expose_secret().is_empty() {
            bail!("must specify SYNAPSE_SECRET environment variable");
        }
        if self.server.trim().is_empty() {
            bail!("must specify SYNAPSE_SERVER environment variable");
        }
        self.listen.socket_addr()?;
        Ok(())
    }
}
