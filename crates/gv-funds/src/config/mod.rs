use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use chrono::Duration;

use crate::funds::RateLimitPolicy;

/// Deployment stage the matcher runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Everything the API process reads from the environment (and `.env`, when present).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub catalog: CatalogConfig,
    pub quiz: QuizConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            environment: AppEnvironment::parse(&var_or("APP_ENV", "development")),
            server: ServerConfig::from_env()?,
            telemetry: TelemetryConfig {
                log_level: var_or("APP_LOG_LEVEL", "info"),
            },
            catalog: CatalogConfig::from_env(),
            quiz: QuizConfig::from_env()?,
        })
    }
}

fn var_or(key: &str, fallback: &str) -> String {
    env::var(key).unwrap_or_else(|_| fallback.to_string())
}

/// A strictly positive integer setting, or `fallback` when the variable is unset.
fn positive_var(variable: &'static str, fallback: u32) -> Result<u32, ConfigError> {
    let Ok(value) = env::var(variable) else {
        return Ok(fallback);
    };

    match value.trim().parse::<u32>() {
        Ok(parsed) if parsed > 0 => Ok(parsed),
        _ => Err(ConfigError::InvalidRateLimit { variable, value }),
    }
}

/// HTTP listener binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let port = var_or("APP_PORT", "3000")
            .trim()
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        Ok(Self {
            host: var_or("APP_HOST", "127.0.0.1"),
            port,
        })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip = if self.host.eq_ignore_ascii_case("localhost") {
            IpAddr::from([127, 0, 0, 1])
        } else {
            self.host
                .parse()
                .map_err(|source| ConfigError::InvalidHost { source })?
        };

        Ok(SocketAddr::new(ip, self.port))
    }
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Where the fund catalog snapshot is loaded from. `None` serves the bundled sample.
#[derive(Debug, Clone, Default)]
pub struct CatalogConfig {
    pub path: Option<PathBuf>,
}

impl CatalogConfig {
    fn from_env() -> Self {
        let path = env::var("FUND_CATALOG_PATH")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);
        Self { path }
    }
}

/// Quiz submission throttling.
#[derive(Debug, Clone, Copy)]
pub struct QuizConfig {
    pub max_requests: u32,
    pub window_secs: u32,
}

impl QuizConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = RateLimitPolicy::default();
        let default_window = u32::try_from(defaults.window.num_seconds()).unwrap_or(u32::MAX);

        Ok(Self {
            max_requests: positive_var("QUIZ_RATE_LIMIT", defaults.max_requests)?,
            window_secs: positive_var("QUIZ_RATE_WINDOW_SECS", default_window)?,
        })
    }

    pub fn rate_limit_policy(&self) -> RateLimitPolicy {
        RateLimitPolicy {
            max_requests: self.max_requests,
            window: Duration::seconds(i64::from(self.window_secs)),
            ..RateLimitPolicy::default()
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidRateLimit { variable: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidRateLimit { variable, value } => write!(
                f,
                "{} must be a positive integer, got '{}'",
                variable, value
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
        }
    }
}
