//! Server configuration

use crate::orders::{OrderPolicy, StockPolicy, SubtotalPolicy};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | DATABASE_URL | sqlite:pos.db | SQLite database location |
/// | HTTP_HOST | 0.0.0.0 | Bind address |
/// | HTTP_PORT | 5000 | HTTP port |
/// | DB_MAX_CONNECTIONS | 5 | Connection pool bound |
/// | DB_ACQUIRE_TIMEOUT_MS | 5000 | Pool checkout wait |
/// | SHUTDOWN_TIMEOUT_MS | 10000 | Grace period for in-flight requests |
/// | LOW_STOCK_THRESHOLD | 10 | Default low-stock threshold |
/// | SUBTOTAL_POLICY | trust | `trust` or `verify` |
/// | STOCK_POLICY | allow_negative | `allow_negative` or `reject_insufficient` |
/// | ENVIRONMENT | development | development / staging / production |
/// | LOG_LEVEL | info | Default filter when RUST_LOG is unset |
/// | LOG_DIR | - | Daily-rolling log file directory |
/// | CORS_ORIGINS | - | Comma separated allow-list (unset = any origin) |
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite connection URL
    pub database_url: String,
    /// Bind address
    pub http_host: String,
    /// HTTP port
    pub http_port: u16,
    /// Maximum pooled connections
    pub db_max_connections: u32,
    /// How long a pool checkout waits before failing (milliseconds)
    pub db_acquire_timeout_ms: u64,
    /// Graceful shutdown timeout (milliseconds)
    pub shutdown_timeout_ms: u64,
    /// Default threshold for low-stock alerts and the dashboard counter
    pub low_stock_threshold: i64,
    /// Order creation policies
    pub order_policy: OrderPolicy,
    /// Environment: development | staging | production
    pub environment: String,
    /// Default log level
    pub log_level: String,
    /// Optional log file directory
    pub log_dir: Option<String>,
    /// Allowed CORS origins (empty = any)
    pub cors_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite:pos.db".into(),
            http_host: "0.0.0.0".into(),
            http_port: 5000,
            db_max_connections: 5,
            db_acquire_timeout_ms: 5000,
            shutdown_timeout_ms: 10000,
            low_stock_threshold: 10,
            order_policy: OrderPolicy::default(),
            environment: "development".into(),
            log_level: "info".into(),
            log_dir: None,
            cors_origins: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to [`Config::default`]; an unknown policy
    /// name is an error.
    pub fn from_env() -> Result<Self, BoxError> {
        let defaults = Self::default();

        let subtotal: SubtotalPolicy = match std::env::var("SUBTOTAL_POLICY") {
            Ok(v) => v.parse()?,
            Err(_) => defaults.order_policy.subtotal,
        };
        let stock: StockPolicy = match std::env::var("STOCK_POLICY") {
            Ok(v) => v.parse()?,
            Err(_) => defaults.order_policy.stock,
        };

        Ok(Self {
            database_url: std::env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            http_host: std::env::var("HTTP_HOST").unwrap_or(defaults.http_host),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.http_port),
            db_max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|p| p.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(defaults.db_max_connections),
            db_acquire_timeout_ms: std::env::var("DB_ACQUIRE_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.db_acquire_timeout_ms),
            shutdown_timeout_ms: std::env::var("SHUTDOWN_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.shutdown_timeout_ms),
            low_stock_threshold: std::env::var("LOW_STOCK_THRESHOLD")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.low_stock_threshold),
            order_policy: OrderPolicy { subtotal, stock },
            environment: std::env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            log_level: std::env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_dir: std::env::var("LOG_DIR").ok().filter(|s| !s.is_empty()),
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|v| parse_origins(&v))
                .unwrap_or_default(),
        })
    }

    /// Socket address string for the HTTP listener
    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.http_port, 5000);
        assert_eq!(config.low_stock_threshold, 10);
        assert_eq!(config.order_policy.subtotal, SubtotalPolicy::Trust);
        assert_eq!(config.order_policy.stock, StockPolicy::AllowNegative);
        assert_eq!(config.http_addr(), "0.0.0.0:5000");
        assert_eq!(config.environment, "development");
    }

    #[test]
    fn test_parse_origins() {
        assert_eq!(
            parse_origins(" http://localhost:5173, ,http://pos.local "),
            vec!["http://localhost:5173", "http://pos.local"]
        );
        assert!(parse_origins("").is_empty());
    }
}
