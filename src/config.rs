use clap::{Args, Parser, ValueEnum};

#[derive(Clone, Debug, Default, Parser)]
#[command(version, about, long_about = None)]
pub struct Config {
    #[command(flatten)]
    pub server: ServerConfig,

    #[command(flatten)]
    pub database: DatabaseConfig,

    #[command(flatten)]
    pub auth: AuthConfig,

    #[command(flatten)]
    pub health: HealthConfig,

    #[command(flatten)]
    pub telemetry: TelemetryConfig,
}

#[derive(Clone, Debug, Args)]
pub struct ServerConfig {
    /// Host to listen on
    #[arg(long, env = "SMS_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port for the webhook and listing API
    #[arg(long, env = "SMS_PORT", default_value_t = 3000)]
    pub port: u16,

    /// Port for the liveness and readiness probes
    #[arg(long, env = "SMS_MGMT_PORT", default_value_t = 9090)]
    pub mgmt_port: u16,

    /// How long to wait for in-flight requests during shutdown
    #[arg(long, env = "SMS_SHUTDOWN_TIMEOUT_SECS", default_value_t = 5)]
    pub shutdown_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_string(), port: 3000, mgmt_port: 9090, shutdown_timeout_secs: 5 }
    }
}

#[derive(Clone, Debug, Args)]
pub struct DatabaseConfig {
    /// Postgres connection URL. Without it, writes are acknowledged but not persisted.
    #[arg(long = "database-url", env = "SMS_DATABASE_URL")]
    pub url: Option<String>,

    /// Maximum number of pooled connections
    #[arg(long = "db-max-connections", env = "SMS_DB_MAX_CONNECTIONS", default_value_t = 10)]
    pub max_connections: u32,

    /// How long a request may wait for a pooled connection
    #[arg(long = "db-acquire-timeout-secs", env = "SMS_DB_ACQUIRE_TIMEOUT_SECS", default_value_t = 5)]
    pub acquire_timeout_secs: u64,

    /// Apply embedded migrations at startup
    #[arg(
        long,
        env = "SMS_RUN_MIGRATIONS",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { url: None, max_connections: 10, acquire_timeout_secs: 5, run_migrations: true }
    }
}

#[derive(Clone, Debug, Default, Args)]
pub struct AuthConfig {
    /// Shared secret required by the listing endpoint
    #[arg(long, env = "SMS_API_KEY")]
    pub api_key: Option<String>,
}

impl AuthConfig {
    /// The configured key, treating an empty value as unset.
    #[must_use]
    pub fn expected_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.is_empty())
    }
}

#[derive(Clone, Debug, Args)]
pub struct HealthConfig {
    /// Timeout for the storage readiness check
    #[arg(long = "health-timeout-ms", env = "SMS_HEALTH_TIMEOUT_MS", default_value_t = 2000)]
    pub timeout_ms: u64,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self { timeout_ms: 2000 }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Debug, Default, Args)]
pub struct TelemetryConfig {
    /// Log output format
    #[arg(long, env = "SMS_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// OTLP/HTTP collector endpoint for traces and metrics
    #[arg(long, env = "SMS_OTLP_ENDPOINT")]
    pub otlp_endpoint: Option<String>,
}

impl Config {
    #[must_use]
    pub fn load() -> Self {
        Self::parse()
    }
}
