use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    pub supplier: rove_supplier::SupplierConfig,
    #[serde(default)]
    pub booking: BookingSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

/// No url means no Postgres: the service falls back to the in-memory store.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct DatabaseConfig {
    pub url: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BookingSettings {
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    #[serde(default = "default_poll_max_attempts")]
    pub poll_max_attempts: u32,
    #[serde(default = "default_cancel_retry_delay_ms")]
    pub cancel_retry_delay_ms: u64,
}

fn default_poll_interval_ms() -> u64 { 1_000 }
fn default_poll_max_attempts() -> u32 { 120 }
fn default_cancel_retry_delay_ms() -> u64 { 2_000 }

impl Default for BookingSettings {
    fn default() -> Self {
        BookingSettings {
            poll_interval_ms: default_poll_interval_ms(),
            poll_max_attempts: default_poll_max_attempts(),
            cancel_retry_delay_ms: default_cancel_retry_delay_ms(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Add in the current environment file (optional)
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in to git
            .add_source(config::File::with_name("config/local").required(false))
            // Environment overrides, e.g. ROVE__SUPPLIER__API_KEY=...
            .add_source(config::Environment::with_prefix("ROVE").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
