//! Application configuration loaded from environment variables.

use serde::Deserialize;

/// Longest dashboard refresh interval accepted, in seconds.
const MAX_REFRESH_INTERVAL: u64 = 3600;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Server Configuration ===
    /// Address the HTTP server binds to.
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    // === Dashboard ===
    /// Seconds between dashboard page refreshes.
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval: u64,

    // === Logging ===
    /// Enable debug logging.
    #[serde(default)]
    pub debug: bool,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_refresh_interval() -> u64 {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            refresh_interval: default_refresh_interval(),
            debug: false,
            rust_log: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.host.trim().is_empty() {
            return Err("HOST must not be empty".to_string());
        }

        if self.port == 0 {
            return Err("PORT must be non-zero".to_string());
        }

        if self.refresh_interval == 0 || self.refresh_interval > MAX_REFRESH_INTERVAL {
            return Err(format!(
                "REFRESH_INTERVAL must be between 1 and {MAX_REFRESH_INTERVAL} seconds"
            ));
        }

        Ok(())
    }

    /// `host:port` string for binding the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
