//! Environment-backed runtime settings.
//!
//! Every setting has a default so a bare `garage-rewards` invocation comes up
//! on a local `SQLite` file; missing variables log at info level and fall
//! back rather than aborting startup.

use std::env;
use tracing::{info, warn};

/// Default listen port.
const DEFAULT_PORT: u16 = 8080;
/// Default `SQLite` database location; `mode=rwc` creates the file on first run.
const DEFAULT_DATABASE_URL: &str = "sqlite://data/garage_rewards.sqlite?mode=rwc";
/// Default bootstrap file location.
const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Runtime settings resolved from the environment.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Port the HTTP surface listens on
    pub port: u16,
    /// Database connection URL
    pub database_url: String,
    /// Path of the TOML bootstrap file
    pub config_path: String,
}

impl Settings {
    /// Resolves all settings from the environment, falling back to defaults.
    #[must_use]
    pub fn load() -> Self {
        let port = match env_or("GARAGE_PORT", &DEFAULT_PORT.to_string()).parse() {
            Ok(port) => port,
            Err(err) => {
                warn!("Invalid GARAGE_PORT value ({err}), using default {DEFAULT_PORT}");
                DEFAULT_PORT
            }
        };

        Self {
            port,
            database_url: env_or("DATABASE_URL", DEFAULT_DATABASE_URL),
            config_path: env_or("CONFIG_PATH", DEFAULT_CONFIG_PATH),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    })
}
