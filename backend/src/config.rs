use anyhow::{anyhow, Result};
use std::{env, fmt::Display, net::IpAddr, net::SocketAddr, str::FromStr};
use tracing::info;

/// Runtime settings, read from the environment with defaults
#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub database_url: String,
    /// Origin of the web frontend allowed by CORS
    pub cors_origin: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        Ok(Self {
            host: try_load("BABY_TRACKER_HOST", "127.0.0.1")?,
            port: try_load("BABY_TRACKER_PORT", "3000")?,
            database_url: try_load("DATABASE_URL", "sqlite:baby_tracker.db")?,
            cors_origin: try_load("BABY_TRACKER_CORS_ORIGIN", "http://localhost:8080")?,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T>
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    parse_setting(key, &raw)
}

fn parse_setting<T: FromStr>(key: &str, raw: &str) -> Result<T>
where
    T::Err: Display,
{
    raw.trim()
        .parse()
        .map_err(|e| anyhow!("Invalid {key} value '{raw}': {e}"))
}
