// Runtime configuration read from the environment (an optional `.env` is loaded first).

use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_LOCK_WAIT_MS: u64 = 250;
pub const DEFAULT_SERVICE_PRICE: i64 = 5000;
pub const DEFAULT_NOTIFICATION_TOPIC: &str = "workshop.notifications.v1";

#[derive(Debug, Error, PartialEq, Eq)]
#[error("{name} has an invalid value {value:?}")]
pub struct ConfigError {
    pub name: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// Longest wait for a per-key lock before a request fails as Unavailable.
    pub lock_wait: Duration,
    pub service_price: i64,
    pub notification_topic: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(error) = dotenvy::dotenv() {
            tracing::debug!(%error, "no .env file loaded");
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_addr = parse(&lookup, "BIND_ADDR", DEFAULT_BIND_ADDR.parse().ok())?;
        let lock_wait_ms: u64 = parse(&lookup, "LOCK_WAIT_MS", Some(DEFAULT_LOCK_WAIT_MS))?;
        let service_price: i64 = parse(&lookup, "SERVICE_PRICE", Some(DEFAULT_SERVICE_PRICE))?;
        if service_price < 0 {
            return Err(ConfigError {
                name: "SERVICE_PRICE",
                value: service_price.to_string(),
            });
        }
        let notification_topic = lookup("NOTIFICATION_TOPIC")
            .filter(|topic| !topic.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_NOTIFICATION_TOPIC.to_string());
        Ok(Self {
            bind_addr,
            lock_wait: Duration::from_millis(lock_wait_ms),
            service_price,
            notification_topic,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            lock_wait: Duration::from_millis(DEFAULT_LOCK_WAIT_MS),
            service_price: DEFAULT_SERVICE_PRICE,
            notification_topic: DEFAULT_NOTIFICATION_TOPIC.to_string(),
        }
    }
}

fn parse<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: Option<T>,
) -> Result<T, ConfigError> {
    match lookup(name) {
        Some(value) => value.trim().parse().map_err(|_| ConfigError { name, value }),
        None => default.ok_or(ConfigError {
            name,
            value: String::new(),
        }),
    }
}
