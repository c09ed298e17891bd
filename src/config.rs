use crate::api_client::DEFAULT_API_BASE;
use std::net::SocketAddr;
use thiserror::Error;

pub const MAX_LOOKBACK_DAYS: u32 = 365;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Service settings, read from the environment (and `.env` when present)
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub coingecko_api_base: String,
    pub coingecko_api_key: Option<String>,
    pub default_lookback_days: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = match lookup("BIND_ADDR") {
            Some(value) => value.parse::<SocketAddr>().map_err(|_| ConfigError::Invalid {
                key: "BIND_ADDR",
                value,
            })?,
            None => SocketAddr::from(([0, 0, 0, 0], 3000)),
        };

        let default_lookback_days = match lookup("DEFAULT_LOOKBACK_DAYS") {
            Some(value) => match value.parse::<u32>() {
                Ok(days) if (1..=MAX_LOOKBACK_DAYS).contains(&days) => days,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "DEFAULT_LOOKBACK_DAYS",
                        value,
                    })
                }
            },
            None => 30,
        };

        Ok(Self {
            bind_addr,
            coingecko_api_base: lookup("COINGECKO_API_BASE")
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            coingecko_api_key: lookup("COINGECKO_API_KEY").filter(|key| !key.is_empty()),
            default_lookback_days,
        })
    }
}
