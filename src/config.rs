// src/config.rs
use anyhow::{bail, Context, Result};
use std::env;
use std::time::Duration;

pub const DEFAULT_QUOTE_URL: &str = "http://127.0.0.1:5000/quote";
pub const DEFAULT_SORT_URL: &str = "https://stocksortingservice.onrender.com/stocksort";
pub const DEFAULT_STORE_URL: &str = "http://127.0.0.1:5003";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub quote_url: String,
    pub sort_url: String,
    pub store_url: String,
    /// Deadline applied to every single request.
    pub timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = |key: &str, default: &str| -> Result<String> {
            let value = lookup(key).unwrap_or_else(|| default.to_string());
            let value = value.trim().to_string();
            if !(value.starts_with("http://") || value.starts_with("https://")) {
                bail!("Invalid {}: {}. Must be an http(s) URL", key, value);
            }
            Ok(value)
        };

        let timeout_secs = match lookup("STOCK_TRACKER_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("Invalid STOCK_TRACKER_TIMEOUT_SECS: {}", raw))?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            bail!("STOCK_TRACKER_TIMEOUT_SECS must be greater than 0");
        }

        Ok(Config {
            quote_url: url("STOCK_TRACKER_QUOTE_URL", DEFAULT_QUOTE_URL)?,
            sort_url: url("STOCK_TRACKER_SORT_URL", DEFAULT_SORT_URL)?,
            store_url: url("STOCK_TRACKER_STORE_URL", DEFAULT_STORE_URL)?,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}
