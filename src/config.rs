//! Cart configuration parsed from environment variables.

use std::path::PathBuf;

pub const DEFAULT_API_URL: &str = "http://localhost:3333";
pub const DEFAULT_STORAGE_PATH: &str = "cart.json";
pub const DEFAULT_STORAGE_KEY: &str = "@RocketShoes:cart";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for HttpTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    pub api_url: String,
    pub storage_path: PathBuf,
    pub storage_key: String,
    pub timeouts: HttpTimeouts,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_owned(),
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
            timeouts: HttpTimeouts::default(),
        }
    }
}

impl CartConfig {
    /// Build typed cart config from environment variables.
    ///
    /// Optional:
    /// - `CART_API_URL`: storefront API base URL
    /// - `CART_STORAGE_PATH`: JSON file backing the cart store
    /// - `CART_STORAGE_KEY`: key the cart is stored under
    /// - `CART_REQUEST_TIMEOUT_SECS`: default 10
    /// - `CART_CONNECT_TIMEOUT_SECS`: default 5
    #[must_use]
    pub fn from_env() -> Self {
        let api_url = env_string("CART_API_URL", DEFAULT_API_URL)
            .trim_end_matches('/')
            .to_owned();
        let storage_path = PathBuf::from(env_string("CART_STORAGE_PATH", DEFAULT_STORAGE_PATH));
        let storage_key = env_string("CART_STORAGE_KEY", DEFAULT_STORAGE_KEY);
        let timeouts = HttpTimeouts {
            request_secs: env_parse("CART_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse("CART_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };

        Self { api_url, storage_path, storage_key, timeouts }
    }
}

fn env_string(key: &str, default: &str) -> String {
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => v,
        _ => default.to_owned(),
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    match std::env::var(key) {
        Ok(v) => v.trim().parse::<T>().unwrap_or(default),
        Err(_) => default,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
