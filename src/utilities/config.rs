use std::env;
use std::time::Duration;

use log::error;

use crate::price_resolver::MissingPricePolicy;
use crate::utilities::constants::{
    DEFAULT_CATALOG_MAX_ATTEMPTS, DEFAULT_CATALOG_RETRY_DELAY_MS, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_WORKERS, SCRYFALL_API_URL, STORE_BASE_URL,
};
use crate::utilities::retry::RetryPolicy;

#[derive(Debug, Clone)]
pub struct Config {
    pub card_list_path: String,
    pub export: bool,
    pub export_path: String,
    pub store_base_url: String,
    pub scryfall_api_url: String,
    pub workers: usize,
    pub request_timeout_secs: u64,
    pub catalog_max_attempts: u32,
    pub catalog_retry_delay_ms: u64,
    pub missing_price_as_miss: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            card_list_path: "".to_string(),
            export: false,
            export_path: "".to_string(),
            store_base_url: STORE_BASE_URL.to_string(),
            scryfall_api_url: SCRYFALL_API_URL.to_string(),
            workers: DEFAULT_WORKERS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            catalog_max_attempts: DEFAULT_CATALOG_MAX_ATTEMPTS,
            catalog_retry_delay_ms: DEFAULT_CATALOG_RETRY_DELAY_MS,
            missing_price_as_miss: false,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        let mut config = Config::default();
        config.update_from_env();
        config
    }

    fn update_from_env(&mut self) {
        if let Ok(card_list_path) = env::var("CARD_LIST_PATH") {
            if std::path::Path::new(&card_list_path).is_file() {
                self.card_list_path = card_list_path;
            } else if !card_list_path.is_empty() {
                error!("Supplied card list path is not a file: {}", card_list_path);
                self.card_list_path = "".to_string();
            }
        }
        if let Ok(export) = env::var("EXPORT") {
            self.export = export == "1";
        }
        if let Ok(export_path) = env::var("EXPORT_PATH") {
            if !export_path.is_empty() {
                self.export = true;
                self.export_path = export_path;
            }
        }
        if let Ok(store_base_url) = env::var("STORE_BASE_URL") {
            if !store_base_url.is_empty() {
                self.store_base_url = store_base_url;
            }
        }
        if let Ok(scryfall_api_url) = env::var("SCRYFALL_API_URL") {
            if !scryfall_api_url.is_empty() {
                self.scryfall_api_url = scryfall_api_url;
            }
        }
        if let Ok(workers) = env::var("WORKERS") {
            self.workers = workers.parse().unwrap_or(DEFAULT_WORKERS).max(1);
        }
        if let Ok(timeout) = env::var("REQUEST_TIMEOUT_SECS") {
            self.request_timeout_secs = timeout.parse().unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
        }
        if let Ok(attempts) = env::var("CATALOG_MAX_ATTEMPTS") {
            self.catalog_max_attempts = attempts.parse().unwrap_or(DEFAULT_CATALOG_MAX_ATTEMPTS);
        }
        if let Ok(delay) = env::var("CATALOG_RETRY_DELAY_MS") {
            self.catalog_retry_delay_ms = delay.parse().unwrap_or(DEFAULT_CATALOG_RETRY_DELAY_MS);
        }
        if let Ok(missing_price_as_miss) = env::var("MISSING_PRICE_AS_MISS") {
            self.missing_price_as_miss = missing_price_as_miss == "1";
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn catalog_retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.catalog_max_attempts,
            Duration::from_millis(self.catalog_retry_delay_ms),
        )
    }

    pub fn missing_price_policy(&self) -> MissingPricePolicy {
        if self.missing_price_as_miss {
            MissingPricePolicy::Fallback
        } else {
            MissingPricePolicy::Zero
        }
    }
}

lazy_static::lazy_static! {
    pub static ref CONFIG: Config = Config::new();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_store_defaults() {
        let config = Config::default();
        assert_eq!(config.workers, 6);
        assert_eq!(config.request_timeout(), Duration::from_secs(20));
        assert_eq!(config.catalog_retry_policy().max_attempts, 5);
        assert_eq!(config.missing_price_policy(), MissingPricePolicy::Zero);
        assert!(!config.export);
    }

    #[test]
    fn test_missing_price_as_miss_selects_fallback() {
        let config = Config {
            missing_price_as_miss: true,
            ..Default::default()
        };
        assert_eq!(config.missing_price_policy(), MissingPricePolicy::Fallback);
    }
}
