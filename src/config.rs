//! Runtime configuration.
//!
//! Every option can be given as a flag or through its `STOREFRONT_*`
//! environment variable.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::catalog::CatalogClientConfig;

#[derive(Debug, Clone, Parser)]
#[command(name = "storefront", version, about = "Storefront backend for the product catalog")]
pub struct Config {
    /// Base URL of the remote product catalog
    #[arg(long, env = "STOREFRONT_CATALOG_URL", default_value = "https://dummyjson.com")]
    pub catalog_url: String,

    /// Address the HTTP server listens on
    #[arg(long, env = "STOREFRONT_BIND", default_value = "0.0.0.0:8000")]
    pub bind: SocketAddr,

    /// Directory holding the persisted cart
    #[arg(long, env = "STOREFRONT_DATA_DIR", default_value = ".storefront")]
    pub data_dir: PathBuf,

    /// Products per listing page
    #[arg(long, env = "STOREFRONT_PAGE_SIZE", default_value_t = 20,
          value_parser = clap::value_parser!(u64).range(1..))]
    pub page_size: u64,

    /// Catalog request timeout in milliseconds
    #[arg(long, env = "STOREFRONT_REQUEST_TIMEOUT_MS", default_value_t = 10_000)]
    pub request_timeout_ms: u64,

    /// Simulated order processing time in milliseconds
    #[arg(long, env = "STOREFRONT_CHECKOUT_DELAY_MS", default_value_t = 1_500)]
    pub checkout_delay_ms: u64,

    /// Shopper listing views held in memory
    #[arg(long, env = "STOREFRONT_MAX_SESSIONS", default_value_t = 10_000,
          value_parser = clap::value_parser!(u64).range(1..))]
    pub max_sessions: u64,
}

impl Config {
    pub fn catalog(&self) -> CatalogClientConfig {
        CatalogClientConfig {
            base_url: self.catalog_url.clone(),
            timeout: Duration::from_millis(self.request_timeout_ms),
            user_agent: Some(concat!("storefront/", env!("CARGO_PKG_VERSION")).to_string()),
        }
    }

    pub fn checkout_delay(&self) -> Duration {
        Duration::from_millis(self.checkout_delay_ms)
    }

    pub fn max_sessions(&self) -> usize {
        usize::try_from(self.max_sessions).unwrap_or(usize::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_catalog_conventions() {
        let config = Config::try_parse_from(["storefront"]).unwrap();
        assert_eq!(config.page_size, 20);
        assert_eq!(config.catalog().timeout, Duration::from_secs(10));
        assert_eq!(config.checkout_delay(), Duration::from_millis(1500));
        assert_eq!(config.max_sessions(), 10_000);
    }

    #[test]
    fn zero_page_size_is_rejected() {
        assert!(Config::try_parse_from(["storefront", "--page-size", "0"]).is_err());
    }

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "storefront",
            "--catalog-url",
            "http://localhost:9000",
            "--page-size",
            "12",
        ])
        .unwrap();
        assert_eq!(config.catalog().base_url, "http://localhost:9000");
        assert_eq!(config.page_size, 12);
    }
}
