//! # Configuration Module
//!
//! This module handles runtime configuration for the stats gatherer.
//!
//! ## Configuration Fields
//!
//! - **RethinkDB connection**: host (default `localhost`), driver port (default `28015`),
//!   optional auth key
//! - **Collection settings**: Poll interval
//! - **Output settings**: Optional JSON export file path, optional publish endpoint
//!
//! The configured host serves double duty: it is where the collector connects, and it is the
//! string matched against each cluster member's canonical addresses to determine which member
//! this collector is physically attached to.

use serde::{
    Deserialize,
    Serialize,
};
use std::time::Duration;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 28015;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub auth_key: Option<String>,
    pub poll_interval: Duration,
    pub output_file: Option<String>,
    pub publish_url: Option<String>,
}

impl Config {
    pub fn new(
        host: String,
        port: u16,
        auth_key: Option<String>,
        poll_interval: Duration,
        output_file: Option<String>,
        publish_url: Option<String>,
    ) -> Self {
        // An empty auth key means authentication is disabled.
        let auth_key = auth_key.filter(|key| !key.is_empty());

        Self {
            host,
            port,
            auth_key,
            poll_interval,
            output_file,
            publish_url,
        }
    }

    /// The `host:port` address the ReQL client connects to.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(
            DEFAULT_HOST.to_string(),
            DEFAULT_PORT,
            None,
            Duration::from_secs(60),
            None,
            None,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn addr_joins_host_and_port() {
        let config = Config::default();
        assert_eq!(config.addr(), "localhost:28015");
    }

    #[test]
    fn empty_auth_key_is_disabled() {
        let config = Config::new(
            "db.internal".to_string(),
            28015,
            Some(String::new()),
            Duration::from_secs(60),
            None,
            None,
        );
        assert_eq!(config.auth_key, None);
    }

    #[test]
    fn non_empty_auth_key_is_kept() {
        let config = Config::new(
            "db.internal".to_string(),
            28015,
            Some("hunter2".to_string()),
            Duration::from_secs(60),
            None,
            None,
        );
        assert_eq!(config.auth_key.as_deref(), Some("hunter2"));
    }
}
