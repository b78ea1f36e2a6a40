//! Service configuration

use figment::providers::{Env, Format, Yaml};
use figment::Figment;
use serde::Deserialize;

/// Aroma explorer configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Socket address the HTTP server binds to
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// sea-orm connection URL; sqlite or postgres
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Bearer tokens that unlock write operations. Empty means the service
    /// runs read-only.
    #[serde(default)]
    pub admin_tokens: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            database_url: default_database_url(),
            admin_tokens: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration: file values first, then `AROMA_*` environment
    /// variables on top.
    pub fn load(path: Option<&str>) -> anyhow::Result<Self> {
        let mut figment = Figment::new();
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        let config = figment
            .merge(Env::prefixed("AROMA_"))
            .extract::<Self>()?;
        Ok(config)
    }
}

fn default_bind_addr() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_database_url() -> String {
    "sqlite://aroma.db?mode=rwc".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_read_only() {
        let config = Config::default();
        assert!(config.admin_tokens.is_empty());
        assert_eq!(config.bind_addr, "127.0.0.1:8080");
    }
}
