// src/config.rs
use anyhow::{anyhow, Context, Result};
use chrono::Duration;
use log::{info, warn};
use std::env;
use std::path::PathBuf;

use crate::services::catalog::Catalog;
use crate::services::numeric::ParsePolicy;
use crate::services::source::DataSource;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub data_dir: PathBuf,
    pub data_base_url: Option<String>,
    pub catalog_path: Option<PathBuf>,
    pub parse_policy: ParsePolicy,
    pub data_ttl: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            port: 3030,
            data_dir: PathBuf::from("data"),
            data_base_url: None,
            catalog_path: None,
            parse_policy: ParsePolicy::Strict,
            data_ttl: Duration::minutes(60),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl AppConfig {
    /// Read settings from the environment (and `.env`, if present).
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        let defaults = AppConfig::default();

        let port = match non_empty_var("PORT") {
            Some(port) => port.trim().parse::<u16>().context("PORT must be a number")?,
            None => {
                warn!("$PORT not set, defaulting to {}", defaults.port);
                defaults.port
            }
        };

        let parse_policy = match non_empty_var("PARSE_POLICY") {
            Some(policy) => policy.parse::<ParsePolicy>().map_err(|e| anyhow!(e))?,
            None => defaults.parse_policy,
        };

        let data_ttl = match non_empty_var("DATA_TTL_MINUTES") {
            Some(minutes) => Duration::minutes(
                minutes.trim().parse::<i64>().context("DATA_TTL_MINUTES must be a whole number")?,
            ),
            None => defaults.data_ttl,
        };

        let config = AppConfig {
            port,
            data_dir: non_empty_var("DATA_DIR").map(PathBuf::from).unwrap_or(defaults.data_dir),
            data_base_url: non_empty_var("DATA_BASE_URL"),
            catalog_path: non_empty_var("CATALOG_PATH").map(PathBuf::from),
            parse_policy,
            data_ttl,
        };
        info!("Configuration loaded: {:?}", config);
        Ok(config)
    }

    /// The HTTP base URL wins over the local directory when both are set.
    pub fn data_source(&self) -> DataSource {
        match &self.data_base_url {
            Some(url) => DataSource::http(url.clone()),
            None => DataSource::directory(self.data_dir.clone()),
        }
    }

    pub fn load_catalog(&self) -> Result<Catalog> {
        match &self.catalog_path {
            Some(path) => Catalog::from_file(path),
            None => Ok(Catalog::builtin()),
        }
    }
}
