// src/services/source.rs
use log::{error, info};
use reqwest::Client;
use std::path::PathBuf;

use super::error::LoadError;

/// Where the static CSV tables live.
#[derive(Debug, Clone)]
pub enum DataSource {
    Directory(PathBuf),
    Http { base_url: String, client: Client },
}

impl DataSource {
    pub fn directory(path: impl Into<PathBuf>) -> Self {
        DataSource::Directory(path.into())
    }

    pub fn http(base_url: impl Into<String>) -> Self {
        DataSource::Http {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    pub fn describe(&self, file_name: &str) -> String {
        match self {
            DataSource::Directory(dir) => dir.join(file_name).display().to_string(),
            DataSource::Http { base_url, .. } => format!("{}/{}", base_url, file_name),
        }
    }

    /// Fetch one table as text. Every call goes to the source; callers
    /// decide what to cache.
    pub async fn fetch_text(&self, file_name: &str) -> Result<String, LoadError> {
        let location = self.describe(file_name);
        info!("Fetching {} from {}", file_name, location);

        let result = match self {
            DataSource::Directory(dir) => tokio::fs::read_to_string(dir.join(file_name))
                .await
                .map_err(|e| LoadError::fetch(file_name, format!("{}: {}", location, e))),
            DataSource::Http { client, .. } => fetch_url(client, &location)
                .await
                .map_err(|e| LoadError::fetch(file_name, format!("{}: {}", location, e))),
        };

        if let Err(e) = &result {
            error!("{}", e);
        }
        result
    }
}

async fn fetch_url(client: &Client, url: &str) -> Result<String, reqwest::Error> {
    client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await
}
