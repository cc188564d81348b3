use log::debug;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::Method;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

use crate::domain::models::{Episode, EpisodeFile, Series};

#[derive(Debug, Error)]
pub enum SonarrError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Sonarr API error on {endpoint}: HTTP {status} - {message}")]
    Api {
        endpoint: String,
        status: u16,
        message: String,
    },

    #[error("Unexpected response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SonarrError>;

/// The Sonarr calls the pruner needs.
pub trait SonarrApi {
    fn list_series(&self) -> Result<Vec<Series>>;
    fn list_episodes(&self, series_id: u64) -> Result<Vec<Episode>>;
    fn get_episode_file(&self, episode_file_id: u64) -> Result<EpisodeFile>;
    fn delete_episode_file(&self, episode_file_id: u64) -> Result<()>;
    fn update_episode(&self, episode: &Episode) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct SonarrClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl SonarrClient {
    pub fn new(hostname: &str, api_key: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: hostname.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/api/{}", self.base_url, endpoint)
    }

    fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        let url = self.url(endpoint);
        debug!("Sending API request {method} {url}");
        self.client
            .request(method, url)
            .header("X-Api-Key", &self.api_key)
    }

    fn send(&self, endpoint: &str, request: RequestBuilder) -> Result<String> {
        let response = request.send()?;
        let status = response.status();
        let text = response.text()?;

        if !status.is_success() {
            return Err(SonarrError::Api {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                message: text,
            });
        }

        Ok(text)
    }

    fn get<T: DeserializeOwned>(&self, endpoint: &str, query: &[(&str, String)]) -> Result<T> {
        let request = self.request(Method::GET, endpoint).query(query);
        let text = self.send(endpoint, request)?;
        serde_json::from_str(&text).map_err(|source| SonarrError::Decode {
            endpoint: endpoint.to_string(),
            source,
        })
    }
}

impl SonarrApi for SonarrClient {
    fn list_series(&self) -> Result<Vec<Series>> {
        self.get("series", &[])
    }

    fn list_episodes(&self, series_id: u64) -> Result<Vec<Episode>> {
        self.get("episode", &[("seriesId", series_id.to_string())])
    }

    fn get_episode_file(&self, episode_file_id: u64) -> Result<EpisodeFile> {
        self.get(&format!("episodefile/{episode_file_id}"), &[])
    }

    fn delete_episode_file(&self, episode_file_id: u64) -> Result<()> {
        let endpoint = format!("episodefile/{episode_file_id}");
        let request = self.request(Method::DELETE, &endpoint);
        self.send(&endpoint, request)?;
        Ok(())
    }

    fn update_episode(&self, episode: &Episode) -> Result<()> {
        let body = serde_json::to_string(episode).map_err(SonarrError::Encode)?;
        let request = self
            .request(Method::PUT, "episode")
            .header("Content-Type", "application/json")
            .body(body);
        self.send("episode", request)?;
        Ok(())
    }
}
