use anyhow::{bail, Context, Result};
use regex::Regex;
use reqwest::Url;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cli::Cli;

const DEFAULT_KEEP_EPISODES: i64 = 30;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    hostname: Option<String>,
    api_key: Option<String>,
    prune_series: Option<String>,
    keep_episodes: Option<i64>,
    dry_run: Option<bool>,
    timeout_secs: Option<u64>,
}

/// Validated run configuration, read-only once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub hostname: String,
    pub api_key: String,
    pub prune_series: Vec<String>,
    pub keep_episodes: usize,
    pub dry_run: bool,
    pub timeout: Duration,
}

impl Settings {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => load_config_file(path)?,
            None => {
                let path = get_config_path();
                if path.exists() {
                    load_config_file(&path)?
                } else {
                    ConfigFile::default()
                }
            }
        };
        Self::resolve(cli, file)
    }

    fn resolve(cli: &Cli, file: ConfigFile) -> Result<Self> {
        let Some(hostname) = cli.hostname.clone().or(file.hostname) else {
            bail!("Sonarr hostname not set. Pass --hostname, set SONARR_HOSTNAME or add hostname to the config file");
        };
        let Some(api_key) = cli.api_key.clone().or(file.api_key) else {
            bail!("Sonarr API key not set. Pass --api-key, set SONARR_APIKEY or add api_key to the config file");
        };
        let Some(prune_series) = cli.prune_series.clone().or(file.prune_series) else {
            bail!("No series to prune. Pass --prune-series, set SONARR_PRUNE_SERIES or add prune_series to the config file");
        };

        let keep_episodes = cli
            .keep_episodes
            .or(file.keep_episodes)
            .unwrap_or(DEFAULT_KEEP_EPISODES);
        let timeout_secs = cli
            .timeout
            .or(file.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            bail!("Timeout must be at least one second");
        }

        Ok(Self {
            hostname: validate_hostname(&hostname)?,
            api_key: validate_api_key(&api_key)?,
            prune_series: parse_series_list(&prune_series)?,
            keep_episodes: validate_keep_episodes(keep_episodes)?,
            dry_run: cli.dry_run.or(file.dry_run).unwrap_or(false),
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

pub fn validate_hostname(value: &str) -> Result<String> {
    let url = Url::parse(value).with_context(|| format!("{value} is not a valid URL"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!(
            "invalid URL scheme ({}).  Only HTTP URLs are allowed",
            url.scheme()
        );
    }
    Ok(value.trim_end_matches('/').to_string())
}

pub fn validate_api_key(value: &str) -> Result<String> {
    let re = Regex::new(r"^[0-9a-z]{32}$")?;
    if !re.is_match(value) {
        bail!("API key is not a 32-character string");
    }
    Ok(value.to_string())
}

/// Splits a comma separated slug list, keeping the first occurrence of each slug.
pub fn parse_series_list(value: &str) -> Result<Vec<String>> {
    let re = Regex::new(r"^[a-z0-9-]+(,[a-z0-9-]+)*$")?;
    if !re.is_match(value) {
        bail!("{value} is not a valid series list");
    }

    let mut series: Vec<String> = Vec::new();
    for slug in value.split(',') {
        if !series.iter().any(|s| s == slug) {
            series.push(slug.to_string());
        }
    }
    Ok(series)
}

pub fn validate_keep_episodes(value: i64) -> Result<usize> {
    if value < 0 {
        bail!("keep episodes must not be negative (got {value})");
    }
    Ok(usize::try_from(value)?)
}

fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    Ok(config)
}

fn get_config_dir_path() -> PathBuf {
    xdir::config()
        .map(|path| path.join("sonarr-episode-prune"))
        // If the standard path could not be found (e.g.`$HOME` is not set),
        // default to the current directory.
        .unwrap_or_default()
}

fn get_config_path() -> PathBuf {
    get_config_dir_path().join("config.toml")
}
