use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::collections::HashMap;

use crate::config::Settings;
use crate::domain::models::{Episode, Series};
use crate::infra::sonarr::SonarrApi;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesReport {
    pub slug: String,
    pub pruned: usize,
    pub dry_run: bool,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub reports: Vec<SeriesReport>,
    pub not_found: Vec<String>,
}

impl RunSummary {
    pub fn total_pruned(&self) -> usize {
        self.reports.iter().map(|r| r.pruned).sum()
    }
}

pub fn build_catalog(series: Vec<Series>) -> HashMap<String, Series> {
    series
        .into_iter()
        .map(|s| (s.title_slug.clone(), s))
        .collect()
}

pub fn resolve_series<'a>(
    catalog: &'a HashMap<String, Series>,
    slug: &str,
) -> Option<&'a Series> {
    let series = catalog.get(slug);
    if series.is_none() {
        warn!("Series {slug} was not found in Sonarr");
    }
    series
}

/// Downloaded episodes in (season, episode) order, minus the newest `keep_episodes`.
pub fn select_prune_set(episodes: &[Episode], keep_episodes: usize) -> Vec<&Episode> {
    let mut downloaded: Vec<&Episode> = episodes.iter().filter(|e| e.has_file).collect();
    downloaded.sort_by_key(|e| (e.season_number, e.episode_number));
    debug!("{} episodes downloaded", downloaded.len());

    let prune_count = downloaded.len().saturating_sub(keep_episodes);
    downloaded.truncate(prune_count);
    downloaded
}

pub fn prune_series(
    api: &dyn SonarrApi,
    series: &Series,
    settings: &Settings,
) -> Result<SeriesReport> {
    let episodes = api
        .list_episodes(series.id)
        .with_context(|| format!("Failed to list episodes for {}", series.title_slug))?;

    let prune_set = select_prune_set(&episodes, settings.keep_episodes);

    for episode in &prune_set {
        debug!("Processing episode {}", episode.title);

        let Some(file_id) = episode.file_id() else {
            anyhow::bail!(
                "Episode {} of {} is marked downloaded but has no file",
                episode.code(),
                series.title_slug
            );
        };

        let episode_file = api.get_episode_file(file_id).with_context(|| {
            format!(
                "Failed to fetch file for {} {}",
                series.title_slug,
                episode.code()
            )
        })?;

        if settings.dry_run {
            continue;
        }

        debug!(
            "Deleting episode {} ({}, {} bytes)",
            episode.code(),
            episode_file.relative_path.as_deref().unwrap_or("unknown path"),
            episode_file.size.unwrap_or(0)
        );
        api.delete_episode_file(episode_file.id).with_context(|| {
            format!(
                "Failed to delete file for {} {}",
                series.title_slug,
                episode.code()
            )
        })?;

        let mut unmonitored = (*episode).clone();
        unmonitored.monitored = false;
        api.update_episode(&unmonitored).with_context(|| {
            format!(
                "Failed to unmonitor {} {}",
                series.title_slug,
                episode.code()
            )
        })?;
    }

    if settings.dry_run {
        info!("Dry run set, not deleting {} episodes", prune_set.len());
    } else {
        info!("{} episodes deleted", prune_set.len());
    }

    Ok(SeriesReport {
        slug: series.title_slug.clone(),
        pruned: prune_set.len(),
        dry_run: settings.dry_run,
    })
}

pub fn run(api: &dyn SonarrApi, settings: &Settings) -> Result<RunSummary> {
    let catalog = build_catalog(api.list_series().context("Failed to list series")?);
    let mut summary = RunSummary::default();

    for slug in &settings.prune_series {
        let Some(series) = resolve_series(&catalog, slug) else {
            summary.not_found.push(slug.clone());
            continue;
        };

        info!("Checking series {slug} for any episodes to delete");
        summary.reports.push(prune_series(api, series, settings)?);
    }

    if !summary.not_found.is_empty() {
        warn!("Skipped series not found in Sonarr: {}", summary.not_found.join(","));
    }
    info!(
        "Processed {} series, {} episodes {}",
        summary.reports.len(),
        summary.total_pruned(),
        if settings.dry_run {
            "would have been deleted"
        } else {
            "deleted"
        }
    );

    Ok(summary)
}
