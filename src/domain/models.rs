use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    pub id: u64,
    pub title_slug: String,
    #[serde(default)]
    pub title: String,
}

/// An episode record as returned by `GET /api/episode`.
///
/// Fields this tool does not care about are kept in `extra` so the record
/// can be sent back with `PUT /api/episode` unchanged apart from `monitored`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    pub id: u64,
    #[serde(default)]
    pub series_id: u64,
    pub season_number: u32,
    pub episode_number: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub has_file: bool,
    #[serde(default)]
    pub monitored: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode_file_id: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Episode {
    /// The backing file, if the episode is downloaded. Sonarr reports `0`
    /// when there is none.
    pub fn file_id(&self) -> Option<u64> {
        match self.episode_file_id {
            Some(id) if self.has_file && id != 0 => Some(id),
            _ => None,
        }
    }

    pub fn code(&self) -> String {
        format!("s{:02}e{:02}", self.season_number, self.episode_number)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeFile {
    pub id: u64,
    pub relative_path: Option<String>,
    pub size: Option<u64>,
}
