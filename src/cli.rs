use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(name = "sonarr-episode-prune")]
#[command(about = "Delete and unmonitor old downloaded episodes in Sonarr, keeping the most recent ones")]
#[command(disable_help_flag = true)]
pub struct Cli {
    /// Sonarr instance hostname URL e.g. "http://127.0.0.1:8989/sonarr"
    #[arg(short = 'h', long, env = "SONARR_HOSTNAME")]
    pub hostname: Option<String>,

    /// Sonarr instance API key
    #[arg(short = 'a', long, env = "SONARR_APIKEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Comma separated list of series to prune e.g. "the-daily-show,conan-2010"
    #[arg(short = 's', long, env = "SONARR_PRUNE_SERIES")]
    pub prune_series: Option<String>,

    /// Number of episodes to keep per series [default: 30]
    #[arg(
        short = 'k',
        long,
        env = "SONARR_KEEP_EPISODES",
        allow_negative_numbers = true
    )]
    pub keep_episodes: Option<i64>,

    /// Do not delete or unmonitor any episodes
    #[arg(
        short = 'd',
        long,
        env = "DRY_RUN",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    pub dry_run: Option<bool>,

    /// Config file to read defaults from
    #[arg(short = 'c', long, env = "SONARR_PRUNE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Request timeout in seconds [default: 30]
    #[arg(short = 't', long, env = "SONARR_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Log every API request and processed episode
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    pub help: Option<bool>,
}
