mod cli;
mod config;
mod domain;
mod infra;
mod workflows;

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;
use std::env;

use cli::Cli;
use config::Settings;
use infra::sonarr::SonarrClient;
use workflows::pruner;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let mut builder = pretty_env_logger::formatted_timed_builder();
    builder.filter_level(if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    });
    if let Ok(filters) = env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();
}

fn run(cli: Cli) -> Result<()> {
    let settings = Settings::from_cli(&cli)?;
    let client = SonarrClient::new(
        &settings.hostname,
        settings.api_key.clone(),
        settings.timeout,
    )?;

    pruner::run(&client, &settings)?;
    Ok(())
}
