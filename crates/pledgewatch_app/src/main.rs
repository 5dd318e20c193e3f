mod cli;
mod config;
mod console;
mod logging;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use pledgewatch_core::pledge_page_url;
use pledgewatch_engine::{BrowserNotifier, ReqwestFetcher, Watcher};
use watch_logging::watch_info;

use crate::cli::Cli;
use crate::config::{load_config, WatchConfig};
use crate::console::{ConsoleSelector, ConsoleSink};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => WatchConfig::default(),
    };
    cli.apply_overrides(&mut config);
    logging::initialize(cli.verbose, config.log_file.as_deref());

    let page_url = pledge_page_url(&cli.project_url).context("cannot watch this project")?;
    watch_info!("watching {}", page_url);

    let fetcher = Arc::new(
        ReqwestFetcher::new(config.fetch_settings()).context("failed to set up the HTTP client")?,
    );
    let watcher = Watcher::new(fetcher, page_url, config.watch_settings());
    let mut selector = ConsoleSelector::new(cli.criteria());

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start the async runtime")?;
    let reason = runtime.block_on(watcher.run(&mut selector, &BrowserNotifier, &ConsoleSink))?;

    watch_info!("done: {:?}", reason);
    Ok(())
}
