use std::path::PathBuf;

use clap::Parser;
use pledgewatch_core::{parse_amount_arg, SelectionCriteria};

use crate::config::WatchConfig;

/// Watch a crowdfunding pledge page and open it when a limited reward frees up.
#[derive(Parser, Debug)]
#[command(name = "pledgewatch")]
#[command(version)]
#[command(long_about = "Watches the limited reward tiers of a project. Give pledge \
amounts (unique among tiers) or --id to pick tiers up front; otherwise a menu of \
limited tiers is shown. Only limited pledge levels are supported.")]
pub struct Cli {
    /// URL of the project page
    pub project_url: String,

    /// Pledge amounts to watch, e.g. 75 or $75.00
    #[arg(value_parser = parse_amount_value)]
    pub amounts: Vec<f64>,

    /// Reward id to watch, as found on the pledge page (repeatable)
    #[arg(long = "id", value_name = "ID")]
    pub ids: Vec<String>,

    /// RON configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Seconds between polls
    #[arg(long, value_name = "SECS")]
    pub poll_secs: Option<u64>,

    /// Also write logs to this file
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn criteria(&self) -> SelectionCriteria {
        SelectionCriteria::from_args(self.ids.clone(), self.amounts.clone())
    }

    pub fn apply_overrides(&self, config: &mut WatchConfig) {
        if let Some(secs) = self.poll_secs {
            config.poll_interval_secs = secs;
        }
        if let Some(path) = &self.log_file {
            config.log_file = Some(path.clone());
        }
    }
}

fn parse_amount_value(raw: &str) -> Result<f64, String> {
    parse_amount_arg(raw).map_err(|err| err.to_string())
}
