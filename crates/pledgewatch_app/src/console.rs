use std::fmt::Display;
use std::io::{self, BufRead, Write};

use chrono::{DateTime, Local, TimeZone};
use pledgewatch_core::{
    apply_criteria, menu_lines, parse_menu_choice, ExitReason, RewardRecord, Selection,
    SelectionCriteria, TierRemaining,
};
use pledgewatch_engine::{Selector, WatchEvent, WatchSink};
use watch_logging::watch_error;

/// Prints watcher progress for the operator.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl WatchSink for ConsoleSink {
    fn emit(&self, event: WatchEvent) {
        match event {
            WatchEvent::FetchFailed {
                error, retry_in, ..
            } => {
                println!("{error}");
                println!("Retrying in {} seconds", retry_in.as_secs());
            }
            WatchEvent::Scanned { .. } => {}
            WatchEvent::Remaining(tiers) => println!("{}", status_line(&Local::now(), &tiers)),
            WatchEvent::StatusChanged(change) => println!("Status changed! ({})", change.id),
            WatchEvent::Finished(reason) => println!("{}", farewell(reason)),
        }
    }
}

fn farewell(reason: ExitReason) -> &'static str {
    match reason {
        ExitReason::NothingToTrack => "No unavailable limited rewards for this project",
        ExitReason::NothingSelected => "No pledge levels selected",
        ExitReason::AllResolved => "Every watched pledge level has changed",
    }
}

/// `"October 18, 2026 03:15 PM  [$75: 3 left, ...]"`
pub fn status_line<Tz>(at: &DateTime<Tz>, tiers: &[TierRemaining]) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let listed: Vec<String> = tiers
        .iter()
        .map(|tier| format!("${}: {}", tier.value, tier.remaining.trim()))
        .collect();
    format!("{}  [{}]", at.format("%B %d, %Y %I:%M %p"), listed.join(", "))
}

/// Applies the command-line criteria, falling back to a numbered menu on stdin.
pub struct ConsoleSelector {
    criteria: SelectionCriteria,
}

impl ConsoleSelector {
    pub fn new(criteria: SelectionCriteria) -> Self {
        Self { criteria }
    }
}

impl Selector for ConsoleSelector {
    fn choose(&mut self, candidates: &[RewardRecord]) -> Vec<RewardRecord> {
        match apply_criteria(candidates, &self.criteria) {
            Selection::Chosen(selected) => selected,
            Selection::Prompt => {
                let stdin = io::stdin();
                match prompt_menu(candidates, stdin.lock(), io::stdout()) {
                    Ok(selected) => selected,
                    Err(err) => {
                        watch_error!("menu input failed: {}", err);
                        Vec::new()
                    }
                }
            }
        }
    }
}

/// Shows the menu and asks until the answer parses. End of input selects nothing.
pub fn prompt_menu<R, W>(
    candidates: &[RewardRecord],
    mut input: R,
    mut output: W,
) -> io::Result<Vec<RewardRecord>>
where
    R: BufRead,
    W: Write,
{
    for line in menu_lines(candidates) {
        writeln!(output, "{line}")?;
    }

    let mut answer = String::new();
    loop {
        write!(output, "\nSelect pledge levels: ")?;
        output.flush()?;

        answer.clear();
        if input.read_line(&mut answer)? == 0 {
            return Ok(Vec::new());
        }
        match parse_menu_choice(&answer, candidates.len()) {
            Ok(picks) => {
                return Ok(picks.into_iter().map(|idx| candidates[idx].clone()).collect());
            }
            Err(err) => writeln!(output, "{err}")?,
        }
    }
}
