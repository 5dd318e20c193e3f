use std::collections::VecDeque;
use std::sync::{mpsc, Arc};
use std::time::Duration;

use pledgewatch_core::{update, Effect, ExitReason, Msg, RewardRecord, WatchState};
use watch_logging::{set_poll_cycle, watch_debug, watch_info};

use crate::fetch::Fetcher;
use crate::notify::Notifier;
use crate::retry::{fetch_page, RetryPolicy};
use crate::tokenize::scan_document;
use crate::{FetchError, WatchEvent};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchSettings {
    pub poll_interval: Duration,
    pub grace_delay: Duration,
    pub retry: RetryPolicy,
}

impl Default for WatchSettings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(60),
            grace_delay: Duration::from_secs(10),
            retry: RetryPolicy::default(),
        }
    }
}

pub trait WatchSink: Send + Sync {
    fn emit(&self, event: WatchEvent);
}

pub struct ChannelWatchSink {
    tx: mpsc::Sender<WatchEvent>,
}

impl ChannelWatchSink {
    pub fn new(tx: mpsc::Sender<WatchEvent>) -> Self {
        Self { tx }
    }
}

impl WatchSink for ChannelWatchSink {
    fn emit(&self, event: WatchEvent) {
        let _ = self.tx.send(event);
    }
}

/// Picks the tiers to track from the first snapshot.
pub trait Selector {
    fn choose(&mut self, candidates: &[RewardRecord]) -> Vec<RewardRecord>;
}

/// Drives the poll loop: fetch, scan, compare, and carry out the effects
/// returned by [`pledgewatch_core::update`] one after another.
pub struct Watcher {
    fetcher: Arc<dyn Fetcher>,
    page_url: String,
    settings: WatchSettings,
}

impl Watcher {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        page_url: impl Into<String>,
        settings: WatchSettings,
    ) -> Self {
        Self {
            fetcher,
            page_url: page_url.into(),
            settings,
        }
    }

    pub fn page_url(&self) -> &str {
        &self.page_url
    }

    /// Polls until every tracked tier resolved or there is nothing to track.
    ///
    /// Only a bounded retry policy can make this return an error.
    pub async fn run(
        &self,
        selector: &mut dyn Selector,
        notifier: &dyn Notifier,
        sink: &dyn WatchSink,
    ) -> Result<ExitReason, FetchError> {
        let mut state = WatchState::new();
        let mut cycle: u64 = 0;

        loop {
            cycle += 1;
            set_poll_cycle(cycle);

            let html = fetch_page(
                self.fetcher.as_ref(),
                &self.page_url,
                &self.settings.retry,
                sink,
            )
            .await?;
            let records = scan_document(&html);
            watch_debug!("found {} limited tiers", records.len());
            sink.emit(WatchEvent::Scanned {
                records: records.len(),
            });

            let (next, effects) = update(state, Msg::SnapshotScanned(records));
            state = next;
            let mut pending: VecDeque<Effect> = effects.into();

            while let Some(effect) = pending.pop_front() {
                match effect {
                    Effect::PromptSelection(candidates) => {
                        let selected = selector.choose(&candidates);
                        watch_info!(
                            "tracking {} of {} limited tiers",
                            selected.len(),
                            candidates.len()
                        );
                        let (next, effects) = update(state, Msg::SelectionMade(selected));
                        state = next;
                        pending.extend(effects);
                    }
                    Effect::ReportRemaining(tiers) => sink.emit(WatchEvent::Remaining(tiers)),
                    Effect::Notify(change) => {
                        watch_info!(
                            "tier {} changed from [{}] to [{}]",
                            change.id,
                            change.before,
                            change
                                .after
                                .as_ref()
                                .map(ToString::to_string)
                                .unwrap_or_else(|| "absent".to_string())
                        );
                        notifier.notify(&self.page_url, &change);
                        sink.emit(WatchEvent::StatusChanged(change));
                    }
                    Effect::WaitForNextPoll => {
                        tokio::time::sleep(self.settings.poll_interval).await
                    }
                    Effect::WaitForGrace => tokio::time::sleep(self.settings.grace_delay).await,
                    Effect::Exit(reason) => {
                        watch_info!("stopping: {:?}", reason);
                        sink.emit(WatchEvent::Finished(reason));
                        return Ok(reason);
                    }
                }
            }
        }
    }
}
