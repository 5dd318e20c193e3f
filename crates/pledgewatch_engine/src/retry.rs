use std::time::Duration;

use watch_logging::{watch_error, watch_info, watch_warn};

use crate::decode::decode_html;
use crate::fetch::Fetcher;
use crate::watcher::WatchSink;
use crate::{FetchError, WatchEvent};

/// How failed fetches are retried.
///
/// The default waits one minute between attempts and never gives up, so an
/// unattended monitor rides out outages. `max_attempts` bounds the loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub delay: Duration,
    pub max_attempts: Option<u32>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::unbounded(Duration::from_secs(60))
    }
}

impl RetryPolicy {
    pub fn unbounded(delay: Duration) -> Self {
        Self {
            delay,
            max_attempts: None,
        }
    }

    pub fn bounded(max_attempts: u32, delay: Duration) -> Self {
        Self {
            delay,
            max_attempts: Some(max_attempts),
        }
    }

    fn exhausted(&self, attempt: u32) -> bool {
        self.max_attempts.is_some_and(|max| attempt >= max)
    }
}

/// Fetches and decodes `url`, retrying every failure under `policy`.
///
/// Transport, HTTP and decoding failures are all retried the same way. An
/// error is only returned once a bounded policy runs out of attempts.
pub async fn fetch_page(
    fetcher: &dyn Fetcher,
    url: &str,
    policy: &RetryPolicy,
    sink: &dyn WatchSink,
) -> Result<String, FetchError> {
    let mut attempt: u32 = 0;
    loop {
        attempt = attempt.saturating_add(1);
        let error = match fetch_once(fetcher, url).await {
            Ok(html) => return Ok(html),
            Err(error) => error,
        };

        if policy.exhausted(attempt) {
            watch_error!("giving up on {} after {} attempts: {}", url, attempt, error);
            return Err(error);
        }

        watch_warn!(
            "fetch attempt {} for {} failed: {}; retrying in {:?}",
            attempt,
            url,
            error,
            policy.delay
        );
        sink.emit(WatchEvent::FetchFailed {
            attempt,
            error,
            retry_in: policy.delay,
        });
        tokio::time::sleep(policy.delay).await;
    }
}

async fn fetch_once(fetcher: &dyn Fetcher, url: &str) -> Result<String, FetchError> {
    let output = fetcher.fetch(url).await?;
    if output.metadata.final_url != url {
        watch_info!("{} redirected to {}", url, output.metadata.final_url);
    }
    let decoded = decode_html(&output.bytes, output.metadata.content_type.as_deref())?;
    Ok(decoded.html)
}
