//! Pledgewatch engine: page retrieval, markup tokenizing and the poll loop driver.
mod decode;
mod fetch;
mod notify;
mod retry;
mod tokenize;
mod types;
mod watcher;

pub use decode::{decode_html, DecodeError, DecodedHtml};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use notify::{BrowserNotifier, Notifier};
pub use retry::{fetch_page, RetryPolicy};
pub use tokenize::{for_each_tag_event, scan_document, tag_events};
pub use types::{FailureKind, FetchError, FetchMetadata, FetchOutput, WatchEvent};
pub use watcher::{ChannelWatchSink, Selector, WatchSettings, WatchSink, Watcher};
