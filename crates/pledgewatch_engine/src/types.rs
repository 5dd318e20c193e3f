use std::fmt;
use std::time::Duration;

use pledgewatch_core::{ExitReason, TierChange, TierRemaining};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub bytes: Vec<u8>,
    pub metadata: FetchMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchMetadata {
    /// Where the page was actually served from, after redirects.
    pub final_url: String,
    pub content_type: Option<String>,
    pub byte_len: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    UnsupportedContentType { content_type: String },
    Decode,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::UnsupportedContentType { content_type } => {
                write!(f, "unsupported content type {content_type}")
            }
            FailureKind::Decode => write!(f, "decode error"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// Progress of the watcher, for console output and tests.
#[derive(Debug, Clone, PartialEq)]
pub enum WatchEvent {
    /// A fetch failed and will be retried after `retry_in`.
    FetchFailed {
        attempt: u32,
        error: FetchError,
        retry_in: Duration,
    },
    /// A snapshot was scanned; `records` limited tiers were found.
    Scanned { records: usize },
    /// Remaining-slot text of the tracked tiers after a comparison pass.
    Remaining(Vec<TierRemaining>),
    StatusChanged(TierChange),
    Finished(ExitReason),
}
