use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use reqwest::{redirect, Client, Response};
use watch_logging::watch_debug;

use crate::{FailureKind, FetchError, FetchMetadata, FetchOutput};

/// Transport settings. Timeouts are off by default: a slow page is waited for
/// rather than retried.
#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Option<Duration>,
    pub request_timeout: Option<Duration>,
    pub redirect_limit: usize,
    pub max_bytes: u64,
    pub allowed_content_types: Vec<String>,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: None,
            request_timeout: None,
            redirect_limit: 5,
            max_bytes: 5 * 1024 * 1024,
            allowed_content_types: vec![
                "text/html".to_string(),
                "application/xhtml+xml".to_string(),
            ],
        }
    }
}

impl FetchSettings {
    /// Compares the media type only; parameters such as `charset` are ignored.
    pub fn accepts(&self, content_type: &str) -> bool {
        let media_type = content_type.split(';').next().unwrap_or_default().trim();
        self.allowed_content_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(media_type))
    }

    fn too_large(&self, actual: u64) -> FetchError {
        FetchError::new(
            FailureKind::TooLarge {
                max_bytes: self.max_bytes,
                actual: Some(actual),
            },
            "response too large",
        )
    }
}

#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchOutput, FetchError>;
}

/// HTTP fetcher sharing one connection pool across polls.
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: Client,
    settings: FetchSettings,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let mut builder =
            Client::builder().redirect(redirect::Policy::limited(settings.redirect_limit));
        if let Some(timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { client, settings })
    }

    fn check_headers(&self, response: &Response) -> Result<Option<String>, FetchError> {
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }
        if let Some(declared) = response.content_length() {
            if declared > self.settings.max_bytes {
                return Err(self.settings.too_large(declared));
            }
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(ToOwned::to_owned);
        match content_type {
            Some(ct) if !self.settings.accepts(&ct) => Err(FetchError::new(
                FailureKind::UnsupportedContentType { content_type: ct },
                "unsupported content type",
            )),
            other => Ok(other),
        }
    }

    /// Streams the body, giving up as soon as it exceeds the size cap.
    async fn read_body(&self, response: Response) -> Result<Vec<u8>, FetchError> {
        let mut body = Vec::new();
        let mut chunks = response.bytes_stream();
        while let Some(chunk) = chunks.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let len = (body.len() + chunk.len()) as u64;
            if len > self.settings.max_bytes {
                return Err(self.settings.too_large(len));
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}

#[async_trait::async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchOutput, FetchError> {
        let target = reqwest::Url::parse(url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;

        watch_debug!("GET {}", target);
        let response = self
            .client
            .get(target)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let content_type = self.check_headers(&response)?;
        let final_url = response.url().to_string();
        let bytes = self.read_body(response).await?;
        watch_debug!("{} bytes from {}", bytes.len(), final_url);

        Ok(FetchOutput {
            metadata: FetchMetadata {
                final_url,
                content_type,
                byte_len: bytes.len() as u64,
            },
            bytes,
        })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    let kind = if err.is_timeout() {
        FailureKind::Timeout
    } else if err.is_redirect() {
        FailureKind::RedirectLimitExceeded
    } else {
        FailureKind::Network
    };
    FetchError::new(kind, err.to_string())
}
