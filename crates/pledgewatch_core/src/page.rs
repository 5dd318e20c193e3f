use thiserror::Error;
use url::Url;

const PLEDGE_PATH: &str = "pledge/new";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UrlError {
    #[error("invalid project url {url:?}: {reason}")]
    Invalid { url: String, reason: String },
    #[error("project url {0:?} must use http or https")]
    UnsupportedScheme(String),
}

/// URL of the pledge-editing page for a project.
///
/// Query string and fragment are dropped and `/pledge/new` is appended to the
/// project path.
pub fn pledge_page_url(project_url: &str) -> Result<String, UrlError> {
    let trimmed = project_url.trim();
    let mut url = Url::parse(trimmed).map_err(|err| UrlError::Invalid {
        url: trimmed.to_string(),
        reason: err.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(UrlError::UnsupportedScheme(trimmed.to_string()));
    }
    url.set_query(None);
    url.set_fragment(None);

    let path = url.path().trim_end_matches('/').to_string();
    url.set_path(&format!("{path}/{PLEDGE_PATH}"));
    Ok(url.into())
}
