//! HTTP status provider backed by libcurl.
//!
//! Each fetch is one `GET <base>/runs/<id>` (or `<base>/users/<owner>/runs/<id>`)
//! performed with the curl crate inside `spawn_blocking`.

use super::parse::parse_run_document;
use super::{ProviderError, RunStatusProvider};
use crate::config::ApiConfig;
use crate::status::{JobId, RunSnapshot};
use async_trait::async_trait;
use std::time::Duration;
use url::Url;

/// Fetches run documents from a JSON status API.
#[derive(Debug, Clone)]
pub struct CurlStatusProvider {
    base_url: Url,
    owner: Option<String>,
    token: Option<String>,
    connect_timeout: Duration,
    timeout: Duration,
}

impl CurlStatusProvider {
    pub fn new(base_url: &str) -> Result<Self, ProviderError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ProviderError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ProviderError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self {
            base_url,
            owner: None,
            token: None,
            connect_timeout: Duration::from_secs(15),
            timeout: Duration::from_secs(30),
        })
    }

    /// Build from the `[api]` config section; the token is read from the
    /// configured environment variable.
    pub fn from_config(cfg: &ApiConfig) -> Result<Self, ProviderError> {
        let mut provider = Self::new(&cfg.base_url)?;
        provider.owner = cfg.owner.clone();
        provider.token = cfg.token();
        provider.connect_timeout = Duration::from_secs(cfg.connect_timeout_secs);
        provider.timeout = Duration::from_secs(cfg.timeout_secs);
        Ok(provider)
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// URL of the run document for `job_id`. Path segments are percent-encoded.
    /// A blank id is rejected, since it would address the run collection.
    pub fn run_url(&self, job_id: &JobId) -> Result<Url, ProviderError> {
        if job_id.as_str().trim().is_empty() {
            return Err(ProviderError::InvalidUrl(format!(
                "empty job id under {}",
                self.base_url
            )));
        }
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ProviderError::InvalidUrl(self.base_url.to_string()))?;
            segments.pop_if_empty();
            if let Some(owner) = &self.owner {
                segments.push("users").push(owner);
            }
            segments.push("runs").push(job_id.as_str());
        }
        Ok(url)
    }
}

#[async_trait]
impl RunStatusProvider for CurlStatusProvider {
    async fn fetch(&self, job_id: &JobId) -> Result<RunSnapshot, ProviderError> {
        let url = self.run_url(job_id)?;
        let token = self.token.clone();
        let connect_timeout = self.connect_timeout;
        let timeout = self.timeout;
        tokio::task::spawn_blocking(move || {
            get_run_blocking(url.as_str(), token.as_deref(), connect_timeout, timeout)
        })
        .await
        .map_err(|e| ProviderError::Task(e.to_string()))?
    }
}

/// Performs the GET in the current thread and maps the response to a snapshot.
fn get_run_blocking(
    url: &str,
    token: Option<&str>,
    connect_timeout: Duration,
    timeout: Duration,
) -> Result<RunSnapshot, ProviderError> {
    let mut body: Vec<u8> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(5)?;
    easy.connect_timeout(connect_timeout)?;
    easy.timeout(timeout)?;

    let mut list = curl::easy::List::new();
    list.append("Accept: application/json")?;
    if let Some(token) = token {
        list.append(&format!("Authorization: Bearer {}", token.trim()))?;
    }
    easy.http_headers(list)?;

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let code = easy.response_code()?;
    match code {
        200..=299 => parse_run_document(&body),
        401 | 403 => Err(ProviderError::Unauthorized(code)),
        404 => Err(ProviderError::NotFound),
        _ => Err(ProviderError::Http(code)),
    }
}
