//! Status providers: where run snapshots come from.
//!
//! The poll loop only needs [`RunStatusProvider::fetch`]. Errors are never
//! retried here; a failed fetch ends the wait. Retrying transient transport
//! errors, if wanted, belongs inside a provider implementation.

mod http;
mod parse;
#[cfg(test)]
pub(crate) mod scripted;

use crate::status::{JobId, RunSnapshot};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

pub use http::CurlStatusProvider;

/// Failure to obtain a snapshot from the remote status API.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// libcurl reported an error (timeout, connection, DNS, ...).
    #[error("transport error: {0}")]
    Transport(#[from] curl::Error),
    /// HTTP 401 or 403.
    #[error("not authorized (HTTP {0})")]
    Unauthorized(u32),
    #[error("run not found")]
    NotFound,
    /// Any other non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
    #[error("invalid run document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    /// The blocking fetch task panicked or was cancelled.
    #[error("fetch task failed: {0}")]
    Task(String),
}

/// Source of the current status of a remote job.
#[async_trait]
pub trait RunStatusProvider: Send + Sync {
    async fn fetch(&self, job_id: &JobId) -> Result<RunSnapshot, ProviderError>;
}

#[async_trait]
impl<P: RunStatusProvider + ?Sized> RunStatusProvider for Arc<P> {
    async fn fetch(&self, job_id: &JobId) -> Result<RunSnapshot, ProviderError> {
        (**self).fetch(job_id).await
    }
}

#[async_trait]
impl<P: RunStatusProvider + ?Sized> RunStatusProvider for &P {
    async fn fetch(&self, job_id: &JobId) -> Result<RunSnapshot, ProviderError> {
        (**self).fetch(job_id).await
    }
}
