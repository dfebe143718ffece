//! Job identifier and point-in-time status snapshot.

use serde::Deserialize;
use std::fmt;

/// Opaque identifier of a remote job. Supplied by the caller, never generated here.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for JobId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for JobId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// One read of a job's state as reported by the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RunSnapshot {
    /// Raw status string, exactly as the remote reported it.
    pub status: String,
    /// Exit code of the user command; only present once the job has completed.
    #[serde(default, alias = "user_exit_code")]
    pub exit_code: Option<i64>,
}

impl RunSnapshot {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            exit_code: None,
        }
    }

    pub fn with_exit_code(mut self, code: i64) -> Self {
        self.exit_code = Some(code);
        self
    }
}

impl fmt::Display for RunSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.exit_code {
            Some(code) => write!(f, "status={} exit_code={}", self.status, code),
            None => write!(f, "status={}", self.status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_display_includes_exit_code_when_present() {
        assert_eq!(RunSnapshot::new("running").to_string(), "status=running");
        assert_eq!(
            RunSnapshot::new("complete").with_exit_code(2).to_string(),
            "status=complete exit_code=2"
        );
    }

    #[test]
    fn snapshot_accepts_both_exit_code_spellings() {
        let a: RunSnapshot = serde_json::from_str(r#"{"status":"complete","user_exit_code":0}"#).unwrap();
        let b: RunSnapshot = serde_json::from_str(r#"{"status":"complete","exit_code":0}"#).unwrap();
        assert_eq!(a, b);
        let c: RunSnapshot = serde_json::from_str(r#"{"status":"running"}"#).unwrap();
        assert_eq!(c.exit_code, None);
    }
}
