//! Parse run documents returned by the status API.

use super::ProviderError;
use crate::status::RunSnapshot;
use serde::Deserialize;

/// Either a bare run object or one wrapped as `{"run": {...}}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RunDocument {
    Wrapped { run: RunSnapshot },
    Bare(RunSnapshot),
}

/// Parse a JSON run document into a snapshot. Unknown fields are ignored.
pub(crate) fn parse_run_document(body: &[u8]) -> Result<RunSnapshot, ProviderError> {
    let doc: RunDocument = serde_json::from_slice(body)?;
    Ok(match doc {
        RunDocument::Wrapped { run } => run,
        RunDocument::Bare(run) => run,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bare_document() {
        let snap = parse_run_document(br#"{"id": 42, "status": "running"}"#).unwrap();
        assert_eq!(snap, RunSnapshot::new("running"));
    }

    #[test]
    fn parse_wrapped_document_with_exit_code() {
        let body = br#"{"run": {"id": 42, "status": "complete", "user_exit_code": 3}}"#;
        let snap = parse_run_document(body).unwrap();
        assert_eq!(snap, RunSnapshot::new("complete").with_exit_code(3));
    }

    #[test]
    fn parse_null_exit_code() {
        let snap = parse_run_document(br#"{"status": "building", "exit_code": null}"#).unwrap();
        assert_eq!(snap.exit_code, None);
    }

    #[test]
    fn parse_rejects_missing_status() {
        let err = parse_run_document(br#"{"id": 42}"#).unwrap_err();
        assert!(matches!(err, ProviderError::Parse(_)));
        assert!(parse_run_document(b"not json").is_err());
    }
}
