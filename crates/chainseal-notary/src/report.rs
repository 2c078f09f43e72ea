//! # Error Reports — Multi-Error Accumulation
//!
//! Every validator in this crate takes a caller-owned `ErrorReport` and
//! only appends to it; no validator clears a report or returns early on the
//! first problem. A verification pass over a document can therefore surface
//! a bad hash, an expired watermark, and a broken signature in one pass.
//!
//! Accumulated errors become a fatal failure only at the explicit
//! aggregation point, [`ensure_valid()`]. Key-management transactions that
//! fail irrecoverably (wrong password, malformed persisted key) bypass
//! accumulation and surface immediately via [`transaction_failure()`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use chainseal_core::Timestamp;

/// A single validation finding: an error key plus a human-readable detail.
///
/// Keys are stable dotted identifiers (`"watermark.expired"`,
/// `"certificate.sequence"`, …); details are free-form diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEntry {
    /// Stable error key.
    pub key: String,
    /// Human-readable detail for this finding.
    pub detail: String,
}

/// An insertion-ordered collection of validation findings.
///
/// Empty report ⇔ fully valid. Validators append entries in the order they
/// discover problems, so reports are deterministic and reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport(Vec<ErrorEntry>);

impl ErrorReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a finding. Never removes or replaces existing entries.
    pub fn report(&mut self, key: &str, detail: impl Into<String>) {
        self.0.push(ErrorEntry {
            key: key.to_string(),
            detail: detail.into(),
        });
    }

    /// Returns true if no errors were found.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of findings.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate the findings in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = &ErrorEntry> {
        self.0.iter()
    }

    /// Returns true if any finding carries the given error key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.iter().any(|e| e.key == key)
    }
}

impl std::fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for entry in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", entry.key, entry.detail)?;
            first = false;
        }
        Ok(())
    }
}

/// The two boundary failure kinds of the notarization protocol.
///
/// Both carry the moment of failure and the full report, so a caller (or a
/// log line) sees every finding at once rather than only the first.
#[derive(Error, Debug)]
pub enum NotaryError {
    /// Accumulated validation errors raised at an aggregation point.
    #[error("validation failed [{message_tag}] at {timestamp}: {report}")]
    Validation {
        /// Tag identifying the validation pass that failed.
        message_tag: String,
        /// When the failure was raised.
        timestamp: Timestamp,
        /// All findings from the pass.
        report: ErrorReport,
    },

    /// An irrecoverable key-management transaction failure (wrong password,
    /// malformed persisted key, corrupt key material).
    #[error("key transaction failed [{message_tag}] at {timestamp}: {report}")]
    Transaction {
        /// Tag identifying the transaction that failed.
        message_tag: String,
        /// When the failure was raised.
        timestamp: Timestamp,
        /// The findings describing the fault.
        report: ErrorReport,
    },
}

impl NotaryError {
    /// The report carried by either failure kind.
    pub fn report(&self) -> &ErrorReport {
        match self {
            Self::Validation { report, .. } | Self::Transaction { report, .. } => report,
        }
    }
}

/// The single point where accumulated errors become a fatal failure.
///
/// Returns `Ok(())` for an empty report; otherwise raises a
/// [`NotaryError::Validation`] carrying the tag, a creation timestamp, and
/// a copy of the full report. The caller keeps its report and may inspect
/// partial results first.
pub fn ensure_valid(message_tag: &str, report: &ErrorReport) -> Result<(), NotaryError> {
    if report.is_empty() {
        Ok(())
    } else {
        Err(NotaryError::Validation {
            message_tag: message_tag.to_string(),
            timestamp: Timestamp::now(),
            report: report.clone(),
        })
    }
}

/// Build a one-finding [`NotaryError::Transaction`] for an irrecoverable
/// key-management fault. There is no retry policy: the same call with the
/// same input will fail the same way.
pub fn transaction_failure(
    message_tag: &str,
    key: &str,
    detail: impl Into<String>,
) -> NotaryError {
    let mut report = ErrorReport::new();
    report.report(key, detail);
    NotaryError::Transaction {
        message_tag: message_tag.to_string(),
        timestamp: Timestamp::now(),
        report,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report_is_valid() {
        let report = ErrorReport::new();
        assert!(report.is_empty());
        assert!(ensure_valid("test", &report).is_ok());
    }

    #[test]
    fn test_nonempty_report_raises() {
        let mut report = ErrorReport::new();
        report.report("watermark.expired", "expired yesterday");
        let err = ensure_valid("validateWatermark", &report).unwrap_err();
        match &err {
            NotaryError::Validation {
                message_tag,
                report,
                ..
            } => {
                assert_eq!(message_tag, "validateWatermark");
                assert!(report.contains_key("watermark.expired"));
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut report = ErrorReport::new();
        report.report("b.second", "2");
        report.report("a.first", "1");
        report.report("c.third", "3");
        let keys: Vec<&str> = report.entries().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["b.second", "a.first", "c.third"]);
    }

    #[test]
    fn test_report_only_appends() {
        let mut report = ErrorReport::new();
        report.report("x", "one");
        report.report("x", "two");
        assert_eq!(report.len(), 2);
    }

    #[test]
    fn test_display_joins_entries() {
        let mut report = ErrorReport::new();
        report.report("document.hash", "mismatch");
        report.report("document.signature", "invalid");
        assert_eq!(
            report.to_string(),
            "document.hash: mismatch; document.signature: invalid"
        );
    }

    #[test]
    fn test_transaction_failure_shape() {
        let err = transaction_failure("deserializeNotaryKey", "key.decryption", "bad password");
        match &err {
            NotaryError::Transaction { report, .. } => {
                assert_eq!(report.len(), 1);
                assert!(report.contains_key("key.decryption"));
            }
            other => panic!("expected Transaction, got {other:?}"),
        }
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut report = ErrorReport::new();
        report.report("citation.hash", "document was modified");
        let json = serde_json::to_string(&report).unwrap();
        let back: ErrorReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }
}
