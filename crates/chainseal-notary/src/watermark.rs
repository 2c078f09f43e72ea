//! # Watermarks — Validity Windows and Algorithm Versioning
//!
//! A watermark tags a key, certificate, or seal with its validity window
//! and the version of the signing scheme that produced it. Every validator
//! in the crate checks liveness through the watermark; an expired object
//! fails verification no matter how good its signatures are.
//!
//! The algorithm version is a forward/backward compatibility guard: a
//! verifier that does not recognize the version reports
//! `"watermark.algorithm"` instead of silently mis-verifying with the wrong
//! primitives.

use serde::{Deserialize, Serialize};

use chainseal_core::Timestamp;

use crate::report::ErrorReport;

/// Validity preset: one minute.
pub const VALID_FOR_ONE_MINUTE: u64 = 60;
/// Validity preset: one hour.
pub const VALID_FOR_ONE_HOUR: u64 = VALID_FOR_ONE_MINUTE * 60;
/// Validity preset: one day.
pub const VALID_FOR_ONE_DAY: u64 = VALID_FOR_ONE_HOUR * 24;
/// Validity preset: one week.
pub const VALID_FOR_ONE_WEEK: u64 = VALID_FOR_ONE_DAY * 7;
/// Validity preset: one month (30 days).
pub const VALID_FOR_ONE_MONTH: u64 = VALID_FOR_ONE_DAY * 30;
/// Validity preset: one year (365 days).
pub const VALID_FOR_ONE_YEAR: u64 = VALID_FOR_ONE_DAY * 365;
/// Sentinel: never expires.
pub const VALID_FOR_FOREVER: u64 = u64::MAX;

/// The signing/hash scheme version this implementation produces and
/// recognizes: Ed25519 signatures over JCS canonical bytes, SHA-256
/// content digests.
pub const SIGNING_ALGORITHM_VERSION: &str = "ed25519-sha256-v1";

/// A validity window plus algorithm-version tag.
///
/// Immutable once created; `expires_at = None` means the object never
/// expires. Invariant: when present, `expires_at >= created_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Watermark {
    /// Version of the signing/hash scheme that produced the tagged object.
    #[serde(rename = "algorithmVersion")]
    pub algorithm_version: String,
    /// When the tagged object was created.
    #[serde(rename = "createdAt")]
    pub created_at: Timestamp,
    /// When the tagged object stops being valid; `None` = never.
    #[serde(rename = "expiresAt")]
    pub expires_at: Option<Timestamp>,
}

/// Generate a watermark valid for `seconds_to_live` seconds from now.
///
/// The [`VALID_FOR_FOREVER`] sentinel yields a watermark that never
/// expires. Lifetimes beyond the representable timestamp range are also
/// treated as unbounded.
pub fn generate_watermark(seconds_to_live: u64) -> Watermark {
    let created_at = Timestamp::now();
    let expires_at = if seconds_to_live == VALID_FOR_FOREVER {
        None
    } else {
        created_at.checked_add_secs(seconds_to_live)
    };
    Watermark {
        algorithm_version: SIGNING_ALGORITHM_VERSION.to_string(),
        created_at,
        expires_at,
    }
}

/// Check that a watermark is still live and was produced by a recognized
/// scheme. Findings are appended to `report`; nothing is raised here.
pub fn validate_watermark(watermark: &Watermark, report: &mut ErrorReport) {
    if let Some(expires_at) = watermark.expires_at {
        if Timestamp::now() > expires_at {
            report.report(
                "watermark.expired",
                format!("expired at {expires_at}"),
            );
        }
    }
    if watermark.algorithm_version != SIGNING_ALGORITHM_VERSION {
        report.report(
            "watermark.algorithm",
            format!(
                "unrecognized algorithm version {:?}",
                watermark.algorithm_version
            ),
        );
    }
}
