//! JSON encoding of result records.
//!
//! Field names and nesting are the contract with playback and plotting
//! consumers; both record types serialize to a top-level JSON array.

use crate::pipeline::{RawSentenceResult, SentenceResult};

/// Pretty-printed JSON array of haptic output records.
pub fn export_json(results: &[SentenceResult]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(results)
}

/// Pretty-printed JSON array of raw score records.
pub fn export_raw_json(results: &[RawSentenceResult]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(results)
}

/// Parse a haptic output document, e.g. for a playback consumer.
pub fn import_json(json: &str) -> serde_json::Result<Vec<SentenceResult>> {
    serde_json::from_str(json)
}
