//! Decoding of push-callback payloads.

use serde::Deserialize;

use crate::error::TrackError;
use crate::models::{RawLogEntry, TrackingResult, TrackingState};

#[derive(Debug, Deserialize)]
struct CallbackPayload {
    #[serde(rename = "lastResult")]
    last_result: LastResult,
}

#[derive(Debug, Deserialize)]
struct LastResult {
    state: i64,
    #[serde(default)]
    ischeck: i64,
    #[serde(default)]
    data: Vec<RawLogEntry>,
}

/// Decode the body the provider POSTs to a registered callback URL.
///
/// The payload carries the same log-record shape as a direct query response,
/// wrapped in a `lastResult` envelope, plus the `ischeck` signed marker.
/// Malformed payloads are an integration problem and come back as
/// [`TrackError::Decode`].
pub fn decode_callback(payload: &str) -> Result<TrackingResult, TrackError> {
    let parsed: CallbackPayload = serde_json::from_str(payload)?;
    let last = parsed.last_result;

    let mut logs = Vec::with_capacity(last.data.len());
    for raw in last.data {
        logs.push(raw.into_entry()?);
    }

    Ok(TrackingResult {
        state: TrackingState::from_code(last.state)?,
        is_signed: last.ischeck != 0,
        logs,
    })
}
