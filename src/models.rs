//! Tracking result types shared by direct queries and callback decoding.

use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::error::TrackError;

/// Timestamp format used in the provider's `ftime` fields. Local-naive, no
/// zone information on the wire.
const FTIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parcel state as reported by the provider.
///
/// The integer mapping is fixed by the provider; integers outside it are a
/// decode error rather than an extra variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingState {
    InTransit = 0,
    Collected = 1,
    Exception = 2,
    Signed = 3,
    Returned = 4,
    Dispatching = 5,
    ReturnedToSender = 6,
}

impl TrackingState {
    pub fn from_code(code: i64) -> Result<Self, TrackError> {
        Ok(match code {
            0 => TrackingState::InTransit,
            1 => TrackingState::Collected,
            2 => TrackingState::Exception,
            3 => TrackingState::Signed,
            4 => TrackingState::Returned,
            5 => TrackingState::Dispatching,
            6 => TrackingState::ReturnedToSender,
            other => {
                return Err(TrackError::Decode(format!(
                    "unknown tracking state code {other}"
                )));
            }
        })
    }

    pub fn code(self) -> i64 {
        self as i64
    }
}

/// One line of the provider's tracking log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub time: NaiveDateTime,
    pub context: String,
}

/// Tracking status of a single parcel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingResult {
    pub state: TrackingState,
    /// True once the parcel was delivered and acknowledged. Only populated by
    /// callback decoding; direct queries leave it false.
    pub is_signed: bool,
    /// Provider order, never re-sorted. Empty when the provider sent no logs.
    pub logs: Vec<LogEntry>,
}

/// Wire shape of a log entry, identical in query responses and callback
/// payloads.
#[derive(Debug, Deserialize)]
pub(crate) struct RawLogEntry {
    #[serde(default)]
    pub ftime: String,
    #[serde(default)]
    pub context: String,
}

impl RawLogEntry {
    pub fn into_entry(self) -> Result<LogEntry, TrackError> {
        Ok(LogEntry {
            time: parse_ftime(&self.ftime)?,
            context: self.context,
        })
    }
}

pub(crate) fn parse_ftime(s: &str) -> Result<NaiveDateTime, TrackError> {
    NaiveDateTime::parse_from_str(s, FTIME_FORMAT)
        .map_err(|e| TrackError::Decode(format!("bad ftime {s:?}: {e}")))
}
