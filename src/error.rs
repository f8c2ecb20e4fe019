//! Client error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackError {
    /// The carrier display name is not in the registry. Raised before any
    /// request is sent.
    #[error("no carrier code found for {name:?}, check the carrier name")]
    CarrierNotFound { name: String },

    /// The provider answered but signaled a business failure. Message and
    /// return code are carried verbatim.
    #[error("provider rejected the request: {message}")]
    Rejected { message: String, code: Option<i32> },

    /// Connection, timeout, or other transport-level failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A response or callback payload could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),
}

impl TrackError {
    /// Provider return code, when the provider reported one.
    pub fn return_code(&self) -> Option<i32> {
        match self {
            TrackError::Rejected { code, .. } => *code,
            _ => None,
        }
    }
}

impl From<serde_json::Error> for TrackError {
    fn from(e: serde_json::Error) -> Self {
        TrackError::Decode(e.to_string())
    }
}
