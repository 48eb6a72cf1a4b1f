//! Request error types.
//!
//! Every failure of an HTTP exchange (non-200 status, transport failure,
//! abort by timeout) displays as the literal `Network error`. The variants
//! still carry the detail for callers that match on them.

use std::time::Duration;
use thiserror::Error;

/// Literal reported for every network-level failure.
pub const NETWORK_ERROR: &str = "Network error";

/// Error returned by `AtomClient::request` and the `try_*` methods.
#[derive(Error, Debug)]
pub enum RequestError {
    /// The exchange completed with a status other than 200.
    #[error("Network error")]
    Status { status: u16, body: String },

    /// The exchange failed before a status was received, or while reading
    /// the body.
    #[cfg(feature = "http")]
    #[error("Network error")]
    Transport(#[from] reqwest::Error),

    /// The abort timer fired before the exchange settled.
    #[error("Network error")]
    Aborted { after: Duration },

    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl RequestError {
    /// True for the failures that surface as `Network error`.
    pub fn is_network(&self) -> bool {
        match self {
            RequestError::Status { .. } | RequestError::Aborted { .. } => true,
            #[cfg(feature = "http")]
            RequestError::Transport(_) => true,
            _ => false,
        }
    }

    pub fn is_abort(&self) -> bool {
        matches!(self, RequestError::Aborted { .. })
    }

    /// The HTTP status, when the exchange got that far.
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
