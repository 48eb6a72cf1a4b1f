//! Client configuration — abort timeout and abort logging.

use crate::error::RequestError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default abort timeout in milliseconds.
pub const DEFAULT_ABORT_TIMEOUT_MS: u64 = 10_000;

/// Configuration held by one `AtomClient`.
///
/// No validation is performed: a zero timeout aborts every request
/// immediately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Time allowed for an exchange to settle, measured from call start.
    pub abort_timeout: Duration,
    /// Emit a diagnostic when the abort timer fires.
    pub log_abort: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            abort_timeout: Duration::from_millis(DEFAULT_ABORT_TIMEOUT_MS),
            log_abort: false,
        }
    }
}

impl ClientConfig {
    /// Apply initialization options. Absent keys keep their current value.
    pub fn apply(&mut self, options: &InitOptions) {
        if let Some(ms) = options.abort_timeout_default_value {
            self.abort_timeout = Duration::from_millis(ms);
        }
        if let Some(log) = options.log_abort_http_request {
            self.log_abort = log;
        }
    }

    /// Timeout in milliseconds, saturating at `u64::MAX`.
    pub fn abort_timeout_ms(&self) -> u64 {
        u64::try_from(self.abort_timeout.as_millis()).unwrap_or(u64::MAX)
    }
}

/// Options accepted by `AtomClient::initialize`.
///
/// Keys follow the camelCase JSON shape:
///
/// ```json
/// { "abortTimeoutDefaultValue": 5000, "logAbortHttpRequest": true }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abort_timeout_default_value: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_abort_http_request: Option<bool>,
}

impl InitOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn abort_timeout_ms(mut self, ms: u64) -> Self {
        self.abort_timeout_default_value = Some(ms);
        self
    }

    pub fn log_abort(mut self, enabled: bool) -> Self {
        self.log_abort_http_request = Some(enabled);
        self
    }

    /// Parse options from JSON text.
    pub fn from_json(json: &str) -> Result<Self, RequestError> {
        Ok(serde_json::from_str(json)?)
    }
}
