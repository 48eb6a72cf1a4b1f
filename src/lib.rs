//! # atom-request
//!
//! A small HTTP client with `get`/`post`/`put`/`delete` helpers and an abort
//! timeout, for native and WASM targets.
//!
//! ## Architecture
//!
//! 1. **Core** — Errors and configuration (always available, WASM-safe)
//! 2. **HTTP** — Request descriptors and per-call exchanges raced against an
//!    abort timer
//! 3. **Client** — `AtomClient` with result-returning and logging helpers
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use atom_request::prelude::*;
//!
//! let client = AtomClient::builder()
//!     .abort_timeout_ms(5_000)
//!     .log_abort(true)
//!     .build()?;
//!
//! // Failures are logged and turned into `None`.
//! let body = client.post("https://example.com/api/items", &serde_json::json!({"a": 1})).await;
//!
//! // Or handle them yourself.
//! match client.try_get("https://example.com/api/items", &()).await {
//!     Ok(text) => println!("{text}"),
//!     Err(e) => eprintln!("{e}"), // "Network error"
//! }
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Request error types.
pub mod error;

/// Client configuration and initialization options.
pub mod config;

// ── Layer 2: HTTP ────────────────────────────────────────────────────────────

// The abort timer uses futures-timer, whose default backend spawns a thread.
#[cfg(all(target_arch = "wasm32", feature = "http", not(feature = "wasm")))]
compile_error!("wasm32 builds need the `wasm` feature for the browser timer backend");

/// Request descriptors and exchanges.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 3: Client ──────────────────────────────────────────────────────────

/// `AtomClient` — the primary entry point.
#[cfg(feature = "http")]
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    pub use crate::config::{ClientConfig, InitOptions, DEFAULT_ABORT_TIMEOUT_MS};
    pub use crate::error::{RequestError, NETWORK_ERROR};

    #[cfg(feature = "http")]
    pub use crate::client::{AtomClient, AtomClientBuilder};
    #[cfg(feature = "http")]
    pub use crate::http::{HttpMethod, Payload, RequestDescriptor};
}
