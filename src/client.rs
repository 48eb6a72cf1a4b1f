//! High-level client — `AtomClient` with `get`/`post`/`put`/`delete` helpers.
//!
//! The helpers come in two flavours:
//! - `try_get`, `try_post`, … return `Result<String, RequestError>`.
//! - `get`, `post`, … log any failure and return `None`.

use crate::config::{ClientConfig, InitOptions};
use crate::error::RequestError;
use crate::http::{Exchange, HttpMethod, RequestDescriptor};

use async_lock::RwLock;
use reqwest::Client;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing;

/// HTTP client with an abort timeout.
///
/// Cloning is cheap; clones share the connection pool and configuration, so
/// `initialize` on one clone applies to all of them.
pub struct AtomClient {
    http: Client,
    config: Arc<RwLock<ClientConfig>>,
}

impl AtomClient {
    /// Client with the default configuration (10 s timeout, abort logging off).
    pub fn new() -> Self {
        Self::with_config(Client::new(), ClientConfig::default())
    }

    pub fn builder() -> AtomClientBuilder {
        AtomClientBuilder::default()
    }

    fn with_config(http: Client, config: ClientConfig) -> Self {
        Self {
            http,
            config: Arc::new(RwLock::new(config)),
        }
    }

    /// Update the abort timeout and abort logging. Keys absent from
    /// `options` keep their current value. Requests already in flight keep
    /// the configuration they started with.
    pub async fn initialize(&self, options: &InitOptions) {
        let mut config = self.config.write().await;
        config.apply(options);
        tracing::debug!(
            timeout_ms = config.abort_timeout_ms(),
            log_abort = config.log_abort,
            "client initialized"
        );
    }

    /// Snapshot of the current configuration.
    pub async fn config(&self) -> ClientConfig {
        self.config.read().await.clone()
    }

    /// Send one request.
    ///
    /// Resolves with the response text on status 200. Any other status, a
    /// transport failure, or the abort timer firing yields an error that
    /// displays as `Network error`.
    ///
    /// The body is sent as given and never serialized here: `Payload::Json`
    /// text goes out verbatim, while `Payload::Raw` sends no body for any
    /// method, POST and PUT included.
    pub async fn request(&self, descriptor: RequestDescriptor) -> Result<String, RequestError> {
        let config = self.config().await;
        let exchange = Exchange::open(&self.http, descriptor)?;
        exchange.send(&config).await.result
    }

    // ── Result-returning helpers ─────────────────────────────────────────

    pub async fn try_get<T: Serialize + ?Sized>(
        &self,
        url: &str,
        data: &T,
    ) -> Result<String, RequestError> {
        self.send_with(HttpMethod::Get, url, data).await
    }

    pub async fn try_post<T: Serialize + ?Sized>(
        &self,
        url: &str,
        data: &T,
    ) -> Result<String, RequestError> {
        self.send_with(HttpMethod::Post, url, data).await
    }

    pub async fn try_put<T: Serialize + ?Sized>(
        &self,
        url: &str,
        data: &T,
    ) -> Result<String, RequestError> {
        self.send_with(HttpMethod::Put, url, data).await
    }

    pub async fn try_delete<T: Serialize + ?Sized>(
        &self,
        url: &str,
        data: &T,
    ) -> Result<String, RequestError> {
        self.send_with(HttpMethod::Delete, url, data).await
    }

    // ── Logging helpers ──────────────────────────────────────────────────

    /// GET `url`. `data` is carried unserialized and not sent.
    pub async fn get<T: Serialize + ?Sized>(&self, url: &str, data: &T) -> Option<String> {
        log_failure(url, self.try_get(url, data).await)
    }

    /// POST `data` as JSON text.
    pub async fn post<T: Serialize + ?Sized>(&self, url: &str, data: &T) -> Option<String> {
        log_failure(url, self.try_post(url, data).await)
    }

    /// PUT `data` as JSON text.
    pub async fn put<T: Serialize + ?Sized>(&self, url: &str, data: &T) -> Option<String> {
        log_failure(url, self.try_put(url, data).await)
    }

    /// DELETE `url`. `data` is carried unserialized and not sent.
    pub async fn delete<T: Serialize + ?Sized>(&self, url: &str, data: &T) -> Option<String> {
        log_failure(url, self.try_delete(url, data).await)
    }

    async fn send_with<T: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        url: &str,
        data: &T,
    ) -> Result<String, RequestError> {
        let descriptor = RequestDescriptor::for_method(method, url, data)?;
        self.request(descriptor).await
    }
}

fn log_failure(url: &str, result: Result<String, RequestError>) -> Option<String> {
    match result {
        Ok(body) => Some(body),
        Err(e) => {
            tracing::error!(error = %e, status = ?e.status(), "Request failed: {}", url);
            None
        }
    }
}

impl Default for AtomClient {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for AtomClient {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            config: self.config.clone(),
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
pub struct AtomClientBuilder {
    config: ClientConfig,
    http: Option<Client>,
}

impl AtomClientBuilder {
    pub fn abort_timeout(mut self, timeout: Duration) -> Self {
        self.config.abort_timeout = timeout;
        self
    }

    pub fn abort_timeout_ms(self, ms: u64) -> Self {
        self.abort_timeout(Duration::from_millis(ms))
    }

    pub fn log_abort(mut self, enabled: bool) -> Self {
        self.config.log_abort = enabled;
        self
    }

    /// Apply initialization options on top of what is already set.
    pub fn options(mut self, options: &InitOptions) -> Self {
        self.config.apply(options);
        self
    }

    /// Use a preconfigured `reqwest::Client` (proxies, TLS roots, …).
    pub fn http_client(mut self, client: Client) -> Self {
        self.http = Some(client);
        self
    }

    pub fn build(self) -> Result<AtomClient, RequestError> {
        let http = match self.http {
            Some(client) => client,
            None => Client::builder()
                .build()
                .map_err(|e| RequestError::Config(e.to_string()))?,
        };
        Ok(AtomClient::with_config(http, self.config))
    }
}
