//! One HTTP exchange and its abort timer.
//!
//! Every call to `AtomClient::request` opens its own `Exchange`. The response
//! future and the timer are raced; whichever finishes first settles the
//! exchange and the other is dropped, so no timer outlives its call and two
//! concurrent calls never share completion state.

use crate::config::ClientConfig;
use crate::error::RequestError;
use crate::http::method::HttpMethod;
use crate::http::request::{Payload, RequestDescriptor};

use futures_util::future::{select, Either};
use reqwest::{Client, RequestBuilder, StatusCode};
use std::pin::pin;
use tracing;

/// Lifecycle of an exchange: `Idle → Sent → {Succeeded | Failed | Aborted}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeState {
    Idle,
    Sent,
    Succeeded,
    Failed,
    Aborted,
}

impl ExchangeState {
    pub fn is_settled(&self) -> bool {
        matches!(
            self,
            ExchangeState::Succeeded | ExchangeState::Failed | ExchangeState::Aborted
        )
    }

    fn can_transition_to(&self, next: ExchangeState) -> bool {
        match (self, next) {
            (ExchangeState::Idle, ExchangeState::Sent) => true,
            (ExchangeState::Sent, next) => next.is_settled(),
            _ => false,
        }
    }
}

/// Final state of an exchange together with its result.
#[derive(Debug)]
pub struct Settled {
    pub state: ExchangeState,
    pub result: Result<String, RequestError>,
}

/// Method, URL and state of one exchange.
struct Lifecycle {
    method: HttpMethod,
    url: String,
    state: ExchangeState,
}

impl Lifecycle {
    fn transition(&mut self, next: ExchangeState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal exchange transition {:?} -> {:?}",
            self.state,
            next
        );
        tracing::trace!(from = ?self.state, to = ?next, "exchange {} {}", self.method, self.url);
        self.state = next;
    }
}

/// A single request, opened but not yet sent.
pub struct Exchange {
    lifecycle: Lifecycle,
    builder: RequestBuilder,
}

impl Exchange {
    /// Prepare the request: method, URL, default content type plus caller
    /// headers, and the wire body.
    pub fn open(client: &Client, descriptor: RequestDescriptor) -> Result<Self, RequestError> {
        let headers = descriptor.header_map()?;
        let mut builder = client
            .request(descriptor.method.into(), &descriptor.url)
            .headers(headers);

        if let Some(body) = descriptor.data.as_ref().and_then(Payload::wire_body) {
            builder = builder.body(body.to_owned());
        }

        Ok(Self {
            lifecycle: Lifecycle {
                method: descriptor.method,
                url: descriptor.url,
                state: ExchangeState::Idle,
            },
            builder,
        })
    }

    pub fn state(&self) -> ExchangeState {
        self.lifecycle.state
    }

    /// Send the request and wait for it to settle or for the abort timer.
    pub async fn send(self, config: &ClientConfig) -> Settled {
        let Exchange {
            mut lifecycle,
            builder,
        } = self;
        lifecycle.transition(ExchangeState::Sent);

        let response = pin!(async move {
            let resp = builder.send().await?;
            let status = resp.status();
            let body = if status == StatusCode::OK {
                resp.text().await?
            } else {
                resp.text().await.unwrap_or_default()
            };
            Ok::<_, reqwest::Error>((status, body))
        });
        let timer = futures_timer::Delay::new(config.abort_timeout);

        let (state, result) = match select(response, timer).await {
            Either::Left((Ok((status, body)), _timer)) if status == StatusCode::OK => {
                tracing::info!(
                    method = %lifecycle.method,
                    "server request completed, URL: {}",
                    lifecycle.url
                );
                (ExchangeState::Succeeded, Ok(body))
            }
            Either::Left((Ok((status, body)), _timer)) => {
                tracing::error!(
                    method = %lifecycle.method,
                    status = status.as_u16(),
                    "Unexpected status from {}",
                    lifecycle.url
                );
                (
                    ExchangeState::Failed,
                    Err(RequestError::Status {
                        status: status.as_u16(),
                        body,
                    }),
                )
            }
            Either::Left((Err(e), _timer)) => {
                tracing::error!(
                    method = %lifecycle.method,
                    error = %e,
                    "Transport failure for {}",
                    lifecycle.url
                );
                (ExchangeState::Failed, Err(RequestError::Transport(e)))
            }
            Either::Right(((), _response)) => {
                if config.log_abort {
                    tracing::error!(
                        method = %lifecycle.method,
                        timeout_ms = config.abort_timeout_ms(),
                        "abort http request: {}",
                        lifecycle.url
                    );
                }
                (
                    ExchangeState::Aborted,
                    Err(RequestError::Aborted {
                        after: config.abort_timeout,
                    }),
                )
            }
        };

        lifecycle.transition(state);
        Settled { state, result }
    }
}
