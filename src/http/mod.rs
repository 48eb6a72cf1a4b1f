//! HTTP layer — request descriptors and per-call exchanges with an abort timer.

pub mod exchange;
pub mod method;
pub mod request;

pub use exchange::{Exchange, ExchangeState, Settled};
pub use method::HttpMethod;
pub use request::{Payload, RequestDescriptor, DEFAULT_CONTENT_TYPE};
