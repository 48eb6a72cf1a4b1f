//! Request descriptors — one per call, consumed by `AtomClient::request`.

use crate::error::RequestError;
use crate::http::method::HttpMethod;
use serde::Serialize;

/// Header set on every request before caller headers are applied.
pub const DEFAULT_CONTENT_TYPE: (&str, &str) = ("Content-Type", "application/json");

/// Data attached to a request.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// JSON text, written to the wire verbatim.
    Json(String),
    /// Caller data carried without serialization. Not written to the wire.
    Raw(serde_json::Value),
}

impl Payload {
    /// The bytes sent as the request body, if any.
    pub fn wire_body(&self) -> Option<&str> {
        match self {
            Payload::Json(text) => Some(text),
            Payload::Raw(_) => None,
        }
    }
}

/// A single HTTP call: method, URL, optional data and extra headers.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub url: String,
    pub method: HttpMethod,
    pub data: Option<Payload>,
    /// Caller headers in the order they are applied.
    pub headers: Vec<(String, String)>,
}

impl RequestDescriptor {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method,
            data: None,
            headers: Vec::new(),
        }
    }

    /// Build the descriptor a convenience method sends.
    ///
    /// POST and PUT serialize `data` to JSON text. GET and DELETE keep it
    /// as an unserialized value, so nothing reaches the wire for them.
    pub fn for_method<T: Serialize + ?Sized>(
        method: HttpMethod,
        url: &str,
        data: &T,
    ) -> Result<Self, RequestError> {
        let payload = if method.serializes_body() {
            Payload::Json(serde_json::to_string(data)?)
        } else {
            Payload::Raw(serde_json::to_value(data)?)
        };
        Ok(Self::new(method, url).data(payload))
    }

    pub fn data(mut self, payload: Payload) -> Self {
        self.data = Some(payload);
        self
    }

    /// Set the body to JSON text as given.
    pub fn json_text(self, text: impl Into<String>) -> Self {
        self.data(Payload::Json(text.into()))
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.headers
            .extend(headers.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Default content type followed by caller headers. A later entry with
    /// the same name (case insensitive) replaces an earlier one.
    pub fn header_map(&self) -> Result<reqwest::header::HeaderMap, RequestError> {
        use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

        let mut map = HeaderMap::new();
        let defaults = std::iter::once((DEFAULT_CONTENT_TYPE.0, DEFAULT_CONTENT_TYPE.1));
        let caller = self.headers.iter().map(|(k, v)| (k.as_str(), v.as_str()));

        for (name, value) in defaults.chain(caller) {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| RequestError::InvalidHeader(name.to_string()))?;
            let value = HeaderValue::from_str(value)
                .map_err(|_| RequestError::InvalidHeader(format!("{}: {}", name, value)))?;
            map.insert(name, value);
        }
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_post_and_put_serialize_data() {
        for method in [HttpMethod::Post, HttpMethod::Put] {
            let desc = RequestDescriptor::for_method(method, "http://x/a", &json!({"a": 1})).unwrap();
            assert_eq!(desc.data, Some(Payload::Json(r#"{"a":1}"#.to_string())));
            assert_eq!(desc.data.as_ref().unwrap().wire_body(), Some(r#"{"a":1}"#));
        }
    }

    #[test]
    fn test_get_and_delete_pass_data_unserialized() {
        for method in [HttpMethod::Get, HttpMethod::Delete] {
            let desc = RequestDescriptor::for_method(method, "http://x/a", &json!({"a": 1})).unwrap();
            assert_eq!(desc.data, Some(Payload::Raw(json!({"a": 1}))));
            assert_eq!(desc.data.as_ref().unwrap().wire_body(), None);
        }
    }

    #[test]
    fn test_header_map_keeps_default_content_type() {
        let desc = RequestDescriptor::new(HttpMethod::Get, "http://x").header("X-Test", "1");
        let map = desc.header_map().unwrap();
        assert_eq!(map.get("content-type").unwrap(), "application/json");
        assert_eq!(map.get("x-test").unwrap(), "1");
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_caller_header_overrides_default() {
        let desc = RequestDescriptor::new(HttpMethod::Post, "http://x")
            .headers([("content-type", "text/plain"), ("X-A", "1"), ("x-a", "2")]);
        let map = desc.header_map().unwrap();
        assert_eq!(map.get("Content-Type").unwrap(), "text/plain");
        assert_eq!(map.get_all("X-A").iter().count(), 1);
        assert_eq!(map.get("X-A").unwrap(), "2");
    }

    #[test]
    fn test_invalid_header_name_rejected() {
        let desc = RequestDescriptor::new(HttpMethod::Get, "http://x").header("bad name", "1");
        let err = desc.header_map().unwrap_err();
        assert!(matches!(err, RequestError::InvalidHeader(_)));
        assert!(!err.is_network());
    }
}
