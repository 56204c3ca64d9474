//! 传输层：单次 HTTP 请求的序列化、发送与状态码判定。
//!
//! Transport layer.
//!
//! A transport performs exactly one round trip per call: it serializes a JSON
//! body, sends it to a resource inside the application's classifier
//! collection, waits for the whole response and accepts only `200`/`201`.

mod http;

#[cfg(test)]
pub(crate) mod fake;

pub use http::HttpTransport;

use crate::Result;
use serde_json::Value;
use std::fmt;

/// HTTP verbs used against the classifier collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single request against the application's classifier collection.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    pub method: Method,
    /// Path relative to `<base path>/<application id>/`, e.g. `intents/42`.
    pub resource: String,
    pub body: Value,
}

impl RequestSpec {
    pub fn new(method: Method, resource: impl Into<String>) -> Self {
        Self {
            method,
            resource: resource.into(),
            body: Value::Object(Default::default()),
        }
    }

    pub fn get(resource: impl Into<String>) -> Self {
        Self::new(Method::Get, resource)
    }

    pub fn post(resource: impl Into<String>, body: Value) -> Self {
        Self::new(Method::Post, resource).with_body(body)
    }

    pub fn delete(resource: impl Into<String>) -> Self {
        Self::new(Method::Delete, resource)
    }

    /// Replace the body. `null` is normalized to an empty object.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = match body {
            Value::Null => Value::Object(Default::default()),
            other => other,
        };
        self
    }
}

/// Sends [`RequestSpec`]s to the remote service.
///
/// Successful responses resolve to the parsed JSON payload. An empty body
/// yields `Value::Null` and a body that is not JSON yields `Value::String`,
/// regardless of the method.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn request(&self, spec: RequestSpec) -> Result<Value>;
}

/// Interpret a successful response body.
pub(crate) fn parse_payload(raw: &str) -> Value {
    if raw.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Other(String),
}
