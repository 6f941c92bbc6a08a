//! Endpoint descriptors and query-string assembly.
//!
//! An `Endpoint` is the path + method + body + headers bundle describing one
//! outbound call. It is built per call and consumed by
//! `ArenaClient::build`, which resolves it against the base URL.

use serde::Serialize;
use url::form_urlencoded;

use crate::error::ApiError;
use crate::http::HttpMethod;

/// Describes one outbound call relative to the configured base URL.
///
/// `path` must begin with `/` and may already carry a query string. It is
/// not validated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Endpoint {
    pub path: String,
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl Endpoint {
    /// A read (`GET`) of `path`.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(path).with_method(HttpMethod::Post)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(path).with_method(HttpMethod::Put)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(path).with_method(HttpMethod::Delete)
    }

    pub fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    /// Add a caller header. Caller headers win over the client defaults.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Attach `body` as the JSON payload.
    pub fn with_json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        self.body = Some(serde_json::to_value(body).map_err(ApiError::Encode)?);
        Ok(self)
    }
}

/// Ordered query parameters. Absent values are never written, so an
/// unset filter leaves no trace in the URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, key: &str, value: impl ToString) -> Self {
        self.pairs.push((key.to_string(), value.to_string()));
        self
    }

    pub fn push_opt<V: ToString>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.push(key, value),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// The `application/x-www-form-urlencoded` query string, without `?`.
    pub fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&self.pairs)
            .finish()
    }

    /// `path?query`, or `path` unchanged when there are no parameters.
    pub fn append_to(&self, path: &str) -> String {
        if self.is_empty() {
            return path.to_string();
        }
        let separator = if path.contains('?') { '&' } else { '?' };
        format!("{path}{separator}{}", self.encode())
    }
}
