//! Request descriptions.

use std::collections::BTreeMap;

use reqwest::Method;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use super::error::RequestError;

/// Header name to header value, as supplied by callers.
pub type Headers = BTreeMap<String, String>;

/// Method used when a description does not name one.
pub const DEFAULT_METHOD: &str = "GET";

/// Everything needed to issue one request: URL, method and headers.
///
/// The body travels separately so the same description shape serves every verb.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestDescription {
    /// Absolute, scheme-qualified URL.
    pub url: String,
    /// HTTP method; `None` or empty means `GET`.
    pub method: Option<String>,
    /// Request headers; empty by default.
    pub headers: Headers,
}

impl RequestDescription {
    /// Creates a `GET` description with no headers.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Sets the method.
    #[must_use]
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Replaces all headers.
    #[must_use]
    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }

    /// Adds or replaces a single header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// The method that will be sent, falling back to [`DEFAULT_METHOD`].
    #[must_use]
    pub fn method(&self) -> &str {
        self.method
            .as_deref()
            .filter(|method| !method.is_empty())
            .unwrap_or(DEFAULT_METHOD)
    }

    /// Parses the method into an upper-cased HTTP method.
    pub(crate) fn http_method(&self) -> Result<Method, RequestError> {
        let raw = self.method();
        Method::from_bytes(raw.to_ascii_uppercase().as_bytes())
            .map_err(|_| RequestError::invalid_method(raw))
    }

    /// Converts the caller's headers into a validated header map.
    pub(crate) fn header_map(&self) -> Result<HeaderMap, RequestError> {
        let mut map = HeaderMap::with_capacity(self.headers.len());
        for (name, value) in &self.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| RequestError::invalid_header(name.as_str()))?;
            let header_value =
                HeaderValue::from_str(value).map_err(|_| RequestError::invalid_header(name.as_str()))?;
            map.insert(header_name, header_value);
        }
        Ok(map)
    }
}

/// Body to write for a request, if any.
///
/// An empty string counts as no body at all.
pub(crate) fn effective_body(body: Option<&str>) -> Option<&str> {
    body.filter(|body| !body.is_empty())
}
