//! Buffered responses returned by the request executor.

use std::borrow::Cow;
use std::collections::BTreeMap;

use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use serde::{Serialize, Serializer};

/// A fully received response: status, headers and the body as text.
///
/// The body is never interpreted by the executor; [`json`](Self::json) is there
/// for callers that want to.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers as returned by the transport (names lower-cased,
    /// repeated headers kept as multiple values).
    pub headers: HeaderMap,
    /// The complete response body.
    pub data: String,
}

impl HttpResponse {
    /// First value of a header, looked up case-insensitively.
    ///
    /// Returns `None` when the header is absent or not valid visible ASCII.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// Whether the status is in the 2xx range.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Deserializes the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error when the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.data)
    }

    /// Headers grouped by name, with every value kept in arrival order.
    #[must_use]
    pub fn header_values(&self) -> BTreeMap<&str, Vec<Cow<'_, str>>> {
        let mut grouped: BTreeMap<&str, Vec<Cow<'_, str>>> = BTreeMap::new();
        for (name, value) in &self.headers {
            grouped
                .entry(name.as_str())
                .or_default()
                .push(String::from_utf8_lossy(value.as_bytes()));
        }
        grouped
    }
}

#[derive(Serialize)]
struct HttpResponseView<'a> {
    status: u16,
    headers: BTreeMap<&'a str, Vec<Cow<'a, str>>>,
    data: &'a str,
}

impl Serialize for HttpResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        HttpResponseView {
            status: self.status,
            headers: self.header_values(),
            data: &self.data,
        }
        .serialize(serializer)
    }
}
