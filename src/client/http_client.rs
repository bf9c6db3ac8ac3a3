//! The request executor and its verb wrappers.

use futures_util::StreamExt;
use tracing::{debug, instrument};
use url::Url;

use super::error::RequestError;
use super::request::{Headers, RequestDescription, effective_body};
use super::response::HttpResponse;
use super::transport::Transports;

/// HTTP client issuing one independent transaction per call.
///
/// Holds no per-call state; cloning is cheap and clones can be used concurrently.
/// Connections are never kept between calls, redirects are returned as-is and no
/// timeout is applied.
///
/// # Example
///
/// ```no_run
/// use quixo::HttpClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = HttpClient::new();
/// let response = client.get("https://example.com/", None).await?;
/// println!("{} ({} bytes)", response.status, response.data.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    transports: Transports,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient {
    /// Creates a new client.
    ///
    /// # Panics
    ///
    /// Panics if the underlying transports cannot be built, which only happens
    /// when the TLS backend fails to initialize. Use [`try_new`](Self::try_new)
    /// to handle that case.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        Self::try_new().expect("failed to build HTTP transports with static configuration")
    }

    /// Creates a new client, reporting transport construction failures.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Client`] if a transport cannot be built.
    pub fn try_new() -> Result<Self, RequestError> {
        Ok(Self {
            transports: Transports::build()?,
        })
    }

    /// Performs exactly one HTTP transaction and buffers the whole response.
    ///
    /// `body` is written when present and non-empty; `Some("")` behaves like `None`.
    /// Any status code is a successful outcome here.
    ///
    /// # Errors
    ///
    /// - [`RequestError::InvalidUrl`], [`RequestError::InvalidMethod`] or
    ///   [`RequestError::InvalidHeader`] before any I/O happens
    /// - [`RequestError::Transport`] if the connection fails at any point,
    ///   including while the body is being received
    #[instrument(skip(self, description, body), fields(url = %description.url, method = %description.method()))]
    pub async fn request(
        &self,
        description: &RequestDescription,
        body: Option<&str>,
    ) -> Result<HttpResponse, RequestError> {
        let response = self.send(description, body).await?;

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let mut buffer = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk_result) = stream.next().await {
            let chunk = chunk_result.map_err(|e| RequestError::transport(&description.url, e))?;
            buffer.extend_from_slice(&chunk);
        }

        debug!(status, bytes = buffer.len(), "response received");

        let data = match String::from_utf8(buffer) {
            Ok(text) => text,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        };

        Ok(HttpResponse {
            status,
            headers,
            data,
        })
    }

    /// Sends a `GET` request.
    ///
    /// # Errors
    ///
    /// Same as [`request`](Self::request).
    pub async fn get(&self, url: &str, headers: Option<Headers>) -> Result<HttpResponse, RequestError> {
        self.request(&describe(url, "GET", headers), None).await
    }

    /// Sends a `POST` request with `data` as the body.
    ///
    /// # Errors
    ///
    /// Same as [`request`](Self::request).
    pub async fn post(
        &self,
        url: &str,
        data: &str,
        headers: Option<Headers>,
    ) -> Result<HttpResponse, RequestError> {
        self.request(&describe(url, "POST", headers), Some(data)).await
    }

    /// Sends a `PUT` request with `data` as the body.
    ///
    /// # Errors
    ///
    /// Same as [`request`](Self::request).
    pub async fn put(
        &self,
        url: &str,
        data: &str,
        headers: Option<Headers>,
    ) -> Result<HttpResponse, RequestError> {
        self.request(&describe(url, "PUT", headers), Some(data)).await
    }

    /// Sends a `DELETE` request.
    ///
    /// # Errors
    ///
    /// Same as [`request`](Self::request).
    pub async fn delete(
        &self,
        url: &str,
        headers: Option<Headers>,
    ) -> Result<HttpResponse, RequestError> {
        self.request(&describe(url, "DELETE", headers), None).await
    }

    /// Sends a `PATCH` request with `data` as the body.
    ///
    /// # Errors
    ///
    /// Same as [`request`](Self::request).
    pub async fn patch(
        &self,
        url: &str,
        data: &str,
        headers: Option<Headers>,
    ) -> Result<HttpResponse, RequestError> {
        self.request(&describe(url, "PATCH", headers), Some(data)).await
    }

    /// Sends a `HEAD` request.
    ///
    /// # Errors
    ///
    /// Same as [`request`](Self::request).
    pub async fn head(&self, url: &str, headers: Option<Headers>) -> Result<HttpResponse, RequestError> {
        self.request(&describe(url, "HEAD", headers), None).await
    }

    /// Sends an `OPTIONS` request.
    ///
    /// # Errors
    ///
    /// Same as [`request`](Self::request).
    pub async fn options(
        &self,
        url: &str,
        headers: Option<Headers>,
    ) -> Result<HttpResponse, RequestError> {
        self.request(&describe(url, "OPTIONS", headers), None).await
    }

    /// Validates the description, picks the transport and sends the request.
    ///
    /// Returns as soon as the response head arrives; the body is left unread.
    pub(super) async fn send(
        &self,
        description: &RequestDescription,
        body: Option<&str>,
    ) -> Result<reqwest::Response, RequestError> {
        let url = Url::parse(&description.url)
            .map_err(|e| RequestError::invalid_url(description.url.as_str(), e))?;
        let method = description.http_method()?;
        let headers = description.header_map()?;

        let (transport, client) = self.transports.select(&url);
        let mut request = client.request(method.clone(), url).headers(headers);
        if let Some(body) = effective_body(body) {
            request = request.body(body.to_owned());
        }

        debug!(?transport, %method, has_body = effective_body(body).is_some(), "sending request");

        request
            .send()
            .await
            .map_err(|e| RequestError::transport(description.url.as_str(), e))
    }
}

fn describe(url: &str, method: &str, headers: Option<Headers>) -> RequestDescription {
    RequestDescription::new(url)
        .with_method(method)
        .with_headers(headers.unwrap_or_default())
}
