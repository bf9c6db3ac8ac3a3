//! Scheme-based transport selection.
//!
//! Every call picks one of two transports from the parsed URL scheme:
//! `https` goes through the secure transport, anything else through the plain one.
//! Both are configured the same way otherwise: no redirects, no proxy lookup,
//! no timeouts, and no idle connections kept between calls.

use reqwest::redirect::Policy;
use reqwest::{Client, ClientBuilder};
use tracing::debug;
use url::Url;

use super::error::RequestError;

/// The transport a single call runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    /// Plain-text HTTP.
    Plain,
    /// HTTP over TLS.
    Secure,
}

impl Transport {
    /// Selects the transport for a parsed URL.
    #[must_use]
    pub fn for_url(url: &Url) -> Self {
        if url.scheme() == "https" {
            Self::Secure
        } else {
            Self::Plain
        }
    }
}

/// The pair of underlying clients backing [`Transport`].
#[derive(Debug, Clone)]
pub(crate) struct Transports {
    plain: Client,
    secure: Client,
}

impl Transports {
    pub(crate) fn build() -> Result<Self, RequestError> {
        let plain = base_client_builder()
            .build()
            .map_err(RequestError::client)?;
        let secure = base_client_builder()
            .https_only(true)
            .build()
            .map_err(RequestError::client)?;
        Ok(Self { plain, secure })
    }

    /// Returns the client for `url`, along with the transport chosen.
    pub(crate) fn select(&self, url: &Url) -> (Transport, &Client) {
        let transport = Transport::for_url(url);
        debug!(?transport, scheme = url.scheme(), "selected transport");
        match transport {
            Transport::Plain => (transport, &self.plain),
            Transport::Secure => (transport, &self.secure),
        }
    }
}

fn base_client_builder() -> ClientBuilder {
    Client::builder()
        .redirect(Policy::none())
        .no_proxy()
        .pool_max_idle_per_host(0)
}
