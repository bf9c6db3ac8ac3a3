//! Error types for the client module.
//!
//! `RequestError` covers everything the request executor can fail with.
//! `DownloadError` adds the failures specific to writing a response to disk.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while executing a single HTTP request.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The URL could not be parsed.
    #[error("invalid URL {url}: {source}")]
    InvalidUrl {
        /// The URL as given by the caller.
        url: String,
        /// The parser's error.
        #[source]
        source: url::ParseError,
    },

    /// The method is not a valid HTTP token.
    #[error("invalid HTTP method: {method:?}")]
    InvalidMethod {
        /// The method as given by the caller.
        method: String,
    },

    /// A header name or value is not valid HTTP.
    #[error("invalid header {name:?}")]
    InvalidHeader {
        /// The offending header name.
        name: String,
    },

    /// Connection-level failure (DNS resolution, refused, reset, TLS, body read).
    #[error("transport error requesting {url}: {source}")]
    Transport {
        /// The URL being requested.
        url: String,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The transport itself could not be constructed.
    #[error("failed to build HTTP transport: {source}")]
    Client {
        /// The underlying builder error.
        #[source]
        source: reqwest::Error,
    },
}

impl RequestError {
    /// Creates an invalid URL error.
    pub fn invalid_url(url: impl Into<String>, source: url::ParseError) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            source,
        }
    }

    /// Creates an invalid method error.
    pub fn invalid_method(method: impl Into<String>) -> Self {
        Self::InvalidMethod {
            method: method.into(),
        }
    }

    /// Creates an invalid header error.
    pub fn invalid_header(name: impl Into<String>) -> Self {
        Self::InvalidHeader { name: name.into() }
    }

    /// Creates a transport error from a reqwest error.
    pub fn transport(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Transport {
            url: url.into(),
            source,
        }
    }

    /// Creates a client construction error.
    pub fn client(source: reqwest::Error) -> Self {
        Self::Client { source }
    }
}

/// Errors that can occur while downloading a file.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The request failed before or while receiving the body.
    #[error(transparent)]
    Request(#[from] RequestError),

    /// The server answered with something other than `200 OK`.
    #[error("failed to download '{url}' (HTTP {status})")]
    HttpStatus {
        /// The URL that was requested.
        url: String,
        /// The HTTP status code received.
        status: u16,
    },

    /// File system error (create directory, create file, write, flush).
    #[error("IO error writing to {path}: {source}")]
    Io {
        /// The path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// No filename was given and the URL path has no final segment.
    #[error("cannot derive a filename from {url}")]
    MissingFilename {
        /// The URL that was requested.
        url: String,
    },
}

impl DownloadError {
    /// Creates a non-success status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a transport error raised mid-download.
    pub fn transport(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Request(RequestError::transport(url, source))
    }

    /// Creates a missing filename error.
    pub fn missing_filename(url: impl Into<String>) -> Self {
        Self::MissingFilename { url: url.into() }
    }
}

// No `From<reqwest::Error>` or `From<std::io::Error>`: every variant needs a url or
// path the source error does not carry. Use the constructors above.
