//! Quixo
//!
//! A minimal HTTP(S) client: one request per call with arbitrary method,
//! headers and body, helpers for the common verbs, and a downloader that
//! streams a remote resource into a local file.
//!
//! # Architecture
//!
//! - [`client`] - request executor, verb helpers, file downloader
//!
//! The crate root re-exports the client types along with free functions
//! (`quixo::get`, `quixo::download_file`, ...) for one-off calls.

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
#[cfg(test)]
pub mod test_support;

// Re-export commonly used types
pub use client::{
    DEFAULT_METHOD, DownloadError, Headers, HttpClient, HttpResponse, RequestDescription,
    RequestError, Transport, delete, download_file, get, head, options, patch, post, put, request,
};
