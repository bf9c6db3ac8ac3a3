//! HTTP(S) request executor and file downloader.
//!
//! # Features
//!
//! - One transaction per call, with the whole response body buffered as text
//! - Verb helpers (`get`, `post`, `put`, `delete`, `patch`, `head`, `options`)
//! - Streaming downloads straight to disk, with partial files removed on failure
//! - Transport picked per call from the URL scheme (`https` or plain)
//!
//! No pooling, redirects, timeouts, retries, cookies or compression: every call
//! runs to completion or error on a fresh connection.
//!
//! # Example
//!
//! ```no_run
//! use quixo::HttpClient;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new();
//! let response = client.post("https://example.com/form", "a=1", None).await?;
//! println!("status {}", response.status);
//!
//! let file_path = client
//!     .download_file("https://example.com/paper.pdf", Path::new("./downloads"), None)
//!     .await?;
//! println!("Downloaded: {}", file_path.display());
//! # Ok(())
//! # }
//! ```

mod download;
mod error;
mod http_client;
mod request;
mod response;
mod shortcuts;
mod transport;

pub use error::{DownloadError, RequestError};
pub use http_client::HttpClient;
pub use request::{DEFAULT_METHOD, Headers, RequestDescription};
pub use response::HttpResponse;
pub use shortcuts::{delete, download_file, get, head, options, patch, post, put, request};
pub use transport::Transport;
