//! Free functions over a throwaway [`HttpClient`].
//!
//! Each call builds its own client, so nothing is shared between calls.

use std::path::{Path, PathBuf};

use super::error::{DownloadError, RequestError};
use super::http_client::HttpClient;
use super::request::{Headers, RequestDescription};
use super::response::HttpResponse;

/// See [`HttpClient::request`].
///
/// # Errors
///
/// Same as [`HttpClient::request`], plus [`RequestError::Client`].
pub async fn request(
    description: &RequestDescription,
    body: Option<&str>,
) -> Result<HttpResponse, RequestError> {
    HttpClient::try_new()?.request(description, body).await
}

/// See [`HttpClient::get`].
///
/// # Errors
///
/// Same as [`request`].
pub async fn get(url: &str, headers: Option<Headers>) -> Result<HttpResponse, RequestError> {
    HttpClient::try_new()?.get(url, headers).await
}

/// See [`HttpClient::post`].
///
/// # Errors
///
/// Same as [`request`].
pub async fn post(
    url: &str,
    data: &str,
    headers: Option<Headers>,
) -> Result<HttpResponse, RequestError> {
    HttpClient::try_new()?.post(url, data, headers).await
}

/// See [`HttpClient::put`].
///
/// # Errors
///
/// Same as [`request`].
pub async fn put(
    url: &str,
    data: &str,
    headers: Option<Headers>,
) -> Result<HttpResponse, RequestError> {
    HttpClient::try_new()?.put(url, data, headers).await
}

/// See [`HttpClient::delete`].
///
/// # Errors
///
/// Same as [`request`].
pub async fn delete(url: &str, headers: Option<Headers>) -> Result<HttpResponse, RequestError> {
    HttpClient::try_new()?.delete(url, headers).await
}

/// See [`HttpClient::patch`].
///
/// # Errors
///
/// Same as [`request`].
pub async fn patch(
    url: &str,
    data: &str,
    headers: Option<Headers>,
) -> Result<HttpResponse, RequestError> {
    HttpClient::try_new()?.patch(url, data, headers).await
}

/// See [`HttpClient::head`].
///
/// # Errors
///
/// Same as [`request`].
pub async fn head(url: &str, headers: Option<Headers>) -> Result<HttpResponse, RequestError> {
    HttpClient::try_new()?.head(url, headers).await
}

/// See [`HttpClient::options`].
///
/// # Errors
///
/// Same as [`request`].
pub async fn options(url: &str, headers: Option<Headers>) -> Result<HttpResponse, RequestError> {
    HttpClient::try_new()?.options(url, headers).await
}

/// See [`HttpClient::download_file`].
///
/// # Errors
///
/// Same as [`HttpClient::download_file`].
pub async fn download_file(
    file_url: &str,
    dest_dir: &Path,
    filename: Option<&str>,
) -> Result<PathBuf, DownloadError> {
    HttpClient::try_new()?
        .download_file(file_url, dest_dir, filename)
        .await
}
