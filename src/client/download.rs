//! Streaming a remote resource into a local file.

use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, instrument};
use url::Url;

use super::error::{DownloadError, RequestError};
use super::http_client::HttpClient;
use super::request::RequestDescription;

impl HttpClient {
    /// Downloads `file_url` into `dest_dir` and returns the written path.
    ///
    /// The file name is `filename` when given (and non-empty), otherwise the last
    /// segment of the URL path. The destination path is fixed before the request
    /// is sent. Only an exact `200 OK` is accepted; `dest_dir` and any missing
    /// parents are created only after that. The body is streamed to disk chunk by
    /// chunk, never held in memory as a whole.
    ///
    /// An existing file at the destination is overwritten.
    ///
    /// # Errors
    ///
    /// - [`DownloadError::MissingFilename`] if no name is given and the URL path is empty
    /// - [`DownloadError::Request`] for invalid URLs and transport failures
    /// - [`DownloadError::HttpStatus`] for any status other than 200 (nothing is created)
    /// - [`DownloadError::Io`] if the directory or file cannot be created or written
    ///
    /// If the transfer fails after the file was created, the partial file is removed
    /// before the error is returned.
    #[must_use = "download result contains the path to the downloaded file"]
    #[instrument(skip(self, dest_dir), fields(url = %file_url, dest_dir = %dest_dir.display()))]
    pub async fn download_file(
        &self,
        file_url: &str,
        dest_dir: &Path,
        filename: Option<&str>,
    ) -> Result<PathBuf, DownloadError> {
        let parsed_url =
            Url::parse(file_url).map_err(|e| RequestError::invalid_url(file_url, e))?;
        let dest = destination_path(&parsed_url, dest_dir, filename)
            .ok_or_else(|| DownloadError::missing_filename(file_url))?;
        debug!(path = %dest.display(), "resolved output path");

        let response = self
            .send(&RequestDescription::new(file_url), None)
            .await?;

        let status = response.status().as_u16();
        if status != 200 {
            return Err(DownloadError::http_status(file_url, status));
        }

        tokio::fs::create_dir_all(dest_dir)
            .await
            .map_err(|e| DownloadError::io(dest_dir, e))?;

        let file = File::create(&dest)
            .await
            .map_err(|e| DownloadError::io(dest.clone(), e))?;

        match stream_to_file(file, response, file_url, &dest).await {
            Ok(bytes) => {
                info!(path = %dest.display(), bytes, "download complete");
                Ok(dest)
            }
            Err(error) => {
                discard_partial_file(&dest).await;
                Err(error)
            }
        }
    }
}

/// Joins `dest_dir` with the explicit file name or the URL's last path segment.
///
/// The segment is used as-is, without percent-decoding. A trailing slash is
/// ignored, so `/files/` yields `files`. Returns `None` for a root path.
fn destination_path(url: &Url, dest_dir: &Path, filename: Option<&str>) -> Option<PathBuf> {
    let name = match filename.filter(|name| !name.is_empty()) {
        Some(name) => name.to_string(),
        None => filename_from_url(url)?,
    };
    Some(dest_dir.join(name))
}

fn filename_from_url(url: &Url) -> Option<String> {
    url.path_segments()?
        .rev()
        .find(|segment| !segment.is_empty())
        .map(str::to_string)
}

/// Streams the response body to `file`, returning bytes written.
///
/// Kept separate so the caller can clean up on any error.
async fn stream_to_file(
    file: File,
    response: reqwest::Response,
    url: &str,
    file_path: &Path,
) -> Result<u64, DownloadError> {
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| DownloadError::transport(url, e))?;

        writer
            .write_all(&chunk)
            .await
            .map_err(|e| DownloadError::io(file_path, e))?;

        bytes_written += chunk.len() as u64;
    }

    writer
        .flush()
        .await
        .map_err(|e| DownloadError::io(file_path, e))?;

    Ok(bytes_written)
}

/// Removes a partially written file. Failures are logged and otherwise ignored.
async fn discard_partial_file(path: &Path) {
    debug!(path = %path.display(), "cleaning up partial file after error");
    if let Err(e) = tokio::fs::remove_file(path).await {
        debug!(path = %path.display(), error = %e, "partial file cleanup failed");
    }
}
