//! Integration tests for the file downloader.
//!
//! These tests verify the full download flow with mock HTTP servers.

use std::path::Path;

use quixo::{DownloadError, HttpClient, RequestError};
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod support;
use support::socket_guard::{should_skip_socket_bound_test, start_mock_server_or_skip};

/// Helper to mount a file endpoint on a mock server.
async fn mount_file(server: &MockServer, path_str: &str, content: &[u8]) {
    Mock::given(method("GET"))
        .and(path(path_str))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(content.to_vec()))
        .mount(server)
        .await;
}

fn dir_entries(dir: &Path) -> usize {
    std::fs::read_dir(dir).expect("should read dir").count()
}

#[tokio::test]
async fn test_download_full_flow_preserves_content() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };
    let content = b"This is the complete file content for testing.\nLine 2.\nLine 3.";
    mount_file(&mock_server, "/papers/document.pdf", content).await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");

    let client = HttpClient::new();
    let url = format!("{}/papers/document.pdf", mock_server.uri());
    let result = client.download_file(&url, temp_dir.path(), None).await;

    let file_path = result.expect("download should succeed");
    assert_eq!(file_path, temp_dir.path().join("document.pdf"));
    let downloaded = std::fs::read(&file_path).expect("should read file");
    assert_eq!(downloaded, content, "Downloaded content should match original");
}

#[tokio::test]
async fn test_download_binary_content_is_byte_exact() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };
    let content: Vec<u8> = (0..=255u8).cycle().take(3 * 1024 * 1024 + 17).collect();
    mount_file(&mock_server, "/large.bin", &content).await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");

    let file_path = quixo::download_file(
        &format!("{}/large.bin", mock_server.uri()),
        temp_dir.path(),
        None,
    )
    .await
    .expect("download should succeed");

    assert_eq!(std::fs::read(&file_path).expect("should read file"), content);
}

#[tokio::test]
async fn test_download_explicit_filename_overrides_url() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_file(&mock_server, "/api/export/latest", b"payload").await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");

    let client = HttpClient::new();
    let url = format!("{}/api/export/latest", mock_server.uri());
    let file_path = client
        .download_file(&url, temp_dir.path(), Some("custom.bin"))
        .await
        .expect("download should succeed");

    assert_eq!(file_path, temp_dir.path().join("custom.bin"));
    assert_eq!(std::fs::read(&file_path).expect("should read file"), b"payload");
    assert!(!temp_dir.path().join("latest").exists());
}

#[tokio::test]
async fn test_download_creates_missing_nested_directories() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_file(&mock_server, "/doc.txt", b"nested").await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let dest_dir = temp_dir.path().join("a").join("b").join("c");
    assert!(!dest_dir.exists());

    let client = HttpClient::new();
    let url = format!("{}/doc.txt", mock_server.uri());
    let file_path = client
        .download_file(&url, &dest_dir, None)
        .await
        .expect("download should succeed");

    assert!(dest_dir.is_dir());
    assert_eq!(file_path, dest_dir.join("doc.txt"));
    assert_eq!(std::fs::read(&file_path).expect("should read file"), b"nested");
}

#[tokio::test]
async fn test_download_handles_404_without_leaving_files() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };
    let temp_dir = TempDir::new().expect("failed to create temp dir");

    Mock::given(method("GET"))
        .and(path("/not-found.bin"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = HttpClient::new();
    let url = format!("{}/not-found.bin", mock_server.uri());
    let result = client.download_file(&url, temp_dir.path(), None).await;

    let error = result.expect_err("404 must fail");
    let msg = error.to_string();
    assert!(msg.contains("404"), "Expected '404' in: {msg}");
    assert!(msg.contains(&url), "Expected URL in: {msg}");
    match error {
        DownloadError::HttpStatus {
            status,
            url: err_url,
        } => {
            assert_eq!(status, 404);
            assert_eq!(err_url, url);
        }
        other => panic!("Expected HttpStatus(404), got: {other:?}"),
    }
    assert_eq!(dir_entries(temp_dir.path()), 0, "no file should be created");
}

#[tokio::test]
async fn test_download_500_does_not_create_destination_dir() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let dest_dir = temp_dir.path().join("downloads");

    Mock::given(method("GET"))
        .and(path("/server-error.bin"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = HttpClient::new();
    let url = format!("{}/server-error.bin", mock_server.uri());
    let result = client.download_file(&url, &dest_dir, None).await;

    assert!(matches!(
        result,
        Err(DownloadError::HttpStatus { status: 500, .. })
    ));
    assert!(!dest_dir.exists());
}

#[tokio::test]
async fn test_download_redirect_is_not_followed() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };
    let temp_dir = TempDir::new().expect("failed to create temp dir");

    Mock::given(method("GET"))
        .and(path("/moved.bin"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/real.bin"))
        .mount(&mock_server)
        .await;
    mount_file(&mock_server, "/real.bin", b"real").await;

    let client = HttpClient::new();
    let url = format!("{}/moved.bin", mock_server.uri());
    let result = client.download_file(&url, temp_dir.path(), None).await;

    assert!(matches!(
        result,
        Err(DownloadError::HttpStatus { status: 301, .. })
    ));
    assert_eq!(dir_entries(temp_dir.path()), 0);
}

#[tokio::test]
async fn test_concurrent_downloads_into_same_directory() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_file(&mock_server, "/one.txt", b"one").await;
    mount_file(&mock_server, "/two.txt", b"two").await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let dest_dir = temp_dir.path().join("shared");

    let client = HttpClient::new();
    let one_url = format!("{}/one.txt", mock_server.uri());
    let two_url = format!("{}/two.txt", mock_server.uri());

    let (one, two) = tokio::join!(
        client.download_file(&one_url, &dest_dir, None),
        client.download_file(&two_url, &dest_dir, None)
    );

    let one = one.expect("first download should succeed");
    let two = two.expect("second download should succeed");
    assert_eq!(std::fs::read(one).expect("should read file"), b"one");
    assert_eq!(std::fs::read(two).expect("should read file"), b"two");
}

#[tokio::test]
async fn test_download_rejects_invalid_url() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let client = HttpClient::new();

    let result = client
        .download_file("definitely-not-a-url", temp_dir.path(), None)
        .await;

    assert!(
        matches!(result, Err(DownloadError::Request(RequestError::InvalidUrl { .. }))),
        "Expected InvalidUrl, got: {result:?}"
    );
}

#[tokio::test]
async fn test_download_truncated_body_removes_partial_file() {
    if should_skip_socket_bound_test() {
        return;
    }
    let temp_dir = TempDir::new().expect("failed to create temp dir");

    // Promise 1000 bytes, send a few, then hang up.
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let mut buf = [0u8; 4096];
        let _ = socket.read(&mut buf).await;
        socket
            .write_all(b"HTTP/1.1 200 OK\r\ncontent-length: 1000\r\n\r\npartial")
            .await
            .expect("write");
    });

    let client = HttpClient::new();
    let url = format!("http://{addr}/cut.bin");
    let result = client.download_file(&url, temp_dir.path(), None).await;
    server.await.expect("server task");

    assert!(
        matches!(result, Err(DownloadError::Request(RequestError::Transport { .. }))),
        "Expected Transport error, got: {result:?}"
    );
    assert!(
        !temp_dir.path().join("cut.bin").exists(),
        "partial file must be removed"
    );
}
