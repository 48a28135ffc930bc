//! Integration tests for the download engine against a mock HTTP server.

#![allow(clippy::unwrap_used)]

use std::time::{Duration, Instant};

use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use wallfetch::download::{BatchDownloader, DownloadOutcome, FailureReason, WallpaperClient};
use wallfetch::progress::ProgressReporter;

#[tokio::test]
async fn test_fetch_names_file_after_url_segment() {
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/oct/cal/nov-1920x1080.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"png data"))
        .mount(&mock_server)
        .await;

    let client = WallpaperClient::new();
    let reporter = ProgressReporter::hidden(1);
    let url = format!("{}/oct/cal/nov-1920x1080.png", mock_server.uri());

    let outcome = client
        .fetch_wallpaper(&url, temp_dir.path(), &reporter)
        .await;

    assert_eq!(
        outcome,
        DownloadOutcome::Success {
            filename: "nov-1920x1080.png".to_string()
        }
    );
    assert!(temp_dir.path().join("nov-1920x1080.png").exists());
}

#[tokio::test]
async fn test_fetch_timeout_is_classified() {
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/slow-1920x1080.jpg"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(b"late")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let client = WallpaperClient::with_timeouts(5, 1);
    let reporter = ProgressReporter::hidden(1);
    let url = format!("{}/slow-1920x1080.jpg", mock_server.uri());

    let outcome = client
        .fetch_wallpaper(&url, temp_dir.path(), &reporter)
        .await;

    assert_eq!(
        outcome,
        DownloadOutcome::Failed {
            reason: FailureReason::Timeout,
            name: "slow-1920x1080.jpg".to_string()
        }
    );
}

#[tokio::test]
async fn test_fetch_connect_failure_is_classified() {
    let temp_dir = TempDir::new().unwrap();

    // Port 1 is reserved and unbound; the connection is refused immediately.
    let client = WallpaperClient::new();
    let reporter = ProgressReporter::hidden(1);

    let outcome = client
        .fetch_wallpaper(
            "http://127.0.0.1:1/a-1920x1080.jpg",
            temp_dir.path(),
            &reporter,
        )
        .await;

    assert_eq!(
        outcome,
        DownloadOutcome::Failed {
            reason: FailureReason::Connect,
            name: "a-1920x1080.jpg".to_string()
        }
    );
}

#[tokio::test]
async fn test_batch_returns_outcomes_in_submission_order() {
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();

    for name in ["a-1024x768.jpg", "c-1024x768.jpg"] {
        Mock::given(method("GET"))
            .and(path(format!("/{name}")))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"img"))
            .mount(&mock_server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path("/b-1024x768.jpg"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let urls: Vec<String> = ["a-1024x768.jpg", "b-1024x768.jpg", "c-1024x768.jpg"]
        .iter()
        .map(|name| format!("{}/{name}", mock_server.uri()))
        .collect();

    let client = WallpaperClient::new();
    let batch = BatchDownloader::new(10).unwrap();
    let reporter = ProgressReporter::hidden(urls.len() as u64);

    let result = batch.run(&client, &urls, temp_dir.path(), &reporter).await;

    assert_eq!(result.len(), 3);
    assert_eq!(result.completed(), 2);
    assert_eq!(result.failed(), 1);

    let outcomes = result.outcomes();
    assert_eq!(outcomes[0].name(), "a-1024x768.jpg");
    assert!(outcomes[0].is_success());
    assert_eq!(
        outcomes[1],
        DownloadOutcome::Failed {
            reason: FailureReason::Unexpected,
            name: "b-1024x768.jpg".to_string()
        }
    );
    assert_eq!(outcomes[2].name(), "c-1024x768.jpg");
    assert!(outcomes[2].is_success());
}

#[tokio::test]
async fn test_batch_failure_does_not_block_siblings() {
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/good-800x600.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"ok"))
        .mount(&mock_server)
        .await;

    let urls = vec![
        "http://127.0.0.1:1/dead-800x600.jpg".to_string(),
        format!("{}/good-800x600.jpg", mock_server.uri()),
    ];

    let client = WallpaperClient::new();
    let batch = BatchDownloader::new(2).unwrap();
    let reporter = ProgressReporter::hidden(2);

    let result = batch.run(&client, &urls, temp_dir.path(), &reporter).await;

    assert_eq!(result.completed(), 1);
    assert_eq!(result.failed(), 1);
    assert!(temp_dir.path().join("good-800x600.jpg").exists());
}

#[tokio::test]
async fn test_batch_respects_in_flight_ceiling() {
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();

    for name in ["a-640x480.jpg", "b-640x480.jpg", "c-640x480.jpg"] {
        Mock::given(method("GET"))
            .and(path(format!("/{name}")))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_bytes(b"img")
                    .set_delay(Duration::from_millis(200)),
            )
            .mount(&mock_server)
            .await;
    }

    let urls: Vec<String> = ["a-640x480.jpg", "b-640x480.jpg", "c-640x480.jpg"]
        .iter()
        .map(|name| format!("{}/{name}", mock_server.uri()))
        .collect();

    let client = WallpaperClient::new();
    let batch = BatchDownloader::new(1).unwrap();
    let reporter = ProgressReporter::hidden(urls.len() as u64);

    let start = Instant::now();
    let result = batch.run(&client, &urls, temp_dir.path(), &reporter).await;
    let elapsed = start.elapsed();

    assert_eq!(result.completed(), 3);
    // With one permit the 200ms delays cannot overlap. Only the lower bound
    // is asserted; an upper bound would flake under load.
    assert!(
        elapsed >= Duration::from_millis(600),
        "3 sequential 200ms downloads finished in {elapsed:?}"
    );
}

#[tokio::test]
async fn test_progress_advances_on_failures_too() {
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/ok-1280x720.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"img"))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/gone-1280x720.jpg"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let urls = vec![
        format!("{}/ok-1280x720.jpg", mock_server.uri()),
        format!("{}/gone-1280x720.jpg", mock_server.uri()),
    ];

    let client = WallpaperClient::new();
    let batch = BatchDownloader::new(10).unwrap();
    let reporter = ProgressReporter::hidden(urls.len() as u64);

    let result = batch.run(&client, &urls, temp_dir.path(), &reporter).await;

    assert_eq!(result.len(), 2);
    // Every terminal task advances the bar, failed ones included.
    assert_eq!(reporter.tasks_done(), 2);
}
