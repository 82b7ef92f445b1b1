// Tests for the script downloader

use tagsift_core::download::Downloader;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn one_failing_url_does_not_stop_the_batch() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/a.js"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"var a = 1;"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/broken.js"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/c.js"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"var c = 3;"))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let downloader = Downloader::new(dir.path());

    let urls = vec![
        format!("{}/a.js", server.uri()),
        format!("{}/broken.js", server.uri()),
        format!("{}/c.js?v=3", server.uri()),
    ];
    let written = downloader.download_all("https://example.com", &urls).await;

    assert_eq!(written, 2);

    let site_dir = dir.path().join("example.com");
    assert_eq!(
        std::fs::read_to_string(site_dir.join("a.js")).unwrap(),
        "var a = 1;"
    );
    // Query string stripped from the stored filename.
    assert_eq!(
        std::fs::read_to_string(site_dir.join("c.js")).unwrap(),
        "var c = 3;"
    );
    assert!(!site_dir.join("broken.js").exists());
}

#[tokio::test]
async fn pre_existing_site_directory_is_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/a.js"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"var a;"))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("example.com")).unwrap();

    let downloader = Downloader::new(dir.path());
    let urls = vec![format!("{}/a.js", server.uri())];
    let written = downloader.download_all("https://example.com", &urls).await;

    assert_eq!(written, 1);
}

#[tokio::test]
async fn urls_without_a_filename_are_skipped() {
    let server = MockServer::start().await;

    let dir = tempfile::tempdir().unwrap();
    let downloader = Downloader::new(dir.path());

    // Root path carries no basename to store the body under.
    let urls = vec![format!("{}/", server.uri())];
    let written = downloader.download_all("https://example.com", &urls).await;

    assert_eq!(written, 0);
}
