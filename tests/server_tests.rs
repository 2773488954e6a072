use std::path::PathBuf;
use std::sync::Arc;

use geopeek::server::upload::sanitize_filename;
use geopeek::server::{cleanup, router, ServerConfig};

async fn spawn_server() -> (String, PathBuf, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    let upload_dir = dir.path().join("uploads");

    let config = ServerConfig {
        host: String::from("127.0.0.1"),
        port: 0,
        upload_dir: upload_dir.clone(),
        max_upload_bytes: 1024 * 1024,
    };

    let app = router(Arc::new(config));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });

    (format!("http://{addr}"), upload_dir, dir)
}

fn file_form(name: &str, bytes: &'static [u8]) -> reqwest::multipart::Form {
    let part = reqwest::multipart::Part::bytes(bytes).file_name(name.to_string());
    reqwest::multipart::Form::new().part("file", part)
}

#[tokio::test]
async fn index_serves_the_upload_form() {
    let (base, _uploads, _dir) = spawn_server().await;

    let body = reqwest::get(format!("{base}/"))
        .await
        .expect("request")
        .text()
        .await
        .expect("body");

    assert!(body.contains("<form"));
    assert!(body.contains("multipart/form-data"));
}

#[tokio::test]
async fn upload_without_file_part_is_rejected() {
    let (base, _uploads, _dir) = spawn_server().await;

    let form = reqwest::multipart::Form::new().text("note", "no file here");
    let response = reqwest::Client::new()
        .post(format!("{base}/upload"))
        .multipart(form)
        .send()
        .await
        .expect("request");

    assert_eq!(response.status(), 400);
    let body = response.text().await.expect("body");
    assert!(body.contains("no file part"));
}

#[tokio::test]
async fn upload_with_empty_filename_is_rejected() {
    let (base, _uploads, _dir) = spawn_server().await;

    let response = reqwest::Client::new()
        .post(format!("{base}/upload"))
        .multipart(file_form("", b"data"))
        .send()
        .await
        .expect("request");

    assert_eq!(response.status(), 400);
    let body = response.text().await.expect("body");
    assert!(body.contains("no file selected"));
}

#[tokio::test]
async fn upload_with_disallowed_extension_is_rejected() {
    let (base, _uploads, _dir) = spawn_server().await;

    let response = reqwest::Client::new()
        .post(format!("{base}/upload"))
        .multipart(file_form("payload.exe", b"MZ"))
        .send()
        .await
        .expect("request");

    assert_eq!(response.status(), 400);
    let body = response.text().await.expect("body");
    assert!(body.contains("unsupported file type"));
    assert!(body.contains("png, jpg, jpeg, tiff, bmp"));
}

#[tokio::test]
async fn undecodable_upload_still_renders_a_report() {
    let (base, uploads, _dir) = spawn_server().await;

    let response = reqwest::Client::new()
        .post(format!("{base}/upload"))
        .multipart(file_form("broken.jpg", b"not really a jpeg"))
        .send()
        .await
        .expect("request");

    assert_eq!(response.status(), 200);
    let body = response.text().await.expect("body");
    assert!(body.contains("broken.jpg"));
    assert!(body.contains("Error"));

    // The stored copy must not outlive the request.
    let leftovers = std::fs::read_dir(&uploads)
        .map(|entries| entries.count())
        .unwrap_or(0);
    assert_eq!(leftovers, 0);
}

#[tokio::test]
async fn remove_with_retry_handles_present_and_missing_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("stored.jpg");
    std::fs::write(&path, b"data").expect("write");

    assert!(cleanup::remove_with_retry(&path, 3).await);
    assert!(!path.exists());
    assert!(cleanup::remove_with_retry(&path, 3).await);
}

#[test]
fn sanitize_filename_strips_paths_and_odd_characters() {
    assert_eq!(sanitize_filename("holiday.jpg"), "holiday.jpg");
    assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
    assert_eq!(sanitize_filename("C:\\photos\\pic 1.png"), "pic_1.png");
    assert_eq!(sanitize_filename("..."), "upload");
    assert_eq!(sanitize_filename("snap shot?.jpeg"), "snap_shot_.jpeg");
}
