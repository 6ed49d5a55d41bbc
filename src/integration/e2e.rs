//! End-to-end tests
//!
//! Runs the real router on an ephemeral port and talks to it over HTTP.
//! Tests that need ffmpeg return early when it is not installed.

use std::net::SocketAddr;
use std::sync::Arc;
use tempfile::TempDir;

use crate::config::ServerConfig;
use crate::http::create_router;
use crate::integration::fixtures::{assert_dir_empty, sine_wav};
use crate::state::AppState;

/// Whether an ffmpeg binary is on PATH
pub fn ffmpeg_available() -> bool {
    std::process::Command::new("ffmpeg")
        .arg("-version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// Serve `config` on 127.0.0.1 with the ffmpeg transcoder
pub async fn spawn_server(config: ServerConfig) -> SocketAddr {
    let app = create_router(Arc::new(AppState::with_ffmpeg(config)));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn config_in(dir: &TempDir) -> ServerConfig {
    let mut config = ServerConfig::default();
    config.transcoder.temp_dir = Some(dir.path().to_path_buf());
    config
}

async fn upload(addr: SocketAddr, file_name: &str, data: Vec<u8>) -> reqwest::Response {
    let part = reqwest::multipart::Part::bytes(data).file_name(file_name.to_string());
    let form = reqwest::multipart::Form::new().part("file", part);
    reqwest::Client::new()
        .post(format!("http://{}/", addr))
        .multipart(form)
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn test_health_over_http() {
    let dir = TempDir::new().unwrap();
    let addr = spawn_server(config_in(&dir)).await;

    let response = reqwest::get(format!("http://{}/health", addr)).await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "DFPWM Converter");
}

#[tokio::test]
async fn test_missing_ffmpeg_reports_conversion_failure() {
    let dir = TempDir::new().unwrap();
    let mut config = config_in(&dir);
    config.transcoder.ffmpeg_path = "/nonexistent/ffmpeg".to_string();
    let addr = spawn_server(config).await;

    let response = upload(addr, "tone.wav", sine_wav(0.1, 440.0)).await;
    assert_eq!(response.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Conversion failed");
    assert!(body["details"]
        .as_str()
        .unwrap()
        .contains("/nonexistent/ffmpeg"));
    assert_dir_empty(dir.path());
}

#[tokio::test]
async fn test_convert_wav_to_dfpwm() {
    if !ffmpeg_available() {
        return;
    }
    let dir = TempDir::new().unwrap();
    let addr = spawn_server(config_in(&dir)).await;

    let response = upload(addr, "tone.wav", sine_wav(1.0, 440.0)).await;
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(
        response.headers()[reqwest::header::CONTENT_TYPE],
        "application/octet-stream"
    );
    assert!(response.headers()[reqwest::header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .contains("converted.dfpwm"));

    let body = response.bytes().await.unwrap();
    // 1 bit per sample at 48 kHz
    assert!(!body.is_empty());
    assert!(body.len() >= 5000 && body.len() <= 7000, "got {} bytes", body.len());
    assert_dir_empty(dir.path());
}

#[tokio::test]
async fn test_undecodable_upload() {
    if !ffmpeg_available() {
        return;
    }
    let dir = TempDir::new().unwrap();
    let addr = spawn_server(config_in(&dir)).await;

    let response = upload(addr, "notes.txt", b"this is not audio at all".to_vec()).await;
    assert_eq!(response.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Conversion failed");
    assert!(!body["details"].as_str().unwrap().is_empty());
    assert_dir_empty(dir.path());
}

#[tokio::test]
async fn test_concurrent_uploads_over_http() {
    if !ffmpeg_available() {
        return;
    }
    let dir = TempDir::new().unwrap();
    let addr = spawn_server(config_in(&dir)).await;

    let (short, long) = tokio::join!(
        upload(addr, "short.wav", sine_wav(0.5, 440.0)),
        upload(addr, "long.wav", sine_wav(2.0, 880.0)),
    );
    assert_eq!(short.status(), reqwest::StatusCode::OK);
    assert_eq!(long.status(), reqwest::StatusCode::OK);

    let short = short.bytes().await.unwrap();
    let long = long.bytes().await.unwrap();
    // each output tracks its own input's duration
    assert!(long.len() > short.len() * 3);
    assert_dir_empty(dir.path());
}
