use anyhow::{Context, Result};
use axum::body::Body;
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::Router;
use flashcards::application::{FlashcardRepository, FlashcardService};
use flashcards::infrastructure::config::ServerConfig;
use flashcards::infrastructure::SqliteFlashcardRepository;
use std::path::PathBuf;
use tempfile::TempDir;
use tower::ServiceExt;

/// Test fixture for a flashcard database file in a temporary directory
#[allow(dead_code)]
pub struct TestDatabase {
    _temp_dir: TempDir,
    pub database_path: PathBuf,
}

#[allow(dead_code)]
impl TestDatabase {
    pub fn new() -> Result<Self> {
        let temp_dir = tempfile::tempdir()
            .context("Failed to create temporary directory")?;
        let database_path = temp_dir.path().join("flashcards.db");

        Ok(Self {
            _temp_dir: temp_dir,
            database_path,
        })
    }

    /// Open repository for this test database
    pub fn open_repository(&self) -> Result<SqliteFlashcardRepository> {
        SqliteFlashcardRepository::open(&self.database_path)
    }
}

/// Router over a fresh in-memory database
#[allow(dead_code)]
pub fn app() -> Router {
    let repo = SqliteFlashcardRepository::open_in_memory()
        .expect("Failed to open in-memory database");
    app_with(repo)
}

#[allow(dead_code)]
pub fn app_with<R: FlashcardRepository + 'static>(repo: R) -> Router {
    flashcards::ports::router(FlashcardService::new(repo), &ServerConfig::default())
}

/// Response parts captured from a single in-process request
#[allow(dead_code)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

#[allow(dead_code)]
impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("Response body should be JSON")
    }
}

#[allow(dead_code)]
pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Router should not fail");
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body")
        .to_vec();

    TestResponse { status, headers, body }
}

#[allow(dead_code)]
pub async fn get(app: &Router, uri: &str) -> TestResponse {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("valid request");
    send(app, request).await
}

#[allow(dead_code)]
pub async fn delete(app: &Router, uri: &str) -> TestResponse {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .expect("valid request");
    send(app, request).await
}

/// POST or PUT a JSON body
#[allow(dead_code)]
pub async fn send_json(app: &Router, method: &str, uri: &str, body: serde_json::Value) -> TestResponse {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::HOST, "localhost:8080")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid request");
    send(app, request).await
}
