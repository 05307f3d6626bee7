mod helpers;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use flashcards::application::FlashcardService;
use flashcards::infrastructure::config::ServerConfig;
use flashcards::infrastructure::SqliteFlashcardRepository;
use flashcards::util::testing::MockFlashcardRepository;
use helpers::{app, app_with, delete, get, send, send_json};
use serde_json::json;

#[tokio::test]
async fn given_math_card_when_walking_its_lifecycle_then_each_step_returns_expected_status() {
    let app = app();

    // Create
    let created = send_json(
        &app,
        "POST",
        "/flashcards",
        json!({"question": "2+2?", "answer": "4", "category": "Math"}),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let body = created.json();
    assert_eq!(body["id"], 1);
    assert_eq!(
        created.headers[header::LOCATION],
        "http://localhost:8080/flashcards/1"
    );

    // Fetch
    let fetched = get(&app, "/flashcards/1").await;
    assert_eq!(fetched.status, StatusCode::OK);
    let card = fetched.json();
    assert_eq!(card["question"], "2+2?");
    assert_eq!(card["answer"], "4");
    assert_eq!(card["category"], "Math");
    assert!(card["createdAt"].is_string());
    assert!(card["updatedAt"].is_string());

    // Search
    let found = get(&app, "/flashcards/search?category=Math").await;
    assert_eq!(found.status, StatusCode::OK);
    let found = found.json();
    assert_eq!(found.as_array().map(Vec::len), Some(1));
    assert_eq!(found[0]["id"], 1);

    // Delete
    let deleted = delete(&app, "/flashcards/1").await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);
    assert!(deleted.body.is_empty());

    // Gone
    let missing = get(&app, "/flashcards/1").await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn given_empty_store_when_listing_then_returns_empty_array() {
    let app = app();

    let response = get(&app, "/flashcards").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!([]));
}

#[tokio::test]
async fn given_several_cards_when_listing_then_returns_them_in_creation_order() {
    let app = app();
    for question in ["first", "second", "third"] {
        send_json(&app, "POST", "/flashcards", json!({"question": question, "answer": "a"})).await;
    }

    let response = get(&app, "/flashcards").await;

    let questions: Vec<_> = response
        .json()
        .as_array()
        .expect("array")
        .iter()
        .map(|c| c["question"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(questions, vec!["first", "second", "third"]);
}

#[tokio::test]
async fn given_missing_id_when_fetching_then_returns_404_error_body() {
    let app = app();

    let response = get(&app, "/flashcards/3").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(
        response.json(),
        json!({"code": 404, "message": "Flashcard with ID 3 not found."})
    );
}

#[tokio::test]
async fn given_non_numeric_id_when_fetching_then_returns_404() {
    let app = app();

    let response = get(&app, "/flashcards/abc").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.json()["code"], 404);
}

#[tokio::test]
async fn given_unknown_path_when_requesting_then_returns_json_404() {
    let app = app();

    let response = get(&app, "/flashcards/1/extra").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.headers[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("application/json"));
    assert_eq!(
        response.json(),
        json!({"code": 404, "message": "HTTP 404 Not Found"})
    );
}

#[tokio::test]
async fn given_client_supplied_id_when_creating_then_storage_assigns_its_own() {
    let app = app();

    let response = send_json(
        &app,
        "POST",
        "/flashcards",
        json!({"id": 99, "question": "q", "answer": "a", "createdAt": "2000-01-01T00:00:00Z"}),
    )
    .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let body = response.json();
    assert_eq!(body["id"], 1);
    assert_ne!(body["createdAt"], "2000-01-01T00:00:00Z");
    assert_eq!(body["category"], serde_json::Value::Null);
}

#[tokio::test]
async fn given_empty_category_when_creating_then_card_is_uncategorized() {
    let app = app();

    let response = send_json(
        &app,
        "POST",
        "/flashcards",
        json!({"question": "q", "answer": "a", "category": ""}),
    )
    .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.json()["category"], serde_json::Value::Null);
    assert_eq!(get(&app, "/flashcards/1").await.json()["category"], serde_json::Value::Null);
}

#[tokio::test]
async fn given_empty_question_when_creating_then_returns_400_and_persists_nothing() {
    let app = app();

    let response = send_json(&app, "POST", "/flashcards", json!({"question": "", "answer": "4"})).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["code"], 400);
    assert_eq!(get(&app, "/flashcards").await.json(), json!([]));
}

#[tokio::test]
async fn given_missing_answer_when_creating_then_returns_400() {
    let app = app();

    let response = send_json(&app, "POST", "/flashcards", json!({"question": "2+2?"})).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn given_overlong_fields_when_creating_then_returns_400() {
    let app = app();

    let long_question = send_json(
        &app,
        "POST",
        "/flashcards",
        json!({"question": "q".repeat(256), "answer": "a"}),
    )
    .await;
    let long_category = send_json(
        &app,
        "POST",
        "/flashcards",
        json!({"question": "q", "answer": "a", "category": "c".repeat(101)}),
    )
    .await;

    assert_eq!(long_question.status, StatusCode::BAD_REQUEST);
    assert_eq!(long_category.status, StatusCode::BAD_REQUEST);
    assert_eq!(get(&app, "/flashcards").await.json(), json!([]));
}

#[tokio::test]
async fn given_malformed_json_when_creating_then_returns_400() {
    let app = app();
    let request = Request::builder()
        .method("POST")
        .uri("/flashcards")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .expect("valid request");

    let response = send(&app, request).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["code"], 400);
}

#[tokio::test]
async fn given_no_host_header_when_creating_then_location_is_a_path() {
    let app = app();
    let request = Request::builder()
        .method("POST")
        .uri("/flashcards")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"question":"q","answer":"a"}"#))
        .expect("valid request");

    let response = send(&app, request).await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.headers[header::LOCATION], "/flashcards/1");
}

#[tokio::test]
async fn given_existing_card_when_updating_then_returns_new_fields_and_keeps_created_at() {
    let app = app();
    let created = send_json(
        &app,
        "POST",
        "/flashcards",
        json!({"question": "What is Rust?", "answer": "A language", "category": "Programming"}),
    )
    .await
    .json();

    let response = send_json(
        &app,
        "PUT",
        "/flashcards/1",
        json!({"question": "What is Rust?", "answer": "A systems language", "category": "Lang"}),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    let updated = response.json();
    assert_eq!(updated["id"], 1);
    assert_eq!(updated["answer"], "A systems language");
    assert_eq!(updated["category"], "Lang");
    assert_eq!(updated["createdAt"], created["createdAt"]);
    assert_eq!(get(&app, "/flashcards/1").await.json(), updated);
}

#[tokio::test]
async fn given_missing_id_when_updating_then_returns_404_and_leaves_store_unchanged() {
    let app = app();
    send_json(&app, "POST", "/flashcards", json!({"question": "q", "answer": "a"})).await;
    let before = get(&app, "/flashcards").await.json();

    let response = send_json(
        &app,
        "PUT",
        "/flashcards/4",
        json!({"question": "What is JUnit?", "answer": "A test framework"}),
    )
    .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(get(&app, "/flashcards").await.json(), before);
}

#[tokio::test]
async fn given_invalid_body_when_updating_then_returns_400() {
    let app = app();
    send_json(&app, "POST", "/flashcards", json!({"question": "q", "answer": "a"})).await;

    let response = send_json(&app, "PUT", "/flashcards/1", json!({"question": " ", "answer": "a"})).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(get(&app, "/flashcards/1").await.json()["question"], "q");
}

#[tokio::test]
async fn given_existing_card_when_deleting_twice_then_second_returns_404() {
    let app = app();
    send_json(&app, "POST", "/flashcards", json!({"question": "q", "answer": "a"})).await;

    let first = delete(&app, "/flashcards/1").await;
    let second = delete(&app, "/flashcards/1").await;

    assert_eq!(first.status, StatusCode::NO_CONTENT);
    assert_eq!(second.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn given_missing_or_empty_category_when_searching_then_returns_400() {
    let app = app();

    let missing = get(&app, "/flashcards/search").await;
    let empty = get(&app, "/flashcards/search?category=").await;

    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        missing.json()["message"],
        "Category query parameter is required."
    );
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn given_repeated_category_when_searching_then_returns_json_400() {
    let app = app();

    let response = get(&app, "/flashcards/search?category=Math&category=Bio").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.headers[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("application/json"));
    let body = response.json();
    assert_eq!(body["code"], 400);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn given_unmatched_category_when_searching_then_returns_empty_array() {
    let app = app();
    send_json(&app, "POST", "/flashcards", json!({"question": "q", "answer": "a", "category": "Math"})).await;

    let response = get(&app, "/flashcards/search?category=math").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!([]));
}

#[tokio::test]
async fn given_storage_failure_when_listing_then_returns_500() {
    let repo = MockFlashcardRepository::builder()
        .with_storage_failure("disk I/O error")
        .build();
    let app = app_with(repo);

    let response = get(&app, "/flashcards").await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json()["code"], 500);
}

#[tokio::test]
async fn given_running_app_when_checking_health_then_returns_ok() {
    let app = app();

    let response = get(&app, "/health").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, b"OK");
}

#[tokio::test]
async fn given_running_app_when_fetching_openapi_then_returns_document() {
    let app = app();

    let response = get(&app, "/openapi.json").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["info"]["title"], "Flashcard API");
}

#[tokio::test]
async fn given_docs_dir_when_requesting_swagger_ui_then_serves_assets() {
    let docs = tempfile::tempdir().expect("temp dir");
    std::fs::write(docs.path().join("index.html"), "<html>docs</html>").expect("write index");
    let config = ServerConfig {
        docs_dir: Some(docs.path().to_path_buf()),
        ..ServerConfig::default()
    };
    let repo = SqliteFlashcardRepository::open_in_memory().expect("in-memory database");
    let app = flashcards::ports::router(FlashcardService::new(repo), &config);

    let response = get(&app, "/swagger-ui/index.html").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, b"<html>docs</html>");
}

#[tokio::test]
async fn given_no_docs_dir_when_requesting_swagger_ui_then_returns_404() {
    let app = app();

    let response = get(&app, "/swagger-ui/index.html").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
