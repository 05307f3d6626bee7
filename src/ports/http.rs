// src/ports/http.rs
use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

use crate::application::{FlashcardRepository, FlashcardService};
use crate::constants::FLASHCARDS_PATH;
use crate::domain::{DomainError, Flashcard};
use crate::infrastructure::config::ServerConfig;
use crate::ports::openapi;

type SharedService<R> = Arc<FlashcardService<R>>;

/// Build the application router around `service`.
///
/// The documentation UI is mounted only when `config.docs_dir` is set.
pub fn router<R>(service: FlashcardService<R>, config: &ServerConfig) -> Router
where
    R: FlashcardRepository + 'static,
{
    let mut router = Router::new()
        .route("/health", get(health))
        .route("/openapi.json", get(openapi_document))
        .route(
            "/flashcards",
            get(list_flashcards::<R>).post(create_flashcard::<R>),
        )
        .route("/flashcards/search", get(search_flashcards::<R>))
        .route(
            "/flashcards/{id}",
            get(get_flashcard::<R>)
                .put(update_flashcard::<R>)
                .delete(delete_flashcard::<R>),
        )
        .fallback(unknown_route)
        .with_state(Arc::new(service));

    if let Some(dir) = &config.docs_dir {
        debug!(?dir, "Serving documentation assets at /swagger-ui");
        router = router.nest_service(
            "/swagger-ui",
            ServeDir::new(dir).append_index_html_on_directories(true),
        );
    }

    router = router.layer(TraceLayer::new_for_http());

    if config.cors {
        router = router.layer(CorsLayer::permissive());
    }

    router
}

// === Error Response ===

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub code: u16,
    pub message: String,
}

/// Error half of every handler result, rendered as `{"code", "message"}` JSON
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, e.to_string()),
            DomainError::BadRequest(msg) => Self::new(StatusCode::BAD_REQUEST, msg),
            DomainError::StorageFailure(msg) => {
                error!(%msg, "Storage failure while handling request");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "There was an error processing your request.",
                )
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        debug!(%rejection, "Rejecting request body");
        Self::new(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    // A non-numeric id names no resource
    fn from(rejection: PathRejection) -> Self {
        debug!(%rejection, "Rejecting path parameter");
        Self::new(StatusCode::NOT_FOUND, "HTTP 404 Not Found")
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        debug!(%rejection, "Rejecting query string");
        Self::new(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            code: self.status.as_u16(),
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

// === Flashcard Resource ===

#[derive(Debug, Deserialize)]
struct SearchParams {
    category: Option<String>,
}

async fn list_flashcards<R: FlashcardRepository>(
    State(service): State<SharedService<R>>,
) -> Result<Json<Vec<Flashcard>>, ApiError> {
    Ok(Json(service.list_flashcards()?))
}

async fn get_flashcard<R: FlashcardRepository>(
    State(service): State<SharedService<R>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Flashcard>, ApiError> {
    let Path(id) = id?;
    Ok(Json(service.get_flashcard(id)?))
}

async fn create_flashcard<R: FlashcardRepository>(
    State(service): State<SharedService<R>>,
    headers: HeaderMap,
    body: Result<Json<Flashcard>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(card) = body?;
    let created = service.create_flashcard(&card)?;
    let id = created.id.ok_or_else(|| {
        DomainError::StorageFailure("stored flashcard has no id".to_string())
    })?;

    let location = resource_location(&headers, id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    )
        .into_response())
}

async fn update_flashcard<R: FlashcardRepository>(
    State(service): State<SharedService<R>>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<Flashcard>, JsonRejection>,
) -> Result<Json<Flashcard>, ApiError> {
    let Path(id) = id?;
    let Json(card) = body?;
    Ok(Json(service.update_flashcard(id, &card)?))
}

async fn delete_flashcard<R: FlashcardRepository>(
    State(service): State<SharedService<R>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    service.delete_flashcard(id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn search_flashcards<R: FlashcardRepository>(
    State(service): State<SharedService<R>>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Vec<Flashcard>>, ApiError> {
    let Query(params) = params?;
    Ok(Json(service.search_by_category(params.category.as_deref())?))
}

/// Absolute URL when the request names its host, else the bare path
fn resource_location(headers: &HeaderMap, id: i64) -> String {
    match headers.get(header::HOST).and_then(|h| h.to_str().ok()) {
        Some(host) => format!("http://{}{}/{}", host, FLASHCARDS_PATH, id),
        None => format!("{}/{}", FLASHCARDS_PATH, id),
    }
}

// === Service Endpoints ===

async fn health() -> &'static str {
    "OK"
}

async fn unknown_route() -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, "HTTP 404 Not Found")
}

async fn openapi_document() -> Json<serde_json::Value> {
    Json(openapi::document())
}
