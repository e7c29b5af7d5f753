//! API handlers for the library REST endpoints

pub mod books;
pub mod openapi;

use axum::{
    async_trait,
    body::{Body, Bytes},
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Form, Router,
};
use serde::de::DeserializeOwned;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{error::AppError, AppState};

/// Request body accepted either as JSON or as an HTML form post.
///
/// An empty body yields `T::default()` whatever its content type, so `POST`
/// without a body behaves like `{}`. A body without a content type is read as
/// JSON; one with any other content type is ignored.
pub struct Payload<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Payload(T::default()));
        }

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let form = axum::http::Request::builder()
                .method(Method::POST)
                .header(CONTENT_TYPE, content_type)
                .body(Body::from(body))
                .map_err(|e| AppError::Internal(e.to_string()))?;
            let Form(value) = Form::<T>::from_request(form, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            return Ok(Payload(value));
        }

        if content_type.is_empty() || content_type.starts_with("application/json") {
            return serde_json::from_slice(&body)
                .map(Payload)
                .map_err(|e| AppError::BadRequest(e.to_string()));
        }

        Ok(Payload(T::default()))
    }
}

/// Catch-all for unknown paths and unsupported methods
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not Found")
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_docs = state.config.server.api_docs;

    let mut router = Router::new()
        .route(
            "/api/books",
            get(books::list_books)
                .post(books::create_book)
                .delete(books::delete_all_books)
                .fallback(not_found),
        )
        .route(
            "/api/books/:id",
            get(books::get_book)
                .post(books::add_comment)
                .delete(books::delete_book)
                .fallback(not_found),
        )
        .with_state(state);

    if api_docs {
        router = router.merge(openapi::create_openapi_router());
    }

    router
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
