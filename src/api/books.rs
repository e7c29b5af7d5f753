//! Book endpoints
//!
//! Validation failures and missing books are reported as `200 text/plain`
//! messages; only store failures produce an error status.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    error::AppResult,
    models::{AddComment, Book, BookId, BookSummary, CreateBook},
    AppState,
};

use super::Payload;

pub const MISSING_TITLE: &str = "must provide title";
pub const ALL_DELETED: &str = "complete delete successful";
pub const NONE_DELETED: &str = "no books deleted";
pub const NO_BOOK: &str = "no book exists";
pub const INVALID_ID: &str = "invalid book id";
pub const DELETED: &str = "delete successful";

/// List all books
///
/// A failing store is answered with an empty list.
#[utoipa::path(
    get,
    path = "/api/books",
    tag = "books",
    responses(
        (status = 200, description = "All books", body = [BookSummary])
    )
)]
pub async fn list_books(State(state): State<AppState>) -> Json<Vec<BookSummary>> {
    let books = state
        .services
        .library
        .list_books()
        .await
        .unwrap_or_else(|e| {
            tracing::warn!("Listing books failed, answering with an empty list: {}", e);
            Vec::new()
        });
    Json(books)
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/api/books",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 200, description = "Created book, or a message when the title is missing",
            content(("application/json" = Book), ("text/plain" = String))),
        (status = 500, description = "Store failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    Payload(body): Payload<CreateBook>,
) -> AppResult<Response> {
    let Some(title) = body.title() else {
        return Ok(MISSING_TITLE.into_response());
    };

    let book = state.services.library.create_book(title).await?;
    Ok(Json(book).into_response())
}

/// Delete every book
#[utoipa::path(
    delete,
    path = "/api/books",
    tag = "books",
    responses(
        (status = 200, description = "Outcome message", body = String, content_type = "text/plain"),
        (status = 500, description = "Store failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_all_books(State(state): State<AppState>) -> AppResult<&'static str> {
    let removed = state.services.library.delete_all_books().await?;
    Ok(if removed > 0 { ALL_DELETED } else { NONE_DELETED })
}

/// Get a book with its comments
#[utoipa::path(
    get,
    path = "/api/books/{id}",
    tag = "books",
    params(
        ("id" = String, Path, description = "Book id")
    ),
    responses(
        (status = 200, description = "Book, or a message when it does not exist",
            content(("application/json" = Book), ("text/plain" = String))),
        (status = 500, description = "Store failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = BookId::parse(&id);

    Ok(match state.services.library.get_book(&id).await? {
        Some(book) => Json(book).into_response(),
        None => NO_BOOK.into_response(),
    })
}

/// Add a comment to a book
#[utoipa::path(
    post,
    path = "/api/books/{id}",
    tag = "books",
    params(
        ("id" = String, Path, description = "Book id")
    ),
    request_body = AddComment,
    responses(
        (status = 200, description = "Updated book, or a message when it does not exist",
            content(("application/json" = Book), ("text/plain" = String))),
        (status = 500, description = "Store failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn add_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Payload(body): Payload<AddComment>,
) -> AppResult<Response> {
    let id = BookId::parse(&id);

    Ok(match state.services.library.add_comment(&id, body.comment).await? {
        Some(book) => Json(book).into_response(),
        None => INVALID_ID.into_response(),
    })
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/api/books/{id}",
    tag = "books",
    params(
        ("id" = String, Path, description = "Book id")
    ),
    responses(
        (status = 200, description = "Outcome message", body = String, content_type = "text/plain"),
        (status = 500, description = "Store failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = BookId::parse(&id);

    if state.services.library.delete_book(&id).await? {
        Ok(DELETED.into_response())
    } else {
        Ok(format!("could not delete {}", id).into_response())
    }
}
