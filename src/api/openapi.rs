//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::books;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Personal Library API",
        version = "1.0.0",
        description = "Books and the comments left on them"
    ),
    paths(
        books::list_books,
        books::create_book,
        books::delete_all_books,
        books::get_book,
        books::add_comment,
        books::delete_book,
    ),
    components(
        schemas(
            crate::models::book::Book,
            crate::models::book::BookSummary,
            crate::models::book::CreateBook,
            crate::models::book::AddComment,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "books", description = "Book and comment management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
