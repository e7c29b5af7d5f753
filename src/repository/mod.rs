//! Repository layer for book storage

pub mod memory;
pub mod mongo;

use async_trait::async_trait;

use crate::{
    error::AppResult,
    models::{Book, BookId, BookSummary},
};

pub use memory::InMemoryBookStore;
pub use mongo::MongoBookStore;

/// Operations on the book collection.
///
/// Every method is a single store call; in particular `push_comment` appends
/// the comment and bumps `commentcount` in one atomic update.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// All books, projected to `_id`, `title` and `commentcount`
    async fn list(&self) -> AppResult<Vec<BookSummary>>;

    /// Insert a book with no comments and return it with its assigned id
    async fn insert(&self, title: String) -> AppResult<Book>;

    /// Remove every book, returning how many were removed
    async fn delete_all(&self) -> AppResult<u64>;

    async fn find(&self, id: &BookId) -> AppResult<Option<Book>>;

    /// Append a comment and return the updated book, or `None` if no book matched
    async fn push_comment(&self, id: &BookId, comment: Option<String>) -> AppResult<Option<Book>>;

    /// Remove one book, returning how many were removed
    async fn delete(&self, id: &BookId) -> AppResult<u64>;
}
