//! Book library service

use std::{future::Future, sync::Arc, time::Duration};

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookId, BookSummary},
    repository::BookStore,
};

#[derive(Clone)]
pub struct LibraryService {
    store: Arc<dyn BookStore>,
    timeout: Duration,
}

impl LibraryService {
    pub fn new(store: Arc<dyn BookStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    /// Run one store call, giving up after the configured timeout
    async fn bounded<T>(&self, call: impl Future<Output = AppResult<T>>) -> AppResult<T> {
        tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| AppError::Timeout(self.timeout))?
    }

    /// List all books
    pub async fn list_books(&self) -> AppResult<Vec<BookSummary>> {
        self.bounded(self.store.list()).await
    }

    /// Create a book with an empty comment list
    pub async fn create_book(&self, title: String) -> AppResult<Book> {
        let book = self.bounded(self.store.insert(title)).await?;
        tracing::info!("Created book {}", book.id);
        Ok(book)
    }

    /// Delete every book, returning how many were removed
    pub async fn delete_all_books(&self) -> AppResult<u64> {
        let removed = self.bounded(self.store.delete_all()).await?;
        tracing::info!("Deleted {} book(s)", removed);
        Ok(removed)
    }

    pub async fn get_book(&self, id: &BookId) -> AppResult<Option<Book>> {
        self.bounded(self.store.find(id)).await
    }

    /// Append a comment, returning the updated book if it exists
    pub async fn add_comment(
        &self,
        id: &BookId,
        comment: Option<String>,
    ) -> AppResult<Option<Book>> {
        self.bounded(self.store.push_comment(id, comment)).await
    }

    /// Delete one book; true when exactly one document was removed
    pub async fn delete_book(&self, id: &BookId) -> AppResult<bool> {
        let removed = self.bounded(self.store.delete(id)).await?;
        if removed == 1 {
            tracing::info!("Deleted book {}", id);
        }
        Ok(removed == 1)
    }
}
