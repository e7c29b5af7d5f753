//! In-process book store, used for tests and for running without MongoDB

use async_trait::async_trait;
use indexmap::IndexMap;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use super::BookStore;
use crate::{
    error::AppResult,
    models::{Book, BookId, BookSummary},
};

/// Books kept in insertion order, keyed by their native id
#[derive(Default)]
pub struct InMemoryBookStore {
    books: RwLock<IndexMap<BookId, Book>>,
}

impl InMemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookStore for InMemoryBookStore {
    async fn list(&self) -> AppResult<Vec<BookSummary>> {
        let books = self.books.read().await;
        Ok(books.values().map(Book::summary).collect())
    }

    async fn insert(&self, title: String) -> AppResult<Book> {
        let id = ObjectId::new();
        let book = Book {
            id: id.to_hex(),
            title,
            commentcount: 0,
            comments: Vec::new(),
        };
        self.books.write().await.insert(id.into(), book.clone());
        Ok(book)
    }

    async fn delete_all(&self) -> AppResult<u64> {
        let mut books = self.books.write().await;
        let removed = books.len() as u64;
        books.clear();
        Ok(removed)
    }

    async fn find(&self, id: &BookId) -> AppResult<Option<Book>> {
        Ok(self.books.read().await.get(id).cloned())
    }

    async fn push_comment(&self, id: &BookId, comment: Option<String>) -> AppResult<Option<Book>> {
        let mut books = self.books.write().await;
        Ok(books.get_mut(id).map(|book| {
            book.comments.push(comment);
            book.commentcount += 1;
            book.clone()
        }))
    }

    async fn delete(&self, id: &BookId) -> AppResult<u64> {
        let removed = self.books.write().await.shift_remove(id);
        Ok(removed.map_or(0, |_| 1))
    }
}
