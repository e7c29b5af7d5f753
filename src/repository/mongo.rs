//! MongoDB-backed book store

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Bson},
    options::{ClientOptions, FindOneAndUpdateOptions, FindOptions, ReturnDocument},
    Client, Collection,
};
use serde::{Deserialize, Serialize};

use super::BookStore;
use crate::{
    config::DatabaseConfig,
    error::AppResult,
    models::{Book, BookId, BookSummary},
};

/// Stored shape of a book document
#[derive(Debug, Serialize, Deserialize)]
struct BookDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<Bson>,
    title: String,
    commentcount: i32,
    #[serde(default)]
    comments: Vec<Option<String>>,
}

/// Projection used by the list view
#[derive(Debug, Deserialize)]
struct SummaryDocument {
    #[serde(rename = "_id")]
    id: Bson,
    title: String,
    #[serde(default)]
    commentcount: i32,
}

/// Render a document `_id` as text; ObjectIds become their hex form.
fn render_id(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn count(value: i32) -> u32 {
    u32::try_from(value).unwrap_or_default()
}

impl BookDocument {
    fn into_book(self, id: &Bson) -> Book {
        Book {
            id: render_id(self.id.as_ref().unwrap_or(id)),
            title: self.title,
            commentcount: count(self.commentcount),
            comments: self.comments,
        }
    }
}

#[derive(Clone)]
pub struct MongoBookStore {
    collection: Collection<BookDocument>,
}

impl MongoBookStore {
    /// Connect to MongoDB and open the configured collection.
    ///
    /// The database named in the connection string wins over `config.name`.
    /// A `ping` is issued so that an unreachable server fails here rather than
    /// on the first request.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let mut options = ClientOptions::parse(&config.url).await?;
        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        options.connect_timeout = Some(config.connect_timeout());
        options.server_selection_timeout = Some(config.connect_timeout());

        let client = Client::with_options(options)?;
        let database = client
            .default_database()
            .unwrap_or_else(|| client.database(&config.name));

        database.run_command(doc! { "ping": 1 }, None).await?;

        tracing::debug!(
            "Using collection {}.{}",
            database.name(),
            config.collection
        );

        Ok(Self {
            collection: database.collection(&config.collection),
        })
    }
}

#[async_trait]
impl BookStore for MongoBookStore {
    async fn list(&self) -> AppResult<Vec<BookSummary>> {
        let options = FindOptions::builder()
            .projection(doc! { "title": 1, "commentcount": 1 })
            .build();

        let books: Vec<SummaryDocument> = self
            .collection
            .clone_with_type::<SummaryDocument>()
            .find(doc! {}, options)
            .await?
            .try_collect()
            .await?;

        Ok(books
            .into_iter()
            .map(|book| BookSummary {
                id: render_id(&book.id),
                title: book.title,
                commentcount: count(book.commentcount),
            })
            .collect())
    }

    async fn insert(&self, title: String) -> AppResult<Book> {
        let document = BookDocument {
            id: None,
            title,
            commentcount: 0,
            comments: Vec::new(),
        };

        let result = self.collection.insert_one(&document, None).await?;
        Ok(document.into_book(&result.inserted_id))
    }

    async fn delete_all(&self) -> AppResult<u64> {
        let result = self.collection.delete_many(doc! {}, None).await?;
        Ok(result.deleted_count)
    }

    async fn find(&self, id: &BookId) -> AppResult<Option<Book>> {
        let key = Bson::from(id);
        let book = self
            .collection
            .find_one(doc! { "_id": key.clone() }, None)
            .await?;
        Ok(book.map(|book| book.into_book(&key)))
    }

    async fn push_comment(&self, id: &BookId, comment: Option<String>) -> AppResult<Option<Book>> {
        let key = Bson::from(id);
        let comment = comment.map(Bson::String).unwrap_or(Bson::Null);
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let book = self
            .collection
            .find_one_and_update(
                doc! { "_id": key.clone() },
                doc! {
                    "$push": { "comments": comment },
                    "$inc": { "commentcount": 1 },
                },
                options,
            )
            .await?;
        Ok(book.map(|book| book.into_book(&key)))
    }

    async fn delete(&self, id: &BookId) -> AppResult<u64> {
        let result = self
            .collection
            .delete_one(doc! { "_id": Bson::from(id) }, None)
            .await?;
        Ok(result.deleted_count)
    }
}
