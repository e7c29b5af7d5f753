//! Book model and related types.
//!
//! A book is stored as one document holding its title, the list of comments
//! left on it and a running `commentcount`. The count only ever moves together
//! with an appended comment, so `commentcount == comments.len()` holds for
//! every stored book.

use std::fmt;

use mongodb::bson::{oid::ObjectId, Bson};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

static OBJECT_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9A-Fa-f]{24}$").expect("valid object id pattern"));

/// Identifier of a book as given in a request path.
///
/// Well-formed 24-digit hex strings are looked up as native ObjectIds, anything
/// else is passed to the store as opaque text (and normally just misses).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BookId {
    Native(ObjectId),
    Text(String),
}

impl BookId {
    pub fn parse(raw: &str) -> Self {
        if OBJECT_ID_PATTERN.is_match(raw) {
            if let Ok(oid) = ObjectId::parse_str(raw) {
                return BookId::Native(oid);
            }
        }
        BookId::Text(raw.to_string())
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookId::Native(oid) => write!(f, "{}", oid.to_hex()),
            BookId::Text(text) => f.write_str(text),
        }
    }
}

impl From<&BookId> for Bson {
    fn from(id: &BookId) -> Self {
        match id {
            BookId::Native(oid) => Bson::ObjectId(*oid),
            BookId::Text(text) => Bson::String(text.clone()),
        }
    }
}

impl From<ObjectId> for BookId {
    fn from(oid: ObjectId) -> Self {
        BookId::Native(oid)
    }
}

/// Full book document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Book {
    /// Store-assigned identifier
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    /// Number of comments, always equal to `comments.len()`
    pub commentcount: u32,
    /// Comments in the order they were added; an entry posted without a value is null
    pub comments: Vec<Option<String>>,
}

impl Book {
    pub fn summary(&self) -> BookSummary {
        BookSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            commentcount: self.commentcount,
        }
    }
}

/// Book as it appears in the list view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookSummary {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub commentcount: u32,
}

/// Create book request
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateBook {
    pub title: Option<String>,
}

impl CreateBook {
    /// Title to store, if one was given
    pub fn title(self) -> Option<String> {
        self.title.filter(|title| !title.is_empty())
    }
}

/// Add comment request
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct AddComment {
    pub comment: Option<String>,
}
