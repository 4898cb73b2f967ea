//! Book model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::author::Author;
use crate::validation::Validation;

/// Canonical detail URL for a book id
pub fn book_url(id: Uuid) -> String {
    format!("/catalog/book/{}", id)
}

/// Full book record as stored. `author` is the raw reference to an author id;
/// it is not required to resolve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub summary: String,
    pub isbn: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Book {
    pub fn url(&self) -> String {
        book_url(self.id)
    }
}

/// Book with its author reference populated, for the detail view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookDetail {
    pub id: Uuid,
    pub title: String,
    pub author: Option<Author>,
    pub summary: String,
    pub isbn: String,
}

impl BookDetail {
    pub fn url(&self) -> String {
        book_url(self.id)
    }
}

/// Title/author projection used by the book list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookListEntry {
    pub id: Uuid,
    pub title: String,
    pub author: Option<Author>,
}

impl BookListEntry {
    pub fn url(&self) -> String {
        book_url(self.id)
    }
}

/// Writable book fields, built from a validated (sanitized) form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookInput {
    pub title: String,
    pub author: String,
    pub summary: String,
    pub isbn: String,
}

impl BookInput {
    /// Build the candidate record from the sanitized copy of a submission
    pub fn from_validation(validation: &Validation) -> Self {
        Self {
            title: validation.value("title").to_string(),
            author: validation.value("author").to_string(),
            summary: validation.value("summary").to_string(),
            isbn: validation.value("isbn").to_string(),
        }
    }
}

impl From<&Book> for BookInput {
    fn from(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            summary: book.summary.clone(),
            isbn: book.isbn.clone(),
        }
    }
}

/// Parse a path segment as a book id. Malformed ids cannot match any record,
/// so they are reported as absent rather than as a request error.
pub fn parse_book_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw).ok()
}
