//! In-memory catalog store
//!
//! Same contract as the PostgreSQL repository, kept in process memory. Used
//! when `database.in_memory` is set and by the HTTP tests.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::CatalogStore;
use crate::{
    error::AppResult,
    models::{Author, Book, BookDetail, BookInput, BookListEntry},
};

#[derive(Default)]
pub struct MemoryStore {
    books: RwLock<HashMap<Uuid, Book>>,
    authors: RwLock<Vec<Author>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an author; authors are not writable through the catalog
    pub async fn insert_author(&self, author: Author) {
        self.authors.write().await.push(author);
    }

    async fn populate(&self, reference: &str) -> Option<Author> {
        self.authors
            .read()
            .await
            .iter()
            .find(|a| a.id.to_string() == reference)
            .cloned()
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn count_books(&self) -> AppResult<i64> {
        Ok(self.books.read().await.len() as i64)
    }

    async fn count_authors(&self) -> AppResult<i64> {
        Ok(self.authors.read().await.len() as i64)
    }

    async fn list_books(&self) -> AppResult<Vec<BookListEntry>> {
        let mut books: Vec<Book> = self
            .books
            .read()
            .await
            .values()
            .cloned()
            .collect();
        books.sort_by(|a, b| a.title.cmp(&b.title));

        let mut entries = Vec::with_capacity(books.len());
        for book in books {
            entries.push(BookListEntry {
                id: book.id,
                author: self.populate(&book.author).await,
                title: book.title,
            });
        }
        Ok(entries)
    }

    async fn list_authors(&self) -> AppResult<Vec<Author>> {
        let mut authors = self.authors.read().await.clone();
        authors.sort_by(|a, b| {
            a.family_name
                .cmp(&b.family_name)
                .then_with(|| a.first_name.cmp(&b.first_name))
        });
        Ok(authors)
    }

    async fn find_book(&self, id: Uuid) -> AppResult<Option<Book>> {
        Ok(self.books.read().await.get(&id).cloned())
    }

    async fn find_book_populated(&self, id: Uuid) -> AppResult<Option<BookDetail>> {
        let Some(book) = self.find_book(id).await? else {
            return Ok(None);
        };
        Ok(Some(BookDetail {
            id: book.id,
            author: self.populate(&book.author).await,
            title: book.title,
            summary: book.summary,
            isbn: book.isbn,
        }))
    }

    async fn create_book(&self, data: &BookInput) -> AppResult<Book> {
        let now = Utc::now();
        let book = Book {
            id: Uuid::new_v4(),
            title: data.title.clone(),
            author: data.author.clone(),
            summary: data.summary.clone(),
            isbn: data.isbn.clone(),
            created_at: Some(now),
            updated_at: Some(now),
        };
        self.books.write().await.insert(book.id, book.clone());
        Ok(book)
    }

    async fn update_book(&self, id: Uuid, data: &BookInput) -> AppResult<Option<Book>> {
        let mut books = self.books.write().await;
        let Some(book) = books.get_mut(&id) else {
            return Ok(None);
        };
        book.title = data.title.clone();
        book.author = data.author.clone();
        book.summary = data.summary.clone();
        book.isbn = data.isbn.clone();
        book.updated_at = Some(Utc::now());
        Ok(Some(book.clone()))
    }

    async fn delete_book(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.books.write().await.remove(&id).is_some())
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
