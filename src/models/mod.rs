//! Data models for the catalog

pub mod author;
pub mod book;

pub use author::Author;
pub use book::{Book, BookDetail, BookInput, BookListEntry};
