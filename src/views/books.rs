//! Book pages: list, detail, form and delete confirmation

use maud::{html, Markup, PreEscaped, Render};

use super::layout;
use crate::{
    models::{Author, Book, BookDetail, BookInput, BookListEntry},
    validation::FieldError,
};

fn author_name(author: Option<&Author>) -> String {
    author.map(Author::name).unwrap_or_default()
}

pub struct BookListView {
    pub title: String,
    pub book_list: Vec<BookListEntry>,
}

impl Render for BookListView {
    fn render(&self) -> Markup {
        layout(
            &self.title,
            html! {
                h1 { (self.title) }
                ul {
                    @for book in &self.book_list {
                        li {
                            a href=(book.url()) { (PreEscaped(&book.title)) }
                            @if let Some(author) = &book.author {
                                " (" (author.name()) ")"
                            }
                        }
                    }
                    @if self.book_list.is_empty() {
                        li { "There are no books." }
                    }
                }
            },
        )
    }
}

pub struct BookDetailView {
    pub title: String,
    pub book: BookDetail,
}

impl Render for BookDetailView {
    fn render(&self) -> Markup {
        let book = &self.book;
        layout(
            PreEscaped(&self.title),
            html! {
                h1 { "Title: " (PreEscaped(&self.title)) }
                p { strong { "Author:" } " " (author_name(book.author.as_ref())) }
                p { strong { "Summary:" } " " (PreEscaped(&book.summary)) }
                p { strong { "ISBN:" } " " (PreEscaped(&book.isbn)) }
                hr;
                p { a href={ (book.url()) "/delete" } { "Delete Book" } }
                p { a href={ (book.url()) "/update" } { "Update Book" } }
            },
        )
    }
}

/// Create/update form. `book` pre-fills the fields; `errors` is empty unless
/// a submission failed validation.
pub struct BookFormView {
    pub title: String,
    pub authors: Vec<Author>,
    pub book: Option<BookInput>,
    pub errors: Vec<FieldError>,
}

impl Render for BookFormView {
    fn render(&self) -> Markup {
        let book = self.book.clone().unwrap_or_default();
        layout(
            &self.title,
            html! {
                h1 { (self.title) }
                form method="POST" {
                    div.form-group {
                        label for="title" { "Title:" }
                        input #title type="text" name="title" placeholder="Name of book"
                            value=(PreEscaped(&book.title)) required;
                    }
                    div.form-group {
                        label for="author" { "Author:" }
                        select #author name="author" required {
                            option value="" { "--Please select an author--" }
                            @for author in &self.authors {
                                @let id = author.id.to_string();
                                option value=(id) selected[id == book.author] { (author.name()) }
                            }
                        }
                    }
                    div.form-group {
                        label for="summary" { "Summary:" }
                        textarea #summary name="summary" placeholder="Summary" required {
                            (PreEscaped(&book.summary))
                        }
                    }
                    div.form-group {
                        label for="isbn" { "ISBN:" }
                        input #isbn type="text" name="isbn" placeholder="ISBN13"
                            value=(PreEscaped(&book.isbn)) required;
                    }
                    button type="submit" { "Submit" }
                }
                @if !self.errors.is_empty() {
                    ul.errors {
                        @for error in &self.errors {
                            li { (error.message) }
                        }
                    }
                }
            },
        )
    }
}

pub struct BookDeleteView {
    pub title: String,
    pub book: Book,
}

impl Render for BookDeleteView {
    fn render(&self) -> Markup {
        layout(
            &self.title,
            html! {
                h1 { (self.title) ": " (PreEscaped(&self.book.title)) }
                p { "Do you really want to delete this Book?" }
                form method="POST" {
                    input type="hidden" name="bookid" value=(self.book.id.to_string());
                    button type="submit" { "Delete" }
                }
            },
        )
    }
}
