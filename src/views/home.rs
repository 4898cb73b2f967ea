//! Catalog home page

use maud::{html, Markup, Render};

use super::layout;

pub struct IndexView {
    pub title: String,
    pub book_count: i64,
    pub author_count: i64,
}

impl Render for IndexView {
    fn render(&self) -> Markup {
        layout(
            &self.title,
            html! {
                h1 { (self.title) }
                p { "Welcome to " em { "LocalLibrary" } ", a very basic catalog website." }
                h2 { "Dynamic content" }
                p { "The library has the following record counts:" }
                ul {
                    li { strong { "Books:" } " " (self.book_count) }
                    li { strong { "Authors:" } " " (self.author_count) }
                }
            },
        )
    }
}
