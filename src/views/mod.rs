//! HTML views
//!
//! Each view is a struct whose fields are exactly the data the page needs,
//! rendered through [`maud::Render`]. Book text fields are stored already
//! entity-encoded by the form sanitizer, so views emit them as
//! [`PreEscaped`](maud::PreEscaped) instead of encoding them twice.

pub mod books;
pub mod error;
pub mod home;

use maud::{html, Markup, Render, DOCTYPE};

/// Page shell with the catalog sidebar
pub fn layout(title: impl Render, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
            }
            body {
                nav.sidebar {
                    ul {
                        li { a href="/catalog" { "Home" } }
                        li { a href="/catalog/books" { "All books" } }
                        li { a href="/catalog/book/create" { "Create new book" } }
                    }
                }
                main.content {
                    (content)
                }
            }
        }
    }
}
