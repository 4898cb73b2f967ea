//! Error page rendered by the error boundary

use axum::http::StatusCode;
use maud::{html, Markup, Render};

use super::layout;

pub struct ErrorPage {
    pub message: String,
    pub status: StatusCode,
}

impl Render for ErrorPage {
    fn render(&self) -> Markup {
        layout(
            "Error",
            html! {
                h1 { (self.message) }
                h2 { (self.status.as_u16()) }
            },
        )
    }
}
