//! HTML pages rendered with askama.
//!
//! Each page is a typed context bound to one template under `templates/`.

use askama::Template;
use axum::{http::StatusCode, response::Html};

use crate::{
    error::AppResult,
    models::book::{Book, Draft, FieldError},
};

pub const PAGE_NOT_FOUND_MESSAGE: &str = "Sorry! We couldn't find the page you were looking for.";

#[derive(Template)]
#[template(path = "books/index.html")]
pub struct BookListPage<'a> {
    pub title: &'a str,
    pub books: &'a [Book],
    pub query: &'a str,
}

#[derive(Template)]
#[template(path = "books/new_book.html")]
pub struct NewBookPage<'a> {
    pub title: &'a str,
    pub book: &'a Draft,
    pub errors: &'a [FieldError],
}

#[derive(Template)]
#[template(path = "books/update_book.html")]
pub struct UpdateBookPage<'a> {
    pub title: &'a str,
    pub id: i32,
    pub book: &'a Draft,
    pub errors: &'a [FieldError],
}

#[derive(Template)]
#[template(path = "page_not_found.html")]
pub struct NotFoundPage<'a> {
    pub title: &'a str,
    pub message: &'a str,
}

impl<'a> NotFoundPage<'a> {
    pub fn new(message: &'a str) -> Self {
        Self {
            title: "Page Not Found",
            message,
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage<'a> {
    pub title: &'static str,
    pub status: u16,
    pub message: &'a str,
}

impl<'a> ErrorPage<'a> {
    pub fn new(status: StatusCode, message: &'a str) -> Self {
        Self {
            title: status.canonical_reason().unwrap_or("Error"),
            status: status.as_u16(),
            message,
        }
    }

    /// Page without internal details
    pub fn generic(status: StatusCode) -> Self {
        Self::new(status, "Sorry! There was an unexpected error on the server.")
    }
}

/// Render a page into an axum HTML body
pub fn render<T: Template>(page: &T) -> AppResult<Html<String>> {
    Ok(Html(page.render()?))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn list_page_escapes_book_fields() {
        let now = Utc::now();
        let books = vec![Book {
            id: 3,
            title: "<script>".to_string(),
            author: "Herbert".to_string(),
            genre: None,
            year: Some(1965),
            created_at: now,
            updated_at: now,
        }];
        let html = BookListPage {
            title: "Books",
            books: &books,
            query: "",
        }
        .render()
        .unwrap();

        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("href=\"/3\""));
        assert!(html.contains("1965"));
    }

    #[test]
    fn error_page_title_follows_status() {
        let html = ErrorPage::new(StatusCode::BAD_REQUEST, "Malformed form")
            .render()
            .unwrap();
        assert!(html.contains("<title>Bad Request</title>"));
        assert!(html.contains("Malformed form"));

        let html = ErrorPage::generic(StatusCode::INTERNAL_SERVER_ERROR)
            .render()
            .unwrap();
        assert!(html.contains("<title>Internal Server Error</title>"));
    }

    #[test]
    fn update_form_posts_back_to_its_id() {
        let draft = Draft {
            title: "Dune".to_string(),
            ..Draft::default()
        };
        let errors = vec![FieldError::new("author", "Author is required")];
        let html = UpdateBookPage {
            title: "Update Book",
            id: 9,
            book: &draft,
            errors: &errors,
        }
        .render()
        .unwrap();

        assert!(html.contains("action=\"/9\""));
        assert!(html.contains("action=\"/9/delete\""));
        assert!(html.contains("Author is required"));
        assert!(html.contains("value=\"Dune\""));
    }
}
