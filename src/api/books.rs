//! Book catalog pages

use axum::{
    extract::{rejection::FormRejection, Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Form,
};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::book::{BookForm, Draft},
    views::{self, BookListPage, NewBookPage, UpdateBookPage},
    AppState,
};

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub query: String,
}

/// 302 back to the book list after a successful mutation
fn redirect_to_list() -> Response {
    (StatusCode::FOUND, [(header::LOCATION, "/")]).into_response()
}

/// Undecodable bodies (e.g. a repeated field) go to the error page
fn form_or_bad_request(form: Result<Form<BookForm>, FormRejection>) -> AppResult<BookForm> {
    form.map(|Form(form)| form)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

/// Ids that are not integers cannot exist
fn parse_id(raw: &str) -> AppResult<i32> {
    raw.parse()
        .map_err(|_| AppError::NotFound(format!("Book {} not found", raw)))
}

/// List all books
pub async fn list_books(State(state): State<AppState>) -> AppResult<Html<String>> {
    let books = state.services.catalog.list_books().await?;
    views::render(&BookListPage {
        title: "Books",
        books: &books,
        query: "",
    })
}

/// Search books by title, author, genre or year
pub async fn search_books(
    State(state): State<AppState>,
    Query(search): Query<SearchQuery>,
) -> AppResult<Html<String>> {
    let books = state.services.catalog.search_books(&search.query).await?;
    views::render(&BookListPage {
        title: "Books",
        books: &books,
        query: search.query.trim(),
    })
}

/// Empty creation form
pub async fn new_book_form() -> AppResult<Html<String>> {
    views::render(&NewBookPage {
        title: "New Book",
        book: &Draft::default(),
        errors: &[],
    })
}

/// Create a book, or redisplay the form with its errors
pub async fn create_book(
    State(state): State<AppState>,
    form: Result<Form<BookForm>, FormRejection>,
) -> AppResult<Response> {
    let form = form_or_bad_request(form)?;
    match state.services.catalog.create_book(&form).await {
        Ok(_) => Ok(redirect_to_list()),
        Err(AppError::Validation(errors)) => {
            let draft = Draft::from_form(&form);
            let page = views::render(&NewBookPage {
                title: "New Book",
                book: &draft,
                errors: &errors,
            })?;
            Ok(page.into_response())
        }
        Err(e) => Err(e),
    }
}

/// Edit form for an existing book
pub async fn edit_book_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = parse_id(&id)?;
    let book = state.services.catalog.get_book(id).await?;
    views::render(&UpdateBookPage {
        title: "Update Book",
        id,
        book: &Draft::from(&book),
        errors: &[],
    })
}

/// Update a book, or redisplay the edit form with its errors
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
    form: Result<Form<BookForm>, FormRejection>,
) -> AppResult<Response> {
    let id = parse_id(&id)?;
    let form = form_or_bad_request(form)?;
    match state.services.catalog.update_book(id, &form).await {
        Ok(_) => Ok(redirect_to_list()),
        Err(AppError::Validation(errors)) => {
            let draft = Draft::from_form(&form);
            let page = views::render(&UpdateBookPage {
                title: "Update Book",
                id,
                book: &draft,
                errors: &errors,
            })?;
            Ok(page.into_response())
        }
        Err(e) => Err(e),
    }
}

/// Delete a book
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = parse_id(&id)?;
    state.services.catalog.delete_book(id).await?;
    Ok(redirect_to_list())
}
