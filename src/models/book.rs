//! Book model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationErrors};

/// Book record as stored in the `books` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub genre: Option<String>,
    pub year: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Book {
    pub fn genre_text(&self) -> &str {
        self.genre.as_deref().unwrap_or("")
    }

    pub fn year_text(&self) -> String {
        self.year.map(|y| y.to_string()).unwrap_or_default()
    }
}

/// A single constraint violation, shown next to the form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Raw create/update form submission. Missing fields deserialize as empty.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct BookForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub year: String,
}

/// Fields checked by the derive, in the order errors are reported
const DERIVED_FIELDS: [&str; 2] = ["title", "author"];

impl BookForm {
    /// Trimmed copy of the submission
    pub fn normalized(&self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            author: self.author.trim().to_string(),
            genre: self.genre.trim().to_string(),
            year: self.year.trim().to_string(),
        }
    }

    /// Check every constraint and produce the storable field set.
    pub fn to_new_book(&self) -> Result<NewBook, Vec<FieldError>> {
        let form = self.normalized();

        let mut errors = match form.validate() {
            Ok(()) => Vec::new(),
            Err(e) => collect_field_errors(&e),
        };

        let year = if form.year.is_empty() {
            None
        } else {
            match form.year.parse::<i32>() {
                Ok(year) => Some(year),
                Err(_) => {
                    errors.push(FieldError::new("year", "Year must be an integer"));
                    None
                }
            }
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(NewBook {
            title: form.title,
            author: form.author,
            genre: (!form.genre.is_empty()).then_some(form.genre),
            year,
        })
    }
}

fn collect_field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let by_field = errors.field_errors();
    DERIVED_FIELDS
        .iter()
        .filter_map(|field| by_field.get(*field).map(|errs| (*field, errs)))
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field));
                FieldError::new(field, message)
            })
        })
        .collect()
}

/// Validated field set handed to storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub genre: Option<String>,
    pub year: Option<i32>,
}

/// In-memory book shown in a form. Never persisted, may be invalid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub year: String,
}

impl Draft {
    /// Echo a rejected submission back, as typed
    pub fn from_form(form: &BookForm) -> Self {
        Self {
            title: form.title.clone(),
            author: form.author.clone(),
            genre: form.genre.clone(),
            year: form.year.clone(),
        }
    }
}

impl From<&Book> for Draft {
    fn from(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            genre: book.genre_text().to_string(),
            year: book.year_text(),
        }
    }
}
