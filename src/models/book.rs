//! Book (catalog entry) model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::{author::Author, display_first, genre::Genre, API_PREFIX};

/// Directory, relative to the media root, that holds cover images
pub const COVER_DIR: &str = "book_covers";

/// Book row from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author_id: i32,
    /// Cover image path relative to the media root
    pub cover: Option<String>,
    /// Rich text (HTML)
    pub summary: String,
}

impl Book {
    pub fn absolute_url(&self) -> String {
        book_url(self.id)
    }
}

fn book_url(id: i32) -> String {
    format!("{}/books/{}", API_PREFIX, id)
}

/// Book joined with its author's name, used in lists and embedded in
/// reviews and copies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookSummary {
    pub id: i32,
    pub title: String,
    pub author_id: i32,
    pub author_first_name: String,
    pub author_last_name: String,
}

impl std::fmt::Display for BookSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} - {}",
            self.author_first_name, self.author_last_name, self.title
        )
    }
}

/// Book with author and genres for display
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookDetails {
    pub id: i32,
    pub title: String,
    pub author: Author,
    pub genres: Vec<Genre>,
    pub display_genre: String,
    pub cover: Option<String>,
    pub summary: String,
    pub url: String,
}

impl BookDetails {
    pub fn new(book: Book, author: Author, genres: Vec<Genre>) -> Self {
        let display_genre = display_first(genres.iter().map(|g| g.name.as_str()));
        Self {
            url: book.absolute_url(),
            id: book.id,
            title: book.title,
            author,
            genres,
            display_genre,
            cover: book.cover,
            summary: book.summary,
        }
    }

    pub fn absolute_url(&self) -> String {
        book_url(self.id)
    }
}

impl std::fmt::Display for BookDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.author, self.title)
    }
}

/// Create or replace a book
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct BookRequest {
    #[validate(length(min = 1, max = 250, message = "Title must be 1 to 250 characters"))]
    pub title: String,
    pub author_id: i32,
    /// Cover image path; must live under `book_covers/`
    #[validate(length(max = 100), custom(function = "validate_cover_path"))]
    pub cover: Option<String>,
    #[validate(length(max = 10000, message = "Summary is limited to 10000 characters"))]
    #[serde(default)]
    pub summary: String,
    /// Genre ids. On update, `None` keeps the current genres.
    pub genre_ids: Option<Vec<i32>>,
}

fn validate_cover_path(path: &str) -> Result<(), validator::ValidationError> {
    let inside = path
        .strip_prefix(COVER_DIR)
        .and_then(|rest| rest.strip_prefix('/'))
        .is_some_and(|name| !name.is_empty() && !name.contains(".."));
    if inside {
        Ok(())
    } else {
        Err(validator::ValidationError::new("cover_path"))
    }
}
