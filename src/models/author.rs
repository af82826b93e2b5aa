//! Author model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::{book::Book, display_first, API_PREFIX};

/// Full author model from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    /// Rich text (HTML)
    pub bio: String,
}

impl Author {
    pub fn absolute_url(&self) -> String {
        format!("{}/authors/{}", API_PREFIX, self.id)
    }
}

impl std::fmt::Display for Author {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}

/// Author with the books written, in title order
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthorDetails {
    pub author: Author,
    pub books: Vec<Book>,
    pub display_books: String,
    pub url: String,
}

impl AuthorDetails {
    pub fn new(author: Author, books: Vec<Book>) -> Self {
        let display_books = display_books(&books);
        let url = author.absolute_url();
        Self {
            author,
            books,
            display_books,
            url,
        }
    }
}

/// Titles of the first three books, comma separated
pub fn display_books(books: &[Book]) -> String {
    display_first(books.iter().map(|b| b.title.as_str()))
}

/// Create or replace an author
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AuthorRequest {
    #[validate(length(min = 1, max = 100, message = "First name must be 1 to 100 characters"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100, message = "Last name must be 1 to 100 characters"))]
    pub last_name: String,
    #[validate(length(max = 10000, message = "Bio is limited to 10000 characters"))]
    #[serde(default)]
    pub bio: String,
}
