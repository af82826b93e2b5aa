//! Book review model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::{book::BookSummary, user::UserShort, API_PREFIX};

/// Review row from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookReview {
    pub id: i32,
    pub book_id: i32,
    pub reviewer_id: i32,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl BookReview {
    pub fn absolute_url(&self) -> String {
        review_url(self.id)
    }
}

fn review_url(id: i32) -> String {
    format!("{}/reviews/{}", API_PREFIX, id)
}

/// Review with its book and reviewer resolved
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReviewDetails {
    pub id: i32,
    pub book: BookSummary,
    pub reviewer: UserShort,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub url: String,
}

impl ReviewDetails {
    pub fn new(
        id: i32,
        book: BookSummary,
        reviewer: UserShort,
        content: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            url: review_url(id),
            id,
            book,
            reviewer,
            content,
            created_at,
        }
    }

    pub fn absolute_url(&self) -> String {
        review_url(self.id)
    }
}

impl std::fmt::Display for ReviewDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} review by {}", self.book, self.reviewer)
    }
}

/// Create review request; the book comes from the route
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReview {
    pub reviewer_id: i32,
    #[validate(length(min = 1, max = 4000, message = "Content must be 1 to 4000 characters"))]
    pub content: String,
}
