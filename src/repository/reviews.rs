//! Book reviews repository

use chrono::{DateTime, Utc};
use sqlx::{postgres::PgRow, Pool, Postgres, Row};

use crate::{
    error::{AppError, AppResult},
    models::{
        book::BookSummary,
        review::{BookReview, CreateReview, ReviewDetails},
        user::UserShort,
    },
};

const DETAILS_SELECT: &str = r#"
    SELECT r.id, r.content, r.created_at,
           b.id AS book_id, b.title AS book_title, b.author_id,
           a.first_name AS author_first_name, a.last_name AS author_last_name,
           u.id AS reviewer_id, u.username AS reviewer_username
    FROM book_reviews r
    JOIN books b ON b.id = r.book_id
    JOIN authors a ON a.id = b.author_id
    JOIN users u ON u.id = r.reviewer_id
"#;

fn details_from_row(row: &PgRow) -> ReviewDetails {
    let created_at: DateTime<Utc> = row.get("created_at");
    ReviewDetails::new(
        row.get("id"),
        BookSummary {
            id: row.get("book_id"),
            title: row.get("book_title"),
            author_id: row.get("author_id"),
            author_first_name: row.get("author_first_name"),
            author_last_name: row.get("author_last_name"),
        },
        UserShort {
            id: row.get("reviewer_id"),
            username: row.get("reviewer_username"),
        },
        row.get("content"),
        created_at,
    )
}

#[derive(Clone)]
pub struct ReviewsRepository {
    pool: Pool<Postgres>,
}

impl ReviewsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Reviews of a book, newest first
    pub async fn list_for_book(&self, book_id: i32) -> AppResult<Vec<ReviewDetails>> {
        let query = format!(
            "{} WHERE r.book_id = $1 ORDER BY r.created_at DESC, r.id DESC",
            DETAILS_SELECT
        );
        let rows = sqlx::query(&query)
            .bind(book_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(details_from_row).collect())
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<ReviewDetails> {
        let query = format!("{} WHERE r.id = $1", DETAILS_SELECT);
        sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(|row| details_from_row(&row))
            .ok_or_else(|| AppError::NotFound(format!("Review {} not found", id)))
    }

    /// Insert a review; `created_at` is set by the database
    pub async fn create(&self, book_id: i32, data: &CreateReview) -> AppResult<BookReview> {
        let row = sqlx::query_as::<_, BookReview>(
            r#"
            INSERT INTO book_reviews (book_id, reviewer_id, content)
            VALUES ($1, $2, $3)
            RETURNING id, book_id, reviewer_id, content, created_at
            "#,
        )
        .bind(book_id)
        .bind(data.reviewer_id)
        .bind(&data.content)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM book_reviews WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Review {} not found", id)));
        }
        Ok(())
    }
}
