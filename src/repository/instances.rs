//! Book instances (physical copies) repository

use sqlx::{postgres::PgRow, Pool, Postgres, Row};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::BookSummary,
        enums::LoanStatus,
        instance::{BookInstance, CreateInstance, InstanceDetails, UpdateInstance},
        user::UserShort,
    },
};

const INSTANCE_COLUMNS: &str = "id, unique_id, book_id, due_back, status, reader_id";

const DETAILS_SELECT: &str = r#"
    SELECT i.id, i.unique_id, i.book_id, i.due_back, i.status, i.reader_id,
           b.title AS book_title, b.author_id,
           a.first_name AS author_first_name, a.last_name AS author_last_name,
           u.username AS reader_username
    FROM book_instances i
    JOIN books b ON b.id = i.book_id
    JOIN authors a ON a.id = b.author_id
    LEFT JOIN users u ON u.id = i.reader_id
"#;

fn details_from_row(row: &PgRow) -> InstanceDetails {
    let reader_id: Option<i32> = row.get("reader_id");
    let reader_username: Option<String> = row.get("reader_username");
    let instance = BookInstance {
        id: row.get("id"),
        unique_id: row.get("unique_id"),
        book_id: row.get("book_id"),
        due_back: row.get("due_back"),
        status: row.get("status"),
        reader_id,
    };
    let book = BookSummary {
        id: instance.book_id,
        title: row.get("book_title"),
        author_id: row.get("author_id"),
        author_first_name: row.get("author_first_name"),
        author_last_name: row.get("author_last_name"),
    };
    let reader = reader_id
        .zip(reader_username)
        .map(|(id, username)| UserShort { id, username });
    InstanceDetails::new(instance, book, reader)
}

#[derive(Clone)]
pub struct InstancesRepository {
    pool: Pool<Postgres>,
}

impl InstancesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Copies ordered by due date (copies without one last), optionally
    /// restricted to one book
    pub async fn list(&self, book_id: Option<i32>) -> AppResult<Vec<InstanceDetails>> {
        let query = format!(
            "{} WHERE ($1::int4 IS NULL OR i.book_id = $1) ORDER BY i.due_back, i.id",
            DETAILS_SELECT
        );
        let rows = sqlx::query(&query)
            .bind(book_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(details_from_row).collect())
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<InstanceDetails> {
        let query = format!("{} WHERE i.id = $1", DETAILS_SELECT);
        sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(|row| details_from_row(&row))
            .ok_or_else(|| AppError::NotFound(format!("Book instance {} not found", id)))
    }

    /// Insert a copy under a freshly generated unique id
    pub async fn create(&self, data: &CreateInstance) -> AppResult<BookInstance> {
        let query = format!(
            r#"
            INSERT INTO book_instances (unique_id, book_id, due_back, status, reader_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            INSTANCE_COLUMNS
        );
        let row = sqlx::query_as::<_, BookInstance>(&query)
            .bind(Uuid::new_v4())
            .bind(data.book_id)
            .bind(data.due_back)
            .bind(data.status)
            .bind(data.reader_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    /// Replace due date, status and reader; `unique_id` and book never change
    pub async fn update(&self, id: i32, data: &UpdateInstance) -> AppResult<BookInstance> {
        let query = format!(
            r#"
            UPDATE book_instances SET due_back = $1, status = $2, reader_id = $3
            WHERE id = $4
            RETURNING {}
            "#,
            INSTANCE_COLUMNS
        );
        sqlx::query_as::<_, BookInstance>(&query)
            .bind(data.due_back)
            .bind(data.status)
            .bind(data.reader_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book instance {} not found", id)))
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM book_instances WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book instance {} not found", id)));
        }
        Ok(())
    }

    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM book_instances")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn count_with_status(&self, status: LoanStatus) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM book_instances WHERE status = $1")
            .bind(status)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
