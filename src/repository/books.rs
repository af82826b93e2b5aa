//! Books repository

use sqlx::{Pool, Postgres, Transaction};

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookRequest, BookSummary},
};

const BOOK_COLUMNS: &str = "id, title, author_id, cover, summary";

const SUMMARY_SELECT: &str = r#"
    SELECT b.id, b.title, b.author_id,
           a.first_name AS author_first_name,
           a.last_name AS author_last_name
    FROM books b
    JOIN authors a ON a.id = b.author_id
"#;

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// All books with their author, by title
    pub async fn list(&self) -> AppResult<Vec<BookSummary>> {
        let query = format!("{} ORDER BY b.title, b.id", SUMMARY_SELECT);
        let rows = sqlx::query_as::<_, BookSummary>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Books written by one author, by title
    pub async fn list_by_author(&self, author_id: i32) -> AppResult<Vec<Book>> {
        let query = format!(
            "SELECT {} FROM books WHERE author_id = $1 ORDER BY title, id",
            BOOK_COLUMNS
        );
        let rows = sqlx::query_as::<_, Book>(&query)
            .bind(author_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        let query = format!("SELECT {} FROM books WHERE id = $1", BOOK_COLUMNS);
        sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    pub async fn get_summary(&self, id: i32) -> AppResult<BookSummary> {
        let query = format!("{} WHERE b.id = $1", SUMMARY_SELECT);
        sqlx::query_as::<_, BookSummary>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    /// Insert a book and its genre links in one transaction
    pub async fn create(&self, data: &BookRequest) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        ensure_author_exists(&mut tx, data.author_id).await?;

        let query = format!(
            r#"
            INSERT INTO books (title, author_id, cover, summary)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            BOOK_COLUMNS
        );
        let book = sqlx::query_as::<_, Book>(&query)
            .bind(&data.title)
            .bind(data.author_id)
            .bind(&data.cover)
            .bind(&data.summary)
            .fetch_one(&mut *tx)
            .await?;

        if let Some(ref genre_ids) = data.genre_ids {
            replace_genres(&mut tx, book.id, genre_ids).await?;
        }

        tx.commit().await?;
        Ok(book)
    }

    /// Replace a book's fields; genre links are replaced only when given
    pub async fn update(&self, id: i32, data: &BookRequest) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        ensure_author_exists(&mut tx, data.author_id).await?;

        let query = format!(
            r#"
            UPDATE books SET title = $1, author_id = $2, cover = $3, summary = $4
            WHERE id = $5
            RETURNING {}
            "#,
            BOOK_COLUMNS
        );
        let book = sqlx::query_as::<_, Book>(&query)
            .bind(&data.title)
            .bind(data.author_id)
            .bind(&data.cover)
            .bind(&data.summary)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))?;

        if let Some(ref genre_ids) = data.genre_ids {
            replace_genres(&mut tx, book.id, genre_ids).await?;
        }

        tx.commit().await?;
        Ok(book)
    }

    /// Deletes the book together with its reviews, copies and genre links
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book {} not found", id)));
        }
        Ok(())
    }

    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

async fn ensure_author_exists(tx: &mut Transaction<'_, Postgres>, author_id: i32) -> AppResult<()> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM authors WHERE id = $1)")
        .bind(author_id)
        .fetch_one(&mut **tx)
        .await?;
    if !exists {
        return Err(AppError::NotFound(format!("Author {} not found", author_id)));
    }
    Ok(())
}

async fn replace_genres(
    tx: &mut Transaction<'_, Postgres>,
    book_id: i32,
    genre_ids: &[i32],
) -> AppResult<()> {
    let mut ids = genre_ids.to_vec();
    ids.sort_unstable();
    ids.dedup();

    let found: Vec<i32> = sqlx::query_scalar("SELECT id FROM genres WHERE id = ANY($1)")
        .bind(&ids)
        .fetch_all(&mut **tx)
        .await?;
    if let Some(missing) = ids.iter().find(|id| !found.contains(id)) {
        return Err(AppError::NotFound(format!("Genre {} not found", missing)));
    }

    sqlx::query("DELETE FROM book_genres WHERE book_id = $1")
        .bind(book_id)
        .execute(&mut **tx)
        .await?;

    sqlx::query(
        r#"
        INSERT INTO book_genres (book_id, genre_id)
        SELECT $1, UNNEST($2::int4[])
        "#,
    )
    .bind(book_id)
    .bind(&ids)
    .execute(&mut **tx)
    .await?;

    Ok(())
}
