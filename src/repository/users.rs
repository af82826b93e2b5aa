//! Users repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::user::{CreateUser, User},
};

const USER_COLUMNS: &str = "id, username, first_name, last_name, email, date_joined";

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<User>> {
        let query = format!("SELECT {} FROM users ORDER BY username", USER_COLUMNS);
        let rows = sqlx::query_as::<_, User>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<User> {
        let query = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }

    /// Insert a user; a taken username surfaces as a conflict
    pub async fn create(&self, data: &CreateUser) -> AppResult<User> {
        let query = format!(
            r#"
            INSERT INTO users (username, first_name, last_name, email)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            USER_COLUMNS
        );
        let row = sqlx::query_as::<_, User>(&query)
            .bind(&data.username)
            .bind(&data.first_name)
            .bind(&data.last_name)
            .bind(data.email.as_deref().unwrap_or_default())
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    /// Deletes the user along with their reviews and the copies they hold
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("User {} not found", id)));
        }
        Ok(())
    }
}
