//! Library Catalog
//!
//! Books, authors, genres, reader reviews and loanable copies, served as a
//! JSON API plus an HTML landing page with catalog counts.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod templates;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
    pub templates: templates::Templates,
}

impl AppState {
    /// Build the state over an open pool
    pub fn new(config: AppConfig, pool: sqlx::PgPool) -> Result<Self, tera::Error> {
        let repository = repository::Repository::new(pool);
        Ok(Self {
            config: Arc::new(config),
            services: Arc::new(services::Services::new(repository)),
            templates: templates::Templates::new()?,
        })
    }
}
