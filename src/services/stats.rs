//! Landing-page statistics

use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{enums::LoanStatus, genre::Genre},
    repository::Repository,
};

/// Counts shown on the landing page
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct IndexSummary {
    /// Total number of books
    pub num_books: i64,
    /// Total number of physical copies
    pub num_instances: i64,
    /// Copies with status `available`
    pub num_available: i64,
    /// Total number of authors
    pub num_authors: i64,
    /// Every genre, alphabetical
    pub genres: Vec<Genre>,
}

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn index_summary(&self) -> AppResult<IndexSummary> {
        let (num_books, num_instances, num_available, num_authors, genres) = tokio::try_join!(
            self.repository.books.count(),
            self.repository.instances.count(),
            self.repository.instances.count_with_status(LoanStatus::Available),
            self.repository.authors.count(),
            self.repository.genres.list(),
        )?;

        Ok(IndexSummary {
            num_books,
            num_instances,
            num_available,
            num_authors,
            genres,
        })
    }
}
