//! Book reviews service

use validator::Validate;

use crate::{
    error::AppResult,
    models::review::{CreateReview, ReviewDetails},
    repository::Repository,
};

#[derive(Clone)]
pub struct ReviewsService {
    repository: Repository,
}

impl ReviewsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list_for_book(&self, book_id: i32) -> AppResult<Vec<ReviewDetails>> {
        // 404 for an unknown book rather than an empty list
        self.repository.books.get_by_id(book_id).await?;
        self.repository.reviews.list_for_book(book_id).await
    }

    pub async fn get(&self, id: i32) -> AppResult<ReviewDetails> {
        self.repository.reviews.get_by_id(id).await
    }

    pub async fn create(&self, book_id: i32, data: &CreateReview) -> AppResult<ReviewDetails> {
        data.validate()?;
        self.repository.books.get_by_id(book_id).await?;
        self.repository.users.get_by_id(data.reviewer_id).await?;

        let review = self.repository.reviews.create(book_id, data).await?;
        tracing::info!(
            review_id = review.id,
            book_id,
            reviewer_id = data.reviewer_id,
            "Created review"
        );
        self.repository.reviews.get_by_id(review.id).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.reviews.delete(id).await
    }
}
