//! Book review endpoints

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::review::{CreateReview, ReviewDetails},
    AppState,
};

use super::{ApiJson, ApiPath};

/// Reviews of a book, newest first
#[utoipa::path(
    get,
    path = "/books/{id}/reviews",
    tag = "reviews",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Reviews", body = Vec<ReviewDetails>),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_book_reviews(
    State(state): State<AppState>,
    ApiPath(book_id): ApiPath<i32>,
) -> AppResult<Json<Vec<ReviewDetails>>> {
    let reviews = state.services.reviews.list_for_book(book_id).await?;
    Ok(Json(reviews))
}

/// Review a book
#[utoipa::path(
    post,
    path = "/books/{id}/reviews",
    tag = "reviews",
    params(("id" = i32, Path, description = "Book ID")),
    request_body = CreateReview,
    responses(
        (status = 201, description = "Review created", body = ReviewDetails),
        (status = 404, description = "Unknown book or reviewer", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_review(
    State(state): State<AppState>,
    ApiPath(book_id): ApiPath<i32>,
    ApiJson(data): ApiJson<CreateReview>,
) -> AppResult<(StatusCode, Json<ReviewDetails>)> {
    let review = state.services.reviews.create(book_id, &data).await?;
    Ok((StatusCode::CREATED, Json(review)))
}

/// Get review by ID
#[utoipa::path(
    get,
    path = "/reviews/{id}",
    tag = "reviews",
    params(("id" = i32, Path, description = "Review ID")),
    responses(
        (status = 200, description = "Review", body = ReviewDetails)
    )
)]
pub async fn get_review(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<ReviewDetails>> {
    let review = state.services.reviews.get(id).await?;
    Ok(Json(review))
}

/// Delete review
#[utoipa::path(
    delete,
    path = "/reviews/{id}",
    tag = "reviews",
    params(("id" = i32, Path, description = "Review ID")),
    responses(
        (status = 204, description = "Review deleted")
    )
)]
pub async fn delete_review(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<StatusCode> {
    state.services.reviews.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
