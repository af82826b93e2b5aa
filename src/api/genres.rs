//! Genre endpoints

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::genre::{Genre, GenreRequest},
    AppState,
};

use super::{ApiJson, ApiPath};

/// List all genres
#[utoipa::path(
    get,
    path = "/genres",
    tag = "genres",
    responses(
        (status = 200, description = "Genres by name", body = Vec<Genre>)
    )
)]
pub async fn list_genres(State(state): State<AppState>) -> AppResult<Json<Vec<Genre>>> {
    let genres = state.services.catalog.list_genres().await?;
    Ok(Json(genres))
}

/// Get genre by ID
#[utoipa::path(
    get,
    path = "/genres/{id}",
    tag = "genres",
    params(("id" = i32, Path, description = "Genre ID")),
    responses(
        (status = 200, description = "Genre", body = Genre),
        (status = 404, description = "Genre not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_genre(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<Genre>> {
    let genre = state.services.catalog.get_genre(id).await?;
    Ok(Json(genre))
}

/// Create genre
#[utoipa::path(
    post,
    path = "/genres",
    tag = "genres",
    request_body = GenreRequest,
    responses(
        (status = 201, description = "Genre created", body = Genre)
    )
)]
pub async fn create_genre(
    State(state): State<AppState>,
    ApiJson(data): ApiJson<GenreRequest>,
) -> AppResult<(StatusCode, Json<Genre>)> {
    let genre = state.services.catalog.create_genre(&data).await?;
    Ok((StatusCode::CREATED, Json(genre)))
}

/// Rename genre
#[utoipa::path(
    put,
    path = "/genres/{id}",
    tag = "genres",
    params(("id" = i32, Path, description = "Genre ID")),
    request_body = GenreRequest,
    responses(
        (status = 200, description = "Genre updated", body = Genre)
    )
)]
pub async fn update_genre(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(data): ApiJson<GenreRequest>,
) -> AppResult<Json<Genre>> {
    let genre = state.services.catalog.update_genre(id, &data).await?;
    Ok(Json(genre))
}

/// Delete genre (books are kept)
#[utoipa::path(
    delete,
    path = "/genres/{id}",
    tag = "genres",
    params(("id" = i32, Path, description = "Genre ID")),
    responses(
        (status = 204, description = "Genre deleted")
    )
)]
pub async fn delete_genre(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<StatusCode> {
    state.services.catalog.delete_genre(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
