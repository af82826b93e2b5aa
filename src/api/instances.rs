//! Book instance (copy) endpoints

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::instance::{CreateInstance, InstanceDetails, InstanceQuery, UpdateInstance},
    AppState,
};

use super::{ApiJson, ApiPath, ApiQuery};

/// List copies by due date
#[utoipa::path(
    get,
    path = "/instances",
    tag = "instances",
    params(InstanceQuery),
    responses(
        (status = 200, description = "Book copies", body = Vec<InstanceDetails>)
    )
)]
pub async fn list_instances(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<InstanceQuery>,
) -> AppResult<Json<Vec<InstanceDetails>>> {
    let instances = state.services.instances.list(query.book_id).await?;
    Ok(Json(instances))
}

/// Get copy by ID
#[utoipa::path(
    get,
    path = "/instances/{id}",
    tag = "instances",
    params(("id" = i32, Path, description = "Book instance ID")),
    responses(
        (status = 200, description = "Book copy", body = InstanceDetails),
        (status = 404, description = "Book instance not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_instance(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<InstanceDetails>> {
    let instance = state.services.instances.get(id).await?;
    Ok(Json(instance))
}

/// Add a copy of a book
#[utoipa::path(
    post,
    path = "/instances",
    tag = "instances",
    request_body = CreateInstance,
    responses(
        (status = 201, description = "Book copy created", body = InstanceDetails),
        (status = 404, description = "Unknown book or reader", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_instance(
    State(state): State<AppState>,
    ApiJson(data): ApiJson<CreateInstance>,
) -> AppResult<(StatusCode, Json<InstanceDetails>)> {
    let instance = state.services.instances.create(&data).await?;
    Ok((StatusCode::CREATED, Json(instance)))
}

/// Update due date, status and reader of a copy
#[utoipa::path(
    put,
    path = "/instances/{id}",
    tag = "instances",
    params(("id" = i32, Path, description = "Book instance ID")),
    request_body = UpdateInstance,
    responses(
        (status = 200, description = "Book copy updated", body = InstanceDetails)
    )
)]
pub async fn update_instance(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(data): ApiJson<UpdateInstance>,
) -> AppResult<Json<InstanceDetails>> {
    let instance = state.services.instances.update(id, &data).await?;
    Ok(Json(instance))
}

/// Delete copy
#[utoipa::path(
    delete,
    path = "/instances/{id}",
    tag = "instances",
    params(("id" = i32, Path, description = "Book instance ID")),
    responses(
        (status = 204, description = "Book copy deleted")
    )
)]
pub async fn delete_instance(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<StatusCode> {
    state.services.instances.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
