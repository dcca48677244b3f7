use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use orderdesk_core::AppError;
use orderdesk_models::{CreateWarehouseDto, UpdateWarehouseDto, Warehouse};

use crate::middleware::auth::Identity;
use crate::modules::warehouses::service::WarehouseService;
use crate::state::AppState;
use crate::utils::auth_helpers::{caller_projects, require_authenticated};
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/warehouses",
    responses(
        (status = 200, description = "Warehouses linked to the caller's projects; empty for anonymous callers", body = Vec<Warehouse>)
    ),
    tag = "Warehouses",
    security((), ("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state, ctx))]
pub async fn list_warehouses(
    State(state): State<AppState>,
    Identity(ctx): Identity,
) -> Result<Json<Vec<Warehouse>>, AppError> {
    let projects = caller_projects(&state.db, &ctx).await?;
    let warehouses = WarehouseService::list_visible(&state.db, &projects).await?;
    Ok(Json(warehouses))
}

#[utoipa::path(
    get,
    path = "/api/warehouses/{id}",
    params(("id" = i64, Path, description = "Warehouse ID")),
    responses(
        (status = 200, description = "Warehouse details", body = Warehouse),
        (status = 404, description = "Warehouse not found or not visible")
    ),
    tag = "Warehouses",
    security((), ("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state, ctx))]
pub async fn get_warehouse(
    State(state): State<AppState>,
    Identity(ctx): Identity,
    Path(id): Path<i64>,
) -> Result<Json<Warehouse>, AppError> {
    let projects = caller_projects(&state.db, &ctx).await?;
    let warehouse = WarehouseService::get_visible(&state.db, &projects, id).await?;
    Ok(Json(warehouse))
}

#[utoipa::path(
    post,
    path = "/api/warehouses",
    request_body = CreateWarehouseDto,
    responses(
        (status = 201, description = "Warehouse created", body = Warehouse),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "A listed project is not one of the caller's"),
        (status = 409, description = "Lookup code already in use in one of the projects"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Warehouses",
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state, ctx))]
pub async fn create_warehouse(
    State(state): State<AppState>,
    Identity(ctx): Identity,
    ValidatedJson(dto): ValidatedJson<CreateWarehouseDto>,
) -> Result<(StatusCode, Json<Warehouse>), AppError> {
    require_authenticated(&ctx)?;
    let projects = caller_projects(&state.db, &ctx).await?;
    let warehouse = WarehouseService::create(&state.db, &projects, dto).await?;
    Ok((StatusCode::CREATED, Json(warehouse)))
}

#[utoipa::path(
    put,
    path = "/api/warehouses/{id}",
    params(("id" = i64, Path, description = "Warehouse ID")),
    request_body = UpdateWarehouseDto,
    responses(
        (status = 200, description = "Warehouse updated", body = Warehouse),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Warehouse or project not found"),
        (status = 409, description = "Lookup code already in use in one of the projects")
    ),
    tag = "Warehouses",
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state, ctx))]
pub async fn update_warehouse(
    State(state): State<AppState>,
    Identity(ctx): Identity,
    Path(id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<UpdateWarehouseDto>,
) -> Result<Json<Warehouse>, AppError> {
    require_authenticated(&ctx)?;
    let projects = caller_projects(&state.db, &ctx).await?;
    let warehouse = WarehouseService::update(&state.db, &projects, id, dto).await?;
    Ok(Json(warehouse))
}

#[utoipa::path(
    delete,
    path = "/api/warehouses/{id}",
    params(("id" = i64, Path, description = "Warehouse ID")),
    responses(
        (status = 204, description = "Unlinked from the caller's projects; deleted once no project links remain"),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Warehouse not found")
    ),
    tag = "Warehouses",
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state, ctx))]
pub async fn delete_warehouse(
    State(state): State<AppState>,
    Identity(ctx): Identity,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    require_authenticated(&ctx)?;
    let projects = caller_projects(&state.db, &ctx).await?;
    WarehouseService::delete(&state.db, &projects, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
