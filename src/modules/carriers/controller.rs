use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use orderdesk_core::AppError;
use orderdesk_models::{Carrier, CreateCarrierDto, UpdateCarrierDto};

use crate::middleware::auth::Identity;
use crate::modules::carriers::service::CarrierService;
use crate::state::AppState;
use crate::utils::auth_helpers::{caller_projects, require_authenticated};
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/carriers",
    responses(
        (status = 200, description = "Carriers linked to the caller's projects", body = Vec<Carrier>)
    ),
    tag = "Carriers",
    security((), ("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state, ctx))]
pub async fn list_carriers(
    State(state): State<AppState>,
    Identity(ctx): Identity,
) -> Result<Json<Vec<Carrier>>, AppError> {
    let projects = caller_projects(&state.db, &ctx).await?;
    Ok(Json(CarrierService::list_visible(&state.db, &projects).await?))
}

#[utoipa::path(
    get,
    path = "/api/carriers/{id}",
    params(("id" = i64, Path, description = "Carrier ID")),
    responses(
        (status = 200, description = "Carrier details", body = Carrier),
        (status = 404, description = "Carrier not found")
    ),
    tag = "Carriers",
    security((), ("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state, ctx))]
pub async fn get_carrier(
    State(state): State<AppState>,
    Identity(ctx): Identity,
    Path(id): Path<i64>,
) -> Result<Json<Carrier>, AppError> {
    let projects = caller_projects(&state.db, &ctx).await?;
    Ok(Json(CarrierService::get_visible(&state.db, &projects, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/carriers",
    request_body = CreateCarrierDto,
    responses(
        (status = 201, description = "Carrier created", body = Carrier),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "A listed project is not one of the caller's"),
        (status = 409, description = "Lookup code already in use in one of the projects")
    ),
    tag = "Carriers",
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state, ctx))]
pub async fn create_carrier(
    State(state): State<AppState>,
    Identity(ctx): Identity,
    ValidatedJson(dto): ValidatedJson<CreateCarrierDto>,
) -> Result<(StatusCode, Json<Carrier>), AppError> {
    require_authenticated(&ctx)?;
    let projects = caller_projects(&state.db, &ctx).await?;
    let carrier = CarrierService::create(&state.db, &projects, dto).await?;
    Ok((StatusCode::CREATED, Json(carrier)))
}

#[utoipa::path(
    put,
    path = "/api/carriers/{id}",
    params(("id" = i64, Path, description = "Carrier ID")),
    request_body = UpdateCarrierDto,
    responses(
        (status = 200, description = "Carrier updated", body = Carrier),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Carrier or project not found"),
        (status = 409, description = "Lookup code already in use in one of the projects")
    ),
    tag = "Carriers",
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state, ctx))]
pub async fn update_carrier(
    State(state): State<AppState>,
    Identity(ctx): Identity,
    Path(id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<UpdateCarrierDto>,
) -> Result<Json<Carrier>, AppError> {
    require_authenticated(&ctx)?;
    let projects = caller_projects(&state.db, &ctx).await?;
    Ok(Json(
        CarrierService::update(&state.db, &projects, id, dto).await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/api/carriers/{id}",
    params(("id" = i64, Path, description = "Carrier ID")),
    responses(
        (status = 204, description = "Unlinked from the caller's projects; deleted once no project links remain"),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Carrier not found")
    ),
    tag = "Carriers",
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state, ctx))]
pub async fn delete_carrier(
    State(state): State<AppState>,
    Identity(ctx): Identity,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    require_authenticated(&ctx)?;
    let projects = caller_projects(&state.db, &ctx).await?;
    CarrierService::delete(&state.db, &projects, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
