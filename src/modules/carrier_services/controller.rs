use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use orderdesk_core::AppError;
use orderdesk_models::{CarrierService, CreateCarrierServiceDto, UpdateCarrierServiceDto};

use crate::middleware::auth::RequireUser;
use crate::modules::carrier_services::service::CarrierServicesService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/carrier-services",
    responses(
        (status = 200, description = "All carrier services", body = Vec<CarrierService>),
        (status = 401, description = "Authentication required")
    ),
    tag = "Carrier Services",
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state, _user))]
pub async fn list_carrier_services(
    State(state): State<AppState>,
    RequireUser(_user): RequireUser,
) -> Result<Json<Vec<CarrierService>>, AppError> {
    Ok(Json(CarrierServicesService::list(&state.db).await?))
}

#[utoipa::path(
    get,
    path = "/api/carrier-services/{id}",
    params(("id" = i64, Path, description = "Carrier service ID")),
    responses(
        (status = 200, description = "Carrier service", body = CarrierService),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Carrier service not found")
    ),
    tag = "Carrier Services",
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state, _user))]
pub async fn get_carrier_service(
    State(state): State<AppState>,
    RequireUser(_user): RequireUser,
    Path(id): Path<i64>,
) -> Result<Json<CarrierService>, AppError> {
    Ok(Json(CarrierServicesService::get(&state.db, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/carrier-services",
    request_body = CreateCarrierServiceDto,
    responses(
        (status = 201, description = "Carrier service created", body = CarrierService),
        (status = 401, description = "Authentication required"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Carrier Services",
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state, _user))]
pub async fn create_carrier_service(
    State(state): State<AppState>,
    RequireUser(_user): RequireUser,
    ValidatedJson(dto): ValidatedJson<CreateCarrierServiceDto>,
) -> Result<(StatusCode, Json<CarrierService>), AppError> {
    let carrier_service = CarrierServicesService::create(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(carrier_service)))
}

#[utoipa::path(
    put,
    path = "/api/carrier-services/{id}",
    params(("id" = i64, Path, description = "Carrier service ID")),
    request_body = UpdateCarrierServiceDto,
    responses(
        (status = 200, description = "Carrier service updated", body = CarrierService),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Carrier service not found")
    ),
    tag = "Carrier Services",
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state, _user))]
pub async fn update_carrier_service(
    State(state): State<AppState>,
    RequireUser(_user): RequireUser,
    Path(id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<UpdateCarrierServiceDto>,
) -> Result<Json<CarrierService>, AppError> {
    Ok(Json(CarrierServicesService::update(&state.db, id, dto).await?))
}

#[utoipa::path(
    delete,
    path = "/api/carrier-services/{id}",
    params(("id" = i64, Path, description = "Carrier service ID")),
    responses(
        (status = 204, description = "Carrier service deleted"),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Carrier service not found")
    ),
    tag = "Carrier Services",
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state, _user))]
pub async fn delete_carrier_service(
    State(state): State<AppState>,
    RequireUser(_user): RequireUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    CarrierServicesService::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
