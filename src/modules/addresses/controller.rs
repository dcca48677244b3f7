use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use orderdesk_core::AppError;
use orderdesk_models::{Address, CreateAddressDto, UpdateAddressDto};

use crate::middleware::auth::RequireUser;
use crate::modules::addresses::service::AddressService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/addresses",
    responses(
        (status = 200, description = "All addresses", body = Vec<Address>),
        (status = 401, description = "Authentication required")
    ),
    tag = "Addresses",
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state, _user))]
pub async fn list_addresses(
    State(state): State<AppState>,
    RequireUser(_user): RequireUser,
) -> Result<Json<Vec<Address>>, AppError> {
    Ok(Json(AddressService::list(&state.db).await?))
}

#[utoipa::path(
    get,
    path = "/api/addresses/{id}",
    params(("id" = i64, Path, description = "Address ID")),
    responses(
        (status = 200, description = "Address", body = Address),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Address not found")
    ),
    tag = "Addresses",
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state, _user))]
pub async fn get_address(
    State(state): State<AppState>,
    RequireUser(_user): RequireUser,
    Path(id): Path<i64>,
) -> Result<Json<Address>, AppError> {
    Ok(Json(AddressService::get(&state.db, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/addresses",
    request_body = CreateAddressDto,
    responses(
        (status = 201, description = "Address created", body = Address),
        (status = 401, description = "Authentication required"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Addresses",
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state, _user))]
pub async fn create_address(
    State(state): State<AppState>,
    RequireUser(_user): RequireUser,
    ValidatedJson(dto): ValidatedJson<CreateAddressDto>,
) -> Result<(StatusCode, Json<Address>), AppError> {
    let address = AddressService::create(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(address)))
}

#[utoipa::path(
    put,
    path = "/api/addresses/{id}",
    params(("id" = i64, Path, description = "Address ID")),
    request_body = UpdateAddressDto,
    responses(
        (status = 200, description = "Address updated", body = Address),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Address not found")
    ),
    tag = "Addresses",
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state, _user))]
pub async fn update_address(
    State(state): State<AppState>,
    RequireUser(_user): RequireUser,
    Path(id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<UpdateAddressDto>,
) -> Result<Json<Address>, AppError> {
    Ok(Json(AddressService::update(&state.db, id, dto).await?))
}

#[utoipa::path(
    delete,
    path = "/api/addresses/{id}",
    params(("id" = i64, Path, description = "Address ID")),
    responses(
        (status = 204, description = "Address deleted"),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Address not found")
    ),
    tag = "Addresses",
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state, _user))]
pub async fn delete_address(
    State(state): State<AppState>,
    RequireUser(_user): RequireUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    AddressService::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
