use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use orderdesk_core::AppError;
use orderdesk_models::{CreateOrderTypeDto, OrderType, UpdateOrderTypeDto};

use crate::middleware::auth::RequireUser;
use crate::modules::order_types::service::OrderTypeService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/order-types",
    responses(
        (status = 200, description = "All order types", body = Vec<OrderType>),
        (status = 401, description = "Authentication required")
    ),
    tag = "Order Types",
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state, _user))]
pub async fn list_order_types(
    State(state): State<AppState>,
    RequireUser(_user): RequireUser,
) -> Result<Json<Vec<OrderType>>, AppError> {
    Ok(Json(OrderTypeService::list(&state.db).await?))
}

#[utoipa::path(
    get,
    path = "/api/order-types/{id}",
    params(("id" = i64, Path, description = "Order type ID")),
    responses(
        (status = 200, description = "Order type", body = OrderType),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Order type not found")
    ),
    tag = "Order Types",
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state, _user))]
pub async fn get_order_type(
    State(state): State<AppState>,
    RequireUser(_user): RequireUser,
    Path(id): Path<i64>,
) -> Result<Json<OrderType>, AppError> {
    Ok(Json(OrderTypeService::get(&state.db, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/order-types",
    request_body = CreateOrderTypeDto,
    responses(
        (status = 201, description = "Order type created", body = OrderType),
        (status = 401, description = "Authentication required"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Order Types",
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state, _user))]
pub async fn create_order_type(
    State(state): State<AppState>,
    RequireUser(_user): RequireUser,
    ValidatedJson(dto): ValidatedJson<CreateOrderTypeDto>,
) -> Result<(StatusCode, Json<OrderType>), AppError> {
    let order_type = OrderTypeService::create(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(order_type)))
}

#[utoipa::path(
    put,
    path = "/api/order-types/{id}",
    params(("id" = i64, Path, description = "Order type ID")),
    request_body = UpdateOrderTypeDto,
    responses(
        (status = 200, description = "Order type updated", body = OrderType),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Order type not found")
    ),
    tag = "Order Types",
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state, _user))]
pub async fn update_order_type(
    State(state): State<AppState>,
    RequireUser(_user): RequireUser,
    Path(id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<UpdateOrderTypeDto>,
) -> Result<Json<OrderType>, AppError> {
    Ok(Json(OrderTypeService::update(&state.db, id, dto).await?))
}

#[utoipa::path(
    delete,
    path = "/api/order-types/{id}",
    params(("id" = i64, Path, description = "Order type ID")),
    responses(
        (status = 204, description = "Order type deleted"),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Order type not found")
    ),
    tag = "Order Types",
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state, _user))]
pub async fn delete_order_type(
    State(state): State<AppState>,
    RequireUser(_user): RequireUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    OrderTypeService::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
