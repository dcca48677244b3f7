use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use orderdesk_core::AppError;
use orderdesk_models::{CreateOrderStatusDto, OrderStatus, UpdateOrderStatusDto};

use crate::middleware::auth::RequireUser;
use crate::modules::order_statuses::service::OrderStatusService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/order-statuses",
    responses(
        (status = 200, description = "All order statuses", body = Vec<OrderStatus>),
        (status = 401, description = "Authentication required")
    ),
    tag = "Order Statuses",
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state, _user))]
pub async fn list_order_statuses(
    State(state): State<AppState>,
    RequireUser(_user): RequireUser,
) -> Result<Json<Vec<OrderStatus>>, AppError> {
    Ok(Json(OrderStatusService::list(&state.db).await?))
}

#[utoipa::path(
    get,
    path = "/api/order-statuses/{id}",
    params(("id" = i64, Path, description = "Order status ID")),
    responses(
        (status = 200, description = "Order status", body = OrderStatus),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Order status not found")
    ),
    tag = "Order Statuses",
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state, _user))]
pub async fn get_order_status(
    State(state): State<AppState>,
    RequireUser(_user): RequireUser,
    Path(id): Path<i64>,
) -> Result<Json<OrderStatus>, AppError> {
    Ok(Json(OrderStatusService::get(&state.db, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/order-statuses",
    request_body = CreateOrderStatusDto,
    responses(
        (status = 201, description = "Order status created", body = OrderStatus),
        (status = 401, description = "Authentication required"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Order Statuses",
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state, _user))]
pub async fn create_order_status(
    State(state): State<AppState>,
    RequireUser(_user): RequireUser,
    ValidatedJson(dto): ValidatedJson<CreateOrderStatusDto>,
) -> Result<(StatusCode, Json<OrderStatus>), AppError> {
    let order_status = OrderStatusService::create(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(order_status)))
}

#[utoipa::path(
    put,
    path = "/api/order-statuses/{id}",
    params(("id" = i64, Path, description = "Order status ID")),
    request_body = UpdateOrderStatusDto,
    responses(
        (status = 200, description = "Order status updated", body = OrderStatus),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Order status not found")
    ),
    tag = "Order Statuses",
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state, _user))]
pub async fn update_order_status(
    State(state): State<AppState>,
    RequireUser(_user): RequireUser,
    Path(id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<UpdateOrderStatusDto>,
) -> Result<Json<OrderStatus>, AppError> {
    Ok(Json(OrderStatusService::update(&state.db, id, dto).await?))
}

#[utoipa::path(
    delete,
    path = "/api/order-statuses/{id}",
    params(("id" = i64, Path, description = "Order status ID")),
    responses(
        (status = 204, description = "Order status deleted"),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Order status not found")
    ),
    tag = "Order Statuses",
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state, _user))]
pub async fn delete_order_status(
    State(state): State<AppState>,
    RequireUser(_user): RequireUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    OrderStatusService::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
