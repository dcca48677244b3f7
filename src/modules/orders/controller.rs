use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use orderdesk_core::AppError;
use orderdesk_models::{CreateOrderDto, Order, OrderExportResponse, UpdateOrderDto};

use crate::middleware::auth::Identity;
use crate::modules::orders::service::OrderService;
use crate::state::AppState;
use crate::utils::auth_helpers::{caller_projects, require_authenticated};
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/orders",
    responses(
        (status = 200, description = "Orders in the caller's projects; empty for anonymous callers", body = Vec<Order>)
    ),
    tag = "Orders",
    security((), ("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state, ctx))]
pub async fn list_orders(
    State(state): State<AppState>,
    Identity(ctx): Identity,
) -> Result<Json<Vec<Order>>, AppError> {
    let projects = caller_projects(&state.db, &ctx).await?;
    let orders = OrderService::list_visible(&state.db, &projects).await?;
    Ok(Json(orders))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    params(("id" = i64, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order details", body = Order),
        (status = 404, description = "Order not found or not visible")
    ),
    tag = "Orders",
    security((), ("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state, ctx))]
pub async fn get_order(
    State(state): State<AppState>,
    Identity(ctx): Identity,
    Path(id): Path<i64>,
) -> Result<Json<Order>, AppError> {
    let projects = caller_projects(&state.db, &ctx).await?;
    let order = OrderService::get_visible(&state.db, &projects, id).await?;
    Ok(Json(order))
}

#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = CreateOrderDto,
    responses(
        (status = 201, description = "Order created; exported when created in a terminal status", body = Order),
        (status = 400, description = "Referenced record does not exist"),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Project, warehouse or carrier not visible"),
        (status = 409, description = "Lookup code already in use"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Orders",
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state, ctx))]
pub async fn create_order(
    State(state): State<AppState>,
    Identity(ctx): Identity,
    ValidatedJson(dto): ValidatedJson<CreateOrderDto>,
) -> Result<(StatusCode, Json<Order>), AppError> {
    require_authenticated(&ctx)?;
    let projects = caller_projects(&state.db, &ctx).await?;
    let order = OrderService::create(&state.db, &state.export_config, &projects, dto).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

#[utoipa::path(
    put,
    path = "/api/orders/{id}",
    params(("id" = i64, Path, description = "Order ID")),
    request_body = UpdateOrderDto,
    responses(
        (status = 200, description = "Order updated; exported on first move to a terminal status", body = Order),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Order or referenced record not visible"),
        (status = 409, description = "Lookup code already in use")
    ),
    tag = "Orders",
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state, ctx))]
pub async fn update_order(
    State(state): State<AppState>,
    Identity(ctx): Identity,
    Path(id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<UpdateOrderDto>,
) -> Result<Json<Order>, AppError> {
    require_authenticated(&ctx)?;
    let projects = caller_projects(&state.db, &ctx).await?;
    let order = OrderService::update(&state.db, &state.export_config, &projects, id, dto).await?;
    Ok(Json(order))
}

#[utoipa::path(
    delete,
    path = "/api/orders/{id}",
    params(("id" = i64, Path, description = "Order ID")),
    responses(
        (status = 204, description = "Order and its lines deleted"),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Order not found")
    ),
    tag = "Orders",
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state, ctx))]
pub async fn delete_order(
    State(state): State<AppState>,
    Identity(ctx): Identity,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    require_authenticated(&ctx)?;
    let projects = caller_projects(&state.db, &ctx).await?;
    OrderService::delete(&state.db, &projects, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/orders/{id}/export",
    params(("id" = i64, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order file written", body = OrderExportResponse),
        (status = 400, description = "Order has no usable lookup code"),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Order not found")
    ),
    tag = "Orders",
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state, ctx))]
pub async fn export_order(
    State(state): State<AppState>,
    Identity(ctx): Identity,
    Path(id): Path<i64>,
) -> Result<Json<OrderExportResponse>, AppError> {
    require_authenticated(&ctx)?;
    let projects = caller_projects(&state.db, &ctx).await?;
    let response = OrderService::export(&state.db, &state.export_config, &projects, id).await?;
    Ok(Json(response))
}
