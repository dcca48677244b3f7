use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use orderdesk_core::AppError;
use orderdesk_models::{ClearOrderLinesResponse, CreateOrderLineDto, OrderLine, UpdateOrderLineDto};

use crate::middleware::auth::Identity;
use crate::modules::order_lines::service::OrderLineService;
use crate::state::AppState;
use crate::utils::auth_helpers::{caller_projects, require_authenticated};
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/order-lines",
    responses(
        (status = 200, description = "Lines of orders in the caller's projects", body = Vec<OrderLine>)
    ),
    tag = "Order Lines",
    security((), ("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state, ctx))]
pub async fn list_order_lines(
    State(state): State<AppState>,
    Identity(ctx): Identity,
) -> Result<Json<Vec<OrderLine>>, AppError> {
    let projects = caller_projects(&state.db, &ctx).await?;
    let lines = OrderLineService::list_visible(&state.db, &projects).await?;
    Ok(Json(lines))
}

#[utoipa::path(
    get,
    path = "/api/order-lines/order/{order_id}",
    params(("order_id" = i64, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Lines of the order", body = Vec<OrderLine>),
        (status = 404, description = "Order not found or not visible")
    ),
    tag = "Order Lines",
    security((), ("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state, ctx))]
pub async fn list_lines_for_order(
    State(state): State<AppState>,
    Identity(ctx): Identity,
    Path(order_id): Path<i64>,
) -> Result<Json<Vec<OrderLine>>, AppError> {
    let projects = caller_projects(&state.db, &ctx).await?;
    let lines = OrderLineService::list_for_order(&state.db, &projects, order_id).await?;
    Ok(Json(lines))
}

#[utoipa::path(
    get,
    path = "/api/order-lines/{id}",
    params(("id" = i64, Path, description = "Order line ID")),
    responses(
        (status = 200, description = "Order line", body = OrderLine),
        (status = 404, description = "Order line not found")
    ),
    tag = "Order Lines",
    security((), ("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state, ctx))]
pub async fn get_order_line(
    State(state): State<AppState>,
    Identity(ctx): Identity,
    Path(id): Path<i64>,
) -> Result<Json<OrderLine>, AppError> {
    let projects = caller_projects(&state.db, &ctx).await?;
    let line = OrderLineService::get_visible(&state.db, &projects, id).await?;
    Ok(Json(line))
}

#[utoipa::path(
    post,
    path = "/api/order-lines",
    request_body = CreateOrderLineDto,
    responses(
        (status = 201, description = "Order line created", body = OrderLine),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Order not found"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Order Lines",
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state, ctx))]
pub async fn create_order_line(
    State(state): State<AppState>,
    Identity(ctx): Identity,
    ValidatedJson(dto): ValidatedJson<CreateOrderLineDto>,
) -> Result<(StatusCode, Json<OrderLine>), AppError> {
    require_authenticated(&ctx)?;
    let projects = caller_projects(&state.db, &ctx).await?;
    let line = OrderLineService::create(&state.db, &projects, dto).await?;
    Ok((StatusCode::CREATED, Json(line)))
}

#[utoipa::path(
    put,
    path = "/api/order-lines/{id}",
    params(("id" = i64, Path, description = "Order line ID")),
    request_body = UpdateOrderLineDto,
    responses(
        (status = 200, description = "Order line updated", body = OrderLine),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Order line not found")
    ),
    tag = "Order Lines",
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state, ctx))]
pub async fn update_order_line(
    State(state): State<AppState>,
    Identity(ctx): Identity,
    Path(id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<UpdateOrderLineDto>,
) -> Result<Json<OrderLine>, AppError> {
    require_authenticated(&ctx)?;
    let projects = caller_projects(&state.db, &ctx).await?;
    let line = OrderLineService::update(&state.db, &projects, id, dto).await?;
    Ok(Json(line))
}

#[utoipa::path(
    delete,
    path = "/api/order-lines/{id}",
    params(("id" = i64, Path, description = "Order line ID")),
    responses(
        (status = 204, description = "Order line deleted"),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Order line not found")
    ),
    tag = "Order Lines",
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state, ctx))]
pub async fn delete_order_line(
    State(state): State<AppState>,
    Identity(ctx): Identity,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    require_authenticated(&ctx)?;
    let projects = caller_projects(&state.db, &ctx).await?;
    OrderLineService::delete(&state.db, &projects, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/order-lines/order/{order_id}/clear",
    params(("order_id" = i64, Path, description = "Order ID")),
    responses(
        (status = 200, description = "All lines of the order removed", body = ClearOrderLinesResponse),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Order not found")
    ),
    tag = "Order Lines",
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state, ctx))]
pub async fn clear_order_lines(
    State(state): State<AppState>,
    Identity(ctx): Identity,
    Path(order_id): Path<i64>,
) -> Result<Json<ClearOrderLinesResponse>, AppError> {
    require_authenticated(&ctx)?;
    let projects = caller_projects(&state.db, &ctx).await?;
    let response = OrderLineService::clear(&state.db, &projects, order_id).await?;
    Ok(Json(response))
}
