use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use orderdesk_core::AppError;
use orderdesk_models::{CreateOrderClassDto, OrderClass, UpdateOrderClassDto};

use crate::middleware::auth::RequireUser;
use crate::modules::order_classes::service::OrderClassService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/order-classes",
    responses(
        (status = 200, description = "All order classes", body = Vec<OrderClass>),
        (status = 401, description = "Authentication required")
    ),
    tag = "Order Classes",
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state, _user))]
pub async fn list_order_classes(
    State(state): State<AppState>,
    RequireUser(_user): RequireUser,
) -> Result<Json<Vec<OrderClass>>, AppError> {
    Ok(Json(OrderClassService::list(&state.db).await?))
}

#[utoipa::path(
    get,
    path = "/api/order-classes/{id}",
    params(("id" = i64, Path, description = "Order class ID")),
    responses(
        (status = 200, description = "Order class", body = OrderClass),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Order class not found")
    ),
    tag = "Order Classes",
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state, _user))]
pub async fn get_order_class(
    State(state): State<AppState>,
    RequireUser(_user): RequireUser,
    Path(id): Path<i64>,
) -> Result<Json<OrderClass>, AppError> {
    Ok(Json(OrderClassService::get(&state.db, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/order-classes",
    request_body = CreateOrderClassDto,
    responses(
        (status = 201, description = "Order class created", body = OrderClass),
        (status = 401, description = "Authentication required"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Order Classes",
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state, _user))]
pub async fn create_order_class(
    State(state): State<AppState>,
    RequireUser(_user): RequireUser,
    ValidatedJson(dto): ValidatedJson<CreateOrderClassDto>,
) -> Result<(StatusCode, Json<OrderClass>), AppError> {
    let order_class = OrderClassService::create(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(order_class)))
}

#[utoipa::path(
    put,
    path = "/api/order-classes/{id}",
    params(("id" = i64, Path, description = "Order class ID")),
    request_body = UpdateOrderClassDto,
    responses(
        (status = 200, description = "Order class updated", body = OrderClass),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Order class not found")
    ),
    tag = "Order Classes",
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state, _user))]
pub async fn update_order_class(
    State(state): State<AppState>,
    RequireUser(_user): RequireUser,
    Path(id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<UpdateOrderClassDto>,
) -> Result<Json<OrderClass>, AppError> {
    Ok(Json(OrderClassService::update(&state.db, id, dto).await?))
}

#[utoipa::path(
    delete,
    path = "/api/order-classes/{id}",
    params(("id" = i64, Path, description = "Order class ID")),
    responses(
        (status = 204, description = "Order class deleted"),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Order class not found")
    ),
    tag = "Order Classes",
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state, _user))]
pub async fn delete_order_class(
    State(state): State<AppState>,
    RequireUser(_user): RequireUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    OrderClassService::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
