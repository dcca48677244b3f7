use axum::http::{HeaderValue, Method, header};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::metrics::metrics_middleware;
use crate::modules::addresses::init_addresses_router;
use crate::modules::auth::init_auth_router;
use crate::modules::carrier_services::init_carrier_services_router;
use crate::modules::carriers::init_carriers_router;
use crate::modules::contacts::init_contacts_router;
use crate::modules::order_classes::init_order_classes_router;
use crate::modules::order_lines::init_order_lines_router;
use crate::modules::order_statuses::init_order_statuses_router;
use crate::modules::order_types::init_order_types_router;
use crate::modules::orders::init_orders_router;
use crate::modules::projects::init_projects_router;
use crate::modules::warehouses::init_warehouses_router;
use crate::state::AppState;

pub fn init_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest(
            "/api",
            Router::new()
                .nest("/auth", init_auth_router(&state.rate_limit_config))
                .nest("/projects", init_projects_router())
                .nest("/addresses", init_addresses_router())
                .nest("/contacts", init_contacts_router())
                .nest("/warehouses", init_warehouses_router())
                .nest("/carriers", init_carriers_router())
                .nest("/carrier-services", init_carrier_services_router())
                .nest("/orders", init_orders_router())
                .nest("/order-lines", init_order_lines_router())
                .nest("/order-types", init_order_types_router())
                .nest("/order-classes", init_order_classes_router())
                .nest("/order-statuses", init_order_statuses_router()),
        )
        .with_state(state.clone())
        .layer(cors_layer(&state))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
}

/// Cookies only travel cross-origin with credentials allowed, which in turn
/// requires an explicit origin list.
fn cors_layer(state: &AppState) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = state
        .cors_config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::COOKIE,
        ])
        .allow_credentials(true)
}
