use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    create_carrier_service, delete_carrier_service, get_carrier_service, list_carrier_services,
    update_carrier_service,
};

pub fn init_carrier_services_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_carrier_services).post(create_carrier_service))
        .route(
            "/{id}",
            get(get_carrier_service)
                .put(update_carrier_service)
                .patch(update_carrier_service)
                .delete(delete_carrier_service),
        )
}
