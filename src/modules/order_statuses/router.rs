use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    create_order_status, delete_order_status, get_order_status, list_order_statuses,
    update_order_status,
};

pub fn init_order_statuses_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_order_statuses).post(create_order_status))
        .route(
            "/{id}",
            get(get_order_status)
                .put(update_order_status)
                .patch(update_order_status)
                .delete(delete_order_status),
        )
}
