use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    create_order_type, delete_order_type, get_order_type, list_order_types, update_order_type,
};

pub fn init_order_types_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_order_types).post(create_order_type))
        .route(
            "/{id}",
            get(get_order_type)
                .put(update_order_type)
                .patch(update_order_type)
                .delete(delete_order_type),
        )
}
