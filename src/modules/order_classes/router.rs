use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    create_order_class, delete_order_class, get_order_class, list_order_classes, update_order_class,
};

pub fn init_order_classes_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_order_classes).post(create_order_class))
        .route(
            "/{id}",
            get(get_order_class)
                .put(update_order_class)
                .patch(update_order_class)
                .delete(delete_order_class),
        )
}
