use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    create_warehouse, delete_warehouse, get_warehouse, list_warehouses, update_warehouse,
};

pub fn init_warehouses_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_warehouses).post(create_warehouse))
        .route(
            "/{id}",
            get(get_warehouse)
                .put(update_warehouse)
                .patch(update_warehouse)
                .delete(delete_warehouse),
        )
}
