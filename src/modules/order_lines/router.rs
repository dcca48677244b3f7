use axum::{
    Router,
    routing::{delete, get},
};

use crate::state::AppState;

use super::controller::{
    clear_order_lines, create_order_line, delete_order_line, get_order_line,
    list_lines_for_order, list_order_lines, update_order_line,
};

pub fn init_order_lines_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_order_lines).post(create_order_line))
        .route(
            "/{id}",
            get(get_order_line)
                .put(update_order_line)
                .patch(update_order_line)
                .delete(delete_order_line),
        )
        .route("/order/{order_id}", get(list_lines_for_order))
        .route("/order/{order_id}/clear", delete(clear_order_lines))
}
