use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{create_carrier, delete_carrier, get_carrier, list_carriers, update_carrier};

pub fn init_carriers_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_carriers).post(create_carrier))
        .route(
            "/{id}",
            get(get_carrier)
                .put(update_carrier)
                .patch(update_carrier)
                .delete(delete_carrier),
        )
}
