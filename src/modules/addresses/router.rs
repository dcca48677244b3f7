use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    create_address, delete_address, get_address, list_addresses, update_address,
};

pub fn init_addresses_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_addresses).post(create_address))
        .route(
            "/{id}",
            get(get_address)
                .put(update_address)
                .patch(update_address)
                .delete(delete_address),
        )
}
