use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    create_contact, delete_contact, get_contact, list_contacts, update_contact,
};

pub fn init_contacts_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_contacts).post(create_contact))
        .route(
            "/{id}",
            get(get_contact)
                .put(update_contact)
                .patch(update_contact)
                .delete(delete_contact),
        )
}
