use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{add_contact, get_project, list_projects};

pub fn init_projects_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_projects))
        .route("/{id}", get(get_project))
        .route("/{id}/add_contact", post(add_contact))
}
