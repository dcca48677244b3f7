use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use orderdesk_core::AppError;
use orderdesk_models::{Contact, CreateContactDto, UpdateContactDto};

use crate::middleware::auth::RequireUser;
use crate::modules::contacts::service::ContactService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/contacts",
    responses(
        (status = 200, description = "All contacts", body = Vec<Contact>),
        (status = 401, description = "Authentication required")
    ),
    tag = "Contacts",
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state, _user))]
pub async fn list_contacts(
    State(state): State<AppState>,
    RequireUser(_user): RequireUser,
) -> Result<Json<Vec<Contact>>, AppError> {
    Ok(Json(ContactService::list(&state.db).await?))
}

#[utoipa::path(
    get,
    path = "/api/contacts/{id}",
    params(("id" = i64, Path, description = "Contact ID")),
    responses(
        (status = 200, description = "Contact with linked address ids", body = Contact),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Contact not found")
    ),
    tag = "Contacts",
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state, _user))]
pub async fn get_contact(
    State(state): State<AppState>,
    RequireUser(_user): RequireUser,
    Path(id): Path<i64>,
) -> Result<Json<Contact>, AppError> {
    Ok(Json(ContactService::get(&state.db, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/contacts",
    request_body = CreateContactDto,
    responses(
        (status = 201, description = "Contact created", body = Contact),
        (status = 401, description = "Authentication required"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Contacts",
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state, _user))]
pub async fn create_contact(
    State(state): State<AppState>,
    RequireUser(_user): RequireUser,
    ValidatedJson(dto): ValidatedJson<CreateContactDto>,
) -> Result<(StatusCode, Json<Contact>), AppError> {
    let contact = ContactService::create(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(contact)))
}

#[utoipa::path(
    put,
    path = "/api/contacts/{id}",
    params(("id" = i64, Path, description = "Contact ID")),
    request_body = UpdateContactDto,
    responses(
        (status = 200, description = "Contact updated", body = Contact),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Contact not found")
    ),
    tag = "Contacts",
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state, _user))]
pub async fn update_contact(
    State(state): State<AppState>,
    RequireUser(_user): RequireUser,
    Path(id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<UpdateContactDto>,
) -> Result<Json<Contact>, AppError> {
    Ok(Json(ContactService::update(&state.db, id, dto).await?))
}

#[utoipa::path(
    delete,
    path = "/api/contacts/{id}",
    params(("id" = i64, Path, description = "Contact ID")),
    responses(
        (status = 204, description = "Contact deleted"),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Contact not found")
    ),
    tag = "Contacts",
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state, _user))]
pub async fn delete_contact(
    State(state): State<AppState>,
    RequireUser(_user): RequireUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    ContactService::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
