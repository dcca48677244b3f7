use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use orderdesk_core::AppError;
use orderdesk_models::{AddContactDto, MessageResponse, Project};

use crate::middleware::auth::Identity;
use crate::modules::projects::service::ProjectService;
use crate::state::AppState;
use crate::utils::auth_helpers::{caller_projects, require_authenticated};
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/projects",
    responses(
        (status = 200, description = "Projects the caller is a member of; empty for anonymous callers", body = Vec<Project>)
    ),
    tag = "Projects",
    security((), ("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state, ctx))]
pub async fn list_projects(
    State(state): State<AppState>,
    Identity(ctx): Identity,
) -> Result<Json<Vec<Project>>, AppError> {
    let projects = caller_projects(&state.db, &ctx).await?;
    let rows = ProjectService::list_visible(&state.db, &projects).await?;
    Ok(Json(rows))
}

#[utoipa::path(
    get,
    path = "/api/projects/{id}",
    params(("id" = i64, Path, description = "Project ID")),
    responses(
        (status = 200, description = "Project details", body = Project),
        (status = 404, description = "Project not found or caller is not a member")
    ),
    tag = "Projects",
    security((), ("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state, ctx))]
pub async fn get_project(
    State(state): State<AppState>,
    Identity(ctx): Identity,
    Path(id): Path<i64>,
) -> Result<Json<Project>, AppError> {
    let projects = caller_projects(&state.db, &ctx).await?;
    let project = ProjectService::get_visible(&state.db, &projects, id).await?;
    Ok(Json(project))
}

#[utoipa::path(
    post,
    path = "/api/projects/{id}/add_contact",
    params(("id" = i64, Path, description = "Project ID")),
    request_body = AddContactDto,
    responses(
        (status = 200, description = "Contact linked", body = MessageResponse),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Project or contact not found")
    ),
    tag = "Projects",
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state, ctx))]
pub async fn add_contact(
    State(state): State<AppState>,
    Identity(ctx): Identity,
    Path(id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<AddContactDto>,
) -> Result<Json<MessageResponse>, AppError> {
    require_authenticated(&ctx)?;
    let projects = caller_projects(&state.db, &ctx).await?;
    ProjectService::add_contact(&state.db, &projects, id, dto.contact_id).await?;
    Ok(Json(MessageResponse::new("Contact added to project")))
}
