//! Administrative operations behind `orderdesk-cli`.
//!
//! Users and project memberships are only ever created here; the HTTP API
//! exposes no way to create either.

use orderdesk_core::{AppError, hash_password};
use orderdesk_models::{CreateProjectDto, CreateUserDto, OrderExportResponse, Project, User};
use sqlx::PgPool;
use validator::Validate;

use crate::modules::orders::export::OrderExporter;
use crate::modules::projects::service::ProjectService;
use crate::utils::db_errors::map_write_error;
use orderdesk_config::ExportConfig;

fn validation_error(e: validator::ValidationErrors) -> AppError {
    AppError::unprocessable(anyhow::anyhow!("{}", e))
}

pub async fn create_user(db: &PgPool, dto: CreateUserDto) -> Result<User, AppError> {
    dto.validate().map_err(validation_error)?;
    let password_hash = hash_password(&dto.password)?;

    sqlx::query_as::<_, User>(
        r#"INSERT INTO users (username, email, first_name, last_name, password_hash, is_staff)
           VALUES ($1, $2, $3, $4, $5, $6)
           RETURNING id, username, email, first_name, last_name, password_hash,
                     is_active, is_staff, created_at, updated_at"#,
    )
    .bind(&dto.username)
    .bind(&dto.email)
    .bind(&dto.first_name)
    .bind(&dto.last_name)
    .bind(&password_hash)
    .bind(dto.is_staff)
    .fetch_one(db)
    .await
    .map_err(|e| map_write_error(e, "A user with this username already exists"))
}

pub async fn create_project(db: &PgPool, dto: CreateProjectDto) -> Result<Project, AppError> {
    dto.validate().map_err(validation_error)?;
    ProjectService::create(db, dto).await
}

pub async fn add_member(
    db: &PgPool,
    username: &str,
    project_lookup_code: &str,
) -> Result<(), AppError> {
    ProjectService::add_member(db, username, project_lookup_code).await
}

/// Writes the order file regardless of project membership.
pub async fn export_order(
    db: &PgPool,
    config: &ExportConfig,
    order_id: i64,
) -> Result<OrderExportResponse, AppError> {
    OrderExporter::export(db, config, order_id).await
}
