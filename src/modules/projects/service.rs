use orderdesk_access::{ProjectSet, is_visible, scoped_fetch, scoped_fetch_one, visible};
use orderdesk_core::AppError;
use orderdesk_models::{CreateProjectDto, Project};
use sqlx::PgPool;
use tracing::{info, instrument};

use crate::utils::db_errors::map_write_error;

const SELECT_PROJECT: &str = r#"
    SELECT p.id, p.name, p.lookup_code, p.description,
           ARRAY(SELECT pu.user_id FROM project_users pu
                 WHERE pu.project_id = p.id ORDER BY pu.user_id) AS users,
           ARRAY(SELECT pc.contact_id FROM project_contacts pc
                 WHERE pc.project_id = p.id ORDER BY pc.contact_id) AS contacts,
           p.created_at, p.updated_at
    FROM projects p
"#;

pub struct ProjectService;

impl ProjectService {
    /// The caller's own projects, ordered by id.
    #[instrument(skip(db))]
    pub async fn list_visible(
        db: &PgPool,
        projects: &ProjectSet,
    ) -> Result<Vec<Project>, AppError> {
        let rows = scoped_fetch(projects, |ids| async move {
            sqlx::query_as::<_, Project>(&format!(
                "{SELECT_PROJECT} WHERE p.id = ANY($1) ORDER BY p.id"
            ))
            .bind(ids)
            .fetch_all(db)
            .await
        })
        .await?;

        Ok(visible(rows, projects))
    }

    #[instrument(skip(db))]
    pub async fn get_visible(
        db: &PgPool,
        projects: &ProjectSet,
        id: i64,
    ) -> Result<Project, AppError> {
        scoped_fetch_one(projects, |_| Self::fetch(db, id))
            .await?
            .filter(|p| is_visible(p, projects))
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Project not found")))
    }

    async fn fetch(db: &PgPool, id: i64) -> Result<Option<Project>, sqlx::Error> {
        sqlx::query_as::<_, Project>(&format!("{SELECT_PROJECT} WHERE p.id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await
    }

    #[instrument(skip(db))]
    pub async fn add_contact(
        db: &PgPool,
        projects: &ProjectSet,
        project_id: i64,
        contact_id: i64,
    ) -> Result<(), AppError> {
        Self::get_visible(db, projects, project_id).await?;

        let contact_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM contacts WHERE id = $1)")
                .bind(contact_id)
                .fetch_one(db)
                .await?;
        if !contact_exists {
            return Err(AppError::not_found(anyhow::anyhow!("Contact not found")));
        }

        sqlx::query(
            r#"INSERT INTO project_contacts (project_id, contact_id)
               VALUES ($1, $2)
               ON CONFLICT DO NOTHING"#,
        )
        .bind(project_id)
        .bind(contact_id)
        .execute(db)
        .await?;

        info!(project_id, contact_id, "Contact linked to project");
        Ok(())
    }

    /// Administrative create, used by the CLI.
    #[instrument(skip(db))]
    pub async fn create(db: &PgPool, dto: CreateProjectDto) -> Result<Project, AppError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"INSERT INTO projects (name, lookup_code, description)
               VALUES ($1, $2, $3)
               RETURNING id"#,
        )
        .bind(&dto.name)
        .bind(&dto.lookup_code)
        .bind(&dto.description)
        .fetch_one(db)
        .await
        .map_err(|e| map_write_error(e, "A project with this lookup code already exists"))?;

        Self::fetch(db, id)
            .await?
            .ok_or_else(|| AppError::internal_error("Created project vanished".to_string()))
    }

    /// Adds a user to a project by username and project lookup code.
    #[instrument(skip(db))]
    pub async fn add_member(
        db: &PgPool,
        username: &str,
        project_lookup_code: &str,
    ) -> Result<(), AppError> {
        let user_id = sqlx::query_scalar::<_, i64>("SELECT id FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))?;

        let project_id =
            sqlx::query_scalar::<_, i64>("SELECT id FROM projects WHERE lookup_code = $1")
                .bind(project_lookup_code)
                .fetch_optional(db)
                .await?
                .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Project not found")))?;

        sqlx::query(
            r#"INSERT INTO project_users (project_id, user_id)
               VALUES ($1, $2)
               ON CONFLICT DO NOTHING"#,
        )
        .bind(project_id)
        .bind(user_id)
        .execute(db)
        .await?;

        Ok(())
    }
}
