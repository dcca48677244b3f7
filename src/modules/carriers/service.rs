use orderdesk_access::{ProjectSet, is_visible, scoped_fetch, scoped_fetch_one, visible};
use orderdesk_core::AppError;
use orderdesk_models::{Carrier, CreateCarrierDto, UpdateCarrierDto};
use sqlx::PgPool;
use tracing::{info, instrument};

use crate::utils::auth_helpers::ensure_all_members;
use crate::utils::db_errors::{map_delete_error, map_write_error};
use crate::utils::project_links::{CARRIER_PROJECTS, caller_links};

const SELECT_CARRIER: &str = r#"
    SELECT c.id, c.name, c.lookup_code,
           ARRAY(SELECT cp.project_id FROM carrier_projects cp
                 WHERE cp.carrier_id = c.id ORDER BY cp.project_id) AS projects,
           c.created_at, c.updated_at
    FROM carriers c
"#;

const DUPLICATE: &str = "A carrier with this lookup code already exists";

pub struct CarrierService;

impl CarrierService {
    #[instrument(skip(db))]
    pub async fn list_visible(
        db: &PgPool,
        projects: &ProjectSet,
    ) -> Result<Vec<Carrier>, AppError> {
        let rows = scoped_fetch(projects, |ids| async move {
            sqlx::query_as::<_, Carrier>(&format!(
                r#"{SELECT_CARRIER}
                   WHERE EXISTS (SELECT 1 FROM carrier_projects s
                                 WHERE s.carrier_id = c.id AND s.project_id = ANY($1))
                   ORDER BY c.id"#
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
    ) -> Result<Carrier, AppError> {
        scoped_fetch_one(projects, |_| async move {
            sqlx::query_as::<_, Carrier>(&format!("{SELECT_CARRIER} WHERE c.id = $1"))
                .bind(id)
                .fetch_optional(db)
                .await
        })
        .await?
        .filter(|c| is_visible(c, projects))
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Carrier not found")))
    }

    #[instrument(skip(db))]
    pub async fn create(
        db: &PgPool,
        projects: &ProjectSet,
        dto: CreateCarrierDto,
    ) -> Result<Carrier, AppError> {
        ensure_all_members(projects, &dto.projects)?;

        let mut tx = db.begin().await?;
        if CARRIER_PROJECTS
            .lookup_code_taken(&mut tx, &dto.lookup_code, &dto.projects, None)
            .await?
        {
            return Err(AppError::conflict(anyhow::anyhow!(DUPLICATE)));
        }

        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO carriers (name, lookup_code) VALUES ($1, $2) RETURNING id",
        )
        .bind(&dto.name)
        .bind(&dto.lookup_code)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_write_error(e, DUPLICATE))?;

        CARRIER_PROJECTS.insert(&mut tx, id, &dto.projects).await?;
        tx.commit().await?;

        Self::get_visible(db, projects, id).await
    }

    #[instrument(skip(db))]
    pub async fn update(
        db: &PgPool,
        projects: &ProjectSet,
        id: i64,
        dto: UpdateCarrierDto,
    ) -> Result<Carrier, AppError> {
        let existing = Self::get_visible(db, projects, id).await?;

        if let Some(new_projects) = &dto.projects {
            if new_projects.is_empty() {
                return Err(AppError::bad_request(anyhow::anyhow!(
                    "projects must not be empty"
                )));
            }
            ensure_all_members(projects, new_projects)?;
        }

        let lookup_code = dto.lookup_code.unwrap_or(existing.lookup_code);
        let own_links = caller_links(projects, &existing.projects, dto.projects.as_deref());

        let mut tx = db.begin().await?;
        if CARRIER_PROJECTS
            .lookup_code_taken(&mut tx, &lookup_code, &own_links, Some(id))
            .await?
        {
            return Err(AppError::conflict(anyhow::anyhow!(DUPLICATE)));
        }

        sqlx::query(
            r#"UPDATE carriers
               SET name = $1, lookup_code = $2, updated_at = NOW()
               WHERE id = $3"#,
        )
        .bind(dto.name.unwrap_or(existing.name))
        .bind(&lookup_code)
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_write_error(e, DUPLICATE))?;

        if let Some(new_projects) = &dto.projects {
            CARRIER_PROJECTS
                .replace_within(&mut tx, id, projects, new_projects)
                .await?;
        }
        tx.commit().await?;

        Self::get_visible(db, projects, id).await
    }

    /// Removes the carrier from the caller's projects. The row itself is
    /// deleted only once no other project links to it.
    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, projects: &ProjectSet, id: i64) -> Result<(), AppError> {
        Self::get_visible(db, projects, id).await?;

        let mut tx = db.begin().await?;
        let remaining = CARRIER_PROJECTS.detach_within(&mut tx, id, projects).await?;
        if remaining == 0 {
            sqlx::query("DELETE FROM carriers WHERE id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await
                .map_err(|e| map_delete_error(e, "Carrier is still referenced"))?;
        } else {
            info!(carrier_id = id, remaining, "Carrier unlinked from caller's projects");
        }
        tx.commit().await?;

        Ok(())
    }
}
