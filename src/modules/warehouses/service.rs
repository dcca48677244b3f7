use orderdesk_access::{ProjectSet, is_visible, scoped_fetch, scoped_fetch_one, visible};
use orderdesk_core::AppError;
use orderdesk_models::{CreateWarehouseDto, UpdateWarehouseDto, Warehouse};
use sqlx::PgPool;
use tracing::{info, instrument};

use crate::utils::auth_helpers::ensure_all_members;
use crate::utils::db_errors::{map_delete_error, map_write_error};
use crate::utils::project_links::{WAREHOUSE_PROJECTS, caller_links};

const SELECT_WAREHOUSE: &str = r#"
    SELECT w.id, w.name, w.lookup_code, w.address_id,
           ARRAY(SELECT wp.project_id FROM warehouse_projects wp
                 WHERE wp.warehouse_id = w.id ORDER BY wp.project_id) AS projects,
           w.created_at, w.updated_at
    FROM warehouses w
"#;

const DUPLICATE: &str = "A warehouse with this lookup code already exists";

pub struct WarehouseService;

impl WarehouseService {
    /// Warehouses linked to at least one of `projects`, ordered by id.
    #[instrument(skip(db))]
    pub async fn list_visible(
        db: &PgPool,
        projects: &ProjectSet,
    ) -> Result<Vec<Warehouse>, AppError> {
        let rows = scoped_fetch(projects, |ids| async move {
            sqlx::query_as::<_, Warehouse>(&format!(
                r#"{SELECT_WAREHOUSE}
                   WHERE EXISTS (SELECT 1 FROM warehouse_projects s
                                 WHERE s.warehouse_id = w.id AND s.project_id = ANY($1))
                   ORDER BY w.id"#
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
    ) -> Result<Warehouse, AppError> {
        scoped_fetch_one(projects, |_| Self::fetch(db, id))
            .await?
            .filter(|w| is_visible(w, projects))
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Warehouse not found")))
    }

    async fn fetch(db: &PgPool, id: i64) -> Result<Option<Warehouse>, sqlx::Error> {
        sqlx::query_as::<_, Warehouse>(&format!("{SELECT_WAREHOUSE} WHERE w.id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await
    }

    #[instrument(skip(db))]
    pub async fn create(
        db: &PgPool,
        projects: &ProjectSet,
        dto: CreateWarehouseDto,
    ) -> Result<Warehouse, AppError> {
        ensure_all_members(projects, &dto.projects)?;

        let mut tx = db.begin().await?;
        if WAREHOUSE_PROJECTS
            .lookup_code_taken(&mut tx, &dto.lookup_code, &dto.projects, None)
            .await?
        {
            return Err(AppError::conflict(anyhow::anyhow!(DUPLICATE)));
        }

        let id = sqlx::query_scalar::<_, i64>(
            r#"INSERT INTO warehouses (name, lookup_code, address_id)
               VALUES ($1, $2, $3)
               RETURNING id"#,
        )
        .bind(&dto.name)
        .bind(&dto.lookup_code)
        .bind(dto.address)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_write_error(e, DUPLICATE))?;

        WAREHOUSE_PROJECTS.insert(&mut tx, id, &dto.projects).await?;
        tx.commit().await?;

        Self::get_visible(db, projects, id).await
    }

    #[instrument(skip(db))]
    pub async fn update(
        db: &PgPool,
        projects: &ProjectSet,
        id: i64,
        dto: UpdateWarehouseDto,
    ) -> Result<Warehouse, AppError> {
        let existing = Self::get_visible(db, projects, id).await?;

        if let Some(new_projects) = &dto.projects {
            if new_projects.is_empty() {
                return Err(AppError::bad_request(anyhow::anyhow!(
                    "projects must not be empty"
                )));
            }
            ensure_all_members(projects, new_projects)?;
        }

        let name = dto.name.unwrap_or(existing.name);
        let lookup_code = dto.lookup_code.unwrap_or(existing.lookup_code);
        let address = dto.address.or(existing.address);
        let own_links = caller_links(projects, &existing.projects, dto.projects.as_deref());

        let mut tx = db.begin().await?;
        if WAREHOUSE_PROJECTS
            .lookup_code_taken(&mut tx, &lookup_code, &own_links, Some(id))
            .await?
        {
            return Err(AppError::conflict(anyhow::anyhow!(DUPLICATE)));
        }

        sqlx::query(
            r#"UPDATE warehouses
               SET name = $1, lookup_code = $2, address_id = $3, updated_at = NOW()
               WHERE id = $4"#,
        )
        .bind(&name)
        .bind(&lookup_code)
        .bind(address)
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_write_error(e, DUPLICATE))?;

        if let Some(new_projects) = &dto.projects {
            WAREHOUSE_PROJECTS
                .replace_within(&mut tx, id, projects, new_projects)
                .await?;
        }
        tx.commit().await?;

        Self::get_visible(db, projects, id).await
    }

    /// Removes the warehouse from the caller's projects. The row itself is
    /// deleted only once no other project links to it.
    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, projects: &ProjectSet, id: i64) -> Result<(), AppError> {
        Self::get_visible(db, projects, id).await?;

        let mut tx = db.begin().await?;
        let remaining = WAREHOUSE_PROJECTS.detach_within(&mut tx, id, projects).await?;
        if remaining == 0 {
            sqlx::query("DELETE FROM warehouses WHERE id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await
                .map_err(|e| map_delete_error(e, "Warehouse is still referenced"))?;
        } else {
            info!(warehouse_id = id, remaining, "Warehouse unlinked from caller's projects");
        }
        tx.commit().await?;

        Ok(())
    }
}
