//! Service levels offered by a carrier (`Ground`, `Next Day Air`, ...).

use orderdesk_core::AppError;
use orderdesk_models::{CarrierService, CreateCarrierServiceDto, UpdateCarrierServiceDto};
use sqlx::PgPool;
use tracing::instrument;

use crate::utils::db_errors::{map_delete_error, map_write_error};

const COLUMNS: &str = "id, carrier_id, name, lookup_code, created_at, updated_at";
const DUPLICATE: &str = "This carrier already has a service with this lookup code";

pub struct CarrierServicesService;

impl CarrierServicesService {
    #[instrument(skip(db))]
    pub async fn list(db: &PgPool) -> Result<Vec<CarrierService>, AppError> {
        let rows = sqlx::query_as::<_, CarrierService>(&format!(
            "SELECT {COLUMNS} FROM carrier_services ORDER BY id"
        ))
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    #[instrument(skip(db))]
    pub async fn get(db: &PgPool, id: i64) -> Result<CarrierService, AppError> {
        sqlx::query_as::<_, CarrierService>(&format!(
            "SELECT {COLUMNS} FROM carrier_services WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Carrier service not found")))
    }

    #[instrument(skip(db))]
    pub async fn create(
        db: &PgPool,
        dto: CreateCarrierServiceDto,
    ) -> Result<CarrierService, AppError> {
        sqlx::query_as::<_, CarrierService>(&format!(
            r#"INSERT INTO carrier_services (carrier_id, name, lookup_code)
               VALUES ($1, $2, $3)
               RETURNING {COLUMNS}"#
        ))
        .bind(dto.carrier)
        .bind(&dto.name)
        .bind(&dto.lookup_code)
        .fetch_one(db)
        .await
        .map_err(|e| map_write_error(e, DUPLICATE))
    }

    #[instrument(skip(db))]
    pub async fn update(
        db: &PgPool,
        id: i64,
        dto: UpdateCarrierServiceDto,
    ) -> Result<CarrierService, AppError> {
        let existing = Self::get(db, id).await?;

        sqlx::query_as::<_, CarrierService>(&format!(
            r#"UPDATE carrier_services
               SET carrier_id = $1, name = $2, lookup_code = $3, updated_at = NOW()
               WHERE id = $4
               RETURNING {COLUMNS}"#
        ))
        .bind(dto.carrier.unwrap_or(existing.carrier))
        .bind(dto.name.unwrap_or(existing.name))
        .bind(dto.lookup_code.unwrap_or(existing.lookup_code))
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(|e| map_write_error(e, DUPLICATE))
    }

    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM carrier_services WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| map_delete_error(e, "Carrier service is used by orders"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Carrier service not found")));
        }
        Ok(())
    }
}
