use orderdesk_core::AppError;
use orderdesk_models::{CreateOrderTypeDto, OrderType, UpdateOrderTypeDto};
use sqlx::PgPool;
use tracing::instrument;

use crate::utils::db_errors::{map_delete_error, map_write_error};

const COLUMNS: &str = "id, type_name, lookup_code, is_inbound, is_outbound, created_at, updated_at";
const DUPLICATE: &str = "An order type with this lookup code already exists";

pub struct OrderTypeService;

impl OrderTypeService {
    #[instrument(skip(db))]
    pub async fn list(db: &PgPool) -> Result<Vec<OrderType>, AppError> {
        let rows = sqlx::query_as::<_, OrderType>(&format!(
            "SELECT {COLUMNS} FROM order_types ORDER BY id"
        ))
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    #[instrument(skip(db))]
    pub async fn get(db: &PgPool, id: i64) -> Result<OrderType, AppError> {
        sqlx::query_as::<_, OrderType>(&format!("SELECT {COLUMNS} FROM order_types WHERE id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Order type not found")))
    }

    #[instrument(skip(db))]
    pub async fn create(db: &PgPool, dto: CreateOrderTypeDto) -> Result<OrderType, AppError> {
        sqlx::query_as::<_, OrderType>(&format!(
            r#"INSERT INTO order_types (type_name, lookup_code, is_inbound, is_outbound)
               VALUES ($1, $2, $3, $4)
               RETURNING {COLUMNS}"#
        ))
        .bind(&dto.type_name)
        .bind(&dto.lookup_code)
        .bind(dto.is_inbound)
        .bind(dto.is_outbound)
        .fetch_one(db)
        .await
        .map_err(|e| map_write_error(e, DUPLICATE))
    }

    #[instrument(skip(db))]
    pub async fn update(
        db: &PgPool,
        id: i64,
        dto: UpdateOrderTypeDto,
    ) -> Result<OrderType, AppError> {
        let existing = Self::get(db, id).await?;

        sqlx::query_as::<_, OrderType>(&format!(
            r#"UPDATE order_types
               SET type_name = $1, lookup_code = $2, is_inbound = $3, is_outbound = $4,
                   updated_at = NOW()
               WHERE id = $5
               RETURNING {COLUMNS}"#
        ))
        .bind(dto.type_name.unwrap_or(existing.type_name))
        .bind(dto.lookup_code.unwrap_or(existing.lookup_code))
        .bind(dto.is_inbound.unwrap_or(existing.is_inbound))
        .bind(dto.is_outbound.unwrap_or(existing.is_outbound))
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(|e| map_write_error(e, DUPLICATE))
    }

    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM order_types WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| map_delete_error(e, "Order type is used by orders"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Order type not found")));
        }
        Ok(())
    }
}
