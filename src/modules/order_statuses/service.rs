use orderdesk_core::AppError;
use orderdesk_models::{CreateOrderStatusDto, OrderStatus, UpdateOrderStatusDto};
use sqlx::PgPool;
use tracing::instrument;

use crate::utils::db_errors::{map_delete_error, map_write_error};

const COLUMNS: &str = "id, status_name, lookup_code, is_terminal, created_at, updated_at";
const DUPLICATE: &str = "An order status with this lookup code already exists";

pub struct OrderStatusService;

impl OrderStatusService {
    #[instrument(skip(db))]
    pub async fn list(db: &PgPool) -> Result<Vec<OrderStatus>, AppError> {
        let rows = sqlx::query_as::<_, OrderStatus>(&format!(
            "SELECT {COLUMNS} FROM order_statuses ORDER BY lookup_code"
        ))
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    #[instrument(skip(db))]
    pub async fn get(db: &PgPool, id: i64) -> Result<OrderStatus, AppError> {
        sqlx::query_as::<_, OrderStatus>(&format!(
            "SELECT {COLUMNS} FROM order_statuses WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Order status not found")))
    }

    #[instrument(skip(db))]
    pub async fn create(db: &PgPool, dto: CreateOrderStatusDto) -> Result<OrderStatus, AppError> {
        sqlx::query_as::<_, OrderStatus>(&format!(
            r#"INSERT INTO order_statuses (status_name, lookup_code, is_terminal)
               VALUES ($1, $2, $3)
               RETURNING {COLUMNS}"#
        ))
        .bind(&dto.status_name)
        .bind(&dto.lookup_code)
        .bind(dto.is_terminal)
        .fetch_one(db)
        .await
        .map_err(|e| map_write_error(e, DUPLICATE))
    }

    #[instrument(skip(db))]
    pub async fn update(
        db: &PgPool,
        id: i64,
        dto: UpdateOrderStatusDto,
    ) -> Result<OrderStatus, AppError> {
        let existing = Self::get(db, id).await?;

        sqlx::query_as::<_, OrderStatus>(&format!(
            r#"UPDATE order_statuses
               SET status_name = $1, lookup_code = $2, is_terminal = $3, updated_at = NOW()
               WHERE id = $4
               RETURNING {COLUMNS}"#
        ))
        .bind(dto.status_name.unwrap_or(existing.status_name))
        .bind(dto.lookup_code.unwrap_or(existing.lookup_code))
        .bind(dto.is_terminal.unwrap_or(existing.is_terminal))
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(|e| map_write_error(e, DUPLICATE))
    }

    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM order_statuses WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| map_delete_error(e, "Order status is used by orders"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Order status not found")));
        }
        Ok(())
    }
}
