use orderdesk_core::AppError;
use orderdesk_models::{CreateOrderClassDto, OrderClass, UpdateOrderClassDto};
use sqlx::PgPool;
use tracing::instrument;

use crate::utils::db_errors::{map_delete_error, map_write_error};

const COLUMNS: &str = "id, class_name, lookup_code, order_type_id, created_at, updated_at";
const DUPLICATE: &str = "An order class with this lookup code already exists";

pub struct OrderClassService;

impl OrderClassService {
    #[instrument(skip(db))]
    pub async fn list(db: &PgPool) -> Result<Vec<OrderClass>, AppError> {
        let rows = sqlx::query_as::<_, OrderClass>(&format!(
            "SELECT {COLUMNS} FROM order_classes ORDER BY id"
        ))
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    #[instrument(skip(db))]
    pub async fn get(db: &PgPool, id: i64) -> Result<OrderClass, AppError> {
        sqlx::query_as::<_, OrderClass>(&format!(
            "SELECT {COLUMNS} FROM order_classes WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Order class not found")))
    }

    #[instrument(skip(db))]
    pub async fn create(db: &PgPool, dto: CreateOrderClassDto) -> Result<OrderClass, AppError> {
        sqlx::query_as::<_, OrderClass>(&format!(
            r#"INSERT INTO order_classes (class_name, lookup_code, order_type_id)
               VALUES ($1, $2, $3)
               RETURNING {COLUMNS}"#
        ))
        .bind(&dto.class_name)
        .bind(&dto.lookup_code)
        .bind(dto.order_type)
        .fetch_one(db)
        .await
        .map_err(|e| map_write_error(e, DUPLICATE))
    }

    #[instrument(skip(db))]
    pub async fn update(
        db: &PgPool,
        id: i64,
        dto: UpdateOrderClassDto,
    ) -> Result<OrderClass, AppError> {
        let existing = Self::get(db, id).await?;

        sqlx::query_as::<_, OrderClass>(&format!(
            r#"UPDATE order_classes
               SET class_name = $1, lookup_code = $2, order_type_id = $3, updated_at = NOW()
               WHERE id = $4
               RETURNING {COLUMNS}"#
        ))
        .bind(dto.class_name.unwrap_or(existing.class_name))
        .bind(dto.lookup_code.unwrap_or(existing.lookup_code))
        .bind(dto.order_type.or(existing.order_type))
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(|e| map_write_error(e, DUPLICATE))
    }

    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM order_classes WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| map_delete_error(e, "Order class is used by orders"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Order class not found")));
        }
        Ok(())
    }
}
