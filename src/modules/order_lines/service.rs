//! Order lines carry no project of their own; a line is visible exactly
//! when its order is.

use orderdesk_access::{ProjectSet, scoped_fetch, scoped_fetch_one};
use orderdesk_core::AppError;
use orderdesk_models::{ClearOrderLinesResponse, CreateOrderLineDto, OrderLine, UpdateOrderLineDto};
use sqlx::PgPool;
use tracing::{info, instrument};

use crate::modules::orders::service::OrderService;
use crate::utils::db_errors::map_write_error;

const SELECT_LINE: &str = r#"
    SELECT l.id, l.order_id, l.material_id, l.quantity, l.lot, l.license_plate,
           l.created_at, l.updated_at
    FROM order_lines l
    JOIN orders o ON o.id = l.order_id
"#;

const DUPLICATE: &str = "Order line already exists";

pub struct OrderLineService;

impl OrderLineService {
    #[instrument(skip(db))]
    pub async fn list_visible(
        db: &PgPool,
        projects: &ProjectSet,
    ) -> Result<Vec<OrderLine>, AppError> {
        let lines = scoped_fetch(projects, |ids| async move {
            sqlx::query_as::<_, OrderLine>(&format!(
                "{SELECT_LINE} WHERE o.project_id = ANY($1) ORDER BY l.id"
            ))
            .bind(ids)
            .fetch_all(db)
            .await
        })
        .await?;
        Ok(lines)
    }

    /// Lines of one order; an order the caller cannot see is a 404.
    #[instrument(skip(db))]
    pub async fn list_for_order(
        db: &PgPool,
        projects: &ProjectSet,
        order_id: i64,
    ) -> Result<Vec<OrderLine>, AppError> {
        OrderService::get_visible(db, projects, order_id).await?;

        let lines = sqlx::query_as::<_, OrderLine>(&format!(
            "{SELECT_LINE} WHERE l.order_id = $1 ORDER BY l.id"
        ))
        .bind(order_id)
        .fetch_all(db)
        .await?;
        Ok(lines)
    }

    #[instrument(skip(db))]
    pub async fn get_visible(
        db: &PgPool,
        projects: &ProjectSet,
        id: i64,
    ) -> Result<OrderLine, AppError> {
        scoped_fetch_one(projects, |ids| async move {
            sqlx::query_as::<_, OrderLine>(&format!(
                "{SELECT_LINE} WHERE l.id = $1 AND o.project_id = ANY($2)"
            ))
            .bind(id)
            .bind(ids)
            .fetch_optional(db)
            .await
        })
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Order line not found")))
    }

    #[instrument(skip(db))]
    pub async fn create(
        db: &PgPool,
        projects: &ProjectSet,
        dto: CreateOrderLineDto,
    ) -> Result<OrderLine, AppError> {
        OrderService::get_visible(db, projects, dto.order).await?;

        let id = sqlx::query_scalar::<_, i64>(
            r#"INSERT INTO order_lines (order_id, material_id, quantity, lot, license_plate)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING id"#,
        )
        .bind(dto.order)
        .bind(dto.material)
        .bind(dto.quantity)
        .bind(&dto.lot)
        .bind(&dto.license_plate)
        .fetch_one(db)
        .await
        .map_err(|e| map_write_error(e, DUPLICATE))?;

        Self::get_visible(db, projects, id).await
    }

    #[instrument(skip(db))]
    pub async fn update(
        db: &PgPool,
        projects: &ProjectSet,
        id: i64,
        dto: UpdateOrderLineDto,
    ) -> Result<OrderLine, AppError> {
        let existing = Self::get_visible(db, projects, id).await?;

        sqlx::query(
            r#"UPDATE order_lines
               SET material_id = $1, quantity = $2, lot = $3, license_plate = $4,
                   updated_at = NOW()
               WHERE id = $5"#,
        )
        .bind(dto.material.unwrap_or(existing.material))
        .bind(dto.quantity.unwrap_or(existing.quantity))
        .bind(dto.lot.or(existing.lot))
        .bind(dto.license_plate.or(existing.license_plate))
        .bind(id)
        .execute(db)
        .await
        .map_err(|e| map_write_error(e, DUPLICATE))?;

        Self::get_visible(db, projects, id).await
    }

    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, projects: &ProjectSet, id: i64) -> Result<(), AppError> {
        Self::get_visible(db, projects, id).await?;

        sqlx::query("DELETE FROM order_lines WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(())
    }

    /// Removes every line of a visible order.
    #[instrument(skip(db))]
    pub async fn clear(
        db: &PgPool,
        projects: &ProjectSet,
        order_id: i64,
    ) -> Result<ClearOrderLinesResponse, AppError> {
        OrderService::get_visible(db, projects, order_id).await?;

        let result = sqlx::query("DELETE FROM order_lines WHERE order_id = $1")
            .bind(order_id)
            .execute(db)
            .await?;

        info!(order_id, deleted = result.rows_affected(), "Order lines cleared");
        Ok(ClearOrderLinesResponse {
            order_id,
            deleted: result.rows_affected(),
        })
    }
}
