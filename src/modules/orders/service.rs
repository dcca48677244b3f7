use orderdesk_access::{ProjectSet, is_visible, scoped_fetch, scoped_fetch_one, visible};
use orderdesk_config::ExportConfig;
use orderdesk_core::AppError;
use orderdesk_models::{
    CreateOrderDto, DEFAULT_ORDER_STATUS_LOOKUP, Order, OrderExportResponse, UpdateOrderDto,
};
use sqlx::PgPool;
use tracing::{instrument, warn};

use crate::modules::carriers::service::CarrierService;
use crate::modules::orders::export::OrderExporter;
use crate::modules::warehouses::service::WarehouseService;
use crate::utils::auth_helpers::ensure_member;
use crate::utils::db_errors::{map_delete_error, map_write_error};

const SELECT_ORDER: &str = r#"
    SELECT o.id, o.lookup_code_order, o.lookup_code_shipment, o.reference_number,
           o.order_type_id, o.order_class_id, o.project_id, o.warehouse_id, o.contact_id,
           o.shipping_address_id, o.billing_address_id, o.carrier_id, o.service_type_id,
           o.expected_delivery_date, o.delivery_date, o.notes, o.order_status_id, s.status_name AS order_status_name,
           o.file_generated, o.file_generated_at, o.created_at, o.updated_at
    FROM orders o
    JOIN order_statuses s ON s.id = o.order_status_id
"#;

const DUPLICATE: &str = "An order with this lookup code already exists";

pub fn generated_lookup_code(id: i64) -> String {
    format!("ORD-{id:06}")
}

pub struct OrderService;

impl OrderService {
    #[instrument(skip(db))]
    pub async fn list_visible(db: &PgPool, projects: &ProjectSet) -> Result<Vec<Order>, AppError> {
        let rows = scoped_fetch(projects, |ids| async move {
            sqlx::query_as::<_, Order>(&format!(
                "{SELECT_ORDER} WHERE o.project_id = ANY($1) ORDER BY o.id"
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
    ) -> Result<Order, AppError> {
        scoped_fetch_one(projects, |_| Self::fetch(db, id))
            .await?
            .filter(|o| is_visible(o, projects))
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Order not found")))
    }

    async fn fetch(db: &PgPool, id: i64) -> Result<Option<Order>, sqlx::Error> {
        sqlx::query_as::<_, Order>(&format!("{SELECT_ORDER} WHERE o.id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await
    }

    /// Warehouse and carrier must be visible to the caller, like the project.
    async fn check_references(
        db: &PgPool,
        projects: &ProjectSet,
        warehouse: Option<i64>,
        carrier: Option<i64>,
    ) -> Result<(), AppError> {
        if let Some(id) = warehouse {
            WarehouseService::get_visible(db, projects, id).await?;
        }
        if let Some(id) = carrier {
            CarrierService::get_visible(db, projects, id).await?;
        }
        Ok(())
    }

    async fn default_status(db: &PgPool) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>("SELECT id FROM order_statuses WHERE lookup_code = $1")
            .bind(DEFAULT_ORDER_STATUS_LOOKUP)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| {
                AppError::internal_error(format!(
                    "Default order status '{DEFAULT_ORDER_STATUS_LOOKUP}' is missing"
                ))
            })
    }

    async fn is_terminal(db: &PgPool, status_id: i64) -> Result<bool, AppError> {
        let terminal =
            sqlx::query_scalar::<_, bool>("SELECT is_terminal FROM order_statuses WHERE id = $1")
                .bind(status_id)
                .fetch_optional(db)
                .await?;
        Ok(terminal.unwrap_or(false))
    }

    /// Generates the order file the first time an order reaches a terminal
    /// status. A failed export leaves the order saved with
    /// `file_generated = false`.
    async fn export_if_terminal(
        db: &PgPool,
        export: &ExportConfig,
        order: &Order,
    ) -> Result<bool, AppError> {
        if order.file_generated || !Self::is_terminal(db, order.order_status).await? {
            return Ok(false);
        }
        match OrderExporter::export(db, export, order.id).await {
            Ok(_) => Ok(true),
            Err(e) => {
                warn!(order_id = order.id, error = %e.message(), "Automatic export skipped");
                Ok(false)
            }
        }
    }

    #[instrument(skip(db, export))]
    pub async fn create(
        db: &PgPool,
        export: &ExportConfig,
        projects: &ProjectSet,
        dto: CreateOrderDto,
    ) -> Result<Order, AppError> {
        ensure_member(projects, dto.project)?;
        Self::check_references(db, projects, dto.warehouse, dto.carrier).await?;

        let status = match dto.order_status {
            Some(id) => id,
            None => Self::default_status(db).await?,
        };

        let mut tx = db.begin().await?;
        let id = sqlx::query_scalar::<_, i64>(
            r#"INSERT INTO orders (lookup_code_order, reference_number, order_type_id,
                   order_class_id, project_id, warehouse_id, contact_id, shipping_address_id,
                   billing_address_id, carrier_id, service_type_id, expected_delivery_date,
                   notes, order_status_id, lookup_code_shipment, delivery_date)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
               RETURNING id"#,
        )
        .bind(&dto.lookup_code_order)
        .bind(&dto.reference_number)
        .bind(dto.order_type)
        .bind(dto.order_class)
        .bind(dto.project)
        .bind(dto.warehouse)
        .bind(dto.contact)
        .bind(dto.shipping_address)
        .bind(dto.billing_address)
        .bind(dto.carrier)
        .bind(dto.service_type)
        .bind(dto.expected_delivery_date)
        .bind(&dto.notes)
        .bind(status)
        .bind(&dto.lookup_code_shipment)
        .bind(dto.delivery_date)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_write_error(e, DUPLICATE))?;

        if dto.lookup_code_order.is_none() {
            sqlx::query("UPDATE orders SET lookup_code_order = $1 WHERE id = $2")
                .bind(generated_lookup_code(id))
                .bind(id)
                .execute(&mut *tx)
                .await
                .map_err(|e| map_write_error(e, DUPLICATE))?;
        }
        tx.commit().await?;

        let order = Self::get_visible(db, projects, id).await?;
        if Self::export_if_terminal(db, export, &order).await? {
            return Self::get_visible(db, projects, id).await;
        }
        Ok(order)
    }

    #[instrument(skip(db, export))]
    pub async fn update(
        db: &PgPool,
        export: &ExportConfig,
        projects: &ProjectSet,
        id: i64,
        dto: UpdateOrderDto,
    ) -> Result<Order, AppError> {
        let existing = Self::get_visible(db, projects, id).await?;

        if let Some(project) = dto.project {
            ensure_member(projects, project)?;
        }
        Self::check_references(db, projects, dto.warehouse, dto.carrier).await?;

        sqlx::query(
            r#"UPDATE orders
               SET lookup_code_order = $1, reference_number = $2, order_type_id = $3,
                   order_class_id = $4, project_id = $5, warehouse_id = $6, contact_id = $7,
                   shipping_address_id = $8, billing_address_id = $9, carrier_id = $10,
                   service_type_id = $11, expected_delivery_date = $12, notes = $13,
                   order_status_id = $14, lookup_code_shipment = $15, delivery_date = $16,
                   updated_at = NOW()
               WHERE id = $17"#,
        )
        .bind(dto.lookup_code_order.or(existing.lookup_code_order))
        .bind(dto.reference_number.or(existing.reference_number))
        .bind(dto.order_type.unwrap_or(existing.order_type))
        .bind(dto.order_class.or(existing.order_class))
        .bind(dto.project.unwrap_or(existing.project))
        .bind(dto.warehouse.or(existing.warehouse))
        .bind(dto.contact.or(existing.contact))
        .bind(dto.shipping_address.or(existing.shipping_address))
        .bind(dto.billing_address.or(existing.billing_address))
        .bind(dto.carrier.or(existing.carrier))
        .bind(dto.service_type.or(existing.service_type))
        .bind(dto.expected_delivery_date.or(existing.expected_delivery_date))
        .bind(dto.notes.or(existing.notes))
        .bind(dto.order_status.unwrap_or(existing.order_status))
        .bind(dto.lookup_code_shipment.or(existing.lookup_code_shipment))
        .bind(dto.delivery_date.or(existing.delivery_date))
        .bind(id)
        .execute(db)
        .await
        .map_err(|e| map_write_error(e, DUPLICATE))?;

        let order = Self::get_visible(db, projects, id).await?;
        if Self::export_if_terminal(db, export, &order).await? {
            return Self::get_visible(db, projects, id).await;
        }
        Ok(order)
    }

    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, projects: &ProjectSet, id: i64) -> Result<(), AppError> {
        Self::get_visible(db, projects, id).await?;

        sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| map_delete_error(e, "Order is still referenced"))?;

        Ok(())
    }

    /// Regenerates the order file on demand.
    #[instrument(skip(db, export))]
    pub async fn export(
        db: &PgPool,
        export: &ExportConfig,
        projects: &ProjectSet,
        id: i64,
    ) -> Result<OrderExportResponse, AppError> {
        Self::get_visible(db, projects, id).await?;
        OrderExporter::export(db, export, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_lookup_code_is_zero_padded() {
        assert_eq!(generated_lookup_code(42), "ORD-000042");
        assert_eq!(generated_lookup_code(1234567), "ORD-1234567");
    }

    #[test]
    fn test_generated_lookup_code_is_a_valid_file_name() {
        assert_eq!(
            OrderExporter::file_name(&generated_lookup_code(7)).unwrap(),
            "order_ORD-000007.csv"
        );
    }
}
